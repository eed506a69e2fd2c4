use std::collections::BTreeMap;

use sustindex_api::answers::UploadFile;
use sustindex_core::ids::QuestionId;

/// Files queued per question, uploaded once that question's answer exists
/// on the backend.
#[derive(Debug, Clone, Default)]
pub struct PendingFiles {
    entries: BTreeMap<QuestionId, Vec<UploadFile>>,
}

impl PendingFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, question: QuestionId, file: UploadFile) {
        self.entries.entry(question).or_default().push(file);
    }

    /// Remove the file at `index`; the question's entry goes away with its
    /// last file.
    pub fn remove(&mut self, question: QuestionId, index: usize) -> Option<UploadFile> {
        let files = self.entries.get_mut(&question)?;
        if index >= files.len() {
            return None;
        }
        let removed = files.remove(index);
        if files.is_empty() {
            self.entries.remove(&question);
        }
        Some(removed)
    }

    pub fn get(&self, question: QuestionId) -> &[UploadFile] {
        self.entries
            .get(&question)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Drop the first queued file for `question` once it has been uploaded.
    pub(crate) fn pop_front(&mut self, question: QuestionId) {
        self.remove(question, 0);
    }

    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}
