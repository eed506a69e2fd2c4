use std::path::Path;

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::info;

use sustindex_core::ids::AnswerId;
use sustindex_core::models::answer::{AnswerSubmission, SavedAnswer};
use sustindex_core::models::document::Document;

use crate::client::{ApiClient, decode};
use crate::error::ApiError;

/// A file queued for upload, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Document title; the file name unless the user chose another.
    pub title: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        Self {
            title: file_name.clone(),
            file_name,
            bytes,
        }
    }

    /// Read a file from disk, titled by its file name.
    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl ApiClient {
    pub async fn save_answer(&self, submission: &AnswerSubmission) -> Result<SavedAnswer, ApiError> {
        info!(
            attempt_id = %submission.attempt,
            question_id = %submission.question,
            "saving answer"
        );
        self.send_json(Method::POST, "answers/", submission).await
    }

    /// Attach a document to an answer that already exists on the backend.
    pub async fn upload_document(
        &self,
        answer: AnswerId,
        file: &UploadFile,
    ) -> Result<Document, ApiError> {
        info!(answer_id = %answer, file = %file.file_name, bytes = file.size(), "uploading document");
        let form = Form::new()
            .text("answer", answer.to_string())
            .text("title", file.title.clone())
            .part(
                "file",
                Part::bytes(file.bytes.clone()).file_name(file.file_name.clone()),
            );
        let resp = self
            .request(Method::POST, "documents/")?
            .multipart(form)
            .send()
            .await?;
        decode(resp).await
    }
}
