use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line-oriented reader over stdin.
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `label` and read one line. `None` at end of input.
    pub async fn ask(&mut self, label: &str) -> eyre::Result<Option<String>> {
        print!("{label}");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?)
    }

    /// Like [`ask`](Self::ask), but end of input or a blank answer is an
    /// error.
    pub async fn require(&mut self, label: &str) -> eyre::Result<String> {
        match self.ask(label).await? {
            Some(line) if !line.trim().is_empty() => Ok(line.trim().to_string()),
            _ => Err(eyre::eyre!("{} is required", label.trim_end_matches([':', ' ']))),
        }
    }
}
