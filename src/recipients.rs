use std::fmt::{Debug, Formatter};
use std::path::Path;

use crate::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum ReadError {
    #[error("{0} does not have a .csv extension")]
    NotCsv(String),
    // Read and decode failures share one generic user-facing message; the
    // cause chain stays available for the logs
    #[error("Error reading the file")]
    Io(#[source] std::io::Error),
    #[error("Error reading the file")]
    NotText(#[source] std::string::FromUtf8Error),
}

impl Debug for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Pulls every comma- or newline-delimited token out of a file's text, in
/// encounter order, trimmed, with empty fragments dropped.
///
/// No deduplication and no validation happens here: a malformed token is
/// still a candidate, and the remote service decides which candidates are
/// deliverable. This tolerates one-address-per-line files, one-per-column
/// files, and mixtures of the two.
pub fn extract_email_candidates(content: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    for row in content.lines() {
        for column in row.split(',') {
            let candidate = column.trim();
            if !candidate.is_empty() {
                candidates.push(candidate.to_owned());
            }
        }
    }
    candidates
}

/// A recipient file picked by the user, name and text content together, ready
/// to travel as the binary part of the outbound payload.
#[derive(Debug, Clone)]
pub struct CsvAttachment {
    file_name: String,
    content: String,
}

impl CsvAttachment {
    /// Reads a recipient file from disk.
    ///
    /// The name filter mirrors the only gate the submission places on files:
    /// the extension must be `.csv`, matched case-insensitively, with no
    /// sniffing of the content itself. The bytes must decode as text; a file
    /// that cannot be decoded fails as a whole, never partially.
    pub async fn load(path: &Path) -> Result<Self, ReadError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if !has_csv_extension(&file_name) {
            return Err(ReadError::NotCsv(file_name));
        }

        let bytes = tokio::fs::read(path).await.map_err(ReadError::Io)?;
        let content = String::from_utf8(bytes).map_err(ReadError::NotText)?;

        Ok(Self { file_name, content })
    }

    /// Builds an attachment from text that has already been read, applying
    /// the same extension filter as [`CsvAttachment::load`].
    pub fn from_text(file_name: String, content: String) -> Result<Self, ReadError> {
        if !has_csv_extension(&file_name) {
            return Err(ReadError::NotCsv(file_name));
        }
        Ok(Self { file_name, content })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The candidate addresses found in the file, for display and logging;
    /// the file itself still travels verbatim.
    pub fn email_candidates(&self) -> Vec<String> {
        extract_email_candidates(&self.content)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.content.into_bytes()
    }
}

fn has_csv_extension(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".csv")
}
