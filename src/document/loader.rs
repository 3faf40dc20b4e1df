use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

pub const ACCEPTED_EXTENSIONS: [&str; 8] =
    [".txt", ".md", ".html", ".rtf", ".odt", ".doc", ".docx", ".pdf"];

const TEXT_EXTENSIONS: [&str; 3] = [".txt", ".md", ".html"];

pub const MAX_FILE_SIZE_MB: u64 = 25;
pub const MAX_FILE_SIZE_BYTES: u64 = MAX_FILE_SIZE_MB * 1024 * 1024;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{name} is not supported. Please upload a supported file type: {}.", ACCEPTED_EXTENSIONS.join(", "))]
    UnsupportedType { name: String },

    #[error("File size cannot exceed {} MB ({size} bytes given).", MAX_FILE_SIZE_MB)]
    TooLarge { size: u64 },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DocumentError {
    /// Short heading shown above the message.
    pub fn title(&self) -> &'static str {
        match self {
            DocumentError::UnsupportedType { .. } => "Invalid File Type",
            DocumentError::TooLarge { .. } => "File Too Large",
            DocumentError::Io { .. } => "Error Processing File",
        }
    }
}

/// How the content of an accepted file is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Read as text.
    Text,
    /// Not parsed; stands in with placeholder text.
    Binary,
}

/// A file that passed type and size checks.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub kind: DocumentKind,
}

impl DocumentFile {
    pub fn read_content(&self) -> Result<String, DocumentError> {
        match self.kind {
            DocumentKind::Text => {
                let bytes = fs::read(&self.path).map_err(|source| DocumentError::Io {
                    path: self.path.clone(),
                    source,
                })?;
                debug!(file = %self.name, bytes = bytes.len(), "read text document");
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            DocumentKind::Binary => {
                warn!(
                    file = %self.name,
                    size = self.size,
                    "parsing this file type is not supported, using placeholder content"
                );
                Ok(placeholder_content(&self.name))
            }
        }
    }
}

/// Checks that `path` names a supported file within the size limit.
pub fn validate_file<P: AsRef<Path>>(path: P) -> Result<DocumentFile, DocumentError> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let kind = classify(&name).ok_or_else(|| DocumentError::UnsupportedType { name: name.clone() })?;

    let metadata = fs::metadata(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_file() {
        return Err(DocumentError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }

    if metadata.len() > MAX_FILE_SIZE_BYTES {
        return Err(DocumentError::TooLarge {
            size: metadata.len(),
        });
    }

    Ok(DocumentFile {
        path: path.to_path_buf(),
        name,
        size: metadata.len(),
        kind,
    })
}

/// Validates and reads in one step.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<String, DocumentError> {
    validate_file(path)?.read_content()
}

fn classify(name: &str) -> Option<DocumentKind> {
    let lower = name.to_lowercase();
    if !ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return None;
    }
    if TEXT_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        Some(DocumentKind::Text)
    } else {
        Some(DocumentKind::Binary)
    }
}

fn placeholder_content(name: &str) -> String {
    format!(
        "Content from file: {}. Full parsing for this file type would require a dedicated library or server-side processing.",
        name
    )
}
