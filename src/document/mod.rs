//! Document intake: type and size checks, then text extraction.

mod loader;

pub use loader::{
    ACCEPTED_EXTENSIONS, DocumentError, DocumentFile, DocumentKind, MAX_FILE_SIZE_BYTES,
    MAX_FILE_SIZE_MB, load_document, validate_file,
};
