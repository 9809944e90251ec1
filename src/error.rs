//! Error types for the docxgen library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docxgen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or inspecting a document package.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The output archive could not be written.
    #[error("failed to write package to {}: {source}", .path.display())]
    PackageWrite {
        /// Output location the archive was being written to
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// Error reading a ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Rendered markup is not well-formed.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The assembled package breaks a structural invariant.
    #[error("Invalid package: {0}")]
    InvalidPackage(String),

    /// Content source data could not be decoded.
    #[error("Invalid content source: {0}")]
    InvalidSource(String),

    /// A metadata timestamp cannot be stored in the archive.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A required package part is missing.
    #[error("Missing part: {0}")]
    MissingPart(String),
}

impl Error {
    /// Wrap an I/O failure that happened while writing the archive to `path`.
    pub fn package_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::PackageWrite {
            path: path.into(),
            source,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidSource(err.to_string())
    }
}
