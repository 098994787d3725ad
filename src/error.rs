//! Error types for the PDF-to-HTML conversion core.

use thiserror::Error;

/// Primary error type for conversion operations.
///
/// The state classifier itself is total and never fails; errors surface only
/// when flushing a line to the HTML sink.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid conversion parameter: {0}")]
    InvalidParam(String),
}

/// Convenience Result type alias for ConvertError.
pub type Result<T> = std::result::Result<T, ConvertError>;
