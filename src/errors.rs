use thiserror::Error;

/// Errors that can occur while converting a PLY file.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The header is malformed or lacks a required attribute. Aborts the conversion.
    #[error("Invalid PLY file: {0}")]
    Format(String),
    /// A record does not match the layout it is written with.
    #[error("Inconsistent record: {0}")]
    Inconsistent(String),
    /// A single vertex line could not be decoded.
    ///
    /// Never aborts a conversion, the line is skipped and reported instead.
    #[error("Line {line}: skipping invalid line '{content}' ({message})")]
    LineParse {
        /// 1-based line number in the input file.
        line: usize,
        /// The offending line, trimmed.
        content: String,
        /// Underlying parse error.
        message: String,
    },
}

impl ConvertError {
    /// True for errors that abort the whole conversion because of the input's header.
    pub fn is_format(&self) -> bool {
        matches!(self, ConvertError::Format(_))
    }
}

/// A specialized `Result` type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
