/*!
 * Error types for the lectura application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a speech synthesis service
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// Error when making an API request fails
    #[error("Synthesis request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse synthesis response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("Synthesis API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to quota or rate limiting
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The run was cancelled between chunks
    #[error("Synthesis cancelled after {completed_chunks} of {total_chunks} chunks")]
    Cancelled {
        /// Chunks synthesized before cancellation
        completed_chunks: usize,
        /// Total chunks in the run
        total_chunks: usize,
    },
}

impl SynthesisError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Connection failures, quota trips and server-side errors are transient;
    /// authentication and malformed-request errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionError(_) | Self::QuotaExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

/// Errors that can occur during document text acquisition
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file does not exist or is not a regular file
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The file extension maps to no supported document kind
    #[error("Unsupported file type '{extension}'. Currently, only .txt and .pdf files are supported.")]
    UnsupportedType {
        /// The offending extension (or "<none>")
        extension: String,
    },

    /// Text extraction from a PDF failed
    #[error("PDF text extraction failed: {0}")]
    PdfExtraction(String),

    /// The document yielded no extractable text
    #[error("Document contains no extractable text: {0}")]
    EmptyText(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from document acquisition
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from speech synthesis
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
