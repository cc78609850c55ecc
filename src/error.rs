//! # Error Types
//!
//! This module defines error types used throughout the newhome library.

use thiserror::Error;

/// Main error type for newhome operations
#[derive(Debug, Error)]
pub enum NewHomeError {
    /// Server-level errors (bind, accept, shutdown)
    #[error("Server error: {0}")]
    Server(String),

    /// Login rejected (any non-success response, no further distinction)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// PDF generation failed (remote call or local render)
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// Image decoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Unknown form field name
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
