//! Custom error types for hotpath.
//!
//! Explicit enum error types only. No `Box<dyn Error>`, no `anyhow::Result`
//! inside the library - all errors are strongly typed.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the hotpath library.
#[derive(Debug, Error)]
pub enum HotpathError {
    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Hard validation error: {0}")]
    HardValidation(#[from] HardValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // Foreign Kernel Errors - Never Fatal, Narrow to Native-Only
    // =========================================================================
    #[error("Foreign kernel unavailable: {0}")]
    ForeignUnavailable(#[from] ForeignUnavailable),

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Validation errors for user-supplied benchmark settings.
#[derive(Debug, Error)]
pub enum HardValidationError {
    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Reasons the capability probe could not hand out a foreign kernel handle.
#[derive(Debug, Error)]
pub enum ForeignUnavailable {
    #[error("no kernel library found (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("failed to load {path}: {reason}")]
    LoadFailed { path: PathBuf, reason: String },

    #[error("symbol '{symbol}' missing from {path}: {reason}")]
    MissingSymbol {
        path: PathBuf,
        symbol: &'static str,
        reason: String,
    },

    #[error("{kernel}{input} disagrees with native: native={native:#018x}, foreign={foreign:#018x}")]
    Mismatch {
        kernel: &'static str,
        input: String,
        native: u64,
        foreign: u64,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias using HotpathError.
pub type HotpathResult<T> = Result<T, HotpathError>;
