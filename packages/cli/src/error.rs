//! Error types for the command-line interface.

use std::path::PathBuf;

use clausewise_assistant::AssistantError;
use clausewise_core::AnalysisError;
use thiserror::Error;

/// Main error type for the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input document does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Input document is a binary format that needs an external extractor.
    #[error("Unsupported document format '.{extension}' for {}: convert it to plain text first", .path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Clause analysis failed to start.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Summarization or question answering failed.
    #[error(transparent)]
    Assistant(#[from] AssistantError),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
