//! Document loading and text cleanup.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CliError, Result};

/// Extensions of binary document formats that need an external extractor.
const BINARY_EXTENSIONS: &[&str] = &["pdf", "docx", "doc"];

/// Runs of non-ASCII characters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NON_ASCII: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\x00-\x7F]+").expect("valid regex"));

/// Horizontal whitespace, i.e. whitespace other than a line feed.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));

/// A line break with any surrounding whitespace, including blank lines.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\n\s*").expect("valid regex"));

/// Read a plain-text document and clean it with [`clean_text`].
///
/// # Errors
///
/// Returns `CliError::FileNotFound` for a missing file,
/// `CliError::UnsupportedFormat` for PDF and Word documents, and
/// `CliError::Io` if the file is not readable UTF-8 text.
pub fn read_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if BINARY_EXTENSIONS.contains(&extension.as_str()) {
        return Err(CliError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        });
    }

    let raw = fs::read_to_string(path)?;
    let text = clean_text(&raw);
    tracing::debug!(path = %path.display(), raw = raw.len(), cleaned = text.len(), "Read document");
    Ok(text)
}

/// Normalize extracted document text.
///
/// Non-ASCII runs become a single space, horizontal whitespace collapses to
/// one space, and each run of line breaks (blank lines included) becomes a
/// single newline. Line starts survive so headings can still be detected.
pub fn clean_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = NON_ASCII.replace_all(&text, " ");
    let text = HORIZONTAL_WHITESPACE.replace_all(&text, " ");
    let text = LINE_BREAKS.replace_all(&text, "\n");
    text.trim().to_string()
}
