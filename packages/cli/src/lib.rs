//! Clausewise CLI - Contract clause analysis from the command line.
//!
//! # Example
//!
//! ```
//! use clausewise_cli::reader::clean_text;
//!
//! assert_eq!(clean_text("1. Scope \r\n\r\n  2. Fees"), "1. Scope\n2. Fees");
//! ```
//!
//! # Architecture
//!
//! - [`reader`]: Document loading and text cleanup
//! - [`output`]: Text and JSON rendering
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod error;
pub mod output;
pub mod reader;

pub use error::{CliError, Result};
pub use reader::{clean_text, read_document};
