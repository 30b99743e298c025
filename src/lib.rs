//! eol-guardian - line-ending checks driven by `.editorconfig` cascades.
//!
//! This library provides the core functionality for eol-guardian, including:
//! - Glob pattern compilation with brace expansion and character classes
//! - `.editorconfig` discovery and cascade resolution with provenance
//! - Line-ending detection, conversion and expectation rules
//! - Settings file parsing and cascade discovery
//!
//! # Example
//!
//! ```no_run
//! use eol_guardian::editorconfig::{END_OF_LINE, Schema, resolve};
//! use eol_guardian::glob::Pattern;
//! use std::path::Path;
//!
//! assert!(Pattern::compile("*.{js,ts}").matches("src/app.ts"));
//!
//! let resolution = resolve(Path::new("/repo/scripts/run.bat"), &Schema::eol());
//! if let Some(property) = resolution.get(END_OF_LINE) {
//!     println!("{} from {}", property.value, property.source.display());
//! }
//! ```

pub mod config;
pub mod editorconfig;
pub mod eol;
pub mod error;
pub mod glob;
pub mod workspace;

pub use error::{GuardError, Result};
