//! `.editorconfig` cascade resolution.
//!
//! This module handles:
//! - Ancestor discovery from a target file up to the filesystem root
//! - Line-oriented parsing of `[section]` headers and `key = value` pairs
//! - Root-marker bounding and nearest-wins precedence
//!
//! Resolution never fails. A broken or unreadable file in some parent
//! directory simply contributes nothing.

pub mod cascade;
pub mod fs;
pub mod parser;
pub mod schema;

pub use cascade::{
	ConfigSource, EDITORCONFIG_FILE, Resolution, ResolvedProperty, Resolver, normalize_lexically,
	resolve,
};
pub use fs::{ConfigFs, OsFs};
pub use parser::{Assignment, ParsedSource, parse_source};
pub use schema::{END_OF_LINE, INSERT_FINAL_NEWLINE, PropertyKey, Schema};
