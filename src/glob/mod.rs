//! Glob pattern compilation.
//!
//! This module handles:
//! - Brace groups, including nested ones, lowered to regex alternations
//! - Tokenizing wildcards, character classes and escapes
//! - Matching normalized `/`-separated paths in full-path or basename mode

pub mod brace;
pub mod pattern;
pub mod token;

pub use brace::split_pattern_list;
pub use pattern::{MatchMode, Pattern, PatternSet, normalize_path};
pub use token::{CharClass, ClassItem, MAX_GROUP_DEPTH, Token, tokenize};
