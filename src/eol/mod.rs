//! Line-ending detection, conversion and expectations.
//!
//! This module handles:
//! - Counting the line endings present in a text
//! - Converting text to a target line ending
//! - Trailing newline checks
//! - Deciding which line ending a file is expected to use

pub mod expected;
pub mod overrides;

pub use expected::{ExpectedEol, ExpectedEolResult, ExpectedSource, resolve_expected_eol};
pub use overrides::{CompiledOverride, compile_overrides, find_matching_override};

use serde::Deserialize;
use std::fmt;

/// A concrete line ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EolKind {
	#[serde(alias = "LF")]
	Lf,
	#[serde(alias = "CRLF")]
	Crlf,
}

impl EolKind {
	/// Parse `lf` or `crlf`, ignoring case.
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"lf" => Some(EolKind::Lf),
			"crlf" => Some(EolKind::Crlf),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			EolKind::Lf => "lf",
			EolKind::Crlf => "crlf",
		}
	}

	/// The characters written for this line ending.
	pub fn sequence(&self) -> &'static str {
		match self {
			EolKind::Lf => "\n",
			EolKind::Crlf => "\r\n",
		}
	}
}

impl fmt::Display for EolKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Line-ending counts for a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EolStats {
	pub lf: usize,
	pub crlf: usize,
	/// Bare `\r` not followed by `\n`.
	pub cr: usize,
}

impl EolStats {
	pub fn scan(text: &str) -> Self {
		let mut stats = EolStats::default();
		let bytes = text.as_bytes();
		let mut index = 0;

		while index < bytes.len() {
			match bytes[index] {
				b'\r' if bytes.get(index + 1) == Some(&b'\n') => {
					stats.crlf += 1;
					index += 1;
				}
				b'\r' => stats.cr += 1,
				b'\n' => stats.lf += 1,
				_ => {}
			}
			index += 1;
		}

		stats
	}

	/// The more frequent of LF and CRLF; LF on a tie, `None` without any
	/// line breaks.
	pub fn dominant(&self) -> Option<EolKind> {
		if self.lf == 0 && self.crlf == 0 {
			None
		} else if self.crlf > self.lf {
			Some(EolKind::Crlf)
		} else {
			Some(EolKind::Lf)
		}
	}

	/// More than one kind of line ending is present.
	pub fn is_mixed(&self) -> bool {
		[self.lf, self.crlf, self.cr]
			.iter()
			.filter(|count| **count > 0)
			.count() > 1
	}

	/// Whether every line break in the text is already `target`.
	pub fn is_uniform(&self, target: EolKind) -> bool {
		match target {
			EolKind::Lf => self.crlf == 0 && self.cr == 0,
			EolKind::Crlf => self.lf == 0 && self.cr == 0,
		}
	}
}

/// Rewrite every `\r\n`, `\r` and `\n` in `text` as `target`.
pub fn convert_text_eol(text: &str, target: EolKind) -> String {
	let sequence = target.sequence();
	let mut converted = String::with_capacity(text.len());
	let mut chars = text.chars().peekable();

	while let Some(c) = chars.next() {
		match c {
			'\r' => {
				if chars.peek() == Some(&'\n') {
					chars.next();
				}
				converted.push_str(sequence);
			}
			'\n' => converted.push_str(sequence),
			other => converted.push(other),
		}
	}

	converted
}

/// Empty text counts as terminated.
pub fn has_final_newline(text: &str) -> bool {
	text.is_empty() || text.ends_with('\n')
}

/// Append one `eol` if `text` does not already end with a newline.
pub fn ensure_final_newline(text: &str, eol: EolKind) -> String {
	let mut result = text.to_string();
	if !has_final_newline(text) {
		result.push_str(eol.sequence());
	}
	result
}
