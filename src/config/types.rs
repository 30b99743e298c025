use crate::eol::{EolKind, ExpectedEol};
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level contents of a `.eolguard.toml` file.
///
/// Scalars are optional here so that a nearer file only overrides what it
/// actually sets; defaults are applied once, in [`Settings`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SettingsFile {
	/// If true, stop the upward search at this file (the user file is
	/// still consulted).
	#[serde(default)]
	pub root: bool,

	/// Line ending to expect when nothing more specific applies.
	pub expected_eol: Option<ExpectedEol>,

	/// Whether `.editorconfig` files take part.
	pub respect_editorconfig: Option<bool>,

	/// Only add missing trailing newlines, never convert line endings.
	pub final_newline_only: Option<bool>,

	/// Glob patterns for files to skip.
	#[serde(default)]
	pub ignore: Vec<String>,

	/// Per-pattern line endings. First matching override wins.
	#[serde(default)]
	pub overrides: Vec<EolOverride>,
}

/// A line ending forced on files matching a glob.
#[derive(Debug, Clone, Deserialize)]
pub struct EolOverride {
	/// Glob matched against the path relative to the working directory.
	pub pattern: String,

	pub eol: EolKind,

	/// Free text shown next to the override in reports.
	pub description: Option<String>,
}

/// A settings file with the path it was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
	pub settings: SettingsFile,
	pub path: PathBuf,
}

/// An override with the settings file it came from.
#[derive(Debug, Clone)]
pub struct OverrideWithSource {
	pub entry: EolOverride,
	pub source: PathBuf,
}

/// Effective settings after merging the cascade and applying defaults.
#[derive(Debug, Clone)]
pub struct Settings {
	pub expected_eol: ExpectedEol,
	pub respect_editorconfig: bool,
	pub final_newline_only: bool,
	/// Ignore patterns, nearest file first.
	pub ignore: Vec<String>,
	/// Overrides, nearest file first.
	pub overrides: Vec<OverrideWithSource>,
}

impl Default for Settings {
	fn default() -> Self {
		Settings {
			expected_eol: ExpectedEol::Auto,
			respect_editorconfig: true,
			final_newline_only: false,
			ignore: Vec::new(),
			overrides: Vec::new(),
		}
	}
}

impl SettingsFile {
	/// Reject overrides that could never match.
	pub fn validate(&self) -> Result<(), crate::error::GuardError> {
		for (index, entry) in self.overrides.iter().enumerate() {
			if entry.pattern.trim().is_empty() {
				return Err(crate::error::GuardError::InvalidOverride {
					index: index + 1,
					reason: "pattern must not be empty".to_string(),
				});
			}
		}
		Ok(())
	}
}
