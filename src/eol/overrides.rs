use crate::config::types::{OverrideWithSource, Settings};
use crate::eol::EolKind;
use crate::glob::Pattern;
use std::path::PathBuf;

/// An override ready for matching.
#[derive(Debug, Clone)]
pub struct CompiledOverride {
	pub pattern: Pattern,
	pub eol: EolKind,
	pub description: Option<String>,

	/// Settings file the override came from (for display).
	pub source: PathBuf,
}

impl CompiledOverride {
	pub fn from_override_with_source(ows: &OverrideWithSource) -> Self {
		CompiledOverride {
			pattern: Pattern::compile(&ows.entry.pattern),
			eol: ows.entry.eol,
			description: ows
				.entry
				.description
				.as_ref()
				.map(|d| d.trim().to_string())
				.filter(|d| !d.is_empty()),
			source: ows.source.clone(),
		}
	}

	/// Short label for reports: the description if any, else the pattern.
	pub fn detail(&self) -> &str {
		self.description.as_deref().unwrap_or(self.pattern.raw())
	}
}

/// Compile all overrides in merged settings.
pub fn compile_overrides(settings: &Settings) -> Vec<CompiledOverride> {
	settings
		.overrides
		.iter()
		.map(CompiledOverride::from_override_with_source)
		.collect()
}

/// Find the first override whose pattern matches `path`.
pub fn find_matching_override<'a>(
	overrides: &'a [CompiledOverride],
	path: &str,
) -> Option<&'a CompiledOverride> {
	overrides.iter().find(|entry| entry.pattern.matches(path))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::EolOverride;

	fn make_override(pattern: &str, eol: EolKind, description: Option<&str>) -> OverrideWithSource {
		OverrideWithSource {
			entry: EolOverride {
				pattern: pattern.to_string(),
				eol,
				description: description.map(str::to_string),
			},
			source: PathBuf::from("test.toml"),
		}
	}

	fn compiled(entries: Vec<OverrideWithSource>) -> Vec<CompiledOverride> {
		let settings = Settings {
			overrides: entries,
			..Settings::default()
		};
		compile_overrides(&settings)
	}

	#[test]
	fn test_first_match_wins() {
		let overrides = compiled(vec![
			make_override("*.bat", EolKind::Crlf, None),
			make_override("*", EolKind::Lf, None),
		]);

		let matched = find_matching_override(&overrides, "tools/run.bat").unwrap();
		assert_eq!(matched.eol, EolKind::Crlf);

		let matched = find_matching_override(&overrides, "src/main.rs").unwrap();
		assert_eq!(matched.eol, EolKind::Lf);
	}

	#[test]
	fn test_no_match() {
		let overrides = compiled(vec![make_override("scripts/**", EolKind::Lf, None)]);
		assert!(find_matching_override(&overrides, "src/scripts.rs").is_none());
	}

	#[test]
	fn test_detail() {
		let overrides = compiled(vec![
			make_override("*.bat", EolKind::Crlf, Some("  batch files ")),
			make_override("*.cmd", EolKind::Crlf, Some("   ")),
		]);
		assert_eq!(overrides[0].detail(), "batch files");
		assert_eq!(overrides[1].detail(), "*.cmd");
	}
}
