use crate::config::parser::parse_settings_file;
use crate::config::types::{LoadedSettings, OverrideWithSource, Settings};
use crate::error::{GuardError, Result};
use std::path::{Path, PathBuf};

/// File name of the tool's own settings.
pub const SETTINGS_FILE: &str = ".eolguard.toml";

/// Discover and load every settings file in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.eolguard.toml`
/// 2. Continue up the directory tree, stopping after a file with `root = true`
/// 3. Finally, check ~/.eolguard.toml when `include_user` is set
///
/// Returns settings in cascade order (most specific first).
pub fn discover_settings(start_dir: &Path, include_user: bool) -> Result<Vec<LoadedSettings>> {
	let mut loaded = Vec::new();
	let mut current_dir = start_dir.to_path_buf();

	loop {
		let settings_path = current_dir.join(SETTINGS_FILE);

		if settings_path.is_file() {
			let settings = parse_settings_file(&settings_path)?;
			let is_root = settings.root;
			log::debug!("Loaded settings from {}", settings_path.display());

			loaded.push(LoadedSettings {
				settings,
				path: settings_path,
			});

			if is_root {
				break;
			}
		}

		if let Some(parent) = current_dir.parent() {
			current_dir = parent.to_path_buf();
		} else {
			break;
		}
	}

	if include_user && let Some(user) = load_user_settings(&loaded)? {
		loaded.push(user);
	}

	Ok(loaded)
}

/// Load ~/.eolguard.toml if it exists and wasn't already picked up by the
/// directory walk.
fn load_user_settings(existing: &[LoadedSettings]) -> Result<Option<LoadedSettings>> {
	let user_path = user_settings_path()?;

	if existing.iter().any(|loaded| loaded.path == user_path) {
		return Ok(None);
	}

	if user_path.is_file() {
		let settings = parse_settings_file(&user_path)?;
		log::debug!("Loaded user settings from {}", user_path.display());
		Ok(Some(LoadedSettings {
			settings,
			path: user_path,
		}))
	} else {
		Ok(None)
	}
}

/// Merge settings files into one effective configuration.
///
/// Scalars come from the nearest file that sets them. Ignore patterns and
/// overrides are concatenated in cascade order, so for overrides the
/// nearest match wins.
pub fn merge_settings(loaded: &[LoadedSettings]) -> Settings {
	let mut merged = Settings::default();

	if let Some(expected) = loaded.iter().find_map(|l| l.settings.expected_eol) {
		merged.expected_eol = expected;
	}
	if let Some(respect) = loaded.iter().find_map(|l| l.settings.respect_editorconfig) {
		merged.respect_editorconfig = respect;
	}
	if let Some(final_only) = loaded.iter().find_map(|l| l.settings.final_newline_only) {
		merged.final_newline_only = final_only;
	}

	for entry in loaded {
		merged
			.ignore
			.extend(entry.settings.ignore.iter().map(|p| p.trim().to_string()));

		for eol_override in &entry.settings.overrides {
			merged.overrides.push(OverrideWithSource {
				entry: eol_override.clone(),
				source: entry.path.clone(),
			});
		}
	}
	merged.ignore.retain(|pattern| !pattern.is_empty());

	merged
}

/// Convenience function to discover, load, and merge settings from a
/// directory.
pub fn load_settings(start_dir: &Path, include_user: bool) -> Result<Settings> {
	let loaded = discover_settings(start_dir, include_user)?;
	Ok(merge_settings(&loaded))
}

/// Get the path to the user's settings file.
pub fn user_settings_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(GuardError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parser::parse_settings_str;
	use crate::eol::{EolKind, ExpectedEol};

	fn loaded(content: &str, path: &str) -> LoadedSettings {
		let path = PathBuf::from(path);
		LoadedSettings {
			settings: parse_settings_str(content, &path).unwrap(),
			path,
		}
	}

	#[test]
	fn test_user_settings_path() {
		let path = user_settings_path();
		assert!(path.is_ok());
		assert!(path.unwrap().ends_with(".eolguard.toml"));
	}

	#[test]
	fn test_merge_defaults() {
		let merged = merge_settings(&[]);
		assert_eq!(merged.expected_eol, ExpectedEol::Auto);
		assert!(merged.respect_editorconfig);
		assert!(!merged.final_newline_only);
	}

	#[test]
	fn test_merge_nearest_scalar_wins() {
		let near = loaded("respect-editorconfig = false\n", "/p/sub/.eolguard.toml");
		let far = loaded(
			"expected-eol = \"crlf\"\nrespect-editorconfig = true\n",
			"/p/.eolguard.toml",
		);
		let merged = merge_settings(&[near, far]);

		assert_eq!(merged.expected_eol, ExpectedEol::Crlf);
		assert!(!merged.respect_editorconfig);
	}

	#[test]
	fn test_merge_concatenates_lists_nearest_first() {
		let near = loaded(
			"ignore = [\"a/**\"]\n[[overrides]]\npattern = \"*.cmd\"\neol = \"crlf\"\n",
			"/p/sub/.eolguard.toml",
		);
		let far = loaded(
			"ignore = [\" \", \"b/**\"]\n[[overrides]]\npattern = \"*\"\neol = \"lf\"\n",
			"/p/.eolguard.toml",
		);
		let merged = merge_settings(&[near, far]);

		assert_eq!(merged.ignore, vec!["a/**", "b/**"]);
		assert_eq!(merged.overrides.len(), 2);
		assert_eq!(merged.overrides[0].entry.eol, EolKind::Crlf);
		assert_eq!(
			merged.overrides[0].source,
			PathBuf::from("/p/sub/.eolguard.toml")
		);
		assert_eq!(merged.overrides[1].entry.pattern, "*");
	}

	#[test]
	fn test_discover_stops_at_root() {
		let temp_dir = tempfile::tempdir().unwrap();
		let outer = temp_dir.path();
		let inner = outer.join("project");
		let nested = inner.join("src");
		std::fs::create_dir_all(&nested).unwrap();

		std::fs::write(outer.join(SETTINGS_FILE), "expected-eol = \"crlf\"\n").unwrap();
		std::fs::write(
			inner.join(SETTINGS_FILE),
			"root = true\nexpected-eol = \"lf\"\n",
		)
		.unwrap();

		let loaded = discover_settings(&nested, false).unwrap();
		assert_eq!(loaded.len(), 1);
		assert_eq!(loaded[0].path, inner.join(SETTINGS_FILE));

		let merged = load_settings(&nested, false).unwrap();
		assert_eq!(merged.expected_eol, ExpectedEol::Lf);
	}

	#[test]
	fn test_discover_reports_parse_errors() {
		let temp_dir = tempfile::tempdir().unwrap();
		std::fs::write(temp_dir.path().join(SETTINGS_FILE), "root = [[[").unwrap();

		let result = discover_settings(temp_dir.path(), false);
		assert!(matches!(
			result,
			Err(GuardError::SettingsParseError { .. })
		));
	}
}
