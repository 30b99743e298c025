use crate::config::types::SettingsFile;
use crate::error::{GuardError, Result};
use std::path::Path;

/// Parse a settings file from the given path.
pub fn parse_settings_file(path: &Path) -> Result<SettingsFile> {
	let content =
		std::fs::read_to_string(path).map_err(|source| GuardError::SettingsReadError {
			path: path.to_path_buf(),
			source,
		})?;

	parse_settings_str(&content, path)
}

/// Parse settings from a string (useful for testing).
pub fn parse_settings_str(content: &str, path: &Path) -> Result<SettingsFile> {
	let settings: SettingsFile =
		toml::from_str(content).map_err(|source| GuardError::SettingsParseError {
			path: path.to_path_buf(),
			source,
		})?;

	settings.validate()?;

	Ok(settings)
}
