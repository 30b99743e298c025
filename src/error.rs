use std::path::PathBuf;

/// Library-level structured errors for eol-guardian.
///
/// Glob compilation and `.editorconfig` resolution never produce these;
/// they cover the tool's own settings files and the files it rewrites.
/// The CLI binary wraps them with `anyhow` for context chains.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
	#[error("Failed to read settings file: {path}")]
	SettingsReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse settings file: {path}")]
	SettingsParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid override #{index}: {reason}")]
	InvalidOverride { index: usize, reason: String },

	#[error("Failed to read file: {path}")]
	FileReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write file: {path}")]
	FileWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Path not found: {path}")]
	PathNotFound { path: PathBuf },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using GuardError.
pub type Result<T> = std::result::Result<T, GuardError>;
