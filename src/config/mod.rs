//! Settings loading and parsing for eol-guardian.
//!
//! This module handles:
//! - TOML settings file parsing
//! - Directory cascade discovery
//! - Settings merging and defaults

pub mod cascade;
pub mod parser;
pub mod template;
pub mod types;

pub use cascade::{
	SETTINGS_FILE, discover_settings, load_settings, merge_settings, user_settings_path,
};
pub use parser::{parse_settings_file, parse_settings_str};
pub use template::generate_init_template;
pub use types::{EolOverride, LoadedSettings, OverrideWithSource, Settings, SettingsFile};
