/// Starter `.eolguard.toml` written by `eolg --init`.
pub fn generate_init_template() -> String {
	r#"# eol-guardian settings
#
# Stop looking for .eolguard.toml files in parent directories.
root = true

# Line ending to expect when neither .editorconfig nor an override applies.
# One of "lf", "crlf" or "auto" (no opinion).
expected-eol = "auto"

# Let .editorconfig end_of_line / insert_final_newline take priority.
respect-editorconfig = true

# Only add missing trailing newlines; never convert line endings.
final-newline-only = false

# Files to skip, as globs relative to the working directory.
ignore = ["**/*.min.js"]

# Per-pattern line endings. The first matching override wins.
[[overrides]]
pattern = "*.{bat,cmd}"
eol = "crlf"
description = "Windows scripts"
"#
	.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parse_settings_str;
	use crate::eol::ExpectedEol;
	use std::path::Path;

	#[test]
	fn test_template_parses() {
		let settings =
			parse_settings_str(&generate_init_template(), Path::new(".eolguard.toml")).unwrap();
		assert!(settings.root);
		assert_eq!(settings.expected_eol, Some(ExpectedEol::Auto));
		assert_eq!(settings.overrides.len(), 1);
	}
}
