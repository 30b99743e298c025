use crate::eol::EolKind;
use serde::Deserialize;
use std::fmt;

/// The line ending configured in settings, where `auto` means "no
/// opinion".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedEol {
	#[default]
	Auto,
	#[serde(alias = "LF")]
	Lf,
	#[serde(alias = "CRLF")]
	Crlf,
}

impl ExpectedEol {
	pub fn kind(self) -> Option<EolKind> {
		match self {
			ExpectedEol::Auto => None,
			ExpectedEol::Lf => Some(EolKind::Lf),
			ExpectedEol::Crlf => Some(EolKind::Crlf),
		}
	}
}

impl From<EolKind> for ExpectedEol {
	fn from(kind: EolKind) -> Self {
		match kind {
			EolKind::Lf => ExpectedEol::Lf,
			EolKind::Crlf => ExpectedEol::Crlf,
		}
	}
}

impl fmt::Display for ExpectedEol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.kind() {
			Some(kind) => kind.fmt(f),
			None => f.write_str("auto"),
		}
	}
}

/// Where an expected line ending came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedSource {
	EditorConfig,
	Override,
	Settings,
	Auto,
}

impl fmt::Display for ExpectedSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			ExpectedSource::EditorConfig => "editorconfig",
			ExpectedSource::Override => "override",
			ExpectedSource::Settings => "settings",
			ExpectedSource::Auto => "auto",
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedEolResult {
	pub expected: ExpectedEol,
	pub source: ExpectedSource,
}

/// Pick the line ending a file should use.
///
/// Precedence: `.editorconfig` (when respected) > pattern override >
/// settings value > auto.
pub fn resolve_expected_eol(
	settings_expected: ExpectedEol,
	editorconfig_eol: Option<EolKind>,
	respect_editorconfig: bool,
	override_eol: Option<EolKind>,
) -> ExpectedEolResult {
	if respect_editorconfig && let Some(kind) = editorconfig_eol {
		return ExpectedEolResult {
			expected: kind.into(),
			source: ExpectedSource::EditorConfig,
		};
	}

	if let Some(kind) = override_eol {
		return ExpectedEolResult {
			expected: kind.into(),
			source: ExpectedSource::Override,
		};
	}

	match settings_expected {
		ExpectedEol::Auto => ExpectedEolResult {
			expected: ExpectedEol::Auto,
			source: ExpectedSource::Auto,
		},
		fixed => ExpectedEolResult {
			expected: fixed,
			source: ExpectedSource::Settings,
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_editorconfig_has_priority() {
		let resolved =
			resolve_expected_eol(ExpectedEol::Lf, Some(EolKind::Crlf), true, Some(EolKind::Lf));
		assert_eq!(resolved.expected, ExpectedEol::Crlf);
		assert_eq!(resolved.source, ExpectedSource::EditorConfig);
	}

	#[test]
	fn test_editorconfig_ignored_when_not_respected() {
		let resolved = resolve_expected_eol(ExpectedEol::Lf, Some(EolKind::Crlf), false, None);
		assert_eq!(resolved.expected, ExpectedEol::Lf);
		assert_eq!(resolved.source, ExpectedSource::Settings);
	}

	#[test]
	fn test_override_beats_settings() {
		let resolved = resolve_expected_eol(ExpectedEol::Lf, None, true, Some(EolKind::Crlf));
		assert_eq!(resolved.expected, ExpectedEol::Crlf);
		assert_eq!(resolved.source, ExpectedSource::Override);
	}

	#[test]
	fn test_auto() {
		let resolved = resolve_expected_eol(ExpectedEol::Auto, None, true, None);
		assert_eq!(resolved.expected, ExpectedEol::Auto);
		assert_eq!(resolved.source, ExpectedSource::Auto);
		assert_eq!(resolved.expected.to_string(), "auto");
	}
}
