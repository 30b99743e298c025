use crate::editorconfig::{END_OF_LINE, INSERT_FINAL_NEWLINE};
use crate::eol::{
	EolKind, EolStats, ExpectedEolResult, convert_text_eol, ensure_final_newline,
	find_matching_override, has_final_newline, resolve_expected_eol,
};
use crate::error::{GuardError, Result};
use crate::workspace::Workspace;
use std::path::{Path, PathBuf};

/// Bytes inspected when deciding whether a file is binary.
const BINARY_SNIFF_LEN: usize = 8192;

/// The expected line ending for a file and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedInfo {
	pub result: ExpectedEolResult,

	/// `.editorconfig` file that set `end_of_line`, if any.
	pub editorconfig_source: Option<PathBuf>,

	/// Label of the matching override, if any.
	pub override_detail: Option<String>,

	/// `insert_final_newline` from `.editorconfig`, if set.
	pub insert_final_newline: Option<bool>,
}

/// Result of checking one text file.
#[derive(Debug, Clone)]
pub struct FileReport {
	pub path: PathBuf,
	pub stats: EolStats,
	pub expected: ExpectedInfo,
	pub needs_conversion: bool,
	pub missing_final_newline: bool,
}

impl FileReport {
	pub fn is_clean(&self) -> bool {
		!self.needs_conversion && !self.missing_final_newline
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
	Changed,
	Unchanged,
	/// Binary or non-UTF-8 content.
	Skipped,
}

impl Workspace {
	/// Work out which line ending `path` should use.
	pub fn expected_eol(&self, path: &Path) -> ExpectedInfo {
		let settings = self.settings();
		let relative = self.relative_path(path);

		let mut editorconfig_eol = None;
		let mut editorconfig_source = None;
		let mut insert_final_newline = None;
		if settings.respect_editorconfig {
			let resolution = self.resolver.resolve(&self.absolute(path));
			if let Some(property) = resolution.get(END_OF_LINE) {
				editorconfig_eol = EolKind::parse(&property.value);
				editorconfig_source = Some(property.source.clone());
			}
			insert_final_newline = resolution
				.value(INSERT_FINAL_NEWLINE)
				.map(|value| value == "true");
		}

		let matched = find_matching_override(&self.overrides, &relative);
		let result = resolve_expected_eol(
			settings.expected_eol,
			editorconfig_eol,
			settings.respect_editorconfig,
			matched.map(|entry| entry.eol),
		);

		ExpectedInfo {
			result,
			editorconfig_source,
			override_detail: matched.map(|entry| entry.detail().to_string()),
			insert_final_newline,
		}
	}

	/// Check one file. Returns `None` for binary or non-UTF-8 files.
	pub fn check_file(&self, path: &Path) -> Result<Option<FileReport>> {
		let Some(text) = read_text(path)? else {
			return Ok(None);
		};
		Ok(Some(self.report(path, &text)))
	}

	fn report(&self, path: &Path, text: &str) -> FileReport {
		let stats = EolStats::scan(text);
		let expected = self.expected_eol(path);
		let final_newline_only = self.settings().final_newline_only;

		let needs_conversion = !final_newline_only
			&& expected
				.result
				.expected
				.kind()
				.is_some_and(|kind| !stats.is_uniform(kind));

		let wants_final_newline = final_newline_only || expected.insert_final_newline == Some(true);
		let missing_final_newline = wants_final_newline && !has_final_newline(text);

		FileReport {
			path: path.to_path_buf(),
			stats,
			expected,
			needs_conversion,
			missing_final_newline,
		}
	}

	/// Rewrite `path` in place if its line endings or trailing newline are
	/// off.
	pub fn fix_file(&self, path: &Path) -> Result<FixOutcome> {
		let Some(text) = read_text(path)? else {
			return Ok(FixOutcome::Skipped);
		};
		let report = self.report(path, &text);
		if report.is_clean() {
			return Ok(FixOutcome::Unchanged);
		}

		let target = report
			.expected
			.result
			.expected
			.kind()
			.or_else(|| report.stats.dominant())
			.unwrap_or(EolKind::Lf);

		let mut fixed = if report.needs_conversion {
			convert_text_eol(&text, target)
		} else {
			text.clone()
		};
		if report.missing_final_newline {
			// Without a conversion the file keeps its own line ending.
			let newline = if report.needs_conversion {
				target
			} else {
				report.stats.dominant().unwrap_or(target)
			};
			fixed = ensure_final_newline(&fixed, newline);
		}

		if fixed == text {
			return Ok(FixOutcome::Unchanged);
		}

		std::fs::write(path, fixed).map_err(|source| GuardError::FileWriteError {
			path: path.to_path_buf(),
			source,
		})?;
		log::debug!("Rewrote {} with {target} line endings", path.display());

		Ok(FixOutcome::Changed)
	}
}

/// Read a file as text; `None` when it looks binary.
fn read_text(path: &Path) -> Result<Option<String>> {
	let bytes = std::fs::read(path).map_err(|source| GuardError::FileReadError {
		path: path.to_path_buf(),
		source,
	})?;

	let sniff = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
	if sniff.contains(&0) {
		log::debug!("Skipping binary file {}", path.display());
		return Ok(None);
	}

	match String::from_utf8(bytes) {
		Ok(text) => Ok(Some(text)),
		Err(_) => {
			log::debug!("Skipping non-UTF-8 file {}", path.display());
			Ok(None)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{EolOverride, OverrideWithSource, Settings};
	use crate::editorconfig::EDITORCONFIG_FILE;
	use crate::eol::{ExpectedEol, ExpectedSource};
	use std::fs;

	fn workspace(root: &Path, settings: Settings) -> Workspace {
		Workspace::new(root, settings)
	}

	fn crlf_override(pattern: &str) -> OverrideWithSource {
		OverrideWithSource {
			entry: EolOverride {
				pattern: pattern.to_string(),
				eol: EolKind::Crlf,
				description: None,
			},
			source: PathBuf::from(".eolguard.toml"),
		}
	}

	#[test]
	fn test_editorconfig_drives_expectation() {
		let temp_dir = tempfile::tempdir().unwrap();
		let root = temp_dir.path();
		fs::write(
			root.join(EDITORCONFIG_FILE),
			"root = true\n[*.bat]\nend_of_line = crlf\n",
		)
		.unwrap();
		fs::write(root.join("run.bat"), "echo\n").unwrap();

		let ws = workspace(root, Settings::default());
		let report = ws.check_file(&root.join("run.bat")).unwrap().unwrap();

		assert!(report.needs_conversion);
		assert_eq!(report.expected.result.expected, ExpectedEol::Crlf);
		assert_eq!(report.expected.result.source, ExpectedSource::EditorConfig);
		assert_eq!(
			report.expected.editorconfig_source,
			Some(root.join(EDITORCONFIG_FILE))
		);

		assert_eq!(ws.fix_file(&root.join("run.bat")).unwrap(), FixOutcome::Changed);
		assert_eq!(fs::read_to_string(root.join("run.bat")).unwrap(), "echo\r\n");
		assert_eq!(
			ws.fix_file(&root.join("run.bat")).unwrap(),
			FixOutcome::Unchanged
		);
	}

	#[test]
	fn test_override_and_settings_fallback() {
		let temp_dir = tempfile::tempdir().unwrap();
		let root = temp_dir.path();
		fs::write(root.join(EDITORCONFIG_FILE), "root = true\n").unwrap();
		fs::write(root.join("a.cmd"), "x\ny\n").unwrap();
		fs::write(root.join("a.txt"), "x\r\ny\r\n").unwrap();

		let settings = Settings {
			expected_eol: ExpectedEol::Lf,
			overrides: vec![crlf_override("*.cmd")],
			..Settings::default()
		};
		let ws = workspace(root, settings);

		let cmd = ws.check_file(&root.join("a.cmd")).unwrap().unwrap();
		assert_eq!(cmd.expected.result.source, ExpectedSource::Override);
		assert_eq!(cmd.expected.override_detail.as_deref(), Some("*.cmd"));
		assert!(cmd.needs_conversion);

		let txt = ws.check_file(&root.join("a.txt")).unwrap().unwrap();
		assert_eq!(txt.expected.result.source, ExpectedSource::Settings);
		assert!(txt.needs_conversion);
		assert_eq!(txt.stats.crlf, 2);
	}

	#[test]
	fn test_auto_never_converts() {
		let temp_dir = tempfile::tempdir().unwrap();
		let root = temp_dir.path();
		fs::write(root.join(EDITORCONFIG_FILE), "root = true\n").unwrap();
		fs::write(root.join("mixed.txt"), "a\r\nb\n").unwrap();

		let ws = workspace(root, Settings::default());
		let report = ws.check_file(&root.join("mixed.txt")).unwrap().unwrap();
		assert!(report.is_clean());
		assert!(report.stats.is_mixed());
	}

	#[test]
	fn test_final_newline_only() {
		let temp_dir = tempfile::tempdir().unwrap();
		let root = temp_dir.path();
		fs::write(root.join(EDITORCONFIG_FILE), "root = true\nend_of_line = lf\n").unwrap();
		fs::write(root.join("a.txt"), "a\r\nb").unwrap();

		let settings = Settings {
			final_newline_only: true,
			..Settings::default()
		};
		let ws = workspace(root, settings);

		assert_eq!(ws.fix_file(&root.join("a.txt")).unwrap(), FixOutcome::Changed);
		// Line endings untouched; the added newline matches the file's own.
		assert_eq!(fs::read_to_string(root.join("a.txt")).unwrap(), "a\r\nb\r\n");

		// No line breaks at all: fall back to the expected kind.
		fs::write(root.join("one.txt"), "single").unwrap();
		assert_eq!(ws.fix_file(&root.join("one.txt")).unwrap(), FixOutcome::Changed);
		assert_eq!(fs::read_to_string(root.join("one.txt")).unwrap(), "single\n");
	}

	#[test]
	fn test_insert_final_newline_from_editorconfig() {
		let temp_dir = tempfile::tempdir().unwrap();
		let root = temp_dir.path();
		fs::write(
			root.join(EDITORCONFIG_FILE),
			"root = true\n[*]\nend_of_line = crlf\ninsert_final_newline = true\n",
		)
		.unwrap();
		fs::write(root.join("a.txt"), "a\nb").unwrap();

		let ws = workspace(root, Settings::default());
		let report = ws.check_file(&root.join("a.txt")).unwrap().unwrap();
		assert!(report.missing_final_newline);
		assert_eq!(report.expected.insert_final_newline, Some(true));

		assert_eq!(ws.fix_file(&root.join("a.txt")).unwrap(), FixOutcome::Changed);
		assert_eq!(fs::read_to_string(root.join("a.txt")).unwrap(), "a\r\nb\r\n");
	}

	#[test]
	fn test_binary_files_skipped() {
		let temp_dir = tempfile::tempdir().unwrap();
		let root = temp_dir.path();
		fs::write(root.join("blob.bin"), b"ab\0cd\n").unwrap();

		let settings = Settings {
			expected_eol: ExpectedEol::Crlf,
			..Settings::default()
		};
		let ws = workspace(root, settings);
		assert!(ws.check_file(&root.join("blob.bin")).unwrap().is_none());
		assert_eq!(ws.fix_file(&root.join("blob.bin")).unwrap(), FixOutcome::Skipped);
	}

	#[test]
	fn test_missing_file_is_read_error() {
		let ws = workspace(Path::new("/"), Settings::default());
		let result = ws.check_file(Path::new("/definitely/not/here.txt"));
		assert!(matches!(result, Err(GuardError::FileReadError { .. })));
	}
}
