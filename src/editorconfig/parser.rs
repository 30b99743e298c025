use crate::editorconfig::schema::Schema;
use crate::glob::{PatternSet, split_pattern_list};
use std::collections::BTreeMap;

/// One recognized assignment that applies to the target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
	/// Lower-cased value.
	pub value: String,

	/// Section header text, `None` for the global section.
	pub section: Option<String>,

	/// 1-based line number.
	pub line: usize,
}

/// What one config file contributes for one target path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSource {
	/// `root = true` in the global section.
	pub root: bool,

	/// Last applicable assignment per recognized key.
	pub assignments: BTreeMap<String, Assignment>,
}

struct ParseState<'a> {
	schema: &'a Schema,
	relative_path: &'a str,
	section: Option<String>,
	section_matches: bool,
	parsed: ParsedSource,
}

/// Parse a config file's text against a target path relative to the
/// file's directory.
///
/// Malformed lines are skipped; this never fails.
pub fn parse_source(contents: &str, relative_path: &str, schema: &Schema) -> ParsedSource {
	let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
	let mut state = ParseState {
		schema,
		relative_path,
		section: None,
		section_matches: true,
		parsed: ParsedSource::default(),
	};

	for (index, raw_line) in contents.lines().enumerate() {
		state.process_line(raw_line, index + 1);
	}

	state.parsed
}

impl ParseState<'_> {
	fn process_line(&mut self, raw_line: &str, line: usize) {
		let line_text = raw_line.trim();
		if line_text.is_empty() || line_text.starts_with('#') || line_text.starts_with(';') {
			return;
		}

		if line_text.starts_with('[') && line_text.ends_with(']') && line_text.len() >= 2 {
			self.open_section(&line_text[1..line_text.len() - 1]);
			return;
		}

		if let Some((key, value)) = parse_key_value(line_text) {
			self.apply(&key, value, line);
		}
	}

	fn open_section(&mut self, header: &str) {
		let header = header.trim();
		let patterns = PatternSet::new(split_pattern_list(header));
		self.section_matches = patterns.matches(self.relative_path);
		self.section = Some(header.to_string());
	}

	fn apply(&mut self, key: &str, value: String, line: usize) {
		let in_global = self.section.is_none();

		if key == "root" {
			if in_global {
				self.parsed.root = value == "true";
			}
			return;
		}

		if !(in_global || self.section_matches) || !self.schema.recognizes(key, &value) {
			return;
		}

		self.parsed.assignments.insert(
			key.to_string(),
			Assignment {
				value,
				section: self.section.clone(),
				line,
			},
		);
	}
}

/// Split `key = value` at the first `=`, lower-casing both sides.
fn parse_key_value(line: &str) -> Option<(String, String)> {
	let (key, value) = line.split_once('=')?;
	let key = key.trim().to_lowercase();
	if key.is_empty() {
		return None;
	}
	Some((key, value.trim().to_lowercase()))
}
