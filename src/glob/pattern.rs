use crate::glob::token::{CharClass, ClassItem, Token, tokenize};
use regex::Regex;

/// What part of a path a pattern is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
	/// The pattern contains a `/`: compare against the whole relative path.
	FullPath,
	/// No `/` in the pattern: compare against the last path segment only.
	Basename,
}

/// A compiled glob pattern.
///
/// Compilation never fails. Malformed fragments fall back to their literal
/// reading, and a pattern that is blank after trimming matches nothing.
/// Brace groups become regex alternations, so a pattern compiles to a
/// single anchored regex however many groups it has.
#[derive(Debug, Clone)]
pub struct Pattern {
	raw: String,
	mode: MatchMode,
	regex: Option<Regex>,
	alternatives: usize,
}

impl Pattern {
	/// Compile a raw glob string.
	pub fn compile(raw: &str) -> Self {
		let trimmed = raw.trim();
		let mode = if trimmed.contains('/') {
			MatchMode::FullPath
		} else {
			MatchMode::Basename
		};

		let body = trimmed.strip_prefix('/').unwrap_or(trimmed);
		let tokens = tokenize(body);
		let (regex, alternatives) = if trimmed.is_empty() || tokens.contains(&Token::Never) {
			(None, 0)
		} else {
			match compile_regex(&tokens) {
				Some(regex) => (Some(regex), count_alternatives(&tokens)),
				None => (None, 0),
			}
		};

		Pattern {
			raw: raw.to_string(),
			mode,
			regex,
			alternatives,
		}
	}

	/// The text this pattern was compiled from.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	pub fn mode(&self) -> MatchMode {
		self.mode
	}

	/// Number of brace-expanded alternatives that can match anything,
	/// counted without expanding them. Saturates at `usize::MAX`.
	pub fn alternatives(&self) -> usize {
		self.alternatives
	}

	/// Check a slash-separated path against the pattern.
	pub fn matches(&self, path: &str) -> bool {
		let Some(regex) = &self.regex else {
			return false;
		};

		let normalized = normalize_path(path);
		let target = match self.mode {
			MatchMode::FullPath => normalized.as_str(),
			MatchMode::Basename => basename(&normalized),
		};

		regex.is_match(target)
	}
}

/// An ordered list of patterns; a path matches the set if it matches any
/// member.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
	patterns: Vec<Pattern>,
}

impl PatternSet {
	/// Compile every entry, dropping the ones that are blank.
	pub fn new<I, S>(patterns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let patterns = patterns
			.into_iter()
			.filter(|raw| !raw.as_ref().trim().is_empty())
			.map(|raw| Pattern::compile(raw.as_ref()))
			.collect();
		PatternSet { patterns }
	}

	pub fn is_empty(&self) -> bool {
		self.patterns.is_empty()
	}

	pub fn len(&self) -> usize {
		self.patterns.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
		self.patterns.iter()
	}

	/// Check a path against every pattern in the set.
	pub fn matches(&self, path: &str) -> bool {
		self.patterns.iter().any(|pattern| pattern.matches(path))
	}
}

/// Convert backslash separators to `/`.
pub fn normalize_path(path: &str) -> String {
	path.replace('\\', "/")
}

fn basename(path: &str) -> &str {
	match path.rfind('/') {
		Some(index) => &path[index + 1..],
		None => path,
	}
}

fn compile_regex(tokens: &[Token]) -> Option<Regex> {
	let mut source = String::from("(?s)^");
	push_tokens(&mut source, tokens);
	source.push('$');

	match Regex::new(&source) {
		Ok(regex) => Some(regex),
		Err(err) => {
			log::debug!("Glob lowered to an unusable regex, matching nothing: {err}");
			None
		}
	}
}

/// Lower tokens into regex syntax. Every literal goes through
/// `regex::escape`, so only the wildcard translations are regex syntax.
fn push_tokens(source: &mut String, tokens: &[Token]) {
	for token in tokens {
		match token {
			Token::Literal(c) => source.push_str(&escape_char(*c)),
			Token::Star => source.push_str("[^/]*"),
			Token::GlobStar => source.push_str(".*"),
			Token::Question => source.push_str("[^/]"),
			Token::Class(class) => push_class(source, class),
			Token::Group(branches) => {
				source.push_str("(?:");
				for (index, branch) in branches.iter().enumerate() {
					if index > 0 {
						source.push('|');
					}
					push_tokens(source, branch);
				}
				source.push(')');
			}
			Token::Never => {}
		}
	}
}

fn count_alternatives(tokens: &[Token]) -> usize {
	tokens.iter().fold(1, |count, token| match token {
		Token::Group(branches) => count.saturating_mul(
			branches
				.iter()
				.map(|branch| count_alternatives(branch))
				.fold(0, usize::saturating_add),
		),
		_ => count,
	})
}

fn push_class(source: &mut String, class: &CharClass) {
	if class.negated {
		source.push_str("[^/");
		push_class_items(source, &class.items);
		source.push(']');
	} else {
		source.push_str("[[");
		push_class_items(source, &class.items);
		source.push_str("]&&[^/]]");
	}
}

fn push_class_items(source: &mut String, items: &[ClassItem]) {
	for item in items {
		match *item {
			ClassItem::Single(c) => source.push_str(&escape_char(c)),
			ClassItem::Range(low, high) => {
				source.push_str(&escape_char(low));
				source.push('-');
				source.push_str(&escape_char(high));
			}
		}
	}
}

fn escape_char(c: char) -> String {
	let mut buf = [0u8; 4];
	regex::escape(c.encode_utf8(&mut buf))
}
