//! Token grammar for a single glob pattern.

use crate::glob::brace::{branch_ranges, match_braces};

/// Brace groups nested deeper than this are read as literal text.
pub const MAX_GROUP_DEPTH: usize = 64;

/// One unit of a glob pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
	/// A character matched exactly.
	Literal(char),
	/// `*`: any run of characters except `/`.
	Star,
	/// `**`: any run of characters, `/` included.
	GlobStar,
	/// `?`: exactly one character other than `/`.
	Question,
	/// `[...]` or `[!...]`.
	Class(CharClass),
	/// `{a,b}`: one token sequence per branch that can match.
	Group(Vec<Vec<Token>>),
	/// Something that can never match, such as `[]`.
	Never,
}

/// A bracket expression. It never matches `/`, negated or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
	pub negated: bool,
	pub items: Vec<ClassItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassItem {
	Single(char),
	Range(char, char),
}

/// Tokenize a glob pattern.
///
/// Malformed input never fails: a trailing `\` is a literal backslash,
/// a `[` without a closing `]` is a literal `[` and a `{` without a
/// matching `}` is a literal `{`. Branches that can never match are
/// dropped from their group; a group left with none becomes
/// [`Token::Never`].
pub fn tokenize(pattern: &str) -> Vec<Token> {
	let chars: Vec<char> = pattern.chars().collect();
	let pairs = match_braces(&chars);
	let tokenizer = Tokenizer {
		chars: &chars,
		pairs: &pairs,
	};
	tokenizer.sequence(0, chars.len(), 0)
}

struct Tokenizer<'a> {
	chars: &'a [char],
	pairs: &'a [Option<usize>],
}

impl Tokenizer<'_> {
	fn sequence(&self, start: usize, end: usize, depth: usize) -> Vec<Token> {
		let mut tokens = Vec::with_capacity(end - start);
		let mut index = start;

		while index < end {
			let (token, next) = self.read_token(index, end, depth);
			tokens.push(token);
			index = next;
		}

		tokens
	}

	fn read_token(&self, index: usize, end: usize, depth: usize) -> (Token, usize) {
		let chars = self.chars;
		let next_char = (index + 1 < end).then(|| chars[index + 1]);

		match chars[index] {
			'\\' => match next_char {
				Some(next) => (Token::Literal(next), index + 2),
				None => (Token::Literal('\\'), index + 1),
			},
			'*' if next_char == Some('*') => (Token::GlobStar, index + 2),
			'*' => (Token::Star, index + 1),
			'?' => (Token::Question, index + 1),
			'[' => match find_closing_bracket(&chars[..end], index + 1) {
				Some(close) => (parse_class(&chars[index + 1..close]), close + 1),
				None => (Token::Literal('['), index + 1),
			},
			'{' if depth < MAX_GROUP_DEPTH => match self.pairs[index] {
				Some(close) if close < end => (self.group(index, close, depth), close + 1),
				_ => (Token::Literal('{'), index + 1),
			},
			c => (Token::Literal(c), index + 1),
		}
	}

	fn group(&self, start: usize, close: usize, depth: usize) -> Token {
		let branches: Vec<Vec<Token>> = branch_ranges(self.chars, self.pairs, start, close)
			.into_iter()
			.map(|(from, to)| self.sequence(from, to, depth + 1))
			.filter(|branch| !branch.contains(&Token::Never))
			.collect();

		if branches.is_empty() {
			Token::Never
		} else {
			Token::Group(branches)
		}
	}
}

fn find_closing_bracket(chars: &[char], start: usize) -> Option<usize> {
	let mut index = start;
	while index < chars.len() {
		match chars[index] {
			'\\' => index += 2,
			']' => return Some(index),
			_ => index += 1,
		}
	}
	None
}

fn parse_class(raw: &[char]) -> Token {
	let (negated, body) = match raw.first() {
		Some('!' | '^') => (true, &raw[1..]),
		_ => (false, raw),
	};

	let mut items = Vec::new();
	let mut index = 0;
	while index < body.len() {
		let (low, after_low) = read_class_char(body, index);
		// `a-z`; a `-` in last position is a plain dash.
		if body.get(after_low) == Some(&'-') && after_low + 1 < body.len() {
			let (high, after_high) = read_class_char(body, after_low + 1);
			if low <= high {
				items.push(ClassItem::Range(low, high));
			}
			index = after_high;
		} else {
			items.push(ClassItem::Single(low));
			index = after_low;
		}
	}

	if items.is_empty() && !negated {
		return Token::Never;
	}
	Token::Class(CharClass { negated, items })
}

fn read_class_char(body: &[char], index: usize) -> (char, usize) {
	match (body[index], body.get(index + 1)) {
		('\\', Some(&escaped)) => (escaped, index + 2),
		(c, _) => (c, index + 1),
	}
}
