//! Brace groups (`{a,b,c}`) and brace-aware list splitting.
//!
//! Groups are never expanded into a cartesian product. The tokenizer
//! pairs every brace once up front and reads each group's branches as
//! index ranges, so work stays linear in the pattern length.

/// Index of the matching `}` for every `{` that has one.
///
/// A backslash escapes the next character. Openers left on the stack at
/// the end, and closers with nothing to close, get `None`.
pub fn match_braces(chars: &[char]) -> Vec<Option<usize>> {
	let mut pairs = vec![None; chars.len()];
	let mut open = Vec::new();
	let mut index = 0;

	while index < chars.len() {
		match chars[index] {
			'\\' => {
				index += 2;
				continue;
			}
			'{' => open.push(index),
			'}' => {
				if let Some(start) = open.pop() {
					pairs[start] = Some(index);
				}
			}
			_ => {}
		}
		index += 1;
	}

	pairs
}

/// Branch ranges of the group opened at `start` and closed at `end`.
///
/// Commas split branches only at the group's own depth; nested groups
/// are jumped over using `pairs`.
pub fn branch_ranges(
	chars: &[char],
	pairs: &[Option<usize>],
	start: usize,
	end: usize,
) -> Vec<(usize, usize)> {
	let mut ranges = Vec::new();
	let mut branch_start = start + 1;
	let mut index = start + 1;

	while index < end {
		match chars[index] {
			'\\' => index += 2,
			'{' => match pairs[index] {
				Some(close) => index = close + 1,
				None => index += 1,
			},
			',' => {
				ranges.push((branch_start, index));
				index += 1;
				branch_start = index;
			}
			_ => index += 1,
		}
	}

	ranges.push((branch_start, end));
	ranges
}

/// Split on `separator` wherever it sits outside any brace group and is
/// not escaped.
fn split_unnested(chars: &[char], separator: char) -> Vec<Vec<char>> {
	let mut parts = Vec::new();
	let mut current = Vec::new();
	let mut depth = 0usize;
	let mut index = 0;

	while index < chars.len() {
		let c = chars[index];
		if c == '\\' {
			current.push(c);
			if let Some(&next) = chars.get(index + 1) {
				current.push(next);
			}
			index += 2;
			continue;
		}
		match c {
			'{' => depth += 1,
			'}' => depth = depth.saturating_sub(1),
			_ if c == separator && depth == 0 => {
				parts.push(std::mem::take(&mut current));
				index += 1;
				continue;
			}
			_ => {}
		}
		current.push(c);
		index += 1;
	}

	parts.push(current);
	parts
}

/// Split a comma-separated pattern list, leaving commas inside braces
/// (`*.{js,ts}`) and escaped commas alone. Entries are trimmed and empty
/// ones dropped.
pub fn split_pattern_list(list: &str) -> Vec<String> {
	let chars: Vec<char> = list.chars().collect();
	split_unnested(&chars, ',')
		.into_iter()
		.map(|part| part.into_iter().collect::<String>().trim().to_string())
		.filter(|part| !part.is_empty())
		.collect()
}
