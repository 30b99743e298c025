/// Property name for the line-ending kind.
pub const END_OF_LINE: &str = "end_of_line";

/// Property name for the trailing newline flag.
pub const INSERT_FINAL_NEWLINE: &str = "insert_final_newline";

/// A property the resolver understands, with its legal values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyKey {
	name: String,
	values: Option<Vec<String>>,
}

impl PropertyKey {
	/// A property that accepts any value.
	pub fn any(name: &str) -> Self {
		PropertyKey {
			name: name.trim().to_lowercase(),
			values: None,
		}
	}

	/// A property restricted to a closed list of values.
	pub fn one_of(name: &str, values: &[&str]) -> Self {
		PropertyKey {
			name: name.trim().to_lowercase(),
			values: Some(values.iter().map(|value| value.to_lowercase()).collect()),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Check a lower-cased value against the legal list.
	pub fn accepts(&self, value: &str) -> bool {
		match &self.values {
			Some(values) => values.iter().any(|legal| legal == value),
			None => !value.is_empty(),
		}
	}
}

/// The set of recognized properties. Everything else in a config file is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
	keys: Vec<PropertyKey>,
}

impl Schema {
	pub fn new(keys: Vec<PropertyKey>) -> Self {
		Schema { keys }
	}

	/// The properties a line-ending checker cares about.
	pub fn eol() -> Self {
		Schema::new(vec![
			PropertyKey::one_of(END_OF_LINE, &["lf", "crlf"]),
			PropertyKey::one_of(INSERT_FINAL_NEWLINE, &["true", "false"]),
		])
	}

	pub fn get(&self, name: &str) -> Option<&PropertyKey> {
		self.keys.iter().find(|key| key.name == name)
	}

	pub fn keys(&self) -> impl Iterator<Item = &PropertyKey> {
		self.keys.iter()
	}

	/// Whether `key = value` (both lower-cased) is a recognized assignment.
	pub fn recognizes(&self, key: &str, value: &str) -> bool {
		self.get(key).is_some_and(|property| property.accepts(value))
	}
}
