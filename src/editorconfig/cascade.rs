use crate::editorconfig::fs::{ConfigFs, OsFs};
use crate::editorconfig::parser::{ParsedSource, parse_source};
use crate::editorconfig::schema::Schema;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Conventional config file name looked up in every ancestor directory.
pub const EDITORCONFIG_FILE: &str = ".editorconfig";

/// A config file that was read and parsed for one target path.
#[derive(Debug, Clone)]
pub struct ConfigSource {
	/// Path of the config file.
	pub path: PathBuf,

	/// What the file contributes for the target.
	pub parsed: ParsedSource,
}

/// The winning assignment for one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProperty {
	pub value: String,

	/// Config file that supplied the value.
	pub source: PathBuf,

	/// Section header, `None` for the global section.
	pub section: Option<String>,

	/// 1-based line number in `source`.
	pub line: usize,
}

/// Resolved properties for one target path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
	properties: BTreeMap<String, ResolvedProperty>,
	sources: Vec<PathBuf>,
}

impl Resolution {
	pub fn get(&self, key: &str) -> Option<&ResolvedProperty> {
		self.properties.get(key)
	}

	/// The resolved value, or `None` when no config file has an opinion.
	pub fn value(&self, key: &str) -> Option<&str> {
		self.properties.get(key).map(|property| property.value.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedProperty)> {
		self.properties
			.iter()
			.map(|(key, property)| (key.as_str(), property))
	}

	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}

	/// Config files that took part, farthest first.
	pub fn sources(&self) -> &[PathBuf] {
		&self.sources
	}
}

/// Resolves properties for a file from the config files in its ancestor
/// directories.
///
/// Nearer files override farther ones. A file whose global section sets
/// `root = true` bounds the cascade: files above it are ignored.
#[derive(Debug, Clone)]
pub struct Resolver<F = OsFs> {
	fs: F,
	schema: Schema,
	file_name: String,
}

impl Resolver<OsFs> {
	pub fn new(schema: Schema) -> Self {
		Resolver::with_fs(OsFs, schema)
	}
}

impl<F: ConfigFs> Resolver<F> {
	pub fn with_fs(fs: F, schema: Schema) -> Self {
		Resolver {
			fs,
			schema,
			file_name: EDITORCONFIG_FILE.to_string(),
		}
	}

	/// Look for a differently named config file.
	pub fn file_name(mut self, name: &str) -> Self {
		self.file_name = name.to_string();
		self
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	/// List every config file from the target's directory up to the
	/// filesystem root, nearest first.
	///
	/// `target` is normalized lexically first, so `c/../x/a.txt` is looked
	/// up from `x` and never reads `c`'s config file.
	pub fn discover(&self, target: &Path) -> Vec<PathBuf> {
		let target = normalize_lexically(target);
		let mut found = Vec::new();
		let Some(mut dir) = target.parent() else {
			return found;
		};

		loop {
			let candidate = dir.join(&self.file_name);
			if self.fs.is_file(&candidate) {
				found.push(candidate);
			}

			match dir.parent() {
				Some(parent) if parent != dir => dir = parent,
				_ => break,
			}
		}

		found
	}

	/// Read and parse the discovered files, nearest first, stopping after
	/// the first one marked `root = true`. Unreadable files are skipped.
	pub fn load_sources(&self, target: &Path) -> Vec<ConfigSource> {
		let target = normalize_lexically(target);
		let mut sources = Vec::new();

		for path in self.discover(&target) {
			let contents = match self.fs.read_to_string(&path) {
				Ok(contents) => contents,
				Err(err) => {
					log::debug!("Skipping {}: {err}", path.display());
					continue;
				}
			};

			let Some(relative) = path.parent().and_then(|dir| relative_slash_path(&target, dir))
			else {
				continue;
			};

			let parsed = parse_source(&contents, &relative, &self.schema);
			let is_root = parsed.root;
			if is_root {
				log::trace!("Root marker in {}, ignoring ancestors", path.display());
			}
			sources.push(ConfigSource { path, parsed });

			if is_root {
				break;
			}
		}

		sources
	}

	/// Resolve every recognized property for `target`.
	///
	/// Never fails: unreadable files and malformed lines contribute
	/// nothing, and the worst case is an empty [`Resolution`].
	pub fn resolve(&self, target: &Path) -> Resolution {
		let mut resolution = Resolution::default();

		// Farthest first, so nearer files overwrite.
		for source in self.load_sources(target).into_iter().rev() {
			for (key, assignment) in source.parsed.assignments {
				resolution.properties.insert(
					key,
					ResolvedProperty {
						value: assignment.value,
						source: source.path.clone(),
						section: assignment.section,
						line: assignment.line,
					},
				);
			}
			resolution.sources.push(source.path);
		}

		resolution
	}
}

/// Resolve `target` against `.editorconfig` files on disk.
pub fn resolve(target: &Path, schema: &Schema) -> Resolution {
	Resolver::new(schema.clone()).resolve(target)
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` at the filesystem root stays at the root; leading `..` in a
/// relative path is kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();

	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => match normalized.components().next_back() {
				Some(Component::Normal(_)) => {
					normalized.pop();
				}
				Some(Component::RootDir | Component::Prefix(_)) => {}
				_ => normalized.push(".."),
			},
			other => normalized.push(other.as_os_str()),
		}
	}

	normalized
}

/// `target` relative to `dir`, joined with `/`. Both are expected to be
/// normalized already.
fn relative_slash_path(target: &Path, dir: &Path) -> Option<String> {
	let relative = target.strip_prefix(dir).ok()?;
	let segments: Vec<String> = relative
		.components()
		.filter_map(|component| match component {
			Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
			_ => None,
		})
		.collect();

	if segments.is_empty() {
		None
	} else {
		Some(segments.join("/"))
	}
}
