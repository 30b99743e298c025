//! File selection and per-file processing for eol-guardian.
//!
//! This module handles:
//! - Walking directories with default excludes and ignore patterns
//! - Working out the expected line ending for each file
//! - Checking and fixing files in place

pub mod process;

pub use process::{ExpectedInfo, FileReport, FixOutcome};

use crate::config::Settings;
use crate::editorconfig::{Resolver, Schema, normalize_lexically};
use crate::eol::{CompiledOverride, compile_overrides};
use crate::error::{GuardError, Result};
use crate::glob::{PatternSet, normalize_path};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories never descended into.
pub const DEFAULT_EXCLUDES: &[&str] = &[
	"{node_modules,.git,dist,build,out}/**",
	"**/{node_modules,.git,dist,build,out}/**",
];

/// Everything needed to check files under one working directory.
#[derive(Debug)]
pub struct Workspace {
	root: PathBuf,
	settings: Settings,
	excludes: PatternSet,
	ignore: PatternSet,
	overrides: Vec<CompiledOverride>,
	resolver: Resolver,
}

impl Workspace {
	/// `root` is the directory paths are reported and matched relative to.
	pub fn new(root: &Path, settings: Settings) -> Self {
		let ignore = PatternSet::new(&settings.ignore);
		let overrides = compile_overrides(&settings);

		Workspace {
			root: normalize_lexically(root),
			excludes: PatternSet::new(DEFAULT_EXCLUDES),
			ignore,
			overrides,
			settings,
			resolver: Resolver::new(Schema::eol()),
		}
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Absolute form of `path`, resolved against the workspace root with
	/// `.` and `..` collapsed.
	pub fn absolute(&self, path: &Path) -> PathBuf {
		if path.is_absolute() {
			normalize_lexically(path)
		} else {
			normalize_lexically(&self.root.join(path))
		}
	}

	/// `path` relative to the root with `/` separators, or the whole path
	/// when it lies outside the root.
	pub fn relative_path(&self, path: &Path) -> String {
		let absolute = self.absolute(path);
		let relative = absolute.strip_prefix(&self.root).unwrap_or(&absolute);
		normalize_path(&relative.to_string_lossy())
	}

	/// Whether a file should be left alone.
	pub fn is_ignored(&self, path: &Path) -> bool {
		let relative = self.relative_path(path);
		self.excludes.matches(&relative) || self.ignore.matches(&relative)
	}

	fn is_pruned_dir(&self, dir: &Path) -> bool {
		let relative = format!("{}/", self.relative_path(dir));
		self.excludes.matches(&relative) || self.ignore.matches(&relative)
	}

	/// Expand files and directories into the list of files to process.
	///
	/// Entries that cannot be read while walking are logged and skipped.
	pub fn collect_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
		let mut files = Vec::new();

		for path in paths {
			let absolute = self.absolute(path);
			if absolute.is_file() {
				if !self.is_ignored(&absolute) {
					files.push(absolute);
				}
				continue;
			}
			if !absolute.is_dir() {
				return Err(GuardError::PathNotFound { path: path.clone() });
			}

			let walker = WalkDir::new(&absolute)
				.sort_by_file_name()
				.into_iter()
				.filter_entry(|entry| {
					entry.depth() == 0
						|| !entry.file_type().is_dir()
						|| !self.is_pruned_dir(entry.path())
				});

			for entry in walker {
				match entry {
					Ok(entry) if entry.file_type().is_file() => {
						if !self.is_ignored(entry.path()) {
							files.push(entry.into_path());
						}
					}
					Ok(_) => {}
					Err(err) => log::warn!("Skipping unreadable entry: {err}"),
				}
			}
		}

		// A file can be named directly and also sit under a named directory.
		let mut seen = HashSet::new();
		files.retain(|file| seen.insert(file.clone()));
		log::debug!("Collected {} files", files.len());
		Ok(files)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	fn touch(path: &Path) {
		fs::create_dir_all(path.parent().unwrap()).unwrap();
		fs::write(path, "x\n").unwrap();
	}

	fn names(workspace: &Workspace, files: &[PathBuf]) -> Vec<String> {
		files.iter().map(|f| workspace.relative_path(f)).collect()
	}

	#[test]
	fn test_relative_path() {
		let workspace = Workspace::new(Path::new("/w"), Settings::default());
		assert_eq!(workspace.relative_path(Path::new("src/a.rs")), "src/a.rs");
		assert_eq!(workspace.relative_path(Path::new("/w/src/a.rs")), "src/a.rs");
		assert_eq!(workspace.relative_path(Path::new("/other/a.rs")), "/other/a.rs");
	}

	#[test]
	fn test_default_excludes() {
		let workspace = Workspace::new(Path::new("/w"), Settings::default());
		assert!(workspace.is_ignored(Path::new("node_modules/pkg/index.js")));
		assert!(workspace.is_ignored(Path::new("packages/app/dist/bundle.js")));
		assert!(workspace.is_ignored(Path::new(".git/config")));
		assert!(!workspace.is_ignored(Path::new("src/build.rs")));
	}

	#[test]
	fn test_ignore_patterns() {
		let settings = Settings {
			ignore: vec!["*.min.js".to_string(), "vendor/**".to_string()],
			..Settings::default()
		};
		let workspace = Workspace::new(Path::new("/w"), settings);
		assert!(workspace.is_ignored(Path::new("web/app.min.js")));
		assert!(workspace.is_ignored(Path::new("vendor/lib/x.c")));
		assert!(!workspace.is_ignored(Path::new("web/app.js")));
	}

	#[test]
	fn test_collect_files_prunes_excluded_dirs() {
		let temp_dir = tempfile::tempdir().unwrap();
		let root = temp_dir.path();
		touch(&root.join("src/main.rs"));
		touch(&root.join("src/lib.rs"));
		touch(&root.join("node_modules/dep/index.js"));
		touch(&root.join("vendor/x.c"));
		touch(&root.join("README.md"));

		let settings = Settings {
			ignore: vec!["vendor/**".to_string()],
			..Settings::default()
		};
		let workspace = Workspace::new(root, settings);
		let files = workspace.collect_files(&[PathBuf::from(".")]).unwrap();

		assert_eq!(
			names(&workspace, &files),
			vec!["README.md", "src/lib.rs", "src/main.rs"]
		);
	}

	#[test]
	fn test_collect_explicit_file_and_missing_path() {
		let temp_dir = tempfile::tempdir().unwrap();
		let root = temp_dir.path();
		touch(&root.join("a.txt"));

		let workspace = Workspace::new(root, Settings::default());
		let files = workspace.collect_files(&[PathBuf::from("a.txt")]).unwrap();
		assert_eq!(files, vec![root.join("a.txt")]);

		let result = workspace.collect_files(&[PathBuf::from("missing.txt")]);
		assert!(matches!(result, Err(GuardError::PathNotFound { .. })));
	}

	#[test]
	fn test_collect_files_reports_each_file_once() {
		let temp_dir = tempfile::tempdir().unwrap();
		let root = temp_dir.path();
		touch(&root.join("a.txt"));
		touch(&root.join("b.txt"));

		let workspace = Workspace::new(root, Settings::default());
		let files = workspace
			.collect_files(&[
				PathBuf::from("a.txt"),
				PathBuf::from("."),
				PathBuf::from("./b.txt"),
			])
			.unwrap();

		assert_eq!(names(&workspace, &files), vec!["a.txt", "b.txt"]);
	}

	#[test]
	fn test_parent_components_are_collapsed() {
		let workspace = Workspace::new(Path::new("/w/c"), Settings::default());
		assert_eq!(
			workspace.absolute(Path::new("../x/a.txt")),
			PathBuf::from("/w/x/a.txt")
		);
		assert_eq!(workspace.relative_path(Path::new("./src/../a.rs")), "a.rs");

		let temp_dir = tempfile::tempdir().unwrap();
		let root = temp_dir.path();
		touch(&root.join("c/keep.txt"));
		touch(&root.join("x/a.txt"));

		let workspace = Workspace::new(&root.join("c"), Settings::default());
		let files = workspace.collect_files(&[PathBuf::from("../x")]).unwrap();
		assert_eq!(files, vec![root.join("x").join("a.txt")]);
	}
}
