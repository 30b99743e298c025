use std::io;
use std::path::Path;

/// The filesystem access the resolver needs, and nothing more.
pub trait ConfigFs {
	/// Whether `path` exists and is a regular file.
	fn is_file(&self, path: &Path) -> bool;

	/// Read the whole file as UTF-8 text.
	fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`ConfigFs`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl ConfigFs for OsFs {
	fn is_file(&self, path: &Path) -> bool {
		path.is_file()
	}

	fn read_to_string(&self, path: &Path) -> io::Result<String> {
		std::fs::read_to_string(path)
	}
}

impl<F: ConfigFs + ?Sized> ConfigFs for &F {
	fn is_file(&self, path: &Path) -> bool {
		(**self).is_file(path)
	}

	fn read_to_string(&self, path: &Path) -> io::Result<String> {
		(**self).read_to_string(path)
	}
}
