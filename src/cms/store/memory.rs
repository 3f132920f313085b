use super::StorageBackend;
use crate::error::{CmsError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability so the trait can take `&self`.
#[derive(Debug, Default)]
pub struct MemBackend {
    files: RefCell<HashMap<PathBuf, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Seeds a file directly, bypassing the write error switch.
    pub fn put(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files
            .borrow_mut()
            .insert(path.into(), contents.into());
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.files.borrow().get(path).cloned())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(CmsError::Store("Simulated write error".to_string()));
        }
        self.put(path, contents);
        Ok(())
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::MemBackend;
    use crate::format::render_records;
    use crate::table::fixtures::sample_records;

    pub const SAMPLE_FILE: &str = "P7_2-CMS.txt";

    /// A backend holding [`SAMPLE_FILE`] with a header block and the sample records.
    pub fn sample_backend() -> MemBackend {
        let backend = MemBackend::new();
        let mut text = String::from(
            "Database Name: P7_2-CMS\nAuthors: P7_2\n\nTable Name: StudentRecords\nID\tName\tProgramme\tMark\n",
        );
        text.push_str(&render_records(&sample_records()));
        backend.put(SAMPLE_FILE, text);
        backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_is_none() {
        let backend = MemBackend::new();
        assert_eq!(backend.read(Path::new("a.txt")).unwrap(), None);
    }

    #[test]
    fn write_and_read_back() {
        let backend = MemBackend::new();
        backend.write(Path::new("a.txt"), "hello\n").unwrap();
        assert_eq!(
            backend.read(Path::new("a.txt")).unwrap().as_deref(),
            Some("hello\n")
        );
    }

    #[test]
    fn simulated_write_error_keeps_old_contents() {
        let backend = MemBackend::new();
        backend.put("a.txt", "old\n");
        backend.set_simulate_write_error(true);

        let result = backend.write(Path::new("a.txt"), "new\n");
        assert!(matches!(result, Err(CmsError::Store(_))));
        assert_eq!(backend.contents("a.txt").as_deref(), Some("old\n"));
    }
}
