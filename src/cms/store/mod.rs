//! # Storage Layer
//!
//! Record files are read and written through the [`StorageBackend`] trait, so the
//! commands never touch the filesystem directly.
//!
//! ## Implementations
//!
//! - [`fs::FsBackend`]: production backend on the local filesystem
//!   - Writes go to a temporary sibling file that is then renamed over the target
//! - [`memory::MemBackend`]: in-memory backend for tests
//!   - Can simulate write failures
//!
//! Paths are opaque keys to the backend. The memory backend never normalizes them,
//! so `a.txt` and `./a.txt` are different files there.

use crate::error::Result;
use std::path::Path;

pub mod fs;
pub mod memory;

pub trait StorageBackend {
    /// Read the whole file as text.
    /// Returns Ok(None) if the file does not exist.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, path: &Path) -> Result<Option<String>>;

    /// Replace the file's contents.
    /// MUST be atomic: a failed write leaves any previous file untouched.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}
