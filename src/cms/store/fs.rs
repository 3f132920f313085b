use super::StorageBackend;
use crate::error::{CmsError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Filesystem backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsBackend;

impl FsBackend {
    pub fn new() -> Self {
        Self
    }

    fn tmp_path(path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "records".to_string());
        path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
    }
}

impl StorageBackend for FsBackend {
    /// Bytes that are not valid UTF-8 decode to U+FFFD, so a badly encoded
    /// line fails field validation on its own instead of failing the read.
    fn read(&self, path: &Path) -> Result<Option<String>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CmsError::Io(e)),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let tmp = Self::tmp_path(path);
        fs::write(&tmp, contents).map_err(CmsError::Io)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(CmsError::Io(e));
        }
        log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }
}
