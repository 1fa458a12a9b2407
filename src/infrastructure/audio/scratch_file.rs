use std::path::{Path, PathBuf};

/// A request-scoped temporary file path that is removed when dropped.
///
/// The file itself is created by whoever writes to `path()`. Removal runs on
/// every exit path, including early returns and cancelled futures; a removal
/// failure is logged and otherwise ignored.
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    pub fn new(dir: &Path, stem: &str, extension: &str) -> Self {
        Self {
            path: dir.join(format!("{}.{}", stem, extension)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::trace!(path = %self.path.display(), "Removed scratch file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove scratch file"
            ),
        }
    }
}
