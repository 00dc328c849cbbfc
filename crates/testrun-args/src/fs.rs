use std::path::{Path, PathBuf};

/// The only file-system access the parser needs. File contents are never read.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn resolve_absolute(&self, path: &Path) -> PathBuf;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn resolve_absolute(&self, path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        })
    }
}
