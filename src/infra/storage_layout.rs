use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "pchat";

/// On-disk home of the client's persisted state, rooted in the XDG config
/// home: the session record, the single-instance lock and the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn resolve() -> Result<Self, AppError> {
        let base = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(dirs::config_dir)
            .ok_or_else(|| AppError::StoragePathResolution {
                details: "neither XDG_CONFIG_HOME nor a platform config directory is available"
                    .into(),
            })?;

        Ok(Self::at(base.join(APP_DIR_NAME)))
    }

    /// Roots the layout at an explicit directory instead of the XDG home.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn session_dir(&self) -> PathBuf {
        self.root.join("session")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn session_file(&self) -> PathBuf {
        self.session_dir().join("session.json")
    }

    pub fn session_lock_file(&self) -> PathBuf {
        self.session_dir().join("session.lock")
    }

    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        for dir in [self.root.clone(), self.session_dir(), self.log_dir()] {
            if let Err(source) = fs::create_dir_all(&dir) {
                return Err(AppError::StorageDirCreate { path: dir, source });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_lives_under_the_root() {
        let layout = StorageLayout::at("/tmp/pchat-test");

        assert!(layout.session_dir().starts_with(layout.root()));
        assert!(layout.log_dir().starts_with(layout.root()));
        assert!(layout.session_file().starts_with(layout.session_dir()));
        assert!(layout.session_lock_file().starts_with(layout.session_dir()));
    }

    #[test]
    fn ensure_dirs_creates_the_tree() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let layout = StorageLayout::at(dir.path().join("state"));

        layout.ensure_dirs().expect("dirs should be created");

        assert!(layout.session_dir().is_dir());
        assert!(layout.log_dir().is_dir());
    }
}
