use std::{fs, io::ErrorKind, path::PathBuf};

use fs2::FileExt;

use crate::{
    domain::session::SessionRecord,
    infra::{contracts::SessionStoreAdapter, error::AppError, storage_layout::StorageLayout},
};

const SESSION_LOAD_MALFORMED: &str = "SESSION_LOAD_MALFORMED";
const SESSION_LOAD_UNREADABLE: &str = "SESSION_LOAD_UNREADABLE";

/// File-backed session store holding the one persisted (user, theme) record.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    session_file: PathBuf,
}

impl FileSessionStore {
    pub fn new(layout: &StorageLayout) -> Self {
        Self {
            session_file: layout.session_file(),
        }
    }

    #[cfg(test)]
    pub fn at_path(session_file: PathBuf) -> Self {
        Self { session_file }
    }
}

impl SessionStoreAdapter for FileSessionStore {
    fn load(&self) -> Option<SessionRecord> {
        let raw = match fs::read_to_string(&self.session_file) {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => return None,
            Err(source) => {
                tracing::warn!(
                    code = SESSION_LOAD_UNREADABLE,
                    path = %self.session_file.display(),
                    error = %source,
                    "treating unreadable session file as absent"
                );
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(source) => {
                tracing::warn!(
                    code = SESSION_LOAD_MALFORMED,
                    path = %self.session_file.display(),
                    error = %source,
                    "treating malformed session file as absent"
                );
                None
            }
        }
    }

    fn save(&mut self, record: &SessionRecord) -> Result<(), AppError> {
        if let Some(parent) = self.session_file.parent() {
            fs::create_dir_all(parent).map_err(|source| AppError::StorageDirCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let payload =
            serde_json::to_vec_pretty(record).map_err(|source| AppError::SessionWrite {
                path: self.session_file.clone(),
                source: std::io::Error::other(source),
            })?;

        // Write-then-rename keeps the replacement atomic for readers.
        let tmp_file = self.session_file.with_extension("json.tmp");
        fs::write(&tmp_file, payload).map_err(|source| AppError::SessionWrite {
            path: tmp_file.clone(),
            source,
        })?;
        fs::rename(&tmp_file, &self.session_file).map_err(|source| AppError::SessionWrite {
            path: self.session_file.clone(),
            source,
        })?;

        Ok(())
    }

    fn clear(&mut self) -> Result<bool, AppError> {
        match fs::remove_file(&self.session_file) {
            Ok(()) => Ok(true),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(AppError::SessionRemove {
                path: self.session_file.clone(),
                source,
            }),
        }
    }
}

/// Exclusive lock guaranteeing at most one running instance per install.
///
/// The lock is released when the returned guard is dropped (process exit
/// included).
#[derive(Debug)]
pub struct InstanceLock {
    _file: fs::File,
}

pub fn acquire_instance_lock(layout: &StorageLayout) -> Result<InstanceLock, AppError> {
    let path = layout.session_lock_file();
    let file = fs::File::create(&path).map_err(|source| AppError::InstanceLock {
        path: path.clone(),
        source,
    })?;

    match file.try_lock_exclusive() {
        Ok(()) => Ok(InstanceLock { _file: file }),
        Err(source) if source.kind() == ErrorKind::WouldBlock => {
            Err(AppError::InstanceLockHeld { path })
        }
        Err(source) => Err(AppError::InstanceLock { path, source }),
    }
}
