//! Persisted Credential Storage
//!
//! One opaque bearer credential lives in a single storage slot. A second login
//! overwrites it; logout and a failed session restoration clear it.
//!
//! Two stores are provided:
//!
//! - [`FileCredentialStore`] keeps the token in a file under the platform
//!   config directory (`~/.config/bookworm/token` on Linux).
//! - [`MemoryCredentialStore`] keeps it in memory; clones share the slot.

use std::fmt;
use std::fs::{DirBuilder, File, OpenOptions};
use std::io::{ErrorKind, Write};
#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Opaque bearer token proving identity to the backend
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("credential storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("credential storage poisoned")]
    Poisoned,
}

/// Single-slot persistence for the bearer credential
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<Credential>, StorageError>;
    fn save(&self, credential: &Credential) -> Result<(), StorageError>;
    /// Removing an absent credential is not an error
    fn clear(&self) -> Result<(), StorageError>;
}

/// File-backed store; on unix the token file is `0600` in a `0700` directory
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn private_dir_builder() -> DirBuilder {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o700);
    builder
}

fn private_file_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);
    options
}

/// `mode` only applies on creation; a token file left by an older run is tightened here
#[cfg(unix)]
fn restrict_to_owner(file: &File) -> std::io::Result<()> {
    file.set_permissions(std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_file: &File) -> std::io::Result<()> {
    Ok(())
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Credential::new(token)))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, credential: &Credential) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            private_dir_builder()
                .create(parent)
                .map_err(|e| self.io_error(e))?;
        }
        let mut file = private_file_options()
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        restrict_to_owner(&file).map_err(|e| self.io_error(e))?;
        file.write_all(credential.as_str().as_bytes())
            .map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-memory store; clones observe the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    slot: Arc<Mutex<Option<Credential>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(credential))),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>, StorageError> {
        Ok(self.slot.lock().map_err(|_| StorageError::Poisoned)?.clone())
    }

    fn save(&self, credential: &Credential) -> Result<(), StorageError> {
        *self.slot.lock().map_err(|_| StorageError::Poisoned)? = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock().map_err(|_| StorageError::Poisoned)? = None;
        Ok(())
    }
}
