//! MessagePack state file
//!
//! The snapshot is encoded with named fields so the file stays readable by
//! any MessagePack tool. Writes go to a temporary sibling first and are then
//! renamed over the target, so an interrupted run never leaves a truncated
//! file behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::core::models::State;
use crate::core::ports::StateStore;

/// Errors reading or writing the state file
#[derive(Debug, Error)]
pub enum StateError {
    /// Filesystem failure
    #[error("state file {path}: {source}")]
    Io {
        /// State file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
    /// The snapshot could not be encoded
    #[error("failed to encode state: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    /// The file is not a valid snapshot
    #[error("state file {path} is corrupt: {source}")]
    Decode {
        /// State file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: rmp_serde::decode::Error,
    },
}

/// State store backed by a MessagePack file
#[derive(Debug, Clone)]
pub struct MsgpackStateStore {
    path: PathBuf,
}

impl MsgpackStateStore {
    /// Create a store for the given file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the state file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the state file exists yet
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the snapshot, or a fresh one if the file does not exist
    pub fn read(&self) -> Result<State, StateError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No state file at {}, starting fresh", self.path.display());
                return Ok(State::fresh());
            },
            Err(source) => {
                return Err(StateError::Io {
                    path: self.path.clone(),
                    source,
                });
            },
        };
        rmp_serde::from_slice(&bytes).map_err(|source| StateError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the file with the encoded snapshot
    pub fn write(&self, state: &State) -> Result<(), StateError> {
        let bytes = rmp_serde::to_vec_named(state)?;
        let io_err = |source| StateError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, &bytes).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}

impl StateStore for MsgpackStateStore {
    fn load(&self) -> anyhow::Result<State> {
        Ok(self.read()?)
    }

    fn save(&self, state: &State) -> anyhow::Result<()> {
        Ok(self.write(state)?)
    }
}
