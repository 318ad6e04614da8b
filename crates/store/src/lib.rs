// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ordo-store: pause/resume state persistence. Two implementations: an
//! in-process map for ephemeral runs, and a one-file-per-run directory for
//! durable ones. Neither implementation coordinates across processes —
//! callers needing multi-writer safety layer their own locking.

mod error;

use ordo_core::RunState;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use tracing::warn;

pub use error::StoreError;

pub trait StateStore: Send + Sync {
    fn save(&self, state: &RunState) -> Result<(), StoreError>;
    fn load(&self, run_id: &str) -> Result<Option<RunState>, StoreError>;
    fn delete(&self, run_id: &str) -> Result<(), StoreError>;
}

/// In-process state store. State is lost when the process exits.
#[derive(Default)]
pub struct InMemoryStateStore {
    states: Mutex<HashMap<String, RunState>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStateStore {
    fn save(&self, state: &RunState) -> Result<(), StoreError> {
        self.states.lock().insert(state.run_id.clone(), state.clone());
        Ok(())
    }

    fn load(&self, run_id: &str) -> Result<Option<RunState>, StoreError> {
        Ok(self.states.lock().get(run_id).cloned())
    }

    fn delete(&self, run_id: &str) -> Result<(), StoreError> {
        self.states.lock().remove(run_id);
        Ok(())
    }
}

/// One JSON file per run under `dir`, named `<run_id>.json`. Saves are
/// atomic (write to a `.tmp` sibling, then rename); a snapshot that fails
/// to parse on load is rotated aside to `.bak` rather than treated as a
/// hard error, so a corrupt file doesn't wedge the run forever.
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStateStore { dir: dir.into() }
    }

    fn path_for(&self, run_id: &str) -> PathBuf {
        self.dir.join(format!("{run_id}.json"))
    }
}

impl StateStore for FileStateStore {
    fn save(&self, state: &RunState) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&state.run_id);
        let tmp_path = path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, state)?;
            let file = writer
                .into_inner()
                .map_err(|e| StoreError::Io(e.into_error()))?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn load(&self, run_id: &str) -> Result<Option<RunState>, StoreError> {
        let path = self.path_for(run_id);
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(&path)?;
        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                let bak_path = path.with_extension("json.bak");
                warn!(error = %e, path = %path.display(), bak = %bak_path.display(), "corrupt run state, rotating aside");
                fs::rename(&path, &bak_path)?;
                Ok(None)
            }
        }
    }

    fn delete(&self, run_id: &str) -> Result<(), StoreError> {
        let path = self.path_for(run_id);
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
