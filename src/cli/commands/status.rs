//! Status command - summarize the state file

use std::path::Path;

use codeuw::adapters::state_file::MsgpackStateStore;
use codeuw::output::{OutputMode, StatusResult};

/// Show what the state file records
pub fn status(state_path: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let store = MsgpackStateStore::new(state_path);
    let exists = store.exists();
    let state = store.read()?;

    StatusResult::from_state(&store.path().display().to_string(), exists, &state)
        .render(mode)?;
    Ok(())
}
