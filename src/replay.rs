//! Replay of recorded screen actions.
//!
//! Action logs are JSON lines, one serialized [`ScreenAction`] per line.
//! Blank lines and lines starting with `#` are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::mvi::Reducer;
use crate::screen::{ScreenAction, ScreenReducer, ScreenState};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid action on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid snapshot '{path}': {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome counters for a replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Actions fed to the reducer, unrecognized ones included.
    pub applied: usize,
    /// Actions whose `type` this build does not know.
    pub unrecognized: usize,
}

/// Parse a JSON-lines action log. `line` numbers in errors are 1-based.
pub fn parse_actions<R: BufRead>(reader: R) -> Result<Vec<ScreenAction>, ReplayError> {
    let mut actions = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| ReplayError::Read {
            line: line_no,
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let action = serde_json::from_str(trimmed).map_err(|source| ReplayError::Parse {
            line: line_no,
            source,
        })?;
        actions.push(action);
    }
    Ok(actions)
}

/// Parse the action log at `path`.
pub fn read_actions(path: &Path) -> Result<Vec<ScreenAction>, ReplayError> {
    let file = File::open(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_actions(BufReader::new(file))
}

/// Load a store snapshot. `false` values load as the unset sentinel.
pub fn load_snapshot(path: &Path) -> Result<ScreenState, ReplayError> {
    let file = File::open(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ReplayError::Snapshot {
        path: path.to_path_buf(),
        source,
    })
}

/// Fold `actions` over `initial` in order.
pub fn replay(
    initial: ScreenState,
    actions: impl IntoIterator<Item = ScreenAction>,
) -> (ScreenState, ReplaySummary) {
    let mut summary = ReplaySummary::default();
    let state = actions.into_iter().fold(initial, |state, action| {
        summary.applied += 1;
        match action.action_type() {
            Some(kind) => tracing::trace!(
                index = summary.applied,
                kind,
                key = action.key().unwrap_or_default(),
                "replaying action"
            ),
            None => {
                summary.unrecognized += 1;
                tracing::warn!(index = summary.applied, "skipping unrecognized action");
            }
        }
        ScreenReducer::reduce(state, action)
    });
    tracing::info!(
        applied = summary.applied,
        unrecognized = summary.unrecognized,
        keys = state.len(),
        "replay finished"
    );
    (state, summary)
}
