use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{Filter, InputMode};

pub const STATE_FILE: &str = ".state.json";

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    #[serde(default)]
    pub filter: Filter,
    /// Cursor row in the flattened list
    #[serde(default)]
    pub cursor: usize,
    /// Input modality chosen with `t` (None = use config)
    #[serde(default)]
    pub input: Option<InputMode>,
}

/// Read .state.json from the data directory
pub fn read_ui_state(dir: &Path) -> Option<UiState> {
    let content = fs::read_to_string(dir.join(STATE_FILE)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the data directory
pub fn write_ui_state(dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(dir.join(STATE_FILE), content)
}
