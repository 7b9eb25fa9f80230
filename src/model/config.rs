use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key the hierarchy is stored under in the key-value store
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            key: default_storage_key(),
        }
    }
}

fn default_storage_key() -> String {
    "todos".to_string()
}

/// Which raw mouse protocol drives drags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Press-and-move starts a drag immediately
    #[default]
    Pointer,
    /// Press must be held for the arm delay before moving; early motion scrolls
    Touch,
}

impl InputMode {
    pub fn toggled(self) -> InputMode {
        match self {
            InputMode::Pointer => InputMode::Touch,
            InputMode::Touch => InputMode::Pointer,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputMode::Pointer => "pointer",
            InputMode::Touch => "touch",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    /// Long-press delay before a touch arms into a drag
    #[serde(default = "default_arm_delay_ms")]
    pub arm_delay_ms: u64,
    #[serde(default)]
    pub input: InputMode,
}

impl Default for DragConfig {
    fn default() -> Self {
        DragConfig {
            arm_delay_ms: default_arm_delay_ms(),
            input: InputMode::default(),
        }
    }
}

fn default_arm_delay_ms() -> u64 {
    200
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}
