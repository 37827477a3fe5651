//! Bootstrap configuration, read from JSON embedded in the host page

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;
use crate::models::ScreenId;

/// Ids and classes of the host markup this layer touches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub screen_class: String,
    pub visible_class: String,
    pub lobby_code: String,
    pub start_button: String,
    pub disabled_class: String,
    pub loading_bar: String,
    pub loading_status: String,
    pub canvas: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            screen_class: "screen".to_string(),
            visible_class: "visible".to_string(),
            lobby_code: "lobby_code".to_string(),
            start_button: "start_button".to_string(),
            disabled_class: "disabled".to_string(),
            loading_bar: "loading_bar".to_string(),
            loading_status: "loading_status".to_string(),
            canvas: "game_canvas".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Path of the application module
    pub wasm_path: String,

    /// Global constructor of the host binding layer (e.g. Go's `Go` class)
    pub host_binding: Option<String>,

    /// Export called when no host binding is present
    pub entry_point: String,

    pub elements: ElementIds,

    /// Registered screens
    pub screens: Vec<ScreenId>,

    /// Screen shown before the runtime starts
    pub initial_screen: Option<ScreenId>,

    /// Acknowledgment shown in place of the lobby code after copying
    pub copied_indicator: String,

    pub copy_revert_ms: u64,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            wasm_path: "main.wasm".to_string(),
            host_binding: Some("Go".to_string()),
            entry_point: "_start".to_string(),
            elements: ElementIds::default(),
            screens: ScreenId::ALL.to_vec(),
            initial_screen: Some(ScreenId::LoadingScreen),
            copied_indicator: "Copied!".to_string(),
            copy_revert_ms: 1000,
        }
    }
}

impl BootConfig {
    /// Parse and validate; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BootConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wasm_path.trim().is_empty() {
            return Err(ConfigError::Invalid("wasm_path is empty".into()));
        }
        if self.copied_indicator.is_empty() {
            return Err(ConfigError::Invalid("copied_indicator is empty".into()));
        }
        if let Some(initial) = self.initial_screen {
            if !self.screens.contains(&initial) {
                return Err(ConfigError::Invalid(format!(
                    "initial_screen {} is not a registered screen",
                    initial
                )));
            }
        }
        Ok(())
    }

    pub fn copy_revert_delay(&self) -> Duration {
        Duration::from_millis(self.copy_revert_ms)
    }
}
