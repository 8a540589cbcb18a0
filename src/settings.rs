//! Match settings
//!
//! Loaded from a JSON file by the native runner; the browser build uses the
//! defaults plus form-factor detection.

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_DT, MAX_SUBSTEPS};
use crate::sim::{Difficulty, FormFactor};

/// Match settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Computer paddle difficulty
    pub difficulty: Difficulty,
    /// Device class; `None` lets the host detect it
    pub form_factor: Option<FormFactor>,

    // === Timing ===
    /// Fixed simulation rate (Hz) for delta-time driven hosts
    pub frame_rate: f32,
    /// Maximum frames run for one host callback
    pub max_substeps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            form_factor: None,

            frame_rate: 1.0 / FRAME_DT,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Form factor to use, falling back to `detected` when unset
    pub fn resolve_form_factor(&self, detected: FormFactor) -> FormFactor {
        self.form_factor.unwrap_or(detected)
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
