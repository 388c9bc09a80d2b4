//! Board settings
//!
//! Persisted next to the board snapshot, under their own key.

use serde::{Deserialize, Serialize};

use crate::consts::{BOARD_STORAGE_KEY, OVERALL_SHUFFLE_CHANCE, SETTINGS_STORAGE_KEY};
use crate::error::Result;
use crate::platform::Storage;

/// User-tunable board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key the board snapshot is stored under
    pub storage_key: String,
    /// Fixed RNG seed for reproducible shuffles (random when unset)
    pub seed: Option<u64>,
    /// Probability that a card shuffle pools cards across columns
    pub overall_shuffle_chance: f64,
    /// Minimum time between automatic saves (0 = save after every change)
    pub save_debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: BOARD_STORAGE_KEY.to_string(),
            seed: None,
            overall_shuffle_chance: OVERALL_SHUFFLE_CHANCE,
            save_debounce_ms: 0,
        }
    }
}

impl Settings {
    /// Clamp a probability into [0, 1]; NaN counts as 0
    pub fn clamp_chance(chance: f64) -> f64 {
        if chance.is_nan() {
            0.0
        } else {
            chance.clamp(0.0, 1.0)
        }
    }

    /// Overall-shuffle probability, safe to hand to the RNG
    pub fn effective_overall_shuffle_chance(&self) -> f64 {
        Self::clamp_chance(self.overall_shuffle_chance)
    }

    /// Load settings from storage, falling back to defaults
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get(SETTINGS_STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to storage
    pub fn save(&self, storage: &mut dyn Storage) -> Result<()> {
        let json = serde_json::to_string(self)?;
        storage.set(SETTINGS_STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
