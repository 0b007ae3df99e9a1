//! Display preferences
//!
//! Persisted in LocalStorage on the web. Gameplay tuning lives in
//! [`crate::sim::RoundConfig`], not here.

use serde::{Deserialize, Serialize};

/// Display settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw the minimap inset
    pub show_minimap: bool,
    /// Draw a health bar above each agent
    pub health_bars: bool,
    /// Pulse the storm ring's opacity
    pub hazard_pulse: bool,

    // === Accessibility ===
    /// Reduced motion (no pulsing, health bars stay level)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_minimap: true,
            health_bars: true,
            hazard_pulse: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective storm pulse (respects reduced_motion)
    pub fn effective_hazard_pulse(&self) -> bool {
        self.hazard_pulse && !self.reduced_motion
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "storm_royale_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
        {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring stored settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(json) = serde_json::to_string(self)
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No settings storage on native ({})", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_show_everything() {
        let settings = Settings::default();
        assert!(settings.show_minimap);
        assert!(settings.health_bars);
        assert!(settings.effective_hazard_pulse());
    }

    #[test]
    fn test_reduced_motion_stops_pulse() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_hazard_pulse());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"show_minimap": false}"#).unwrap();
        assert!(!settings.show_minimap);
        assert!(settings.health_bars);
        assert!(!settings.reduced_motion);

        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(serde_json::from_str::<Settings>(&json).unwrap(), settings);
    }
}
