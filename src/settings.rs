//! Game tuning
//!
//! Every timing and layout constant can be overridden from JSON. Missing
//! fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::persistence::Storage;

/// Upper bounds that keep every derived range finite
const MAX_TRAVEL_SECS: f32 = 3600.0;
const MAX_OFFSCREEN_MARGIN: f32 = 10_000.0;

/// Rejected settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("travel range is inverted ({min}s > {max}s)")]
    InvertedTravel { min: f32, max: f32 },
    #[error("expiry ({expiry_ms}ms) must outlast the longest walk ({travel_ms}ms)")]
    ExpiryTooShort { expiry_ms: u64, travel_ms: u64 },
    #[error("high score key must not be empty")]
    EmptyKey,
    #[error("{field} is out of range ({value})")]
    OutOfRange { field: &'static str, value: f32 },
}

/// Round and ant tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Countdown length in seconds
    pub round_secs: u32,
    pub spawn_period_ms: u64,
    pub travel_delay_ms: u64,
    pub travel_min_secs: f32,
    pub travel_max_secs: f32,
    pub max_rotation_deg: f32,
    pub expiry_ms: u64,
    pub smash_linger_ms: u64,
    pub offscreen_margin: f32,
    pub high_score_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_secs: ROUND_SECS,
            spawn_period_ms: SPAWN_PERIOD_MS,
            travel_delay_ms: TRAVEL_DELAY_MS,
            travel_min_secs: TRAVEL_MIN_SECS,
            travel_max_secs: TRAVEL_MAX_SECS,
            max_rotation_deg: MAX_ROTATION_DEG,
            expiry_ms: EXPIRY_MS,
            smash_linger_ms: SMASH_LINGER_MS,
            offscreen_margin: OFFSCREEN_MARGIN,
            high_score_key: HIGH_SCORE_KEY.to_string(),
        }
    }
}

impl Settings {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_secs == 0 {
            return Err(ConfigError::Zero { field: "round_secs" });
        }
        if self.spawn_period_ms == 0 {
            return Err(ConfigError::Zero {
                field: "spawn_period_ms",
            });
        }
        for (field, value, max) in [
            ("travel_min_secs", self.travel_min_secs, MAX_TRAVEL_SECS),
            ("travel_max_secs", self.travel_max_secs, MAX_TRAVEL_SECS),
            ("max_rotation_deg", self.max_rotation_deg, 360.0),
            ("offscreen_margin", self.offscreen_margin, MAX_OFFSCREEN_MARGIN),
        ] {
            if !value.is_finite() || value.abs() > max {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        if self.travel_min_secs <= 0.0 {
            return Err(ConfigError::Zero {
                field: "travel_min_secs",
            });
        }
        if self.travel_min_secs > self.travel_max_secs {
            return Err(ConfigError::InvertedTravel {
                min: self.travel_min_secs,
                max: self.travel_max_secs,
            });
        }
        let travel_ms = self
            .travel_delay_ms
            .saturating_add((self.travel_max_secs * 1000.0).ceil() as u64);
        if self.expiry_ms < travel_ms {
            return Err(ConfigError::ExpiryTooShort {
                expiry_ms: self.expiry_ms,
                travel_ms,
            });
        }
        if self.high_score_key.trim().is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        Ok(())
    }

    /// Read an override from `storage`, falling back to defaults on any problem
    pub fn load_or_default<S: Storage + ?Sized>(storage: &S, key: &str) -> Self {
        match storage.get(key) {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings override from '{}'", key);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring settings override: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.round_secs, 30);
        assert_eq!(settings.expiry_ms, 5500);
        assert_eq!(settings.smash_linger_ms, 500);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "round_secs": 10 }"#).unwrap();
        assert_eq!(settings.round_secs, 10);
        assert_eq!(settings.spawn_period_ms, SPAWN_PERIOD_MS);
        assert_eq!(settings.high_score_key, HIGH_SCORE_KEY);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(matches!(
            Settings::from_json(r#"{ "round_secs": 0 }"#),
            Err(ConfigError::Zero { field: "round_secs" })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "travel_min_secs": 6.0 }"#),
            Err(ConfigError::InvertedTravel { .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "expiry_ms": 4000 }"#),
            Err(ConfigError::ExpiryTooShort { .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "high_score_key": "  " }"#),
            Err(ConfigError::EmptyKey)
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "max_rotation_deg": 1e39 }"#),
            Err(ConfigError::OutOfRange { field: "max_rotation_deg", .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "travel_max_secs": 1e39 }"#),
            Err(ConfigError::OutOfRange { field: "travel_max_secs", .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "offscreen_margin": -1e39 }"#),
            Err(ConfigError::OutOfRange { field: "offscreen_margin", .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "travel_delay_ms": 18446744073709551615 }"#),
            Err(ConfigError::ExpiryTooShort { .. })
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let mut storage = MemoryStorage::new();
        assert_eq!(
            Settings::load_or_default(&storage, SETTINGS_KEY),
            Settings::default()
        );

        storage.set(SETTINGS_KEY, r#"{ "spawn_period_ms": 0 }"#).unwrap();
        assert_eq!(
            Settings::load_or_default(&storage, SETTINGS_KEY),
            Settings::default()
        );

        storage.set(SETTINGS_KEY, r#"{ "max_rotation_deg": 1e39 }"#).unwrap();
        assert_eq!(
            Settings::load_or_default(&storage, SETTINGS_KEY),
            Settings::default()
        );

        storage.set(SETTINGS_KEY, r#"{ "spawn_period_ms": 750 }"#).unwrap();
        assert_eq!(
            Settings::load_or_default(&storage, SETTINGS_KEY).spawn_period_ms,
            750
        );
    }
}
