//! Widget configuration.
//!
//! `Tuning` carries every gameplay and cosmetic constant the controller and the
//! view read; `AppConfig` adds the copy text, image asset lists and logging
//! level. `Default` reproduces the stock widget. With the `serde` feature both
//! structs deserialize from partial JSON (missing fields keep their defaults).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// Limits that keep a hand-written config from stalling the page.
const MIN_CONFETTI_INTERVAL_MS: f64 = 50.0;
const MAX_CONFETTI_DURATION_MS: f64 = 30_000.0;
const MAX_CONFETTI_PARTICLES: u32 = 500;
const MAX_DECORATIONS: u32 = 200;

/// Tunable numbers for escalation, timers and celebration effects.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tuning {
    /// Further declines after level 5 is entered before the controller gives up and accepts.
    pub auto_accept_extra_attempts: u32,
    /// Delay between reaching level 5 and the decline control disappearing.
    pub hide_delay_ms: f64,
    /// How long a guilt message stays on screen.
    pub message_duration_ms: f64,
    pub accept_growth_per_attempt: f64,
    pub accept_max_scale: f64,
    /// Pointer radius (px) that makes the level 3 decline control jump away.
    pub proximity_radius_px: f64,
    /// Decline control footprint used when computing relocation bounds.
    pub decline_width_px: f64,
    pub decline_height_px: f64,
    /// Extra inset (px) kept between a relocated decline control and the container edge.
    pub relocation_margin_px: f64,
    pub celebration_stagger_ms: f64,
    pub confetti_duration_ms: f64,
    pub confetti_interval_ms: f64,
    pub confetti_particles: u32,
    pub confetti_spread_deg: f64,
    pub confetti_start_velocity: f64,
    pub falling_hearts: u32,
    pub floating_hearts: u32,
    pub tears: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            auto_accept_extra_attempts: 3,
            hide_delay_ms: 500.0,
            message_duration_ms: 2_000.0,
            accept_growth_per_attempt: 0.05,
            accept_max_scale: 2.0,
            proximity_radius_px: 100.0,
            decline_width_px: 120.0,
            decline_height_px: 50.0,
            relocation_margin_px: 50.0,
            celebration_stagger_ms: 100.0,
            confetti_duration_ms: 3_000.0,
            confetti_interval_ms: 250.0,
            confetti_particles: 50,
            confetti_spread_deg: 360.0,
            confetti_start_velocity: 30.0,
            falling_hearts: 30,
            floating_hearts: 20,
            tears: 10,
        }
    }
}

/// Everything the host page may override when mounting the widget.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AppConfig {
    pub question: String,
    pub subtitle: String,
    pub decline_images: Vec<String>,
    pub accept_images: Vec<String>,
    /// Small image shown inline on the success screen; empty disables it.
    pub success_image: String,
    /// `log` level filter name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
    /// Fixed RNG seed; `None` seeds from the browser.
    pub seed: Option<u64>,
    pub tuning: Tuning,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            question: "Will you be my Valentine?".to_string(),
            subtitle: "I promise to make it worth your while! 💕".to_string(),
            decline_images: crate::DECLINE_IMAGES.iter().map(|s| s.to_string()).collect(),
            accept_images: crate::ACCEPT_IMAGES.iter().map(|s| s.to_string()).collect(),
            success_image: crate::SUCCESS_IMAGE.to_string(),
            log_level: "info".to_string(),
            seed: None,
            tuning: Tuning::default(),
        }
    }
}

impl AppConfig {
    /// Parse a (possibly partial) JSON document and validate the result.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn log_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decline_images.is_empty() {
            return Err(ConfigError::EmptyAssetList("decline_images"));
        }
        if self.accept_images.is_empty() {
            return Err(ConfigError::EmptyAssetList("accept_images"));
        }
        let t = &self.tuning;
        let positive = [
            ("message_duration_ms", t.message_duration_ms),
            ("confetti_interval_ms", t.confetti_interval_ms),
            ("accept_max_scale", t.accept_max_scale),
            ("decline_width_px", t.decline_width_px),
            ("decline_height_px", t.decline_height_px),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive(field));
            }
        }
        let non_negative = [
            ("hide_delay_ms", t.hide_delay_ms),
            ("confetti_duration_ms", t.confetti_duration_ms),
            ("celebration_stagger_ms", t.celebration_stagger_ms),
            ("proximity_radius_px", t.proximity_radius_px),
            ("relocation_margin_px", t.relocation_margin_px),
            ("accept_growth_per_attempt", t.accept_growth_per_attempt),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative(field));
            }
        }
        if t.confetti_interval_ms < MIN_CONFETTI_INTERVAL_MS {
            return Err(ConfigError::TooSmall {
                field: "confetti_interval_ms",
                min: MIN_CONFETTI_INTERVAL_MS,
            });
        }
        let capped = [
            ("confetti_duration_ms", t.confetti_duration_ms, MAX_CONFETTI_DURATION_MS),
            ("confetti_particles", f64::from(t.confetti_particles), f64::from(MAX_CONFETTI_PARTICLES)),
            ("falling_hearts", f64::from(t.falling_hearts), f64::from(MAX_DECORATIONS)),
            ("floating_hearts", f64::from(t.floating_hearts), f64::from(MAX_DECORATIONS)),
            ("tears", f64::from(t.tears), f64::from(MAX_DECORATIONS)),
        ];
        for (field, value, max) in capped {
            if value > max {
                return Err(ConfigError::TooLarge { field, max });
            }
        }
        self.log_filter()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.decline_images.len(), crate::DECLINE_IMAGES.len());
        assert_eq!(cfg.log_filter().unwrap(), log::LevelFilter::Info);
    }

    #[test]
    fn empty_asset_list_is_rejected() {
        let cfg = AppConfig {
            accept_images: Vec::new(),
            ..AppConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::EmptyAssetList("accept_images"))
        ));
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let cfg = AppConfig {
            log_level: "loud".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::LogLevel(ref l)) if l == "loud"));
    }

    #[test]
    fn zero_message_duration_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.tuning.message_duration_ms = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotPositive("message_duration_ms"))
        ));
    }

    #[test]
    fn tiny_confetti_interval_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.tuning.confetti_interval_ms = 1e-9;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::TooSmall { field: "confetti_interval_ms", .. })
        ));
    }

    #[test]
    fn oversized_effect_counts_are_rejected() {
        let mut cfg = AppConfig::default();
        cfg.tuning.confetti_particles = 1_000_000;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::TooLarge { field: "confetti_particles", .. })
        ));

        let mut cfg = AppConfig::default();
        cfg.tuning.falling_hearts = u32::MAX;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::TooLarge { field: "falling_hearts", .. })
        ));

        let mut cfg = AppConfig::default();
        cfg.tuning.confetti_duration_ms = 1e12;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::TooLarge { field: "confetti_duration_ms", .. })
        ));
    }

    #[test]
    fn shrinking_accept_button_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.tuning.accept_growth_per_attempt = -0.1;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Negative("accept_growth_per_attempt"))
        ));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = AppConfig::from_json(
            r#"{ "question": "Dinner?", "tuning": { "auto_accept_extra_attempts": 5 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.question, "Dinner?");
        assert_eq!(cfg.tuning.auto_accept_extra_attempts, 5);
        assert_eq!(cfg.tuning.hide_delay_ms, 500.0);
        assert_eq!(cfg.accept_images.len(), crate::ACCEPT_IMAGES.len());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
