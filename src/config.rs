//! Simulation configuration
//!
//! Fixed at construction. Gameplay balance lives in [`crate::consts`]; this only
//! carries what differs between hosts (screen size, seed, clock clamp).

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Construction-time settings for a [`crate::sim::World`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Play-field width in world units
    pub field_width: f32,
    /// Play-field height in world units (y grows upward, 0 is the bottom edge)
    pub field_height: f32,
    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Upper bound on a single frame delta (guards against resume-from-background spikes)
    pub max_frame_dt: f32,
    /// Simulate the cosmetic background star field
    pub starfield: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field_width: 375.0,
            field_height: 667.0,
            seed: None,
            max_frame_dt: 0.25,
            starfield: true,
        }
    }
}

impl SimConfig {
    /// Config for a field of the given size, everything else default
    pub fn with_field(field_width: f32, field_height: f32) -> Self {
        Self {
            field_width,
            field_height,
            ..Self::default()
        }
    }

    /// Builder-style seed override
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SimError::InvalidConfiguration(format!("malformed config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        for (name, value) in [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("max_frame_dt", self.max_frame_dt),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidConfiguration(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let err = SimConfig::with_field(0.0, 600.0).validate().unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));

        let err = SimConfig::with_field(400.0, -1.0).validate().unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));

        let err = SimConfig::with_field(f32::NAN, 600.0).validate().unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_from_json_partial() {
        let config = SimConfig::from_json(r#"{ "field_width": 320.0, "seed": 7 }"#).unwrap();
        assert_eq!(config.field_width, 320.0);
        assert_eq!(config.field_height, SimConfig::default().field_height);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(SimConfig::from_json("{ not json").is_err());
        assert!(SimConfig::from_json(r#"{ "field_height": 0.0 }"#).is_err());
    }
}
