use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Thresholds for the evidence recommendation tiers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendCfg {
    /// Minimum photo cases before any photo advice is given.
    pub min_photo_cases: u32,
    /// Minimum witness cases before witness advice is given.
    pub min_witness_cases: u32,
    /// Minimum documentation cases before documentation advice is given.
    pub min_documentation_cases: u32,
    /// Improvement (percentage points) for a `critical` sign-photo tier.
    pub sign_photo_critical_gain: i32,
    /// Improvement for a `recommended` sign-photo tier.
    pub sign_photo_recommended_gain: i32,
    /// Improvement for a `recommended` location-photo tier.
    pub location_photo_recommended_gain: i32,
    /// Success rate with witnesses for a `recommended` witness tier.
    pub witness_recommended_rate: u8,
}

impl Default for RecommendCfg {
    fn default() -> Self {
        Self {
            min_photo_cases: 5,
            min_witness_cases: 3,
            min_documentation_cases: 3,
            sign_photo_critical_gain: 20,
            sign_photo_recommended_gain: 10,
            location_photo_recommended_gain: 15,
            witness_recommended_rate: 70,
        }
    }
}

/// Business constants of the camera-ticket cost/benefit estimate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraCfg {
    pub red_light_hours: u32,
    pub speed_hours: u32,
    /// Out-of-pocket cost of contesting a speed-camera sub-code (USD).
    pub speed_review_cost: f64,
    /// Win probability used when the ordinance table has none.
    pub default_win_probability: u8,
    /// Fines above this suggest an attorney.
    pub attorney_fine_threshold: f64,
    /// Fines above this are worth contesting even at negative expected value.
    pub contest_fine_threshold: f64,
    /// Win probabilities below this are `very-hard`.
    pub very_hard_below: u8,
}

impl Default for CameraCfg {
    fn default() -> Self {
        Self {
            red_light_hours: 12,
            speed_hours: 8,
            speed_review_cost: 50.0,
            default_win_probability: 10,
            attorney_fine_threshold: 250.0,
            contest_fine_threshold: 200.0,
            very_hard_below: 15,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorCfg {
    /// Contest grounds cited fewer times than this are dropped.
    pub min_ground_cases: u32,
    pub recommend: RecommendCfg,
    pub camera: CameraCfg,
}

impl Default for AdvisorCfg {
    fn default() -> Self {
        Self {
            min_ground_cases: 3,
            recommend: RecommendCfg::default(),
            camera: CameraCfg::default(),
        }
    }
}

impl AdvisorCfg {
    /// Parse a TOML overlay; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: AdvisorCfg = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| AdvisorError::io(path, e))?;
        let cfg = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded advisor config");
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let pct_fields = [
            ("camera.default_win_probability", self.camera.default_win_probability),
            ("camera.very_hard_below", self.camera.very_hard_below),
            ("recommend.witness_recommended_rate", self.recommend.witness_recommended_rate),
        ];
        for (name, v) in pct_fields {
            if v > 100 {
                return Err(AdvisorError::InvalidConfig {
                    details: format!("{name} = {v} is not a percentage"),
                });
            }
        }
        let money_fields = [
            ("camera.speed_review_cost", self.camera.speed_review_cost),
            ("camera.attorney_fine_threshold", self.camera.attorney_fine_threshold),
            ("camera.contest_fine_threshold", self.camera.contest_fine_threshold),
        ];
        for (name, v) in money_fields {
            if !v.is_finite() || v < 0.0 {
                return Err(AdvisorError::InvalidConfig {
                    details: format!("{name} = {v} must be a non-negative amount"),
                });
            }
        }
        Ok(())
    }
}
