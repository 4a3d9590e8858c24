//! Static content tables: recommendation copy, camera evidence checklists
//! and the ordinance reference table.
//!
//! The tables are data, not logic. A default set is compiled in from
//! `content/default.toml`; deployments can load their own file at startup.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::{CameraKind, Difficulty};
use crate::error::{AdvisorError, Result};

const BUILTIN_CONTENT: &str = include_str!("../content/default.toml");

/// Copy attached to one recommendation kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationContent {
    pub label: String,
    pub description: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationTable {
    pub sign_photos: RecommendationContent,
    pub location_photos: RecommendationContent,
    pub witness_statement: RecommendationContent,
    pub documentation: RecommendationContent,
}

/// One item of a camera-ticket evidence checklist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct SpecializedEvidence {
    #[serde(rename = "type")]
    pub evidence_type: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub how_to: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraChecklists {
    pub red_light: Vec<SpecializedEvidence>,
    pub speed: Vec<SpecializedEvidence>,
}

impl CameraChecklists {
    pub fn for_kind(&self, kind: CameraKind) -> &[SpecializedEvidence] {
        match kind {
            CameraKind::RedLight => &self.red_light,
            CameraKind::Speed => &self.speed,
        }
    }
}

/// Reference data for one municipal code section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ordinance {
    pub title: String,
    #[serde(default)]
    pub category: String,
    /// Standard fine in USD, when known.
    #[serde(default)]
    pub fine: Option<f64>,
    /// Estimated chance a contest succeeds, as a percentage.
    #[serde(default)]
    pub win_probability: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentTables {
    pub recommendations: RecommendationTable,
    pub camera: CameraChecklists,
    #[serde(default)]
    pub ordinances: BTreeMap<String, Ordinance>,
}

impl ContentTables {
    /// The tables shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CONTENT)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let tables: ContentTables = toml::from_str(s)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| AdvisorError::io(path, e))?;
        let tables = Self::from_toml_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            ordinances = tables.ordinances.len(),
            "loaded content tables"
        );
        Ok(tables)
    }

    pub fn ordinance(&self, code: &str) -> Option<&Ordinance> {
        self.ordinances.get(code.trim())
    }

    pub fn validate(&self) -> Result<()> {
        let recs = &self.recommendations;
        for (name, c) in [
            ("sign_photos", &recs.sign_photos),
            ("location_photos", &recs.location_photos),
            ("witness_statement", &recs.witness_statement),
            ("documentation", &recs.documentation),
        ] {
            if c.label.trim().is_empty() {
                return Err(invalid(format!("recommendations.{name} has an empty label")));
            }
        }

        for (name, list) in [("red_light", &self.camera.red_light), ("speed", &self.camera.speed)] {
            if list.is_empty() {
                return Err(invalid(format!("camera.{name} checklist is empty")));
            }
        }

        for (code, ord) in &self.ordinances {
            if let Some(p) = ord.win_probability {
                if p > 100 {
                    return Err(invalid(format!("ordinance {code}: win_probability {p} exceeds 100")));
                }
            }
            if let Some(fine) = ord.fine {
                if !fine.is_finite() || fine < 0.0 {
                    return Err(invalid(format!("ordinance {code}: fine {fine} is not a valid amount")));
                }
            }
        }
        Ok(())
    }
}

fn invalid(details: String) -> AdvisorError {
    AdvisorError::InvalidContent { details }
}
