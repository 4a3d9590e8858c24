use serde::{Deserialize, Serialize};

use crate::analysis::{EvidenceImpactStat, OutcomeAnalysis};
use crate::cfg::RecommendCfg;
use crate::content::{ContentTables, RecommendationContent};
use crate::outcome::EvidenceType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    Recommended,
    Optional,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    SignPhotos,
    LocationPhotos,
    WitnessStatement,
    Documentation,
}

impl RecommendationKind {
    pub const fn evidence_type(self) -> EvidenceType {
        match self {
            RecommendationKind::SignPhotos | RecommendationKind::LocationPhotos => EvidenceType::Photos,
            RecommendationKind::WitnessStatement => EvidenceType::Witnesses,
            RecommendationKind::Documentation => EvidenceType::Documentation,
        }
    }

    fn content(self, content: &ContentTables) -> &RecommendationContent {
        let t = &content.recommendations;
        match self {
            RecommendationKind::SignPhotos => &t.sign_photos,
            RecommendationKind::LocationPhotos => &t.location_photos,
            RecommendationKind::WitnessStatement => &t.witness_statement,
            RecommendationKind::Documentation => &t.documentation,
        }
    }
}

/// One piece of evidence-gathering advice backed by historical outcomes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRecommendation {
    pub kind: RecommendationKind,
    #[serde(rename = "type")]
    pub evidence_type: EvidenceType,
    pub label: String,
    pub description: String,
    pub success_rate_with: u8,
    pub success_rate_without: u8,
    pub cases_analyzed: u32,
    pub priority: Priority,
    pub tips: Vec<String>,
}

impl EvidenceRecommendation {
    fn build(
        kind: RecommendationKind,
        stat: &EvidenceImpactStat,
        priority: Priority,
        content: &ContentTables,
    ) -> Self {
        let copy = kind.content(content);
        Self {
            kind,
            evidence_type: kind.evidence_type(),
            label: copy.label.clone(),
            description: copy.description.clone(),
            success_rate_with: stat.success_rate_with,
            success_rate_without: stat.success_rate_without,
            cases_analyzed: stat.cases_with,
            priority,
            tips: copy.tips.clone(),
        }
    }
}

/// Turn aggregated outcomes into prioritized evidence advice.
///
/// Output order is fixed: sign photos, location photos, witness statement,
/// documentation. Each kind appears only when enough cases back it.
pub fn generate_recommendations(
    analysis: &OutcomeAnalysis,
    cfg: &RecommendCfg,
    content: &ContentTables,
) -> Vec<EvidenceRecommendation> {
    let mut out = Vec::new();

    if let Some(photos) = analysis.impact(EvidenceType::Photos) {
        if photos.cases_with >= cfg.min_photo_cases {
            let gain = photos.improvement();

            let sign = if gain >= cfg.sign_photo_critical_gain {
                Priority::Critical
            } else if gain >= cfg.sign_photo_recommended_gain {
                Priority::Recommended
            } else {
                Priority::Optional
            };
            out.push(EvidenceRecommendation::build(RecommendationKind::SignPhotos, photos, sign, content));

            // No critical tier for location shots.
            let location = if gain >= cfg.location_photo_recommended_gain {
                Priority::Recommended
            } else {
                Priority::Optional
            };
            out.push(EvidenceRecommendation::build(
                RecommendationKind::LocationPhotos,
                photos,
                location,
                content,
            ));
        }
    }

    if let Some(witnesses) = analysis.impact(EvidenceType::Witnesses) {
        if witnesses.cases_with >= cfg.min_witness_cases {
            let priority = if witnesses.success_rate_with >= cfg.witness_recommended_rate {
                Priority::Recommended
            } else {
                Priority::Optional
            };
            out.push(EvidenceRecommendation::build(
                RecommendationKind::WitnessStatement,
                witnesses,
                priority,
                content,
            ));
        }
    }

    if let Some(docs) = analysis.impact(EvidenceType::Documentation) {
        if docs.cases_with >= cfg.min_documentation_cases {
            out.push(EvidenceRecommendation::build(
                RecommendationKind::Documentation,
                docs,
                Priority::Optional,
                content,
            ));
        }
    }

    out
}
