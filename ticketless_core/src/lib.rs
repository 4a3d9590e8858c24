pub mod error;
pub mod cfg;
pub mod outcome;
pub mod content;

pub mod analysis;
pub mod recommend;
pub mod camera;

pub use error::{AdvisorError, Result};
pub use cfg::{AdvisorCfg, CameraCfg, RecommendCfg};
pub use outcome::{CaseOutcome, EvidenceSubmitted, EvidenceType, Outcome};
pub use content::{
    CameraChecklists, ContentTables, Ordinance, RecommendationContent, RecommendationTable,
    SpecializedEvidence,
};

pub use analysis::{
    analyze_outcomes, percent, summarize_outcomes, ContestGroundStat, EvidenceImpactStat,
    OutcomeAnalysis, OutcomeCounts, OutcomeSummary,
};
pub use recommend::{generate_recommendations, EvidenceRecommendation, Priority, RecommendationKind};
pub use camera::{
    camera_guidance, CameraGuidance, CameraKind, CostBenefit, Difficulty, CAMERA_CODES,
    RED_LIGHT_CODE, SPEED_SUBCODE_PREFIX,
};
