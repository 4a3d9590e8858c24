use serde::{Deserialize, Serialize};

use crate::cfg::CameraCfg;
use crate::content::{ContentTables, SpecializedEvidence};

// ---------------------------------------------------------------------
// Camera-ticket cost/benefit advice
// ---------------------------------------------------------------------

pub const RED_LIGHT_CODE: &str = "9-102-020";
/// Speed-camera sub-codes share this prefix and carry a review cost.
pub const SPEED_SUBCODE_PREFIX: &str = "9-102-07";

/// The only codes camera guidance is ever produced for.
pub const CAMERA_CODES: [(&str, CameraKind); 3] = [
    (RED_LIGHT_CODE, CameraKind::RedLight),
    ("9-102-075", CameraKind::Speed),
    ("9-102-076", CameraKind::Speed),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraKind {
    RedLight,
    Speed,
}

impl CameraKind {
    pub fn for_code(code: &str) -> Option<CameraKind> {
        let code = code.trim();
        CAMERA_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, kind)| *kind)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    VeryHard,
    Hard,
    Medium,
    Easy,
}

impl Difficulty {
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::VeryHard => "very-hard",
            Difficulty::Hard => "hard",
            Difficulty::Medium => "medium",
            Difficulty::Easy => "easy",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBenefit {
    pub fine_amount: f64,
    pub estimated_time_hours: u32,
    pub estimated_cost: f64,
    pub expected_value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraGuidance {
    pub violation_code: String,
    pub is_camera_violation: bool,
    pub camera_kind: CameraKind,
    pub win_probability: u8,
    pub difficulty: Difficulty,
    pub recommend_contest: bool,
    pub requires_attorney: bool,
    pub specialized_evidence: Vec<SpecializedEvidence>,
    pub cost_benefit: CostBenefit,
    /// Human-readable explanation of `recommend_contest`.
    pub reason: String,
}

/// Advice for contesting a camera ticket, or `None` when the code is not a
/// known camera violation or has no ordinance entry.
///
/// Non-finite or negative fines are treated as zero.
pub fn camera_guidance(
    violation_code: &str,
    fine_amount: f64,
    content: &ContentTables,
    cfg: &CameraCfg,
) -> Option<CameraGuidance> {
    let code = violation_code.trim();
    let kind = CameraKind::for_code(code)?;
    let ordinance = content.ordinance(code)?;

    let fine = if fine_amount.is_finite() && fine_amount > 0.0 { fine_amount } else { 0.0 };

    let estimated_time_hours = match kind {
        CameraKind::RedLight => cfg.red_light_hours,
        CameraKind::Speed => cfg.speed_hours,
    };
    let estimated_cost = if code.starts_with(SPEED_SUBCODE_PREFIX) { cfg.speed_review_cost } else { 0.0 };
    let win_probability = ordinance
        .win_probability
        .unwrap_or(cfg.default_win_probability)
        .min(100);

    let expected_value = fine * (f64::from(win_probability) / 100.0) - estimated_cost;
    let requires_attorney = fine > cfg.attorney_fine_threshold || code == RED_LIGHT_CODE;
    let recommend_contest = expected_value > 0.0 || fine > cfg.contest_fine_threshold;
    let difficulty = if win_probability < cfg.very_hard_below {
        Difficulty::VeryHard
    } else {
        Difficulty::Hard
    };

    let reason = contest_reason(fine, win_probability, expected_value, cfg);

    Some(CameraGuidance {
        violation_code: code.to_string(),
        is_camera_violation: true,
        camera_kind: kind,
        win_probability,
        difficulty,
        recommend_contest,
        requires_attorney,
        specialized_evidence: content.camera.for_kind(kind).to_vec(),
        cost_benefit: CostBenefit {
            fine_amount: fine,
            estimated_time_hours,
            estimated_cost,
            expected_value,
        },
        reason,
    })
}

fn contest_reason(fine: f64, win_probability: u8, expected_value: f64, cfg: &CameraCfg) -> String {
    if expected_value > 0.0 {
        format!(
            "Contesting is worth it on average: a {win_probability}% chance of voiding a ${fine:.2} fine \
             gives an expected value of ${expected_value:.2}."
        )
    } else if fine > cfg.contest_fine_threshold {
        format!(
            "The expected value is ${expected_value:.2}, but a fine above ${:.2} is large enough \
             to be worth contesting anyway.",
            cfg.contest_fine_threshold
        )
    } else {
        format!(
            "Paying is likely cheaper: with a {win_probability}% chance of success the expected value \
             of contesting is ${expected_value:.2}."
        )
    }
}
