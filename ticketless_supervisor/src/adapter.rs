//! Data-access adapter: turn loosely shaped outcome rows into `ticketless_core::CaseOutcome`.
//!
//! Rows arrive from the outcomes dataset with any field possibly missing or
//! null. Defaulting happens here, once, so the core always sees fully
//! populated records:
//! - missing outcome -> `other`
//! - missing evidence flags -> not submitted
//! - missing or null grounds -> none
//!
//! Products with a different row shape provide their own `CaseBuilder`.

use serde::Deserialize;

use ticketless_core::{AdvisorError, CaseOutcome, EvidenceSubmitted, Outcome};

/// Evidence flags as stored upstream; each may be absent or null.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawEvidence {
    #[serde(default)]
    pub photos: Option<bool>,
    #[serde(default)]
    pub witnesses: Option<bool>,
    #[serde(default)]
    pub documentation: Option<bool>,
}

/// One outcome row as returned by the historical-outcomes query.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawCaseRecord {
    #[serde(default, alias = "ticket_code")]
    pub violation_code: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub evidence_submitted: Option<RawEvidence>,
    #[serde(default)]
    pub contest_grounds: Option<Vec<Option<String>>>,
}

impl RawCaseRecord {
    pub fn new(violation_code: impl Into<String>, outcome: impl Into<String>) -> Self {
        Self {
            violation_code: Some(violation_code.into()),
            outcome: Some(outcome.into()),
            ..Self::default()
        }
    }

    pub fn with_evidence(mut self, photos: bool, witnesses: bool, documentation: bool) -> Self {
        self.evidence_submitted = Some(RawEvidence {
            photos: Some(photos),
            witnesses: Some(witnesses),
            documentation: Some(documentation),
        });
        self
    }

    pub fn with_ground(mut self, ground: impl Into<String>) -> Self {
        self.contest_grounds
            .get_or_insert_with(Vec::new)
            .push(Some(ground.into()));
        self
    }
}

/// Parse a JSON array of outcome rows.
pub fn parse_records_json(json: &str) -> Result<Vec<RawCaseRecord>, AdvisorError> {
    serde_json::from_str(json).map_err(|e| AdvisorError::parse("serde_json", e))
}

/// Trait: map a raw row into a typed case.
///
/// Returning `None` drops the row (for example when it cannot be attributed
/// to any violation code).
pub trait CaseBuilder {
    fn build(&self, raw: &RawCaseRecord) -> Option<CaseOutcome>;
}

/// Default builder for the outcomes dataset row shape.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicCaseBuilder;

impl CaseBuilder for BasicCaseBuilder {
    fn build(&self, raw: &RawCaseRecord) -> Option<CaseOutcome> {
        let code = raw.violation_code.as_deref().map(str::trim).filter(|c| !c.is_empty())?;

        let outcome = raw
            .outcome
            .as_deref()
            .map_or(Outcome::Other, Outcome::parse_lenient);

        let evidence_submitted = raw
            .evidence_submitted
            .as_ref()
            .map(|e| EvidenceSubmitted {
                photos: e.photos.unwrap_or(false),
                witnesses: e.witnesses.unwrap_or(false),
                documentation: e.documentation.unwrap_or(false),
            })
            .unwrap_or_default();

        let contest_grounds = raw
            .contest_grounds
            .iter()
            .flatten()
            .flatten()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();

        Some(CaseOutcome {
            violation_code: code.to_string(),
            outcome,
            evidence_submitted,
            contest_grounds,
        })
    }
}

/// Helper: build typed cases for a batch of rows, skipping rejected rows.
pub fn build_case_batch<B: CaseBuilder>(builder: &B, raws: &[RawCaseRecord]) -> Vec<CaseOutcome> {
    raws.iter().filter_map(|r| builder.build(r)).collect()
}
