use serde::{Deserialize, Serialize};

/// Adjudication result of a contested ticket.
///
/// Deserializes through `Outcome::parse_lenient`, so typed records read from
/// JSON or TOML classify outcomes the same way the raw-row adapter does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Outcome {
    Dismissed,
    Reduced,
    Liable,
    Denied,
    Withdrawn,
    Other,
}

impl From<String> for Outcome {
    fn from(raw: String) -> Self {
        Outcome::parse_lenient(&raw)
    }
}

impl Outcome {
    /// Lenient parse: case-insensitive, surrounding whitespace ignored,
    /// anything unrecognised is `Other`.
    pub fn parse_lenient(raw: &str) -> Outcome {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dismissed" | "not liable" | "not_liable" => Outcome::Dismissed,
            "reduced" => Outcome::Reduced,
            "liable" => Outcome::Liable,
            "denied" => Outcome::Denied,
            "withdrawn" => Outcome::Withdrawn,
            _ => Outcome::Other,
        }
    }

    /// Dismissed or reduced: the driver came out ahead.
    #[inline]
    pub const fn is_win(self) -> bool {
        matches!(self, Outcome::Dismissed | Outcome::Reduced)
    }
}

/// Kind of supporting evidence a driver submitted with a contest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceType {
    Photos,
    Witnesses,
    Documentation,
}

impl EvidenceType {
    /// Fixed reporting order.
    pub const ALL: [EvidenceType; 3] = [
        EvidenceType::Photos,
        EvidenceType::Witnesses,
        EvidenceType::Documentation,
    ];
}

/// Which evidence kinds accompanied a contest. Absent means not submitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceSubmitted {
    pub photos: bool,
    pub witnesses: bool,
    pub documentation: bool,
}

impl EvidenceSubmitted {
    #[inline]
    pub const fn has(&self, kind: EvidenceType) -> bool {
        match kind {
            EvidenceType::Photos => self.photos,
            EvidenceType::Witnesses => self.witnesses,
            EvidenceType::Documentation => self.documentation,
        }
    }

    /// Evidence types present, in `EvidenceType::ALL` order.
    pub fn present(&self) -> impl Iterator<Item = EvidenceType> + '_ {
        EvidenceType::ALL.into_iter().filter(move |k| self.has(*k))
    }
}

/// One historical contested ticket, fully populated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseOutcome {
    pub violation_code: String,
    pub outcome: Outcome,
    #[serde(default)]
    pub evidence_submitted: EvidenceSubmitted,
    #[serde(default)]
    pub contest_grounds: Vec<String>,
}

impl CaseOutcome {
    pub fn new(violation_code: impl Into<String>, outcome: Outcome) -> Self {
        CaseOutcome {
            violation_code: violation_code.into(),
            outcome,
            evidence_submitted: EvidenceSubmitted::default(),
            contest_grounds: Vec::new(),
        }
    }

    pub fn with_evidence(mut self, evidence: EvidenceSubmitted) -> Self {
        self.evidence_submitted = evidence;
        self
    }

    pub fn with_ground(mut self, ground: impl Into<String>) -> Self {
        self.contest_grounds.push(ground.into());
        self
    }
}
