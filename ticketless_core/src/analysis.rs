use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::cfg::AdvisorCfg;
use crate::outcome::{CaseOutcome, EvidenceType, Outcome};

// ---------------------------------------------------------------------
// Case-outcome aggregation
// ---------------------------------------------------------------------

/// Integer percentage of `part / whole`, rounded half up. Zero when `whole` is zero.
#[inline]
pub fn percent(part: u32, whole: u32) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = u64::from(part.min(whole));
    let whole = u64::from(whole);
    ((part * 200 + whole) / (whole * 2)) as u8
}

/// How submitting one evidence type relates to dismissals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceImpactStat {
    #[serde(rename = "type")]
    pub evidence_type: EvidenceType,
    pub success_rate_with: u8,
    pub success_rate_without: u8,
    pub cases_with: u32,
    pub cases_without: u32,
}

impl EvidenceImpactStat {
    /// Percentage points gained by submitting this evidence (may be negative).
    #[inline]
    pub fn improvement(&self) -> i32 {
        i32::from(self.success_rate_with) - i32::from(self.success_rate_without)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestGroundStat {
    pub ground: String,
    pub success_rate: u8,
    pub cases: u32,
    /// Evidence types seen on cases citing this ground.
    pub required_evidence: BTreeSet<EvidenceType>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeAnalysis {
    pub violation_code: String,
    pub total_cases: u32,
    pub has_data: bool,
    /// One entry per `EvidenceType::ALL`, in that order.
    pub evidence_impact: Vec<EvidenceImpactStat>,
    /// Sorted by `success_rate`, highest first.
    pub contest_grounds: Vec<ContestGroundStat>,
}

impl OutcomeAnalysis {
    pub fn impact(&self, kind: EvidenceType) -> Option<&EvidenceImpactStat> {
        self.evidence_impact.iter().find(|s| s.evidence_type == kind)
    }
}

#[derive(Default)]
struct Bucket {
    total: u32,
    dismissed: u32,
}

impl Bucket {
    #[inline]
    fn add(&mut self, outcome: Outcome) {
        self.total += 1;
        if outcome == Outcome::Dismissed {
            self.dismissed += 1;
        }
    }

    #[inline]
    fn rate(&self) -> u8 {
        percent(self.dismissed, self.total)
    }
}

#[derive(Default)]
struct GroundAcc {
    bucket: Bucket,
    evidence: BTreeSet<EvidenceType>,
}

/// Aggregate contested cases for one violation code.
///
/// Callers pass cases already narrowed to that code and to winning outcomes
/// (dismissed or reduced); the dismissal share inside each bucket is what is
/// reported. Grounds are trimmed and blank ones skipped; every citation of a
/// ground counts, so a case citing it twice adds two.
pub fn analyze_outcomes(
    violation_code: &str,
    cases: &[CaseOutcome],
    cfg: &AdvisorCfg,
) -> OutcomeAnalysis {
    let mut with = [Bucket::default(), Bucket::default(), Bucket::default()];
    let mut without = [Bucket::default(), Bucket::default(), Bucket::default()];

    // Insertion order is kept so equal rates sort by first appearance.
    let mut ground_order: Vec<String> = Vec::new();
    let mut grounds: HashMap<String, GroundAcc> = HashMap::new();

    for case in cases {
        for (i, kind) in EvidenceType::ALL.into_iter().enumerate() {
            if case.evidence_submitted.has(kind) {
                with[i].add(case.outcome);
            } else {
                without[i].add(case.outcome);
            }
        }

        for raw in &case.contest_grounds {
            let ground = raw.trim();
            if ground.is_empty() {
                continue;
            }
            if !grounds.contains_key(ground) {
                ground_order.push(ground.to_string());
            }
            let acc = grounds.entry(ground.to_string()).or_default();
            acc.bucket.add(case.outcome);
            acc.evidence.extend(case.evidence_submitted.present());
        }
    }

    let evidence_impact = EvidenceType::ALL
        .into_iter()
        .enumerate()
        .map(|(i, kind)| EvidenceImpactStat {
            evidence_type: kind,
            success_rate_with: with[i].rate(),
            success_rate_without: without[i].rate(),
            cases_with: with[i].total,
            cases_without: without[i].total,
        })
        .collect();

    let mut contest_grounds: Vec<ContestGroundStat> = ground_order
        .into_iter()
        .filter_map(|ground| {
            let acc = grounds.remove(&ground)?;
            if acc.bucket.total < cfg.min_ground_cases {
                return None;
            }
            Some(ContestGroundStat {
                success_rate: acc.bucket.rate(),
                cases: acc.bucket.total,
                required_evidence: acc.evidence,
                ground,
            })
        })
        .collect();
    // Stable: ties keep first-seen order.
    contest_grounds.sort_by(|a, b| b.success_rate.cmp(&a.success_rate));

    let total_cases = u32::try_from(cases.len()).unwrap_or(u32::MAX);
    OutcomeAnalysis {
        violation_code: violation_code.to_string(),
        total_cases,
        has_data: total_cases > 0,
        evidence_impact,
        contest_grounds,
    }
}

// ---------------------------------------------------------------------
// Win-rate summary over all adjudicated records
// ---------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub dismissed: u32,
    pub reduced: u32,
    pub liable: u32,
    pub denied: u32,
    pub withdrawn: u32,
    pub other: u32,
}

impl OutcomeCounts {
    pub fn get(&self, outcome: Outcome) -> u32 {
        match outcome {
            Outcome::Dismissed => self.dismissed,
            Outcome::Reduced => self.reduced,
            Outcome::Liable => self.liable,
            Outcome::Denied => self.denied,
            Outcome::Withdrawn => self.withdrawn,
            Outcome::Other => self.other,
        }
    }

    fn bump(&mut self, outcome: Outcome) {
        let slot = match outcome {
            Outcome::Dismissed => &mut self.dismissed,
            Outcome::Reduced => &mut self.reduced,
            Outcome::Liable => &mut self.liable,
            Outcome::Denied => &mut self.denied,
            Outcome::Withdrawn => &mut self.withdrawn,
            Outcome::Other => &mut self.other,
        };
        *slot += 1;
    }
}

/// Headline numbers for a violation code, before narrowing to wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub violation_code: String,
    pub total: u32,
    pub counts: OutcomeCounts,
    /// Dismissed or reduced, as a percentage of all records.
    pub win_rate: u8,
    pub dismissal_rate: u8,
    pub has_data: bool,
}

pub fn summarize_outcomes(violation_code: &str, cases: &[CaseOutcome]) -> OutcomeSummary {
    let mut counts = OutcomeCounts::default();
    for case in cases {
        counts.bump(case.outcome);
    }
    let total = u32::try_from(cases.len()).unwrap_or(u32::MAX);
    OutcomeSummary {
        violation_code: violation_code.to_string(),
        total,
        win_rate: percent(counts.dismissed + counts.reduced, total),
        dismissal_rate: percent(counts.dismissed, total),
        has_data: total > 0,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn percent_rounds_half_up_and_guards_zero() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(4, 6), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(5, 5), 100);
    }
}
