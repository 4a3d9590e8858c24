//! Advisor supervisor.
//!
//! This crate is the outside-world facing layer around `ticketless_core`:
//! - owns the content tables and config (with per-violation-code overrides)
//! - converts raw outcome rows into typed cases via a `CaseBuilder`
//! - narrows cases to one violation code and to winning outcomes
//! - runs the core analytics and returns the results
//! - fans results out to subscribers over channels
//!
//! No async. Each call works on its own data; the only shared state is the
//! subscriber list.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use ticketless_core::{
    analyze_outcomes, camera_guidance, generate_recommendations, summarize_outcomes, AdvisorCfg,
    CameraGuidance, CaseOutcome, ContentTables, EvidenceRecommendation, OutcomeAnalysis,
    OutcomeSummary, Result,
};

use crate::adapter::{build_case_batch, CaseBuilder, RawCaseRecord};

/// Everything the presentation layer needs for one violation code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceReport {
    /// Over all adjudicated rows for the code.
    pub summary: OutcomeSummary,
    /// Over dismissed and reduced rows only.
    pub analysis: OutcomeAnalysis,
    pub recommendations: Vec<EvidenceRecommendation>,
}

/// Published to subscribers whenever advice is produced.
#[derive(Clone, Debug, PartialEq)]
pub enum AdvisorEvent {
    Recommendations {
        violation_code: String,
        recommendations: Vec<EvidenceRecommendation>,
    },
    CameraVerdict {
        violation_code: String,
        recommend_contest: bool,
        reason: String,
    },
}

#[derive(Debug)]
pub struct AdvisorSupervisor {
    cfg: AdvisorCfg,
    /// Optional per-violation-code cfg overrides.
    cfg_overrides: HashMap<String, AdvisorCfg>,
    content: ContentTables,
    subscribers: Mutex<Vec<Sender<AdvisorEvent>>>,
}

impl AdvisorSupervisor {
    pub fn new(cfg: AdvisorCfg, content: ContentTables) -> Self {
        Self {
            cfg,
            cfg_overrides: HashMap::new(),
            content,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Supervisor backed by the content tables compiled into the core crate.
    pub fn with_builtin_content(cfg: AdvisorCfg) -> Result<Self> {
        Ok(Self::new(cfg, ContentTables::builtin()?))
    }

    pub fn content(&self) -> &ContentTables {
        &self.content
    }

    /// Swap content tables, e.g. after an operator edits the file.
    pub fn set_content(&mut self, content: ContentTables) {
        tracing::info!(ordinances = content.ordinances.len(), "content tables replaced");
        self.content = content;
    }

    /// Override cfg for a specific violation code.
    pub fn set_cfg_override(&mut self, violation_code: impl Into<String>, cfg: AdvisorCfg) {
        self.cfg_overrides.insert(violation_code.into(), cfg);
    }

    pub fn clear_cfg_override(&mut self, violation_code: &str) {
        self.cfg_overrides.remove(violation_code);
    }

    pub fn cfg_for(&self, violation_code: &str) -> &AdvisorCfg {
        self.cfg_overrides.get(violation_code).unwrap_or(&self.cfg)
    }

    /// Register a new consumer of `AdvisorEvent`s.
    ///
    /// Dropping the receiver unsubscribes; dead senders are pruned on the next publish.
    pub fn subscribe(&self) -> Receiver<AdvisorEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn publish(&self, event: AdvisorEvent) {
        let mut subs = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = subs.len();
        subs.retain(|tx| tx.send(event.clone()).is_ok());
        if subs.len() < before {
            tracing::debug!(dropped = before - subs.len(), "pruned closed subscribers");
        }
    }

    /// Build an evidence report from raw outcome rows.
    ///
    /// Rows for other violation codes are ignored, as are rows the builder rejects.
    pub fn evidence_report<B: CaseBuilder>(
        &self,
        builder: &B,
        violation_code: &str,
        records: &[RawCaseRecord],
    ) -> EvidenceReport {
        let cases = build_case_batch(builder, records);
        if cases.len() < records.len() {
            tracing::debug!(
                rejected = records.len() - cases.len(),
                "outcome rows without a violation code skipped"
            );
        }
        self.evidence_report_from_cases(violation_code, &cases)
    }

    /// Build an evidence report from already typed cases.
    pub fn evidence_report_from_cases(&self, violation_code: &str, cases: &[CaseOutcome]) -> EvidenceReport {
        let code = violation_code.trim();
        let cfg = self.cfg_for(code);

        let for_code: Vec<CaseOutcome> = cases
            .iter()
            .filter(|c| c.violation_code == code)
            .cloned()
            .collect();
        let wins: Vec<CaseOutcome> = for_code
            .iter()
            .filter(|c| c.outcome.is_win())
            .cloned()
            .collect();

        let summary = summarize_outcomes(code, &for_code);
        let analysis = analyze_outcomes(code, &wins, cfg);
        let recommendations = generate_recommendations(&analysis, &cfg.recommend, &self.content);

        tracing::debug!(
            violation_code = code,
            records = for_code.len(),
            wins = wins.len(),
            grounds = analysis.contest_grounds.len(),
            recommendations = recommendations.len(),
            "evidence report built"
        );
        if !analysis.has_data {
            tracing::info!(violation_code = code, "no historical outcomes for violation code");
        }

        self.publish(AdvisorEvent::Recommendations {
            violation_code: code.to_string(),
            recommendations: recommendations.clone(),
        });

        EvidenceReport {
            summary,
            analysis,
            recommendations,
        }
    }

    /// Camera-ticket guidance. Without an explicit fine, the ordinance's
    /// standard fine is used (zero if unknown).
    pub fn camera_guidance(&self, violation_code: &str, fine_amount: Option<f64>) -> Option<CameraGuidance> {
        let code = violation_code.trim();
        let fine = fine_amount
            .or_else(|| self.content.ordinance(code).and_then(|o| o.fine))
            .unwrap_or(0.0);

        let Some(guidance) = camera_guidance(code, fine, &self.content, &self.cfg_for(code).camera) else {
            tracing::debug!(violation_code = code, "no camera guidance for violation code");
            return None;
        };

        tracing::debug!(
            violation_code = code,
            win_probability = guidance.win_probability,
            difficulty = guidance.difficulty.as_str(),
            expected_value = guidance.cost_benefit.expected_value,
            recommend_contest = guidance.recommend_contest,
            "camera guidance computed"
        );

        self.publish(AdvisorEvent::CameraVerdict {
            violation_code: code.to_string(),
            recommend_contest: guidance.recommend_contest,
            reason: guidance.reason.clone(),
        });

        Some(guidance)
    }
}
