use ticketless_core::{AdvisorCfg, Outcome, Priority, RecommendationKind};
use ticketless_supervisor::*;

fn supervisor() -> AdvisorSupervisor {
    AdvisorSupervisor::with_builtin_content(AdvisorCfg::default()).expect("builtin content")
}

#[test]
fn raw_rows_are_defaulted_at_the_boundary() {
    let rows = parse_records_json(
        r#"[
            {"violation_code": " 9-64-010 ", "outcome": "Dismissed",
             "evidence_submitted": {"photos": true, "witnesses": null},
             "contest_grounds": ["  No valid signage ", null, ""]},
            {"ticket_code": "9-64-010"},
            {"outcome": "dismissed"},
            {"violation_code": "9-64-010", "outcome": "liable", "evidence_submitted": null, "contest_grounds": null}
        ]"#,
    )
    .unwrap();

    let cases = build_case_batch(&BasicCaseBuilder, &rows);
    assert_eq!(cases.len(), 3);

    assert_eq!(cases[0].violation_code, "9-64-010");
    assert_eq!(cases[0].outcome, Outcome::Dismissed);
    assert!(cases[0].evidence_submitted.photos);
    assert!(!cases[0].evidence_submitted.witnesses);
    assert_eq!(cases[0].contest_grounds, vec!["No valid signage".to_string()]);

    assert_eq!(cases[1].outcome, Outcome::Other);
    assert!(cases[1].contest_grounds.is_empty());

    assert_eq!(cases[2].outcome, Outcome::Liable);
}

#[test]
fn malformed_payload_is_a_parse_error() {
    let err = parse_records_json("{not json").unwrap_err();
    assert_eq!(err.code(), "TKT-1003");
}

#[test]
fn report_narrows_to_code_and_wins() {
    let mut rows = Vec::new();
    for _ in 0..4 {
        rows.push(RawCaseRecord::new("9-64-010", "dismissed").with_evidence(true, false, false));
    }
    for _ in 0..2 {
        rows.push(RawCaseRecord::new("9-64-010", "reduced").with_evidence(true, false, false));
    }
    for _ in 0..3 {
        rows.push(RawCaseRecord::new("9-64-010", "liable").with_evidence(true, false, false));
    }
    rows.push(RawCaseRecord::new("9-64-170", "dismissed").with_evidence(true, false, false));

    let sup = supervisor();
    let report = sup.evidence_report(&BasicCaseBuilder, "9-64-010", &rows);

    assert_eq!(report.summary.total, 9);
    assert_eq!(report.summary.win_rate, 67);
    assert_eq!(report.analysis.total_cases, 6);

    let photos = &report.analysis.evidence_impact[0];
    assert_eq!(photos.cases_with, 6);
    assert_eq!(photos.success_rate_with, 67);
    assert_eq!(report.recommendations[0].kind, RecommendationKind::SignPhotos);
    assert_eq!(report.recommendations[0].priority, Priority::Critical);
}

#[test]
fn unknown_code_reports_no_data() {
    let sup = supervisor();
    let rows = vec![RawCaseRecord::new("9-64-010", "dismissed")];
    let report = sup.evidence_report(&BasicCaseBuilder, "9-999-999", &rows);
    assert!(!report.summary.has_data);
    assert!(!report.analysis.has_data);
    assert!(report.recommendations.is_empty());
}

#[test]
fn cfg_override_applies_per_code() {
    let mut sup = supervisor();
    let mut strict = AdvisorCfg::default();
    strict.recommend.min_witness_cases = 10;
    sup.set_cfg_override("9-64-010", strict);

    let rows: Vec<_> = (0..3)
        .map(|_| RawCaseRecord::new("9-64-010", "dismissed").with_evidence(false, true, false))
        .collect();
    assert!(sup.evidence_report(&BasicCaseBuilder, "9-64-010", &rows).recommendations.is_empty());

    sup.clear_cfg_override("9-64-010");
    let recs = sup.evidence_report(&BasicCaseBuilder, "9-64-010", &rows).recommendations;
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].kind, RecommendationKind::WitnessStatement);
}

#[test]
fn subscribers_receive_events() {
    let sup = supervisor();
    let rx = sup.subscribe();
    let dropped = sup.subscribe();
    drop(dropped);

    let guidance = sup.camera_guidance("9-102-020", Some(100.0)).unwrap();
    assert!(guidance.recommend_contest);

    match rx.try_recv().unwrap() {
        AdvisorEvent::CameraVerdict { violation_code, recommend_contest, reason } => {
            assert_eq!(violation_code, "9-102-020");
            assert!(recommend_contest);
            assert_eq!(reason, guidance.reason);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(sup.subscriber_count(), 1);

    sup.evidence_report(&BasicCaseBuilder, "9-64-010", &[]);
    assert!(matches!(
        rx.try_recv().unwrap(),
        AdvisorEvent::Recommendations { ref recommendations, .. } if recommendations.is_empty()
    ));

    assert!(sup.camera_guidance("9-64-010", Some(60.0)).is_none());
    assert!(rx.try_recv().is_err());
}

#[test]
fn camera_fine_falls_back_to_ordinance() {
    let sup = supervisor();
    let g = sup.camera_guidance("9-102-020", None).unwrap();
    assert_eq!(g.cost_benefit.fine_amount, 100.0);
    assert!((g.cost_benefit.expected_value - 10.0).abs() < 1e-9);
}

#[test]
fn replaced_content_drives_camera_guidance() {
    let mut sup = supervisor();
    let mut tables = sup.content().clone();
    tables.ordinances.get_mut("9-102-020").unwrap().win_probability = Some(40);
    sup.set_content(tables);

    assert_eq!(sup.content().ordinance("9-102-020").unwrap().win_probability, Some(40));
    let g = sup.camera_guidance("9-102-020", Some(100.0)).unwrap();
    assert_eq!(g.win_probability, 40);
    assert_eq!(g.difficulty.as_str(), "hard");

    tables = sup.content().clone();
    tables.ordinances.remove("9-102-020");
    sup.set_content(tables);
    assert!(sup.camera_guidance("9-102-020", Some(100.0)).is_none());
}
