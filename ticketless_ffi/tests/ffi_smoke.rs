//! FFI smoke tests.
//!
//! These tests call the exported `extern "C"` functions directly (as an external consumer would),
//! to validate:
//! - ABI surface compiles and links
//! - allocation/free symmetry for returned buffers
//! - null and malformed inputs fail with return codes instead of panicking

use std::ptr;

use ticketless_ffi::*;

fn s(s: &str) -> TktStr {
    TktStr {
        ptr: s.as_ptr(),
        len: s.len(),
    }
}

fn null_str() -> TktStr {
    TktStr {
        ptr: ptr::null(),
        len: 0,
    }
}

fn json(b: &TktBytes) -> serde_json::Value {
    let bytes = unsafe { std::slice::from_raw_parts(b.ptr, b.len) };
    serde_json::from_slice(bytes).expect("valid JSON")
}

#[test]
fn ffi_version_and_logging() {
    assert_eq!(ticketless_ffi_version(), TICKETLESS_FFI_VERSION);
    let first = ticketless_init_logging();
    assert!(first == TKT_OK || first == TKT_ALREADY_INIT);
    assert_eq!(ticketless_init_logging(), TKT_ALREADY_INIT);
}

#[test]
fn ffi_camera_guidance_red_light() {
    let h = ticketless_advisor_new();
    assert!(!h.is_null());

    let g = unsafe { ticketless_camera_guidance(h, s("9-102-020"), 100.0) };
    assert_eq!(g.rc, TKT_OK);
    assert_eq!(g.applicable, 1);
    assert_eq!(g.win_probability, 10);
    assert_eq!(g.difficulty, TktDifficulty::VeryHard);
    assert_eq!(g.recommend_contest, 1);
    assert_eq!(g.requires_attorney, 1);
    assert_eq!(g.estimated_time_hours, 12);
    assert!((g.expected_value - 10.0).abs() < 1e-9);

    let none = unsafe { ticketless_camera_guidance(h, s("9-64-010"), 60.0) };
    assert_eq!(none.rc, TKT_OK);
    assert_eq!(none.applicable, 0);

    let bad = unsafe { ticketless_camera_guidance(h, null_str(), 60.0) };
    assert_eq!(bad.rc, TKT_ERR_NULL);

    let b = unsafe { ticketless_camera_guidance_json(h, s("9-102-076"), -1.0) };
    assert_eq!(b.rc, TKT_OK);
    let v = json(&b);
    assert_eq!(v["costBenefit"]["fineAmount"], 100.0);
    assert_eq!(v["cameraKind"], "speed");
    unsafe { ticketless_bytes_free(b) };

    unsafe { ticketless_advisor_free(h) };
}

#[test]
fn ffi_evidence_report_and_free() {
    let h = ticketless_advisor_new();
    assert!(!h.is_null());

    let rows = r#"[
        {"violation_code": "9-64-010", "outcome": "dismissed", "evidence_submitted": {"witnesses": true}},
        {"violation_code": "9-64-010", "outcome": "dismissed", "evidence_submitted": {"witnesses": true}},
        {"violation_code": "9-64-010", "outcome": "dismissed", "evidence_submitted": {"witnesses": true}},
        {"violation_code": "9-64-010", "outcome": "liable"}
    ]"#;
    let b = unsafe { ticketless_evidence_report(h, s("9-64-010"), s(rows)) };
    assert_eq!(b.rc, TKT_OK);
    assert!(!b.ptr.is_null());

    let v = json(&b);
    assert_eq!(v["summary"]["total"], 4);
    assert_eq!(v["analysis"]["total_cases"], 3);
    assert_eq!(v["recommendations"][0]["kind"], "witness_statement");
    assert_eq!(v["recommendations"][0]["priority"], "recommended");
    assert_eq!(v["recommendations"][0]["successRateWith"], 100);
    unsafe { ticketless_bytes_free(b) };

    let bad = unsafe { ticketless_evidence_report(h, s("9-64-010"), s("{oops")) };
    assert_eq!(bad.rc, TKT_ERR_PARSE);
    assert!(bad.ptr.is_null());
    unsafe { ticketless_bytes_free(bad) };

    let invalid_utf8 = [0xff_u8, 0xfe];
    let raw = TktStr {
        ptr: invalid_utf8.as_ptr(),
        len: invalid_utf8.len(),
    };
    let bad = unsafe { ticketless_evidence_report(h, raw, s("[]")) };
    assert_eq!(bad.rc, TKT_ERR_UTF8);

    let null_handle = unsafe { ticketless_evidence_report(ptr::null(), s("9-64-010"), s("[]")) };
    assert_eq!(null_handle.rc, TKT_ERR_NULL);

    unsafe { ticketless_advisor_free(h) };
}

#[test]
fn ffi_advisor_from_toml() {
    let content = include_str!("../../ticketless_core/content/default.toml");

    let h = unsafe { ticketless_advisor_new_from_toml(s(content), s("[camera]\nspeed_review_cost = 0.0\n")) };
    assert!(!h.is_null());
    let g = unsafe { ticketless_camera_guidance(h, s("9-102-076"), 100.0) };
    assert_eq!(g.estimated_cost, 0.0);
    assert_eq!(g.recommend_contest, 1);
    unsafe { ticketless_advisor_free(h) };

    let defaults = unsafe { ticketless_advisor_new_from_toml(s(content), null_str()) };
    assert!(!defaults.is_null());
    unsafe { ticketless_advisor_free(defaults) };

    let rejected = unsafe { ticketless_advisor_new_from_toml(s("not = [toml"), null_str()) };
    assert!(rejected.is_null());
}
