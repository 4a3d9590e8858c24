#![allow(clippy::missing_safety_doc)]

use std::ptr;

use ticketless_core::{AdvisorCfg, CameraGuidance, ContentTables, Difficulty};
use ticketless_supervisor::{parse_records_json, AdvisorSupervisor, BasicCaseBuilder};

/// FFI ABI version for ticketless_ffi.
///
/// Bump this when any `#[repr(C)]` struct layout or exported function signature changes.
pub const TICKETLESS_FFI_VERSION: u32 = 1;

pub const TKT_OK: i32 = 0;
pub const TKT_ERR_NULL: i32 = -1;
pub const TKT_ERR_UTF8: i32 = -2;
pub const TKT_ERR_PARSE: i32 = -3;
pub const TKT_ERR_ENCODE: i32 = -4;
/// Logging was already initialised by the host or an earlier call.
pub const TKT_ALREADY_INIT: i32 = 1;

#[no_mangle]
pub extern "C" fn ticketless_ffi_version() -> u32 {
    TICKETLESS_FFI_VERSION
}

/// Install a `tracing` subscriber honouring `RUST_LOG`. Safe to call more than once.
#[no_mangle]
pub extern "C" fn ticketless_init_logging() -> i32 {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    match tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        Ok(()) => TKT_OK,
        Err(_) => TKT_ALREADY_INIT,
    }
}

/// Opaque handle exposed over FFI.
pub struct TktAdvisor {
    inner: AdvisorSupervisor,
    builder: BasicCaseBuilder,
}

/// FFI string view (UTF-8 bytes).
#[repr(C)]
#[derive(Clone, Copy)]
pub struct TktStr {
    pub ptr: *const u8,
    pub len: usize,
}

impl TktStr {
    unsafe fn as_str(&self) -> Result<&str, i32> {
        if self.ptr.is_null() {
            return Err(TKT_ERR_NULL);
        }
        let bytes = std::slice::from_raw_parts(self.ptr, self.len);
        std::str::from_utf8(bytes).map_err(|_| TKT_ERR_UTF8)
    }
}

/// Owned byte buffer (UTF-8 JSON). Free with `ticketless_bytes_free`.
#[repr(C)]
pub struct TktBytes {
    pub ptr: *mut u8,
    pub len: usize,
    pub rc: i32,
}

impl TktBytes {
    fn err(rc: i32) -> Self {
        TktBytes { ptr: ptr::null_mut(), len: 0, rc }
    }

    fn from_vec(buf: Vec<u8>) -> Self {
        let mut boxed = buf.into_boxed_slice();
        let ptr = boxed.as_mut_ptr();
        let len = boxed.len();
        std::mem::forget(boxed);
        TktBytes { ptr, len, rc: TKT_OK }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TktDifficulty {
    VeryHard = 0,
    Hard = 1,
    Medium = 2,
    Easy = 3,
}

fn difficulty_to_ffi(d: Difficulty) -> TktDifficulty {
    match d {
        Difficulty::VeryHard => TktDifficulty::VeryHard,
        Difficulty::Hard => TktDifficulty::Hard,
        Difficulty::Medium => TktDifficulty::Medium,
        Difficulty::Easy => TktDifficulty::Easy,
    }
}

/// Flat camera guidance. `applicable == 0` means no guidance for the code.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct TktCameraSummary {
    pub applicable: u8,
    pub win_probability: u8,
    pub difficulty: TktDifficulty,
    pub recommend_contest: u8,
    pub requires_attorney: u8,
    pub estimated_time_hours: u32,
    pub fine_amount: f64,
    pub estimated_cost: f64,
    pub expected_value: f64,
    pub rc: i32,
}

impl TktCameraSummary {
    fn none(rc: i32) -> Self {
        TktCameraSummary {
            applicable: 0,
            win_probability: 0,
            difficulty: TktDifficulty::Hard,
            recommend_contest: 0,
            requires_attorney: 0,
            estimated_time_hours: 0,
            fine_amount: 0.0,
            estimated_cost: 0.0,
            expected_value: 0.0,
            rc,
        }
    }

    fn from_guidance(g: &CameraGuidance) -> Self {
        TktCameraSummary {
            applicable: 1,
            win_probability: g.win_probability,
            difficulty: difficulty_to_ffi(g.difficulty),
            recommend_contest: u8::from(g.recommend_contest),
            requires_attorney: u8::from(g.requires_attorney),
            estimated_time_hours: g.cost_benefit.estimated_time_hours,
            fine_amount: g.cost_benefit.fine_amount,
            estimated_cost: g.cost_benefit.estimated_cost,
            expected_value: g.cost_benefit.expected_value,
            rc: TKT_OK,
        }
    }
}

fn into_handle(inner: AdvisorSupervisor) -> *mut TktAdvisor {
    Box::into_raw(Box::new(TktAdvisor {
        inner,
        builder: BasicCaseBuilder,
    }))
}

/// Create an advisor backed by the built-in content tables and default config.
/// Returns null if the built-in tables fail to load.
#[no_mangle]
pub extern "C" fn ticketless_advisor_new() -> *mut TktAdvisor {
    match AdvisorSupervisor::with_builtin_content(AdvisorCfg::default()) {
        Ok(sup) => into_handle(sup),
        Err(e) => {
            tracing::error!(code = e.code(), error = %e, "builtin content failed to load");
            ptr::null_mut()
        }
    }
}

/// Create an advisor from TOML content tables and an optional TOML config
/// (`cfg.ptr` may be null). Returns null on any parse or validation failure.
#[no_mangle]
pub unsafe extern "C" fn ticketless_advisor_new_from_toml(content: TktStr, cfg: TktStr) -> *mut TktAdvisor {
    let Ok(content_src) = content.as_str() else {
        return ptr::null_mut();
    };
    let tables = match ContentTables::from_toml_str(content_src) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(code = e.code(), error = %e, "rejected content tables");
            return ptr::null_mut();
        }
    };
    let advisor_cfg = if cfg.ptr.is_null() {
        AdvisorCfg::default()
    } else {
        let Ok(cfg_src) = cfg.as_str() else {
            return ptr::null_mut();
        };
        match AdvisorCfg::from_toml_str(cfg_src) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(code = e.code(), error = %e, "rejected advisor config");
                return ptr::null_mut();
            }
        }
    };
    into_handle(AdvisorSupervisor::new(advisor_cfg, tables))
}

#[no_mangle]
pub unsafe extern "C" fn ticketless_advisor_free(h: *mut TktAdvisor) {
    if !h.is_null() {
        drop(Box::from_raw(h));
    }
}

/// Build an evidence report for `violation_code` from a JSON array of outcome rows.
/// Returns the report as JSON bytes (must be freed with `ticketless_bytes_free`).
#[no_mangle]
pub unsafe extern "C" fn ticketless_evidence_report(
    h: *const TktAdvisor,
    violation_code: TktStr,
    records_json: TktStr,
) -> TktBytes {
    if h.is_null() {
        return TktBytes::err(TKT_ERR_NULL);
    }
    let handle = &*h;
    let code = match violation_code.as_str() {
        Ok(s) => s,
        Err(rc) => return TktBytes::err(rc),
    };
    let json = match records_json.as_str() {
        Ok(s) => s,
        Err(rc) => return TktBytes::err(rc),
    };
    let rows = match parse_records_json(json) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(code = e.code(), error = %e, "rejected outcome rows");
            return TktBytes::err(TKT_ERR_PARSE);
        }
    };

    let report = handle.inner.evidence_report(&handle.builder, code, &rows);
    match serde_json::to_vec(&report) {
        Ok(buf) => TktBytes::from_vec(buf),
        Err(_) => TktBytes::err(TKT_ERR_ENCODE),
    }
}

/// Camera guidance as a flat struct. A negative or NaN `fine_amount` uses the
/// ordinance's standard fine.
#[no_mangle]
pub unsafe extern "C" fn ticketless_camera_guidance(
    h: *const TktAdvisor,
    violation_code: TktStr,
    fine_amount: f64,
) -> TktCameraSummary {
    if h.is_null() {
        return TktCameraSummary::none(TKT_ERR_NULL);
    }
    let handle = &*h;
    let code = match violation_code.as_str() {
        Ok(s) => s,
        Err(rc) => return TktCameraSummary::none(rc),
    };
    match handle.inner.camera_guidance(code, fine_arg(fine_amount)) {
        Some(g) => TktCameraSummary::from_guidance(&g),
        None => TktCameraSummary::none(TKT_OK),
    }
}

/// Camera guidance as JSON bytes; the JSON value is `null` when not applicable.
#[no_mangle]
pub unsafe extern "C" fn ticketless_camera_guidance_json(
    h: *const TktAdvisor,
    violation_code: TktStr,
    fine_amount: f64,
) -> TktBytes {
    if h.is_null() {
        return TktBytes::err(TKT_ERR_NULL);
    }
    let handle = &*h;
    let code = match violation_code.as_str() {
        Ok(s) => s,
        Err(rc) => return TktBytes::err(rc),
    };
    let guidance = handle.inner.camera_guidance(code, fine_arg(fine_amount));
    match serde_json::to_vec(&guidance) {
        Ok(buf) => TktBytes::from_vec(buf),
        Err(_) => TktBytes::err(TKT_ERR_ENCODE),
    }
}

fn fine_arg(fine_amount: f64) -> Option<f64> {
    (fine_amount.is_finite() && fine_amount >= 0.0).then_some(fine_amount)
}

#[no_mangle]
pub unsafe extern "C" fn ticketless_bytes_free(b: TktBytes) {
    if !b.ptr.is_null() {
        let slice_ptr = std::ptr::slice_from_raw_parts_mut(b.ptr, b.len);
        drop(Box::from_raw(slice_ptr));
    }
}
