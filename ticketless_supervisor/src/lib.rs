//! ticketless_supervisor
//!
//! Outside-world facing orchestration layer for `ticketless_core`.
//!
//! Responsibilities:
//! - convert raw outcome rows into typed cases via adapters
//! - apply per-violation-code config
//! - invoke the core analytics and camera advisor
//! - deliver results by return value and to channel subscribers
//!
//! Non-goals:
//! - no database access (rows are handed in)
//! - no async
//! - no scoring policy (lives in core)

pub mod adapter;
pub mod supervisor;

pub use adapter::{
    build_case_batch,
    parse_records_json,
    BasicCaseBuilder,
    CaseBuilder,
    RawCaseRecord,
    RawEvidence,
};

pub use supervisor::{
    AdvisorEvent,
    AdvisorSupervisor,
    EvidenceReport,
};
