//! Best-effort audit logging
//!
//! Administrative mutations are recorded to an append-only log under
//! `logs/` in the remote store. Enqueueing never blocks or fails the
//! mutation path; bursts are coalesced into one batched multi-key write by
//! a trailing-edge debounce. A failed batch is logged locally and dropped,
//! never retried.

pub mod service;
pub mod types;
pub mod worker;

pub use service::AuditService;
pub use types::{AuditAction, AuditEntry};
pub use worker::AuditWorker;
