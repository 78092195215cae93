//! Domain primitives for the config recorder override producer.
//!
//! This crate owns event classification, the work item and acknowledgment
//! contracts, reference account parsing, and the filter policy. It
//! intentionally excludes AWS SDK and Lambda runtime concerns, which live in
//! `recorder_override_lambda`.

pub mod accounts;
pub mod config;
pub mod contract;
pub mod error;
pub mod event;
pub mod filter;
