//! Core run orchestration for Logofill.
//!
//! This crate ties the record store and the resolver chain together into
//! the end-to-end enrichment workflow (`run_enrichment`).

pub mod batch;
pub mod pipeline;
