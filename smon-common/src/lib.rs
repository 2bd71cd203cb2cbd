//! # SMON Common Library
//!
//! Shared core for the social activity monitor services:
//! - Canonical `Activity` record and sentiment labels
//! - Normalization of raw, schema-ambiguous activity objects
//! - Batch splitting for mixed JSON / NDJSON payloads
//! - Aggregate statistics over canonical record sets
//!
//! Everything in this crate is pure: no I/O, no database, no clocks.

pub mod aggregate;
pub mod batch;
pub mod model;
pub mod normalize;

pub use model::{Activity, Sentiment};
pub use normalize::normalize;
