//! The feedrank processing stages.
//!
//! Raw records from heterogeneous sources flow through three pure stages:
//!
//! 1. [`normalize`] maps each record onto a [`feedrank_core::CanonicalItem`].
//! 2. [`dedup`] collapses items that refer to the same content.
//! 3. [`rank`] scores and orders the survivors with one configured strategy.
//!
//! [`run_pipeline`] chains all three for one batch.

pub mod dedup;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod rank;
pub mod text;
pub mod timestamp;

mod fields;

pub use dedup::{dedup_key, deduplicate};
pub use error::RecordIssue;
pub use normalize::{normalize_batch, normalize_record, normalize_record_with_issues};
pub use pipeline::run_pipeline;
pub use rank::rank;
