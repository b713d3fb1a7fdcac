//! Transformation passes.
//!
//! Three traversals, executed in order by the pipeline driver. Collection is
//! read-only and must fully complete before the rewrite starts — no
//! reference is ever resolved against a partially populated registry.

pub mod collect;
pub mod reconcile;
pub mod rewrite;
