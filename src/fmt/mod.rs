//! Text rendering of unification results
//!
//! This module turns substitutions and failures into the
//! `{var -> term, ...}` / `FAIL (no unifier)` notation, and whole batches
//! into a printable report.

pub mod report;

pub use report::*;
