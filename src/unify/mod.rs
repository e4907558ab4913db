//! Substitutions and Robinson unification over first-order terms.

mod mgu;
pub mod subst;

#[cfg(test)]
mod proptest_tests;

pub use mgu::{UnifyError, unify, unify_with};
pub use subst::Substitution;
