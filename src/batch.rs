//! Running many unification pairs at once.
//!
//! Every pair is handled on its own: a pair without a unifier, or with a
//! malformed term, is reported and the batch moves on to the next pair.

use thiserror::Error;

use crate::config::Limits;
use crate::error::Error;
use crate::unify::{Substitution, UnifyError, unify_with};

/// Separator between the two terms of a pair in batch files.
pub const PAIR_SEPARATOR: &str = "=?=";

/// A built-in pair together with its expected rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    pub left: &'static str,
    pub right: &'static str,
    pub expected: &'static str,
}

pub const EXAMPLES: &[Example] = &[
    Example {
        left: "Eats(x, Apple)",
        right: "Eats(Riya, y)",
        expected: "{y -> Apple, x -> Riya}",
    },
    Example {
        left: "p(f(a), g(Y))",
        right: "p(X, X)",
        expected: "FAIL (no unifier)",
    },
    Example {
        left: "Knows(John, x)",
        right: "Knows(x, Elisabeth)",
        expected: "FAIL (no unifier)",
    },
    Example {
        left: "f(x, g(y))",
        right: "f(g(z), g(a))",
        expected: "{y -> a, x -> g(z)}",
    },
    Example {
        left: "P(x, h(y))",
        right: "P(a, f(z))",
        expected: "FAIL (no unifier)",
    },
    Example {
        left: "Ancestor(x, Father(x))",
        right: "Ancestor(Father(John), y)",
        expected: "{y -> Father(Father(John)), x -> Father(John)}",
    },
    Example {
        left: "f(x,x)",
        right: "f(a,b)",
        expected: "{x -> a, b -> a}",
    },
    Example {
        left: "Knows(x, x)",
        right: "Knows(John, y)",
        expected: "{x -> John, y -> John}",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Both terms parsed; carries the unifier or the reason there is none.
    Unified(Result<Substitution, UnifyError>),
    /// One of the two terms could not be parsed.
    Malformed(Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairReport {
    pub left: String,
    pub right: String,
    pub outcome: Outcome,
}

impl PairReport {
    pub fn is_unified(&self) -> bool {
        matches!(self.outcome, Outcome::Unified(Ok(_)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("line {line}: expected `left =?= right`, found {content:?}")]
    MissingSeparator { line: usize, content: String },
}

/// Parse and unify one pair of term expressions.
pub fn run_pair(left: &str, right: &str, limits: &Limits) -> PairReport {
    let parsed = crate::parse_with(left, limits)
        .and_then(|a| crate::parse_with(right, limits).map(|b| (a, b)));

    let outcome = match parsed {
        Ok((a, b)) => Outcome::Unified(unify_with(&a, &b, &Substitution::empty(), limits)),
        Err(err) => {
            log::warn!("skipping pair {:?} =?= {:?}: {}", left, right, err);
            Outcome::Malformed(err)
        }
    };

    PairReport {
        left: left.to_string(),
        right: right.to_string(),
        outcome,
    }
}

pub fn run_batch<'a, I>(pairs: I, limits: &Limits) -> Vec<PairReport>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(left, right)| run_pair(left, right, limits))
        .collect()
}

pub fn run_examples(limits: &Limits) -> Vec<PairReport> {
    run_batch(EXAMPLES.iter().map(|e| (e.left, e.right)), limits)
}

/// Split batch-file text into pairs, one `left =?= right` per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_pairs(text: &str) -> Result<Vec<(&str, &str)>, BatchError> {
    let mut pairs = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once(PAIR_SEPARATOR) {
            Some((left, right)) => pairs.push((left.trim(), right.trim())),
            None => {
                return Err(BatchError::MissingSeparator {
                    line: index + 1,
                    content: line.to_string(),
                });
            }
        }
    }
    Ok(pairs)
}
