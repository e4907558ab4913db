//! Resource bounds for parsing and unification.
//!
//! Both the parser and the unifier are total on well-formed input, but a
//! pathological term (thousands of nested compounds) can still exhaust the
//! stack or run for a very long time. [`Limits`] caps both.

/// Default maximum nesting depth of a term.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Largest `max_depth` the command line accepts.
///
/// Parsing, cloning, comparing and dropping a term each recurse once per
/// nesting level, so the bound has to fit on a thread's stack.
pub const MAX_DEPTH_CEILING: usize = 1024;

/// Default maximum number of work-list pairs one unification may process.
pub const DEFAULT_MAX_STEPS: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Deepest term the parser accepts and unification may build; an atom
    /// has depth 1.
    pub max_depth: usize,
    /// Work-list pairs processed before unification gives up.
    pub max_steps: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl Limits {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}
