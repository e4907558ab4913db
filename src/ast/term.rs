use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;

use crate::error::Error;

/// A first-order term.
///
/// Terms are immutable values: substitution and unification always build
/// new terms instead of editing existing ones.
///
/// # Variants
///
/// * `Variable` - an unknown, bound by a substitution (`x`, `y1`)
/// * `Constant` - denotes itself (`John`, `Apple`)
/// * `Compound` - a functor applied to one or more arguments (`f(x, g(y))`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(String),
    Constant(String),
    Compound { functor: String, args: Vec<Term> },
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Term::Constant(name.into())
    }

    pub fn compound(functor: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Compound {
            functor: functor.into(),
            args,
        }
    }

    /// Classify a bare name by its first character.
    ///
    /// Names starting with a lowercase letter are variables, everything else
    /// (uppercase letters, `_`) is a constant.
    pub fn atom(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.chars().next().is_some_and(char::is_lowercase) {
            Term::Variable(name)
        } else {
            Term::Constant(name)
        }
    }

    /// The variable name, constant name or functor.
    pub fn name(&self) -> &str {
        match self {
            Term::Variable(name) | Term::Constant(name) => name,
            Term::Compound { functor, .. } => functor,
        }
    }

    pub fn args(&self) -> &[Term] {
        match self {
            Term::Compound { args, .. } => args,
            Term::Variable(_) | Term::Constant(_) => &[],
        }
    }

    pub fn arity(&self) -> usize {
        self.args().len()
    }

    /// Returns a short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Term::Variable(_) => "variable",
            Term::Constant(_) => "constant",
            Term::Compound { .. } => "compound",
        }
    }

    /// `true` if no variable occurs anywhere in the term.
    pub fn is_ground(&self) -> bool {
        let mut stack = vec![self];
        while let Some(term) = stack.pop() {
            match term {
                Term::Variable(_) => return false,
                Term::Constant(_) => {}
                Term::Compound { args, .. } => stack.extend(args),
            }
        }
        true
    }

    /// Nesting depth: atoms have depth 1, `f(a)` has depth 2.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((term, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(term.args().iter().map(|arg| (arg, depth + 1)));
        }
        deepest
    }

    /// Variable names in order of first occurrence, left to right.
    pub fn variables(&self) -> Vec<&str> {
        let mut seen = IndexSet::new();
        let mut stack = vec![self];
        while let Some(term) = stack.pop() {
            match term {
                Term::Variable(name) => {
                    seen.insert(name.as_str());
                }
                Term::Constant(_) => {}
                Term::Compound { args, .. } => stack.extend(args.iter().rev()),
            }
        }
        seen.into_iter().collect()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(name) | Term::Constant(name) => f.write_str(name),
            Term::Compound { functor, args } => {
                write!(f, "{}(", functor)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromStr for Term {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}
