use std::fmt;

use indexmap::IndexMap;

use crate::ast::Term;

/// A set of variable bindings `var = term`.
///
/// Bindings keep their insertion order so that printing is deterministic;
/// equality ignores the order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution(IndexMap<String, Term>);

impl Substitution {
    pub fn empty() -> Self {
        Substitution(IndexMap::new())
    }

    pub fn singleton(var: impl Into<String>, term: Term) -> Self {
        let mut map = IndexMap::new();
        map.insert(var.into(), term);
        Substitution(map)
    }

    pub fn get(&self, var: &str) -> Option<&Term> {
        self.0.get(var)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.0.iter().map(|(var, term)| (var.as_str(), term))
    }

    /// Insert a binding as is, without occurs check or composition.
    pub fn bind(&mut self, var: impl Into<String>, term: Term) {
        self.0.insert(var.into(), term);
    }

    /// Resolve `term` under this substitution.
    ///
    /// Bound variables are replaced by their binding, which is resolved in
    /// turn, so chains like `x -> y, y -> A` resolve `x` to `A`. Compound
    /// arguments are resolved and the compound is rebuilt.
    ///
    /// Substitutions produced by [`crate::unify::unify`] never bind a
    /// variable to a term containing it. For a hand-built cyclic one, a
    /// variable met again while its own binding is being expanded is left
    /// as is, so this always terminates.
    pub fn apply(&self, term: &Term) -> Term {
        enum Step<'a> {
            Visit(&'a Term),
            Build(&'a str, usize),
            Release,
        }

        let mut steps = vec![Step::Visit(term)];
        let mut built: Vec<Term> = Vec::new();
        let mut expanding: Vec<&str> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Term::Variable(name)) => match self.0.get(name) {
                    Some(bound) if !expanding.contains(&name.as_str()) => {
                        expanding.push(name);
                        steps.push(Step::Release);
                        steps.push(Step::Visit(bound));
                    }
                    _ => built.push(Term::Variable(name.clone())),
                },
                Step::Visit(constant @ Term::Constant(_)) => built.push(constant.clone()),
                Step::Visit(Term::Compound { functor, args }) => {
                    steps.push(Step::Build(functor, args.len()));
                    steps.extend(args.iter().rev().map(Step::Visit));
                }
                Step::Build(functor, arity) => {
                    let args = built.split_off(built.len() - arity);
                    built.push(Term::compound(functor, args));
                }
                Step::Release => {
                    expanding.pop();
                }
            }
        }

        built.pop().unwrap_or_else(|| term.clone())
    }

    /// Check if `var` occurs in `term` once `term` is fully resolved.
    ///
    /// The variable may hide behind another variable's binding:
    /// with `y -> f(x)`, `x` occurs in `g(y)`.
    pub fn occurs(&self, var: &str, term: &Term) -> bool {
        occurs_in(var, &self.apply(term))
    }

    /// Combine `self` (the newer bindings) with `existing`.
    ///
    /// Every binding of `existing` has its term resolved through `self`,
    /// then the bindings of `self` are added, replacing any binding of the
    /// same variable.
    pub fn compose(&self, existing: &Substitution) -> Substitution {
        let mut result = Substitution(IndexMap::with_capacity(existing.len() + self.len()));

        for (var, term) in existing.iter() {
            result.bind(var, self.apply(term));
        }

        for (var, term) in self.iter() {
            result.bind(var, term.clone());
        }

        result
    }

    /// Depth of the deepest bound term, `0` when empty.
    pub fn depth(&self) -> usize {
        self.0.values().map(Term::depth).max().unwrap_or(0)
    }

    /// The same bindings with every term fully resolved.
    pub fn resolved(&self) -> Substitution {
        self.0
            .iter()
            .map(|(var, term)| (var.clone(), self.apply(term)))
            .collect()
    }
}

/// Check if a variable occurs within an already resolved term.
fn occurs_in(var: &str, term: &Term) -> bool {
    let mut stack = vec![term];
    while let Some(term) = stack.pop() {
        match term {
            Term::Variable(name) => {
                if name == var {
                    return true;
                }
            }
            Term::Constant(_) => {}
            Term::Compound { args, .. } => stack.extend(args),
        }
    }
    false
}

impl FromIterator<(String, Term)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (String, Term)>>(iter: I) -> Self {
        Substitution(iter.into_iter().collect())
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (var, term)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} -> {}", var, term)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(args: Vec<Term>) -> Term {
        Term::compound("f", args)
    }

    #[test]
    fn test_empty_substitution() {
        let subst = Substitution::empty();
        let term = f(vec![Term::var("x"), Term::constant("A")]);
        assert_eq!(subst.apply(&term), term);
    }

    #[test]
    fn test_singleton_substitution() {
        let subst = Substitution::singleton("x", Term::constant("A"));
        assert_eq!(subst.apply(&Term::var("x")), Term::constant("A"));
    }

    #[test]
    fn test_apply_to_compound() {
        let subst = Substitution::singleton("x", Term::constant("A"));
        let term = f(vec![Term::var("x"), Term::compound("g", vec![Term::var("x")])]);
        assert_eq!(
            subst.apply(&term),
            f(vec![Term::constant("A"), Term::compound("g", vec![Term::constant("A")])])
        );
    }

    #[test]
    fn test_apply_preserves_unbound_vars() {
        let subst = Substitution::singleton("x", Term::constant("A"));
        assert_eq!(subst.apply(&Term::var("y")), Term::var("y"));
    }

    #[test]
    fn test_apply_chases_bindings() {
        let subst: Substitution = [
            ("x".to_string(), Term::var("y")),
            ("y".to_string(), f(vec![Term::var("z")])),
            ("z".to_string(), Term::constant("B")),
        ]
        .into_iter()
        .collect();
        assert_eq!(subst.apply(&Term::var("x")), f(vec![Term::constant("B")]));
    }

    #[test]
    fn test_apply_terminates_on_cycle() {
        let mut subst = Substitution::empty();
        subst.bind("x", f(vec![Term::var("x")]));
        assert_eq!(subst.apply(&Term::var("x")), f(vec![Term::var("x")]));

        let mut subst = Substitution::empty();
        subst.bind("x", Term::var("y"));
        subst.bind("y", Term::var("x"));
        assert_eq!(subst.apply(&Term::var("x")), Term::var("x"));
    }

    #[test]
    fn test_depth() {
        assert_eq!(Substitution::empty().depth(), 0);
        let subst: Substitution = [
            ("x".to_string(), Term::constant("A")),
            ("y".to_string(), f(vec![f(vec![Term::var("z")])])),
        ]
        .into_iter()
        .collect();
        assert_eq!(subst.depth(), 3);
    }

    #[test]
    fn test_occurs_through_binding() {
        let subst = Substitution::singleton("y", f(vec![Term::var("x")]));
        let term = Term::compound("g", vec![Term::var("y")]);
        assert!(subst.occurs("x", &term));
        assert!(!Substitution::empty().occurs("x", &term));
        assert!(!subst.occurs("z", &term));
    }

    #[test]
    fn test_occurs_direct() {
        let subst = Substitution::empty();
        assert!(subst.occurs("x", &Term::var("x")));
        assert!(!subst.occurs("x", &Term::constant("x")));
    }

    #[test]
    fn test_compose_resolves_existing_through_new() {
        let existing = Substitution::singleton("x", Term::var("y"));
        let new = Substitution::singleton("y", Term::constant("A"));
        let composed = new.compose(&existing);
        assert_eq!(composed.get("x"), Some(&Term::constant("A")));
        assert_eq!(composed.get("y"), Some(&Term::constant("A")));
        assert_eq!(existing.get("y"), None);
    }

    #[test]
    fn test_compose_new_wins() {
        let existing = Substitution::singleton("x", Term::constant("A"));
        let new = Substitution::singleton("x", Term::constant("B"));
        assert_eq!(new.compose(&existing).get("x"), Some(&Term::constant("B")));
    }

    #[test]
    fn test_compose_keeps_existing_order() {
        let existing: Substitution = [
            ("y".to_string(), Term::constant("A")),
            ("x".to_string(), Term::var("z")),
        ]
        .into_iter()
        .collect();
        let new = Substitution::singleton("z", Term::constant("B"));
        assert_eq!(new.compose(&existing).to_string(), "{y -> A, x -> B, z -> B}");
    }

    #[test]
    fn test_substitution_idempotent() {
        let subst = Substitution::singleton("x", Term::constant("A"));
        let once = subst.apply(&Term::var("x"));
        let twice = subst.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_resolved() {
        let subst: Substitution = [
            ("x".to_string(), Term::var("y")),
            ("y".to_string(), Term::constant("A")),
        ]
        .into_iter()
        .collect();
        assert_eq!(subst.to_string(), "{x -> y, y -> A}");
        assert_eq!(subst.resolved().to_string(), "{x -> A, y -> A}");
    }
}
