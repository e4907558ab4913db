//! Property-based tests for unification and parsing using proptest.

use std::collections::HashMap;

use proptest::prelude::*;

use super::{Substitution, UnifyError, unify};
use crate::ast::Term;

/// Term description before naming: small symbol pools keep collisions likely.
#[derive(Debug, Clone)]
enum TermDesc {
    Var(u8),
    Const(u8),
    Func(u8, Vec<TermDesc>),
}

fn arb_term_desc(max_depth: u32) -> BoxedStrategy<TermDesc> {
    if max_depth == 0 {
        prop_oneof![
            (0..4u8).prop_map(TermDesc::Var),
            (0..4u8).prop_map(TermDesc::Const),
        ]
        .boxed()
    } else {
        prop_oneof![
            3 => (0..4u8).prop_map(TermDesc::Var),
            3 => (0..4u8).prop_map(TermDesc::Const),
            2 => (0..2u8, proptest::collection::vec(arb_term_desc(max_depth - 1), 1..=2))
                .prop_map(|(f, args)| TermDesc::Func(f, args)),
        ]
        .boxed()
    }
}

fn build_term(desc: &TermDesc) -> Term {
    match desc {
        TermDesc::Var(i) => Term::var(format!("x{}", i)),
        TermDesc::Const(i) => Term::constant(format!("C{}", i)),
        TermDesc::Func(f, args) => Term::compound(format!("f{}", f), args.iter().map(build_term).collect()),
    }
}

fn arb_term(max_depth: u32) -> impl Strategy<Value = Term> {
    arb_term_desc(max_depth).prop_map(|desc| build_term(&desc))
}

fn mgu(a: &Term, b: &Term) -> Result<Substitution, UnifyError> {
    unify(a, b, &Substitution::empty())
}

/// Equal up to a consistent one-to-one renaming of variables.
fn is_variant(a: &Term, b: &Term) -> bool {
    let mut forward = HashMap::new();
    let mut backward = HashMap::new();
    let mut stack = vec![(a, b)];
    while let Some(pair) = stack.pop() {
        match pair {
            (Term::Variable(x), Term::Variable(y)) => {
                if *forward.entry(x).or_insert(y) != y || *backward.entry(y).or_insert(x) != x {
                    return false;
                }
            }
            (Term::Constant(x), Term::Constant(y)) => {
                if x != y {
                    return false;
                }
            }
            (
                Term::Compound { functor: f, args: xs },
                Term::Compound { functor: g, args: ys },
            ) => {
                if f != g || xs.len() != ys.len() {
                    return false;
                }
                stack.extend(xs.iter().zip(ys));
            }
            _ => return false,
        }
    }
    true
}

proptest! {
    /// Soundness: if unify(s, t) = σ, then sσ = tσ
    #[test]
    fn unification_soundness(a in arb_term(3), b in arb_term(3)) {
        if let Ok(sigma) = mgu(&a, &b) {
            prop_assert_eq!(sigma.apply(&a), sigma.apply(&b), "unifier must make terms equal");
        }
    }

    /// Symmetry: both directions agree on success and on the unified term
    #[test]
    fn unification_symmetry(a in arb_term(3), b in arb_term(3)) {
        let r1 = mgu(&a, &b);
        let r2 = mgu(&b, &a);
        prop_assert_eq!(r1.is_ok(), r2.is_ok(), "unification should be symmetric");
        if let (Ok(s1), Ok(s2)) = (r1, r2) {
            let t1 = s1.apply(&a);
            let t2 = s2.apply(&b);
            prop_assert!(is_variant(&t1, &t2), "{} and {} should be variants", t1, t2);
        }
    }

    /// Reflexivity: a term unifies with itself without any binding
    #[test]
    fn unification_reflexivity(t in arb_term(3)) {
        prop_assert_eq!(mgu(&t, &t), Ok(Substitution::empty()));
    }

    /// Occurs check: unify(x, f(...x...)) always fails
    #[test]
    fn unification_occurs_check(functor in "[a-zA-Z][a-z0-9]{0,3}", depth in 1..4usize, pad in arb_term(1)) {
        let x = Term::var("x");
        let mut term = x.clone();
        for _ in 0..depth {
            term = Term::compound(functor.clone(), vec![pad.clone(), term]);
        }
        let result = mgu(&x, &term);
        prop_assert!(
            matches!(result, Err(UnifyError::OccursCheck { .. })),
            "occurs check should reject x = {}", term
        );
    }

    /// The returned unifier needs no second application
    #[test]
    fn unifier_idempotent(a in arb_term(3), b in arb_term(3)) {
        if let Ok(sigma) = mgu(&a, &b) {
            let once = sigma.apply(&a);
            prop_assert_eq!(sigma.apply(&once), once.clone());
            prop_assert_eq!(sigma.resolved(), sigma);
        }
    }

    /// Parsing the rendering of a term gives back the same term
    #[test]
    fn parser_round_trip(t in arb_term(4)) {
        let rendered = t.to_string();
        prop_assert_eq!(crate::parse(&rendered), Ok(t));
    }
}
