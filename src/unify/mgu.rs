use thiserror::Error;

use super::subst::Substitution;
use crate::ast::Term;
use crate::config::Limits;

/// Why two terms have no unifier.
///
/// This is an expected outcome of unification, not a malformed-input
/// error. Only [`UnifyError::StepLimitExceeded`] and [`UnifyError::TooDeep`]
/// leave the question open.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnifyError {
    #[error("constant clash: {left} vs {right}")]
    ConstantClash { left: String, right: String },

    #[error("functor clash: {left} vs {right}")]
    FunctorClash { left: Term, right: Term },

    #[error("arity mismatch for {functor}: {left} vs {right} arguments")]
    ArityMismatch {
        functor: String,
        left: usize,
        right: usize,
    },

    #[error("cannot unify {} {left} with {} {right}", .left.kind(), .right.kind())]
    KindMismatch { left: Term, right: Term },

    #[error("occurs check: {var} occurs in {term}")]
    OccursCheck { var: String, term: Term },

    #[error("gave up after {limit} unification steps")]
    StepLimitExceeded { limit: usize },

    #[error("gave up on a term nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

impl UnifyError {
    /// `true` if the terms are known not to unify.
    pub fn is_no_unifier(&self) -> bool {
        !matches!(
            self,
            UnifyError::StepLimitExceeded { .. } | UnifyError::TooDeep { .. }
        )
    }
}

/// Unify two terms, extending `initial` to a most general unifier.
///
/// # Algorithm
///
/// A work-list of pairs still to reconcile starts with `(a, b)`. Each popped
/// pair is resolved under the current substitution `s`, then:
///
/// ```text
/// t      =?= t          // identical: drop the pair
/// x      =?= t          // bind x -> t unless x occurs in t
/// t      =?= x          // bind x -> t unless x occurs in t
/// C      =?= D          // constant clash
/// f(a..) =?= f(b..)     // push the argument pairs
/// f(a..) =?= g(b..)     // functor clash / arity mismatch
/// ```
///
/// A new binding `x -> t` replaces `s` with `{x -> t} ∘ s`, resolving every
/// existing binding through it.
///
/// When both sides are distinct variables, the left one is bound to the
/// right one. Argument pairs are pushed left to right, so the rightmost pair
/// of a compound is reconciled first.
///
/// `initial` is never modified; on failure the partial bindings are dropped.
///
/// Neither the inputs, the pairs on the work-list nor the bindings built
/// along the way may nest deeper than `limits.max_depth`; past that the
/// search gives up with [`UnifyError::TooDeep`].
///
/// # Examples
///
/// ```text
/// unify(Eats(x, Apple), Eats(Riya, y)) = Ok({y -> Apple, x -> Riya})
/// unify(x, f(x))                       = Err(OccursCheck)
/// unify(f(a), f(a, b))                 = Err(ArityMismatch)
/// ```
pub fn unify(a: &Term, b: &Term, initial: &Substitution) -> Result<Substitution, UnifyError> {
    unify_with(a, b, initial, &Limits::default())
}

pub fn unify_with(
    a: &Term,
    b: &Term,
    initial: &Substitution,
    limits: &Limits,
) -> Result<Substitution, UnifyError> {
    let result = solve(a, b, initial, limits);
    match &result {
        Ok(subst) => log::debug!("unified {} with {}: {}", a, b, subst),
        Err(err) => log::debug!("no unifier for {} and {}: {}", a, b, err),
    }
    result
}

fn check_depth(depth: usize, limits: &Limits) -> Result<(), UnifyError> {
    if depth > limits.max_depth {
        return Err(UnifyError::TooDeep {
            limit: limits.max_depth,
        });
    }
    Ok(())
}

fn solve(
    a: &Term,
    b: &Term,
    initial: &Substitution,
    limits: &Limits,
) -> Result<Substitution, UnifyError> {
    check_depth(a.depth().max(b.depth()), limits)?;
    check_depth(initial.depth(), limits)?;

    let mut pending = vec![(a.clone(), b.clone())];
    let mut subst = initial.clone();
    let mut steps = 0;

    while let Some((left, right)) = pending.pop() {
        steps += 1;
        if steps > limits.max_steps {
            return Err(UnifyError::StepLimitExceeded {
                limit: limits.max_steps,
            });
        }

        let left = subst.apply(&left);
        let right = subst.apply(&right);
        check_depth(left.depth().max(right.depth()), limits)?;
        log::trace!("step {}: {} =?= {}", steps, left, right);

        if left == right {
            continue;
        }

        match (left, right) {
            (Term::Variable(var), term) | (term, Term::Variable(var)) => {
                if subst.occurs(&var, &term) {
                    return Err(UnifyError::OccursCheck { var, term });
                }
                log::trace!("bind {} -> {}", var, term);
                subst = Substitution::singleton(var, term).compose(&subst);
                check_depth(subst.depth(), limits)?;
            }

            (Term::Constant(left), Term::Constant(right)) => {
                return Err(UnifyError::ConstantClash { left, right });
            }

            (
                Term::Compound {
                    functor: f1,
                    args: args1,
                },
                Term::Compound {
                    functor: f2,
                    args: args2,
                },
            ) => {
                if f1 != f2 {
                    return Err(UnifyError::FunctorClash {
                        left: Term::compound(f1, args1),
                        right: Term::compound(f2, args2),
                    });
                }
                if args1.len() != args2.len() {
                    return Err(UnifyError::ArityMismatch {
                        functor: f1,
                        left: args1.len(),
                        right: args2.len(),
                    });
                }
                pending.extend(args1.into_iter().zip(args2));
            }

            (left, right) => return Err(UnifyError::KindMismatch { left, right }),
        }
    }

    Ok(subst)
}
