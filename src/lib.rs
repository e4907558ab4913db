//! # Robinson - First-Order Term Unification
//!
//! Robinson is a small engine for first-order terms: it parses textual term
//! expressions and computes most general unifiers with Robinson's algorithm,
//! including the occurs check.
//!
//! ## Pipeline Flow
//!
//! ```text
//! Term Text (String)
//!     ↓
//! [Lexer] → Token Stream
//!     ↓
//! [Parser] → Term (ast::Term)
//!     ↓
//! [Unifier] → Substitution or UnifyError
//!     ↓
//! [fmt] → "{x -> Riya, y -> Apple}" / "FAIL (no unifier)"
//! ```
//!
//! ## Term Syntax
//!
//! ```text
//! atom := IDENT ["(" atom ("," atom)* ")"]
//! IDENT := [A-Za-z_][A-Za-z0-9_]*
//! ```
//!
//! A bare identifier starting with a lowercase letter is a variable, any
//! other bare identifier is a constant. An identifier followed by an
//! argument list is a compound term, whatever its case: `Knows(John, x)` and
//! `f(x, y)` are both compounds.
//!
//! ## Failure Is a Value
//!
//! Malformed input yields an [`Error`] (lexing or parsing). Terms that
//! simply do not unify yield a [`unify::UnifyError`], which is an ordinary
//! result and never conflated with malformed input.
//!
//! ## Module Structure
//!
//! - [`ast`] - The term model
//! - [`lexer`] - Tokenization
//! - [`parser`] - Combinator-based recursive descent
//! - [`unify`] - Substitutions and the unification algorithm
//! - [`config`] - Depth and step limits
//! - [`fmt`] - Rendering results
//! - [`batch`] - Running many pairs, built-in examples
//!
//! ## Example
//!
//! ```
//! use robinson::unify::{Substitution, unify};
//!
//! let a = robinson::parse("Eats(x, Apple)").unwrap();
//! let b = robinson::parse("Eats(Riya, y)").unwrap();
//! let subst = unify(&a, &b, &Substitution::empty()).unwrap();
//!
//! assert_eq!(subst.apply(&a), subst.apply(&b));
//! assert_eq!(subst.to_string(), "{y -> Apple, x -> Riya}");
//! ```

pub mod ast;
pub mod batch;
pub mod config;
pub mod error;
pub mod fmt;
pub mod lexer;
pub mod parser;
pub mod unify;

pub use ast::Term;
pub use error::Error;

use config::Limits;

/// Lex and parse one term with the default [`Limits`].
pub fn parse(input: &str) -> Result<Term, Error> {
    parse_with(input, &Limits::default())
}

pub fn parse_with(input: &str, limits: &Limits) -> Result<Term, Error> {
    let tokens = lexer::lex(input)?;
    Ok(parser::parse_term_with(tokens, limits)?)
}
