use thiserror::Error;

use crate::lexer::LexError;
use crate::parser::ParseError;

/// Why a piece of text could not be turned into a term.
///
/// A failed unification is not an error of this kind; see
/// [`crate::unify::UnifyError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}
