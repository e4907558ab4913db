use lachs::Span;
use thiserror::Error;

use crate::lexer::Token;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token stream ran out in the middle of a term.
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEndOfInput { expected: &'static str },

    #[error("unexpected token at {}:{}: expected {expected}, found {found}", .position.start.0, .position.start.1)]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        position: Span,
    },

    /// A complete term was parsed but tokens remain.
    #[error("trailing tokens after term: found {found} at {}:{}", .position.start.0, .position.start.1)]
    TrailingTokens { found: String, position: Span },

    #[error("term nested deeper than {limit} levels at {}:{}", .position.start.0, .position.start.1)]
    TooDeep { limit: usize, position: Span },
}

impl ParseError {
    pub fn unexpected(expected: &'static str, found: &Token) -> Self {
        ParseError::UnexpectedToken {
            expected,
            found: found.describe(),
            position: found.pos(),
        }
    }

    pub fn trailing(found: &Token) -> Self {
        ParseError::TrailingTokens {
            found: found.describe(),
            position: found.pos(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct ParseState {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
    max_depth: usize,
}

impl ParseState {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_max_depth(tokens, usize::MAX)
    }

    pub fn with_max_depth(tokens: Vec<Token>, max_depth: usize) -> Self {
        Self {
            tokens,
            index: 0,
            depth: 1,
            max_depth,
        }
    }

    pub fn advance(&mut self) -> Option<Token> {
        if self.has_next() {
            let token = self.tokens[self.index].clone();
            self.index += 1;
            Some(token)
        } else {
            None
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn restore(&mut self, position: usize) {
        self.index = position;
    }

    /// Enter an argument list opened at `at`.
    pub fn descend(&mut self, at: Span) -> ParseResult<()> {
        if self.depth >= self.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.max_depth,
                position: at,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

pub trait Parser<T>: Sized {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T>;
}

impl<T, F: Fn(&mut ParseState) -> ParseResult<T>> Parser<T> for F {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        self(state)
    }
}
