use std::ops::{Add, Mul, Shr, Sub};
use std::rc::Rc;

use crate::lexer::{Ident, Token};

use super::state::{ParseError, ParseResult, ParseState, Parser};

type ParserFn<T> = Rc<dyn Fn(&mut ParseState) -> ParseResult<T>>;

// === Boxed Parser for type erasure ===

pub struct BoxedParser<T> {
    parser: ParserFn<T>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<P: Parser<T> + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |state| parser.parse(state)),
        }
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        (self.parser)(state)
    }
}

// === Combinators as methods ===

impl<T: 'static> BoxedParser<T> {
    /// Sequence: parse self then other, return (T, U)
    pub fn seq<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<(T, U)> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            let b = other.parse(state)?;
            Ok((a, b))
        })
    }

    /// Keep left: parse self then other, discard other's result
    pub fn skip<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            let _ = other.parse(state)?;
            Ok(a)
        })
    }

    /// Keep right: parse self then other, discard self's result
    pub fn skip_left<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let _ = self.parse(state)?;
            other.parse(state)
        })
    }

    /// Map: transform result
    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, f: F) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            Ok(f(a))
        })
    }
}

// === Operator Overloading ===

/// `+` for sequence: A + B -> (A, B)
impl<T: 'static, U: 'static> Add<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<(T, U)>;

    fn add(self, rhs: BoxedParser<U>) -> Self::Output {
        self.seq(rhs)
    }
}

/// `-` for keep left: A - B -> A (parse B, discard result)
impl<T: 'static, U: 'static> Sub<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn sub(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip(rhs)
    }
}

/// `*` for keep right: A * B -> B (parse A, discard result)
impl<T: 'static, U: 'static> Mul<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn mul(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip_left(rhs)
    }
}

/// `>>` for map: A >> fn -> B
impl<T: 'static, U: 'static, F: Fn(T) -> U + 'static> Shr<F> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}

// === Primitive Parsers ===

/// Consume one token matching `predicate`; on mismatch nothing is consumed.
fn token_with_error<F: Fn(&Token) -> bool + 'static>(
    predicate: F,
    expected: &'static str,
) -> BoxedParser<Token> {
    BoxedParser::new(move |state: &mut ParseState| match state.peek() {
        Some(tok) if predicate(tok) => state
            .advance()
            .ok_or(ParseError::UnexpectedEndOfInput { expected }),
        Some(tok) => Err(ParseError::unexpected(expected, tok)),
        None => Err(ParseError::UnexpectedEndOfInput { expected }),
    })
}

pub fn expect_lparen() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::LParen(_)), "'('")
}

pub fn expect_rparen() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::RParen(_)), "')'")
}

pub fn expect_comma() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::Comma(_)), "','")
}

pub fn ident() -> BoxedParser<Ident> {
    BoxedParser::new(move |state: &mut ParseState| match state.advance() {
        Some(Token::Ident(ident)) => Ok(ident),
        Some(tok) => Err(ParseError::unexpected("identifier", &tok)),
        None => Err(ParseError::UnexpectedEndOfInput {
            expected: "identifier",
        }),
    })
}

/// Optional: parse zero or one, backtracking on failure
pub fn optional<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Option<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        match parser.parse(state) {
            Ok(item) => Ok(Some(item)),
            Err(_) => {
                state.restore(pos);
                Ok(None)
            }
        }
    })
}

/// Run `parser` only if the next token satisfies `first`.
///
/// Unlike [`optional`] this commits: once the first token matched, errors
/// from `parser` propagate instead of being swallowed.
pub fn lookahead<T: 'static, F: Fn(&Token) -> bool + 'static>(
    first: F,
    parser: BoxedParser<T>,
) -> BoxedParser<Option<T>> {
    BoxedParser::new(move |state: &mut ParseState| match state.peek() {
        Some(tok) if first(tok) => parser.parse(state).map(Some),
        _ => Ok(None),
    })
}

/// Count one level of nesting around `parser`, failing past the depth limit.
pub fn nested<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| {
        let at = state.peek().map(Token::pos).unwrap_or_default();
        state.descend(at)?;
        let result = parser.parse(state);
        state.ascend();
        result
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(input: &str) -> ParseState {
        ParseState::new(Token::lex(input).unwrap())
    }

    #[test]
    fn test_failed_primitive_consumes_nothing() {
        let mut state = state(")");
        assert!(expect_comma().parse(&mut state).is_err());
        assert_eq!(state.position(), 0);
    }

    #[test]
    fn test_optional_restores() {
        let mut state = state("a");
        let parsed = optional(expect_lparen()).parse(&mut state).unwrap();
        assert!(parsed.is_none());
        assert_eq!(state.position(), 0);
    }

    #[test]
    fn test_lookahead_commits() {
        let mut state = state("( a");
        let parser = lookahead(
            |t| matches!(t, Token::LParen(_)),
            expect_lparen() * ident() - expect_rparen(),
        );
        assert_eq!(
            parser.parse(&mut state),
            Err(ParseError::UnexpectedEndOfInput { expected: "')'" })
        );
    }

    #[test]
    fn test_sequence_and_map() {
        let mut state = state("f , g");
        let parser = (ident() - expect_comma() + ident()) >> |(a, b)| format!("{}{}", a.value, b.value);
        assert_eq!(parser.parse(&mut state).unwrap(), "fg");
        assert!(!state.has_next());
    }

    #[test]
    fn test_nested_depth_limit() {
        let mut state = ParseState::with_max_depth(Token::lex("(").unwrap(), 1);
        let result = nested(expect_lparen()).parse(&mut state);
        assert!(matches!(result, Err(ParseError::TooDeep { limit: 1, .. })));
    }
}
