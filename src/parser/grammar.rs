use crate::ast::Term;
use crate::config::Limits;
use crate::lexer::Token;

use super::{
    BoxedParser, ParseError, ParseResult, ParseState, Parser, expect_comma, expect_lparen,
    expect_rparen, ident, lookahead, nested, optional,
};

/// atom := ident [argument_list]
///
/// A bare identifier is a variable when it starts with a lowercase letter and
/// a constant otherwise. With an argument list it is always a compound.
pub fn atom() -> BoxedParser<Term> {
    (ident() + lookahead(|t| matches!(t, Token::LParen(_)), argument_list()))
        >> |(name, args)| match args {
            Some(args) => Term::compound(name.value, args),
            None => Term::atom(name.value),
        }
}

/// argument_list := "(" arguments ")"
fn argument_list() -> BoxedParser<Vec<Term>> {
    nested(expect_lparen() * arguments() - expect_rparen())
}

/// arguments := atom ("," atom)*
fn arguments() -> BoxedParser<Vec<Term>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut args = vec![atom().parse(state)?];
        while optional(expect_comma()).parse(state)?.is_some() {
            args.push(atom().parse(state)?);
        }
        Ok(args)
    })
}

/// Parse exactly one term, rejecting anything left over.
pub fn parse(state: &mut ParseState) -> ParseResult<Term> {
    let term = atom().parse(state)?;
    if let Some(tok) = state.peek() {
        return Err(ParseError::trailing(tok));
    }
    log::debug!("parsed term {}", term);
    Ok(term)
}

pub fn parse_term(tokens: Vec<Token>) -> ParseResult<Term> {
    parse_term_with(tokens, &Limits::default())
}

pub fn parse_term_with(tokens: Vec<Token>, limits: &Limits) -> ParseResult<Term> {
    let mut state = ParseState::with_max_depth(tokens, limits.max_depth);
    parse(&mut state)
}
