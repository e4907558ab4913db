use lachs::Span;
use thiserror::Error;

// `#[lachs::token]` also emits its own `LexError`/`LexResult` items, so the
// token enum lives in its own module to keep them apart from ours.
mod tokens {
    #[lachs::token]
    pub enum Token {
        #[literal("[A-Za-z_][A-Za-z0-9_]*")]
        Ident,
        #[terminal("(")]
        LParen,
        #[terminal(")")]
        RParen,
        #[terminal(",")]
        Comma,
    }
}

pub use tokens::{Comma, Ident, LParen, RParen, Token};

// The generated token structs only derive `Debug, Clone`; tests compare parse
// results containing `Ident`, so give it the field-wise equality a derive would.
#[cfg(test)]
impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.value == other.value
    }
}

impl Token {
    pub fn pos(&self) -> Span {
        match self {
            Token::Ident(inner) => inner.position.clone(),
            Token::LParen(inner) => inner.position.clone(),
            Token::RParen(inner) => inner.position.clone(),
            Token::Comma(inner) => inner.position.clone(),
        }
    }

    /// Returns a human-readable description of the token
    pub fn describe(&self) -> String {
        match self {
            Token::Ident(inner) => format!("identifier '{}'", inner.value),
            Token::LParen(_) => "'('".to_string(),
            Token::RParen(_) => "')'".to_string(),
            Token::Comma(_) => "','".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that starts no token, with its byte offset.
    #[error("unexpected character {found:?} at position {position}")]
    UnexpectedCharacter { position: usize, found: char },

    /// Rejected by the tokenizer without a character to blame.
    #[error("{0}")]
    Rejected(String),
}

/// Tokenize `input`, pinpointing the offending character on failure.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    Token::lex(input).map_err(|err| {
        log::debug!("lexing {:?} failed: {}", input, err);
        match unexpected_character(input) {
            Some((position, found)) => LexError::UnexpectedCharacter { position, found },
            None => LexError::Rejected(err.to_string()),
        }
    })
}

/// First character that cannot be part of any token.
fn unexpected_character(input: &str) -> Option<(usize, char)> {
    let mut in_ident = false;
    input.char_indices().find(|&(_, c)| {
        let starts_ident = c == '_' || c.is_ascii_alphabetic();
        let accepted = c.is_ascii_whitespace()
            || matches!(c, '(' | ')' | ',')
            || starts_ident
            || (in_ident && c.is_ascii_digit());
        in_ident = starts_ident || (in_ident && c.is_ascii_digit());
        !accepted
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_at(input: &str) -> Option<(usize, char)> {
        match lex(input) {
            Err(LexError::UnexpectedCharacter { position, found }) => Some((position, found)),
            _ => None,
        }
    }

    #[test]
    fn test_digit_cannot_start_identifier() {
        assert_eq!(error_at("f(1)"), Some((2, '1')));
        assert_eq!(error_at("f(x1)"), None);
    }

    #[test]
    fn test_error_position_is_byte_offset() {
        assert_eq!(error_at("ä"), Some((0, 'ä')));
        assert_eq!(error_at("f(ä)"), Some((2, 'ä')));
    }

    #[test]
    fn test_digit_after_separator() {
        assert_eq!(unexpected_character("ab 12"), Some((3, '1')));
        assert_eq!(unexpected_character("a_1,b2"), None);
    }

    #[test]
    fn test_positions_follow_input() {
        let tokens = lex("f ( x )").unwrap();
        let starts: Vec<_> = tokens.iter().map(|tok| tok.pos().start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(starts, sorted);
    }
}
