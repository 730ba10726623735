//! Token definitions for one chart line.
//!
//! Lines are lexed independently; the parser matches whole token shapes, so
//! the lexer stays trivial. Guard expressions are opaque: anything bracketed
//! is a single token, and the `[*]` pseudo-state marker outranks it.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")]
pub enum Tok {
    /// `[*]`, the initial/final pseudo-state marker.
    #[token("[*]", priority = 10)]
    Star,

    /// `-->` or `->`.
    #[regex(r"-{1,2}>")]
    Arrow,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(":")]
    Colon,

    #[token("/")]
    Slash,

    /// Bracketed guard expression; content is arbitrary non-bracket text.
    #[regex(r"\[[^\]\r\n]*\]", priority = 3)]
    Guard,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
}

/// Lex a single trimmed line. `None` when any character fails to tokenize.
pub fn lex_line(line: &str) -> Option<Vec<(Tok, &str)>> {
    let mut tokens = Vec::new();
    let mut lexer = Tok::lexer(line);
    while let Some(result) = lexer.next() {
        match result {
            Ok(tok) => tokens.push((tok, lexer.slice())),
            Err(()) => return None,
        }
    }
    Some(tokens)
}

/// Inner text of a `Guard` token, brackets stripped.
pub fn guard_text(slice: &str) -> &str {
    &slice[1..slice.len() - 1]
}
