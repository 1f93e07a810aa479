use crate::parser::comment::{parse_comment, parse_directive};
use crate::parser::identifier;
use crate::types::Parsable;
use nom::branch::alt;
use nom::bytes::complete::{escaped, tag};
use nom::character::complete::{anychar, char, multispace1, none_of};
use nom::combinator::{map, opt, recognize, value};
use nom::multi::many0_count;
use nom::sequence::delimited;
use nom::{IResult, Parser};
use nom_language::error::VerboseError;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum TokenKind<'a> {
    Ident(&'a str),
    Literal(&'a str),
    Scope,
    Tilde,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Semicolon,
    Colon,
    Punct(char),
}

impl From<char> for TokenKind<'_> {
    fn from(c: char) -> Self {
        match c {
            '~' => TokenKind::Tilde,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            c => TokenKind::Punct(c),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub text: &'a str,
    /// Byte offset of `text` in the scanned source.
    pub offset: usize,
}

impl Token<'_> {
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn is_ident(&self) -> bool {
        matches!(self.kind, TokenKind::Ident(_))
    }
}

fn parse_literal(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    recognize(alt((
        delimited(
            char('"'),
            opt(escaped(none_of("\\\""), '\\', anychar)),
            char('"'),
        ),
        delimited(
            char('\''),
            opt(escaped(none_of("\\'"), '\\', anychar)),
            char('\''),
        ),
    )))
    .parse(input)
}

fn parse_trivia(input: &str) -> IResult<&str, (), VerboseError<&str>> {
    value(
        (),
        many0_count(alt((multispace1, parse_comment, parse_directive))),
    )
    .parse(input)
}

impl<'a> Parsable<'a> for TokenKind<'a> {
    fn parse(input: &'a str) -> IResult<&'a str, Self, VerboseError<&'a str>> {
        alt((
            map(identifier, TokenKind::Ident),
            map(parse_literal, TokenKind::Literal),
            value(TokenKind::Scope, tag("::")),
            map(anychar, TokenKind::from),
        ))
        .parse(input)
    }
}

/// Splits header text into tokens, dropping whitespace, comments and preprocessor lines.
/// Any character that starts no other token becomes a `Punct`, so every input tokenizes.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut input = source;

    loop {
        if let Ok((remaining, _)) = parse_trivia(input) {
            input = remaining;
        }
        if input.is_empty() {
            break;
        }

        let Ok((remaining, kind)) = TokenKind::parse(input) else {
            break;
        };
        let offset = source.len() - input.len();
        let text = &input[..input.len() - remaining.len()];
        tokens.push(Token { kind, text, offset });
        input = remaining;
    }

    tokens
}

/// Pairs every `(` with its balanced `)`. Unbalanced parentheses stay unpaired.
pub fn pair_parens(tokens: &[Token]) -> Vec<Option<usize>> {
    let mut partners = vec![None; tokens.len()];
    let mut open = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::OpenParen => open.push(index),
            TokenKind::CloseParen => {
                if let Some(opening) = open.pop() {
                    partners[opening] = Some(index);
                    partners[index] = Some(opening);
                }
            }
            _ => {}
        }
    }

    partners
}
