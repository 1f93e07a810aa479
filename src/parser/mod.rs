use nom::bytes::complete::take_while1;
use nom::{IResult, Parser};
use nom_language::error::VerboseError;
use tracing::debug;

use crate::config::StubConfig;
use crate::parser::declaration::{DeclarationRecord, match_declarations};
use crate::parser::marker::{TypeNameMarker, find_type_marker};
use crate::parser::token::tokenize;

pub mod comment;
pub mod declaration;
pub mod marker;
pub mod token;

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Words of letters, digits and underscores. Numeric literals lex as identifiers too.
pub fn identifier(i: &str) -> IResult<&str, &str, VerboseError<&str>> {
    take_while1(is_ident_char).parse(i)
}

/// Collapses every whitespace run to a single space and trims both ends.
pub fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Everything one header yields: the enclosing type (if any) and its declarations in source order.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct Extraction {
    pub marker: Option<TypeNameMarker>,
    pub records: Vec<DeclarationRecord>,
}

pub fn extract(text: &str, config: &StubConfig) -> Extraction {
    let tokens = tokenize(text);
    let marker = find_type_marker(&tokens, config);
    let records = match_declarations(text, &tokens, config);

    debug!(
        tokens = tokens.len(),
        declarations = records.len(),
        marker = marker.as_ref().map(|m| m.name.as_str()),
        "extracted declarations"
    );

    Extraction { marker, records }
}
