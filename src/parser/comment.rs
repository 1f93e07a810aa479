use nom::branch::alt;
use nom::bytes::complete::{tag, take_until};
use nom::character::complete::{char, line_ending, not_line_ending};
use nom::combinator::{opt, recognize, rest};
use nom::sequence::{preceded, terminated};
use nom::{IResult, Parser};
use nom_language::error::VerboseError;

/// Parses comments that start with // or ///, up to the line ending
pub fn parse_one_line_comment(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    recognize(preceded(tag("//"), not_line_ending)).parse(input)
}

/// An unterminated block comment swallows the rest of the input.
pub fn parse_multiline_comment(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    recognize(preceded(
        tag("/*"),
        alt((terminated(take_until("*/"), tag("*/")), rest)),
    ))
    .parse(input)
}

pub fn parse_comment(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    alt((parse_one_line_comment, parse_multiline_comment)).parse(input)
}

/// Parses a preprocessor line such as `#include "a.h"`, following `\` continuations.
pub fn parse_directive(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    let (mut remaining, _) = char::<_, VerboseError<&str>>('#').parse(input)?;

    loop {
        let (after_line, line) = not_line_ending::<_, VerboseError<&str>>(remaining)?;
        if !line.trim_end().ends_with('\\') {
            remaining = after_line;
            break;
        }

        let (after_ending, ending) = opt(line_ending::<_, VerboseError<&str>>).parse(after_line)?;
        remaining = after_ending;
        if ending.is_none() {
            break;
        }
    }

    let consumed = input.len() - remaining.len();
    Ok((remaining, &input[..consumed]))
}
