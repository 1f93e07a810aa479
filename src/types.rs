use nom::IResult;
use nom_language::error::VerboseError;

/// Implement this trait for each lexical unit the scanner recognizes in header text.
/// Examples for units are identifiers, literals, punctuation
pub trait Parsable<'a>: Sized {
    fn parse(input: &'a str) -> IResult<&'a str, Self, VerboseError<&'a str>>;
}
