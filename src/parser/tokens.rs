use nom::{
    IResult, Parser,
    bytes::complete::is_not,
    character::complete::{char, multispace0},
    error::{context, VerboseError},
    multi::{many0, many0_count},
    sequence::{preceded, terminated, tuple},
};

/// The result of a parser on strs with a VerboseError error type.
pub type ParseRes<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Characters separating words. Carriage returns are included so CRLF input splits cleanly.
const WORD_SEPARATORS: &str = " \t\r\n";

/// Number of leading tabs. Spaces do not count towards indentation.
pub fn indent<'a>(input: &'a str)
-> ParseRes<'a, usize> {
    context("indent", many0_count(char('\t')))
        .parse(input)
}

/// A maximal run of non-whitespace characters.
pub fn word<'a>(input: &'a str)
-> ParseRes<'a, &'a str> {
    context("word", is_not(WORD_SEPARATORS))
        .parse(input)
}

/// Split a raw line into its indent level and words.
pub fn line<'a>(input: &'a str)
-> ParseRes<'a, (usize, Vec<&'a str>)> {
    context("source line",
        tuple((indent,
               preceded(multispace0,
                        many0(terminated(word, multispace0))))))
        .parse(input)
}
