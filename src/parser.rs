pub mod atom;
pub mod listing;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, alphanumeric1, char, digit1},
    combinator::{map_res, recognize},
    multi::many0,
    sequence::{delimited, pair},
    IResult, Parser,
};

fn parse_index(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse).parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

// Atom strings in the listing never contain quotes or escapes.
fn quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_while(|c| c != '"'), char('"')).parse(input)
}
