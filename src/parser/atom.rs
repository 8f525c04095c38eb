use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0},
    combinator::{all_consuming, map},
    sequence::{preceded, tuple},
    IResult, Parser,
};
use thiserror::Error;

use super::parse_index;
use crate::common::{Atom, Relation, Term};

#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("malformed constraint '{text}'")]
pub struct MalformedAtom {
    pub text: String,
}

fn parse_term(input: &str) -> IResult<&str, Term> {
    alt((
        map(preceded(char('X'), parse_index), Term::Var),
        map(preceded(char('a'), parse_index), Term::Const),
    ))
    .parse(input)
}

fn parse_relation(input: &str) -> IResult<&str, Relation> {
    // "!=" first, otherwise "=" would match the tail of it
    alt((
        map(tag("!="), |_| Relation::Ne),
        map(tag("="), |_| Relation::Eq),
    ))
    .parse(input)
}

/// Decompose one constraint string. Whitespace around the operator is
/// optional and a constant may sit on either side, both of which occur in
/// the fixture data ("X1=X2", "a5 = X5").
pub fn parse(input: &str) -> Result<Atom, MalformedAtom> {
    all_consuming(tuple((
        multispace0,
        parse_term,
        multispace0,
        parse_relation,
        multispace0,
        parse_term,
        multispace0,
    )))
    .parse(input)
    .map(|(_, (_, lhs, _, relation, _, rhs, _))| Atom { lhs, relation, rhs })
    .map_err(|_| MalformedAtom {
        text: input.to_string(),
    })
}
