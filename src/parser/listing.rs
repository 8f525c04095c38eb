//! Parser and evaluator for the fixture listing format: one `name = value`
//! binding per line, where a value is a quoted constraint string, a reference
//! to an earlier binding, or a bracketed list. A list headed by the string
//! `"and"` or `"or"` is a connective; any other list is a formula group.
//! Rebinding a name is legal and the last binding wins.

use fxhash::FxHashMap;
use nom::{
    branch::alt,
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt},
    multi::separated_list0,
    sequence::{delimited, pair, preceded, tuple},
    IResult, Parser,
};
use thiserror::Error;

use super::{identifier, quoted};
use crate::common::{Expr, Op};

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ListingError {
    #[error("line {line}: malformed binding '{text}'")]
    Malformed { line: usize, text: String },
    #[error("'{name}' refers to undefined binding '{reference}'")]
    Undefined { name: String, reference: String },
    #[error("'{name}' nests a list with no connective tag")]
    UntaggedList { name: String },
    #[error("'{name}' uses the group binding '{reference}' as a formula")]
    GroupAsFormula { name: String, reference: String },
}

/// Right hand side of a binding before references are resolved.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Value {
    Text(String),
    Ref(String),
    List(Vec<Value>),
}

/// One `name = value` line of a listing.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Binding {
    pub name: String,
    pub value: Value,
}

fn parse_value(input: &str) -> IResult<&str, Value> {
    alt((
        map(quoted, |s| Value::Text(s.to_string())),
        map(identifier, |s| Value::Ref(s.to_string())),
        parse_list,
    ))
    .parse(input)
}

fn parse_list(input: &str) -> IResult<&str, Value> {
    let (input, _) = pair(char('['), multispace0).parse(input)?;
    let (input, items) = separated_list0(
        tuple((multispace0, char(','), multispace0)),
        parse_value,
    )
    .parse(input)?;
    // allow a trailing comma, as in "[m1, ]"
    let (input, _) = tuple((opt(preceded(multispace0, char(','))), multispace0, char(']')))
        .parse(input)?;
    Ok((input, Value::List(items)))
}

fn parse_binding(input: &str) -> IResult<&str, Binding> {
    map(
        tuple((
            multispace0,
            identifier,
            multispace0,
            char('='),
            multispace0,
            parse_value,
            multispace0,
        )),
        |(_, name, _, _, _, value, _)| Binding {
            name: name.to_string(),
            value,
        },
    )
    .parse(input)
}

/// Parse a whole listing into its ordered bindings. Blank lines and lines
/// starting with '#' are skipped.
pub fn parse(input: &str) -> Result<Vec<Binding>, ListingError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim_start();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(n, line)| {
            all_consuming(parse_binding)
                .parse(line)
                .map(|(_, binding)| binding)
                .map_err(|_| ListingError::Malformed {
                    line: n + 1,
                    text: line.to_string(),
                })
        })
        .collect()
}

/// A resolved binding: a single formula or an ordered group of them.
#[derive(Debug, Clone)]
pub enum Entry {
    Formula(Expr),
    Group(Vec<GroupItem>),
}

/// A group member, remembering the binding it referred to (if any) so a
/// harness can address formulas by name as well as by position.
#[derive(Debug, Clone)]
pub struct GroupItem {
    pub name: Option<String>,
    pub expr: Expr,
}

/// The bindings of a listing after reference resolution, one entry per name.
#[derive(Debug, Default)]
pub struct Environment {
    entries: FxHashMap<String, Entry>,
}

impl Environment {
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn formula(&self, name: &str) -> Option<&Expr> {
        match self.entries.get(name)? {
            Entry::Formula(expr) => Some(expr),
            Entry::Group(_) => None,
        }
    }

    pub fn group(&self, name: &str) -> Option<&[GroupItem]> {
        match self.entries.get(name)? {
            Entry::Group(items) => Some(items),
            Entry::Formula(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, value: &Value, name: &str) -> Result<Entry, ListingError> {
        match value {
            Value::Text(text) => Ok(Entry::Formula(Expr::atom(text.clone()))),
            Value::Ref(reference) => {
                self.entries
                    .get(reference)
                    .cloned()
                    .ok_or_else(|| ListingError::Undefined {
                        name: name.to_string(),
                        reference: reference.clone(),
                    })
            }
            Value::List(items) => match connective_tag(items) {
                Some(op) => {
                    let operands = items[1..]
                        .iter()
                        .map(|item| self.formula_value(item, name))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Entry::Formula(Expr::Connective { op, operands }))
                }
                None => {
                    let items = items
                        .iter()
                        .map(|item| self.group_item(item, name))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Entry::Group(items))
                }
            },
        }
    }

    fn formula_value(&self, value: &Value, name: &str) -> Result<Expr, ListingError> {
        match self.entry(value, name)? {
            Entry::Formula(expr) => Ok(expr),
            Entry::Group(_) => Err(match value {
                Value::Ref(reference) => ListingError::GroupAsFormula {
                    name: name.to_string(),
                    reference: reference.clone(),
                },
                _ => ListingError::UntaggedList {
                    name: name.to_string(),
                },
            }),
        }
    }

    fn group_item(&self, value: &Value, name: &str) -> Result<GroupItem, ListingError> {
        let item_name = match value {
            Value::Ref(reference) => Some(reference.clone()),
            _ => None,
        };
        Ok(GroupItem {
            name: item_name,
            expr: self.formula_value(value, name)?,
        })
    }
}

fn connective_tag(items: &[Value]) -> Option<Op> {
    match items.first() {
        Some(Value::Text(text)) => Op::from_label(text),
        _ => None,
    }
}

/// Resolve bindings in order. References see every binding made before them;
/// rebinding a name replaces the earlier entry.
pub fn eval(bindings: Vec<Binding>) -> Result<Environment, ListingError> {
    let mut env = Environment::default();
    for binding in bindings {
        let entry = env.entry(&binding.value, &binding.name)?;
        if env.entries.insert(binding.name.clone(), entry).is_some() {
            tracing::debug!("'{}' rebound, previous entry discarded", binding.name);
        }
    }
    Ok(env)
}

/// Parse a single self-contained formula value, e.g. the output of
/// `Expr::fmt`. References are not available here.
pub fn parse_formula(input: &str) -> Result<Expr, ListingError> {
    let (_, value) = all_consuming(delimited(multispace0, parse_value, multispace0))
        .parse(input)
        .map_err(|_| ListingError::Malformed {
            line: 1,
            text: input.to_string(),
        })?;
    Environment::default().formula_value(&value, "<inline>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_with_nested_lists() {
        let bindings =
            parse(r#"c3 = ["and", ["or", "X17 = X4", "X12 != X11"], ["or", "X19 = X3"]]"#)
                .unwrap();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].name, "c3");
        let env = eval(bindings).unwrap();
        let expr = env.formula("c3").unwrap();
        assert_eq!(expr.op(), Some(Op::And));
        assert_eq!(expr.operands().len(), 2);
        assert_eq!(expr.operands()[0].op(), Some(Op::Or));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let input = "#CNF Formulas:\n\nc1 = [\"and\", \"X10 != a1\", \"X6 != a2\"]\n";
        let bindings = parse(input).unwrap();
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn trailing_comma_in_list() {
        let bindings = parse("m1 = [\"or\", \"X1=X2\", \"X1=a1\"]\nd = [m1, ]").unwrap();
        let env = eval(bindings).unwrap();
        let group = env.group("d").unwrap();
        assert_eq!(group.len(), 1);
        assert_eq!(group[0].name.as_deref(), Some("m1"));
    }

    #[test]
    fn last_binding_wins() {
        let input = "x = \"X1 = X2\"\nx = \"X3 = X4\"";
        let env = eval(parse(input).unwrap()).unwrap();
        assert_eq!(env.formula("x"), Some(&Expr::atom("X3 = X4")));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn undefined_reference_is_an_error() {
        let err = eval(parse("fs = [c1, c2]").unwrap()).unwrap_err();
        assert_eq!(
            err,
            ListingError::Undefined {
                name: "fs".to_string(),
                reference: "c1".to_string(),
            }
        );
    }

    #[test]
    fn group_cannot_stand_in_for_a_formula() {
        let input = "g = [\"X1 = X2\"]\nc = [\"and\", g, \"X3 = X4\"]";
        let err = eval(parse(input).unwrap()).unwrap_err();
        assert_eq!(
            err,
            ListingError::GroupAsFormula {
                name: "c".to_string(),
                reference: "g".to_string(),
            }
        );
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let err = parse("c1 = [\"and\", \"X1 = X2\"]\nc2 = [oops").unwrap_err();
        assert!(matches!(err, ListingError::Malformed { line: 2, .. }));
    }

    #[test]
    fn inline_formula_round_trip() {
        let expr = Expr::and(vec![
            Expr::atom("X10 != a1"),
            Expr::or(vec![Expr::atom("X1=X2"), Expr::atom("X1=a1")]),
        ]);
        assert_eq!(parse_formula(&expr.to_string()).unwrap(), expr);
    }
}
