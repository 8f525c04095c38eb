use std::fmt::Display;

use itertools::Itertools;

/// Connective tag of a compound formula.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Op {
    And,
    Or,
}

impl Op {
    pub fn label(self) -> &'static str {
        match self {
            Op::And => "and",
            Op::Or => "or",
        }
    }

    /// The tag expected one nesting level further down.
    pub fn dual(self) -> Op {
        match self {
            Op::And => Op::Or,
            Op::Or => Op::And,
        }
    }

    pub fn from_label(label: &str) -> Option<Op> {
        match label {
            "and" => Some(Op::And),
            "or" => Some(Op::Or),
            _ => None,
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A formula exactly as it appears in a fixture listing: either a raw
/// constraint string or a connective over an ordered list of sub-formulas.
/// The raw text of an atom is kept verbatim and never normalized, since
/// downstream harnesses compare against the original strings.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Expr {
    Atom(String),
    Connective { op: Op, operands: Vec<Expr> },
}

impl Expr {
    pub fn atom(text: impl Into<String>) -> Self {
        Expr::Atom(text.into())
    }

    pub fn and(operands: Vec<Expr>) -> Self {
        Expr::Connective {
            op: Op::And,
            operands,
        }
    }

    pub fn or(operands: Vec<Expr>) -> Self {
        Expr::Connective {
            op: Op::Or,
            operands,
        }
    }

    /// The top-level connective, or None for a bare atom.
    pub fn op(&self) -> Option<Op> {
        match self {
            Expr::Atom(_) => None,
            Expr::Connective { op, .. } => Some(*op),
        }
    }

    pub fn operands(&self) -> &[Expr] {
        match self {
            Expr::Atom(_) => &[],
            Expr::Connective { operands, .. } => operands,
        }
    }

    /// Iterate over the raw atom strings of this formula, left to right.
    pub fn atoms(&self) -> Atoms {
        Atoms { stack: vec![self] }
    }
}

pub struct Atoms<'a> {
    stack: Vec<&'a Expr>,
}

impl<'a> Iterator for Atoms<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(expr) = self.stack.pop() {
            match expr {
                Expr::Atom(text) => return Some(text),
                Expr::Connective { operands, .. } => self.stack.extend(operands.iter().rev()),
            }
        }
        None
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Atom(text) => write!(f, "\"{}\"", text),
            Expr::Connective { op, operands } => {
                write!(f, "[\"{}\"", op)?;
                if !operands.is_empty() {
                    write!(f, ", {}", operands.iter().join(", "))?;
                }
                write!(f, "]")
            }
        }
    }
}
