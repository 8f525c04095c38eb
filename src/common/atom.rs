use std::fmt::Display;

/// One side of a constraint: a variable `Xn` or a constant `an`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Term {
    Var(u32),
    Const(u32),
}

impl Term {
    pub fn index(self) -> u32 {
        match self {
            Term::Var(i) | Term::Const(i) => i,
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Var(i) => write!(f, "X{}", i),
            Term::Const(i) => write!(f, "a{}", i),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Relation {
    Eq,
    Ne,
}

impl Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Eq => write!(f, "="),
            Relation::Ne => write!(f, "!="),
        }
    }
}

/// The decomposed form of a constraint string such as `X10 != a1`.
/// Only validation and reporting decompose atoms; the expression tree keeps
/// the raw text untouched.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Atom {
    pub lhs: Term,
    pub relation: Relation,
    pub rhs: Term,
}

impl Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.relation, self.rhs)
    }
}
