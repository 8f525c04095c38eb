//! Structural integrity checks for a loaded suite: every formula must carry
//! its group's top-level tag, compound sub-formulas must alternate tags, and
//! every atom must decompose into terms within the suite's bounds.

use thiserror::Error;

use crate::common::{Expr, Op, Term};
use crate::parser::atom;
use crate::suite::{FormulaSet, Suite};

/// Bounds the fixture data is expected to stay within.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_var: u32,
    pub max_const: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_var: 20,
            max_const: 5,
        }
    }
}

impl Limits {
    fn admits(&self, term: Term) -> bool {
        let max = match term {
            Term::Var(_) => self.max_var,
            Term::Const(_) => self.max_const,
        };
        (1..=max).contains(&term.index())
    }
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum Violation {
    #[error("{formula}: top-level tag is not '{expected}'")]
    TopLevelTag { formula: String, expected: Op },
    #[error("{formula}: '{found}' nested directly under '{outer}'")]
    NoAlternation {
        formula: String,
        outer: Op,
        found: Op,
    },
    #[error("{formula}: malformed constraint '{text}'")]
    MalformedAtom { formula: String, text: String },
    #[error("{formula}: term '{term}' in '{text}' is out of bounds")]
    OutOfBounds {
        formula: String,
        text: String,
        term: Term,
    },
}

/// Check every formula of a group against its nominal top-level connective.
pub fn check_group(set: &FormulaSet, top: Op, limits: Limits) -> Vec<Violation> {
    let mut violations = vec![];
    for (index, expr) in set.iter().enumerate() {
        let formula = set
            .name_of(index)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}[{}]", top, index));
        if expr.op() != Some(top) {
            violations.push(Violation::TopLevelTag {
                formula: formula.clone(),
                expected: top,
            });
        }
        check_alternation(&formula, expr, &mut violations);
        check_atoms(&formula, expr, limits, &mut violations);
    }
    violations
}

/// Check both groups of a suite, CNF as and-of-ors, DNF as or-of-ands.
pub fn check_suite(suite: &Suite, limits: Limits) -> Vec<Violation> {
    let mut violations = check_group(&suite.cnf, Op::And, limits);
    violations.extend(check_group(&suite.dnf, Op::Or, limits));
    if !violations.is_empty() {
        tracing::warn!("suite has {} integrity violations", violations.len());
    }
    violations
}

fn check_alternation(formula: &str, expr: &Expr, violations: &mut Vec<Violation>) {
    if let Expr::Connective { op, operands } = expr {
        for child in operands {
            if let Some(found) = child.op() {
                if found != op.dual() {
                    violations.push(Violation::NoAlternation {
                        formula: formula.to_string(),
                        outer: *op,
                        found,
                    });
                }
            }
            check_alternation(formula, child, violations);
        }
    }
}

fn check_atoms(formula: &str, expr: &Expr, limits: Limits, violations: &mut Vec<Violation>) {
    for text in expr.atoms() {
        match atom::parse(text) {
            Ok(atom) => {
                for term in [atom.lhs, atom.rhs] {
                    if !limits.admits(term) {
                        violations.push(Violation::OutOfBounds {
                            formula: formula.to_string(),
                            text: text.to_string(),
                            term,
                        });
                    }
                }
            }
            Err(_) => violations.push(Violation::MalformedAtom {
                formula: formula.to_string(),
                text: text.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::Suite;

    fn suite_of(listing: &str) -> Suite {
        Suite::from_listing(listing).unwrap()
    }

    #[test]
    fn embedded_suite_is_clean() {
        let suite = Suite::load().unwrap();
        assert_eq!(check_suite(&suite, Limits::default()), vec![]);
    }

    #[test]
    fn wrong_top_level_tag() {
        let suite = suite_of(
            "c1 = [\"or\", \"X1 = X2\"]\ncnf_formulas = [c1]\ndnf_formulas = []",
        );
        let violations = check_suite(&suite, Limits::default());
        assert_eq!(
            violations,
            vec![Violation::TopLevelTag {
                formula: "c1".to_string(),
                expected: Op::And,
            }]
        );
    }

    #[test]
    fn repeated_tag_breaks_alternation() {
        let suite = suite_of(
            "c1 = [\"and\", [\"and\", \"X1 = X2\"]]\ncnf_formulas = [c1]\ndnf_formulas = []",
        );
        let violations = check_suite(&suite, Limits::default());
        assert_eq!(
            violations,
            vec![Violation::NoAlternation {
                formula: "c1".to_string(),
                outer: Op::And,
                found: Op::And,
            }]
        );
    }

    #[test]
    fn out_of_bounds_terms() {
        let suite = suite_of(
            "c1 = [\"and\", \"X21 = a6\"]\ncnf_formulas = [c1]\ndnf_formulas = []",
        );
        let violations = check_suite(&suite, Limits::default());
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| matches!(
            v,
            Violation::OutOfBounds { formula, .. } if formula == "c1"
        )));
    }

    #[test]
    fn malformed_atom_text() {
        let suite = suite_of(
            "c1 = [\"and\", \"X1 <= X2\"]\ncnf_formulas = [c1]\ndnf_formulas = []",
        );
        let violations = check_suite(&suite, Limits::default());
        assert_eq!(
            violations,
            vec![Violation::MalformedAtom {
                formula: "c1".to_string(),
                text: "X1 <= X2".to_string(),
            }]
        );
    }

    #[test]
    fn unnamed_formulas_are_reported_by_position() {
        let suite = suite_of(
            "cnf_formulas = [[\"or\", \"X1 = X2\"]]\ndnf_formulas = []",
        );
        let violations = check_suite(&suite, Limits::default());
        assert_eq!(
            violations,
            vec![Violation::TopLevelTag {
                formula: "and[0]".to_string(),
                expected: Op::And,
            }]
        );
    }
}
