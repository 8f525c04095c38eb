//! Transcription checks over the embedded fixture listing: group sizes,
//! ordering, the DNF override, serialization round-trips, and term bounds.

use eqfix::common::{Expr, Op};
use eqfix::parser::listing;
use eqfix::suite::Suite;
use eqfix::validate::{self, Limits};

#[test]
fn cnf_group_has_forty_entries_in_binding_order() {
    let suite = Suite::load().unwrap();
    assert_eq!(suite.cnf.len(), 40);
    for (index, expr) in suite.cnf.iter().enumerate() {
        assert_eq!(suite.cnf.name_of(index), Some(format!("c{}", index + 1).as_str()));
        assert_eq!(expr.op(), Some(Op::And));
    }
}

#[test]
fn dnf_group_is_the_override() {
    let suite = Suite::load().unwrap();
    assert_eq!(suite.dnf.len(), 1);
    assert_eq!(
        suite.dnf.get(0),
        Some(&Expr::or(vec![Expr::atom("X1=X2"), Expr::atom("X1=a1")]))
    );
}

#[test]
fn c1_operands_match_the_source() {
    let suite = Suite::load().unwrap();
    let c1 = suite.cnf.by_name("c1").unwrap();
    assert_eq!(
        c1.operands(),
        &[Expr::atom("X10 != a1"), Expr::atom("X6 != a2")]
    );
}

#[test]
fn every_superseded_dnf_binding_survives_in_the_environment() {
    let suite = Suite::load().unwrap();
    for i in 1..=40 {
        let name = format!("d{}", i);
        let expr = suite.binding(&name).unwrap();
        assert_eq!(expr.op(), Some(Op::Or), "{} lost its tag", name);
    }
}

#[test]
fn serialization_round_trips_every_formula() {
    let suite = Suite::load().unwrap();
    for expr in suite.cnf.iter().chain(suite.dnf.iter()) {
        let reparsed = listing::parse_formula(&expr.to_string()).unwrap();
        assert_eq!(&reparsed, expr);
    }
}

#[test]
fn all_terms_are_within_suite_bounds() {
    let suite = Suite::load().unwrap();
    assert_eq!(validate::check_suite(&suite, Limits::default()), vec![]);
}

#[test]
fn tighter_bounds_are_detected() {
    let suite = Suite::load().unwrap();
    let tight = Limits {
        max_var: 10,
        max_const: 5,
    };
    // plenty of fixtures use X11..X20
    assert!(!validate::check_suite(&suite, tight).is_empty());
}
