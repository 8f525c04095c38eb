//! The fixture suite shipped with the crate: forty CNF-shaped formulas and
//! the DNF group left after the listing's final override rebinds
//! `dnf_formulas` to the single formula `m1`.

use bimap::BiMap;
use thiserror::Error;

use crate::common::Expr;
use crate::parser::listing::{self, Entry, Environment, GroupItem, ListingError};

/// Listing reproduced verbatim from the upstream runtime test inputs.
const EMBEDDED: &str = include_str!("../fixtures/formulas.lst");

pub const CNF_GROUP: &str = "cnf_formulas";
pub const DNF_GROUP: &str = "dnf_formulas";

#[derive(Debug, Error)]
pub enum SuiteError {
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error("listing has no '{0}' binding")]
    MissingGroup(&'static str),
    #[error("'{0}' is a single formula, not a group")]
    NotAGroup(&'static str),
}

/// An ordered group of formulas, addressable by position or by the name of
/// the binding each entry referred to.
#[derive(Debug)]
pub struct FormulaSet {
    formulas: Vec<Expr>,
    names: BiMap<String, usize>,
}

impl FormulaSet {
    fn from_items(items: &[GroupItem]) -> Self {
        let mut formulas = Vec::with_capacity(items.len());
        let mut names = BiMap::new();
        for item in items {
            if let Some(name) = &item.name {
                names.insert(name.clone(), formulas.len());
            }
            formulas.push(item.expr.clone());
        }
        FormulaSet { formulas, names }
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Expr> {
        self.formulas.get(index)
    }

    pub fn by_name(&self, name: &str) -> Option<&Expr> {
        self.formulas.get(*self.names.get_by_left(name)?)
    }

    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get_by_right(&index).map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.get_by_left(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expr> + '_ {
        self.formulas.iter()
    }

    /// Iterate over (name, formula) pairs in group order.
    pub fn entries(&self) -> impl Iterator<Item = (Option<&str>, &Expr)> + '_ {
        self.formulas
            .iter()
            .enumerate()
            .map(|(index, expr)| (self.name_of(index), expr))
    }
}

/// Both fixture groups plus the resolved environment they came from. The
/// environment keeps every named binding reachable, including the forty DNF
/// formulas superseded by the final override.
#[derive(Debug)]
pub struct Suite {
    pub cnf: FormulaSet,
    pub dnf: FormulaSet,
    env: Environment,
}

impl Suite {
    /// Load the embedded fixture listing.
    pub fn load() -> Result<Suite, SuiteError> {
        Suite::from_listing(EMBEDDED)
    }

    /// Load a caller-provided listing with the same group names.
    pub fn from_listing(text: &str) -> Result<Suite, SuiteError> {
        let env = listing::eval(listing::parse(text)?)?;
        let cnf = take_group(&env, CNF_GROUP)?;
        let dnf = take_group(&env, DNF_GROUP)?;
        tracing::info!(
            "loaded {} cnf and {} dnf formulas from {} bindings",
            cnf.len(),
            dnf.len(),
            env.len(),
        );
        Ok(Suite { cnf, dnf, env })
    }

    /// Look up any single-formula binding by name, overridden or not.
    pub fn binding(&self, name: &str) -> Option<&Expr> {
        self.env.formula(name)
    }
}

fn take_group(env: &Environment, name: &'static str) -> Result<FormulaSet, SuiteError> {
    match env.get(name) {
        Some(Entry::Group(items)) => Ok(FormulaSet::from_items(items)),
        Some(Entry::Formula(_)) => Err(SuiteError::NotAGroup(name)),
        None => Err(SuiteError::MissingGroup(name)),
    }
}
