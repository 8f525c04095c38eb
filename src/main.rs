use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use eqfix::suite::Suite;
use eqfix::validate::{self, Limits};

#[derive(Parser, Debug)]
pub struct Flags {
    #[arg(short, long)]
    /// Print every formula of both groups in listing syntax instead of just
    /// the verdict line.
    dump: bool,
    #[arg(short, long)]
    /// Print group sizes and atom counts.
    stats: bool,
    #[arg(long, default_value_t = 20)]
    /// Highest variable index the fixtures may use.
    max_var: u32,
    #[arg(long, default_value_t = 5)]
    /// Highest constant index the fixtures may use.
    max_const: u32,
    /// Listing file to check instead of the embedded fixture suite.
    listing: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();
    let flags = Flags::parse();

    let suite = match &flags.listing {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
            Suite::from_listing(&text)?
        }
        None => Suite::load()?,
    };

    if flags.dump {
        for (group, set) in [("cnf", &suite.cnf), ("dnf", &suite.dnf)] {
            for (index, (name, expr)) in set.entries().enumerate() {
                match name {
                    Some(name) => println!("{} = {}", name, expr),
                    None => println!("{}[{}] = {}", group, index, expr),
                }
            }
        }
    }

    if flags.stats {
        for (group, set) in [("cnf", &suite.cnf), ("dnf", &suite.dnf)] {
            let atoms: usize = set.iter().map(|expr| expr.atoms().count()).sum();
            println!("{}: {} formulas, {} atoms", group, set.len(), atoms);
        }
    }

    let limits = Limits {
        max_var: flags.max_var,
        max_const: flags.max_const,
    };
    let violations = validate::check_suite(&suite, limits);
    if !violations.is_empty() {
        for violation in &violations {
            tracing::warn!("{}", violation);
        }
        bail!("suite has {} integrity violations", violations.len());
    }

    println!("s VERIFIED {} cnf, {} dnf", suite.cnf.len(), suite.dnf.len());
    Ok(())
}
