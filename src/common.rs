mod atom;
mod formula;

pub use atom::*;
pub use formula::*;
