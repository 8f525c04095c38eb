pub mod common;
pub mod parser;
pub mod suite;
pub mod validate;
