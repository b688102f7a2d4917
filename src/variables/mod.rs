//! Variables module
//!
//! Placeholder scanning, alias chains, variable sources and the substitution
//! engine that turns a template into a concrete string.

pub mod aliases;
pub mod environment;
pub mod placeholder;
pub mod substitution;

pub use aliases::{default_aliases, AliasTable};
pub use environment::{ProcessEnv, VariableSource};
pub use placeholder::{placeholders, tokenize, Placeholder, Token};
pub use substitution::{resolve, Resolver};
