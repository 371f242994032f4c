//! Builder module for `cmdarg`.
//! See [documentation root](https://docs.rs/cmdarg/latest/cmdarg/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{CommandLine, ConfigError, Matches, ParseError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
