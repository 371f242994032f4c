mod base;
mod interface;
mod middleware;
mod printer;

pub use base::{ConfigError, Matches, ParseError};
pub(crate) use base::Parser;
pub(crate) use interface::*;
pub use middleware::CommandLine;
pub(crate) use printer::*;
