//! Traits which, typically, may be imported without concern: `use cmdarg::prelude::*`.
use crate::api::ValueError;

/// Behaviour to convert one command line token into a typed element, and to show it again.
///
/// A single generic [`List`](crate::List) uses this strategy for every element type, so the per-type rules live here only once.
/// Formatting back to text is [`std::fmt::Display`].
// Needs to be imported in order to call the conversions directly.
pub trait Element: Sized + Clone + std::fmt::Display + std::fmt::Debug {
    /// The separators a list of this element uses when none are configured.
    const DEFAULT_DELIMITERS: &'static str;

    /// Convert one delimited piece of a list token.
    fn parse_element(token: &str) -> Result<Self, ValueError>;

    /// Convert the single token following a scalar switch.
    fn parse_scalar(token: &str) -> Result<Self, ValueError> {
        Self::parse_element(token)
    }
}
