use std::marker::PhantomData;

use crate::api::{BoundsError, Elements, ValueError};
use crate::constant::*;
use crate::parser::ConfigError;
use crate::prelude::Element;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Why a field could not take its value from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConsumeError {
    Value(ValueError),
    Bounds(BoundsError),
}

impl From<ValueError> for ConsumeError {
    fn from(error: ValueError) -> Self {
        ConsumeError::Value(error)
    }
}

impl From<BoundsError> for ConsumeError {
    fn from(error: BoundsError) -> Self {
        ConsumeError::Bounds(error)
    }
}

/// Take the token following the switch at `cursor`.
/// The cursor only moves when there is such a token.
fn next_token<'t>(cursor: &mut usize, tokens: &[&'t str]) -> Result<&'t str, ValueError> {
    let index = *cursor + 1;

    match tokens.get(index) {
        Some(token) => {
            *cursor = index;
            Ok(token)
        }
        None => Err(ValueError::Absent),
    }
}

/// A field that takes a single value (precisely 1 token).
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar<T> {
    initial: T,
}

impl<T: Element> Scalar<T> {
    /// Create a scalar field.
    /// The `initial` value stands until the switch is given on the command line.
    ///
    /// ### Example
    /// ```
    /// # use cmdarg_builder as cmdarg;
    /// use cmdarg::{Argument, CommandLineParser, Scalar, Syntax};
    ///
    /// let command_line = CommandLineParser::new("program")
    ///     .add(Argument::new(Scalar::new(7i64), "count", Some('c')).syntax(Syntax::OPTIONAL))
    ///     .build();
    ///
    /// let matches = command_line.parse_tokens(vec![].as_slice()).unwrap();
    /// assert_eq!(matches.get::<i64>("count"), Some(7));
    /// ```
    pub fn new(initial: T) -> Self {
        Self { initial }
    }

    pub(crate) fn initial(&self) -> T {
        self.initial.clone()
    }

    pub(crate) fn consume(&self, cursor: &mut usize, tokens: &[&str]) -> Result<T, ValueError> {
        let token = next_token(cursor, tokens)?;
        T::parse_scalar(token)
    }
}

impl<T: Element + Default> Default for Scalar<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// A boolean field that takes no value (precisely 0 tokens).
/// Its presence on the command line is its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Switch;

/// A field that takes one token holding several delimited values.
///
/// ### Example
/// ```
/// # use cmdarg_builder as cmdarg;
/// use cmdarg::{Argument, CommandLineParser, Elements, List};
///
/// let command_line = CommandLineParser::new("program")
///     .add(Argument::new(
///         List::<f64>::new().bounds(2, 3).unwrap().delimiters(";").unwrap(),
///         "point",
///         Some('p'),
///     ))
///     .build();
///
/// let matches = command_line.parse_tokens(vec!["-p", "1.5;2"].as_slice()).unwrap();
/// let point: Elements<f64> = matches.get("point").unwrap();
/// assert_eq!(point.as_slice(), &[1.5, 2.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List<T> {
    delimiters: String,
    min: usize,
    max: usize,
    _phantom: PhantomData<T>,
}

impl<T: Element> List<T> {
    /// Create a list field with the element type's default delimiters, taking between 1 and 100 elements.
    pub fn new() -> Self {
        Self {
            delimiters: T::DEFAULT_DELIMITERS.to_string(),
            min: DEFAULT_MIN_COUNT,
            max: DEFAULT_MAX_COUNT,
            _phantom: PhantomData,
        }
    }

    /// Set the characters that separate values within the token.
    /// The first one is also used when showing the list.
    ///
    /// The set may not be empty and may not contain a space.
    pub fn delimiters(mut self, delimiters: impl Into<String>) -> Result<Self, ConfigError> {
        let delimiters = delimiters.into();

        if delimiters.is_empty() {
            return Err(ConfigError::EmptyDelimiters);
        }

        if delimiters.contains(' ') {
            return Err(ConfigError::SpaceDelimiter { delimiters });
        }

        self.delimiters = delimiters;
        Ok(self)
    }

    /// Set the inclusive bounds on the number of values.
    pub fn bounds(mut self, min: usize, max: usize) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidBounds { min, max });
        }

        self.min = min;
        self.max = max;
        Ok(self)
    }

    fn separator(&self) -> char {
        match self.delimiters.chars().next() {
            Some(c) => c,
            None => unreachable!("internal error - delimiters must be non-empty"),
        }
    }

    pub(crate) fn elements(&self) -> Elements<T> {
        Elements::new(self.separator(), self.min, self.max)
    }

    /// Split the token following the switch into values, insert them, then check the bounds.
    pub(crate) fn consume(
        &self,
        cursor: &mut usize,
        tokens: &[&str],
        elements: &mut Elements<T>,
    ) -> Result<(), ConsumeError> {
        let token = next_token(cursor, tokens)?;

        for part in token
            .split(|c: char| self.delimiters.contains(c))
            .filter(|part| !part.is_empty())
        {
            let item = T::parse_element(part)?;

            if !elements.insert(item) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Value '{part}' exceeds the maximum {max}; not stored.", max = self.max);
                }
            }
        }

        elements.validate()?;
        Ok(())
    }

    /// The placeholder shown in usage, ex: `year1,...,yearn`.
    pub(crate) fn placeholder(&self, base: &str) -> String {
        let separator = self.separator();
        format!("{base}1{separator}...{separator}{base}n")
    }

    /// The description shown in usage, ex: `The years (1 <= n <= 100)`.
    pub(crate) fn description(&self, base: &str) -> String {
        let bounds = format!("({} <= n <= {})", self.min, self.max);

        if base.is_empty() {
            bounds
        } else {
            format!("{base} {bounds}")
        }
    }
}

impl<T: Element> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}
