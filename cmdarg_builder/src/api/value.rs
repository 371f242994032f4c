use crate::api::BoundsError;
use crate::prelude::Element;

/// The elements collected by a list argument, in command line order.
///
/// Storage is capped at the list maximum: further inserts are not stored, but they are counted, so [`Elements::validate`] still reports them.
#[derive(Debug, Clone, PartialEq)]
pub struct Elements<T> {
    items: Vec<T>,
    overflow: usize,
    separator: char,
    min: usize,
    max: usize,
}

impl<T: Element> Elements<T> {
    pub(crate) fn new(separator: char, min: usize, max: usize) -> Self {
        Self {
            items: Vec::default(),
            overflow: 0,
            separator,
            min,
            max,
        }
    }

    /// Append an element, unless the list is already at its maximum.
    /// Returns whether the element was stored.
    pub fn insert(&mut self, item: T) -> bool {
        if self.items.len() < self.max {
            self.items.push(item);
            true
        } else {
            self.overflow += 1;
            false
        }
    }

    /// Check the element count against the list bounds.
    ///
    /// The lower bound applies to the stored elements; the upper bound to every element offered, stored or not.
    pub fn validate(&self) -> Result<(), BoundsError> {
        if self.items.len() < self.min {
            return Err(BoundsError::TooFew {
                provided: self.items.len(),
                min: self.min,
            });
        }

        let offered = self.items.len() + self.overflow;

        if offered > self.max {
            return Err(BoundsError::TooMany {
                provided: offered,
                max: self.max,
            });
        }

        Ok(())
    }

    /// Read the element at `index`, wrapping around past the end.
    ///
    /// ### Example
    /// ```
    /// # use cmdarg_builder as cmdarg;
    /// use cmdarg::{Argument, CommandLineParser, Elements, List};
    ///
    /// let command_line = CommandLineParser::new("program")
    ///     .add(Argument::new(List::<i64>::new(), "sizes", Some('s')))
    ///     .build();
    /// let matches = command_line.parse_tokens(vec!["-s", "1,2,3"].as_slice()).unwrap();
    /// let sizes: Elements<i64> = matches.get("sizes").unwrap();
    ///
    /// assert_eq!(sizes.get(1), Some(&2));
    /// assert_eq!(sizes.get(4), Some(&2));
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if self.items.is_empty() {
            None
        } else {
            self.items.get(index % self.items.len())
        }
    }

    /// The number of stored elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no element is stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate the stored elements in command line order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The stored elements in command line order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Element> std::fmt::Display for Elements<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.separator)?;
            }

            write!(f, "{item}")?;
        }

        Ok(())
    }
}

impl<'e, T: Element> IntoIterator for &'e Elements<T> {
    type Item = &'e T;
    type IntoIter = std::slice::Iter<'e, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The value of one argument after a parse.
/// Before (or without) a value on the command line, this is the argument's initial value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// See [`Kind::Int`](crate::Kind::Int).
    Int(i64),
    /// See [`Kind::Float`](crate::Kind::Float).
    Float(f64),
    /// Whether the switch was found.
    Bool(bool),
    /// See [`Kind::Str`](crate::Kind::Str).
    Str(String),
    /// See [`Kind::Char`](crate::Kind::Char).
    Char(char),
    /// The integers read so far.
    IntList(Elements<i64>),
    /// The floating point numbers read so far.
    FloatList(Elements<f64>),
    /// The strings read so far.
    StrList(Elements<String>),
    /// The characters read so far.
    CharList(Elements<char>),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::IntList(v) => write!(f, "{v}"),
            Value::FloatList(v) => write!(f, "{v}"),
            Value::StrList(v) => write!(f, "{v}"),
            Value::CharList(v) => write!(f, "{v}"),
        }
    }
}

/// Behaviour to read a typed value back out of a [`Value`].
pub trait FromValue: Sized {
    /// The typed value, or `None` when `value` holds a different type.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromValue for char {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Char(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for Elements<i64> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::IntList(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromValue for Elements<f64> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::FloatList(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromValue for Elements<String> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::StrList(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromValue for Elements<char> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::CharList(v) => Some(v.clone()),
            _ => None,
        }
    }
}
