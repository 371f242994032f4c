use crate::api::field::ConsumeError;
use crate::api::{List, Scalar, Switch, Value};
use crate::model::{Syntax, SyntaxConflict};

/// The closed set of argument kinds.
///
/// Built from a field via `From`, typically by [`Argument::new`].
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// An integer scalar.
    Int(Scalar<i64>),
    /// A floating point scalar.
    Float(Scalar<f64>),
    /// A boolean switch.
    Bool(Switch),
    /// A string scalar.
    Str(Scalar<String>),
    /// A single character scalar.
    Char(Scalar<char>),
    /// A list of integers.
    IntList(List<i64>),
    /// A list of floating point numbers.
    FloatList(List<f64>),
    /// A list of strings.
    StrList(List<String>),
    /// A list of single characters.
    CharList(List<char>),
}

impl From<Scalar<i64>> for Kind {
    fn from(field: Scalar<i64>) -> Self {
        Kind::Int(field)
    }
}

impl From<Scalar<f64>> for Kind {
    fn from(field: Scalar<f64>) -> Self {
        Kind::Float(field)
    }
}

impl From<Switch> for Kind {
    fn from(field: Switch) -> Self {
        Kind::Bool(field)
    }
}

impl From<Scalar<String>> for Kind {
    fn from(field: Scalar<String>) -> Self {
        Kind::Str(field)
    }
}

impl From<Scalar<char>> for Kind {
    fn from(field: Scalar<char>) -> Self {
        Kind::Char(field)
    }
}

impl From<List<i64>> for Kind {
    fn from(field: List<i64>) -> Self {
        Kind::IntList(field)
    }
}

impl From<List<f64>> for Kind {
    fn from(field: List<f64>) -> Self {
        Kind::FloatList(field)
    }
}

impl From<List<String>> for Kind {
    fn from(field: List<String>) -> Self {
        Kind::StrList(field)
    }
}

impl From<List<char>> for Kind {
    fn from(field: List<char>) -> Self {
        Kind::CharList(field)
    }
}

impl Kind {
    /// Whether a value token follows the switch.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Kind::Bool(_))
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Kind::Int(_) => "int",
            Kind::Float(_) => "float",
            Kind::Bool(_) => "bool",
            Kind::Str(_) => "string",
            Kind::Char(_) => "char",
            Kind::IntList(_) => "int list",
            Kind::FloatList(_) => "float list",
            Kind::StrList(_) => "string list",
            Kind::CharList(_) => "char list",
        }
    }

    /// The value before anything is read from the command line.
    pub(crate) fn initial(&self) -> Value {
        match self {
            Kind::Int(field) => Value::Int(field.initial()),
            Kind::Float(field) => Value::Float(field.initial()),
            Kind::Bool(_) => Value::Bool(false),
            Kind::Str(field) => Value::Str(field.initial()),
            Kind::Char(field) => Value::Char(field.initial()),
            Kind::IntList(field) => Value::IntList(field.elements()),
            Kind::FloatList(field) => Value::FloatList(field.elements()),
            Kind::StrList(field) => Value::StrList(field.elements()),
            Kind::CharList(field) => Value::CharList(field.elements()),
        }
    }

    /// Read this kind's value from the tokens following the switch at `cursor`, into `value`.
    ///
    /// On success the cursor is left on the last token consumed.
    /// A switch consumes nothing; scalars and lists consume precisely one token.
    pub(crate) fn consume_value(
        &self,
        cursor: &mut usize,
        tokens: &[&str],
        value: &mut Value,
    ) -> Result<(), ConsumeError> {
        match (self, value) {
            (Kind::Int(field), Value::Int(v)) => *v = field.consume(cursor, tokens)?,
            (Kind::Float(field), Value::Float(v)) => *v = field.consume(cursor, tokens)?,
            (Kind::Bool(_), Value::Bool(v)) => *v = true,
            (Kind::Str(field), Value::Str(v)) => *v = field.consume(cursor, tokens)?,
            (Kind::Char(field), Value::Char(v)) => *v = field.consume(cursor, tokens)?,
            (Kind::IntList(field), Value::IntList(v)) => field.consume(cursor, tokens, v)?,
            (Kind::FloatList(field), Value::FloatList(v)) => field.consume(cursor, tokens, v)?,
            (Kind::StrList(field), Value::StrList(v)) => field.consume(cursor, tokens, v)?,
            (Kind::CharList(field), Value::CharList(v)) => field.consume(cursor, tokens, v)?,
            _ => unreachable!("internal error - value must have been made from its kind"),
        };

        Ok(())
    }

    fn placeholder(&self, base: &str) -> String {
        match self {
            Kind::IntList(field) => field.placeholder(base),
            Kind::FloatList(field) => field.placeholder(base),
            Kind::StrList(field) => field.placeholder(base),
            Kind::CharList(field) => field.placeholder(base),
            _ => base.to_string(),
        }
    }

    fn description(&self, base: &str) -> String {
        match self {
            Kind::IntList(field) => field.description(base),
            Kind::FloatList(field) => field.description(base),
            Kind::StrList(field) => field.description(base),
            Kind::CharList(field) => field.description(base),
            _ => base.to_string(),
        }
    }
}

/// One declared switch of the command line.
///
/// A switch is selected with `-KEYWORD` or, when it has one, `-SHORT`.
///
/// ### Example
/// ```
/// # use cmdarg_builder as cmdarg;
/// use cmdarg::{Argument, Scalar, Syntax};
///
/// let argument = Argument::new(Scalar::<i64>::default(), "institution", Some('i'))
///     .placeholder("institution_id")
///     .description("Institution id.")
///     .syntax(Syntax::OPTIONAL);
///
/// assert_eq!(argument.keyword(), "institution");
/// assert!(argument.is_optional());
/// ```
#[derive(Clone, PartialEq)]
pub struct Argument {
    keyword: String,
    short: Option<char>,
    placeholder: Option<String>,
    description: String,
    syntax: Syntax,
    conflicts: Vec<SyntaxConflict>,
    kind: Kind,
}

impl Argument {
    /// Create an argument from a field ([`Scalar`], [`Switch`] or [`List`]).
    ///
    /// `short` is the optional single character form of the switch.
    /// The argument starts out required and, unless it is a [`Switch`], with a required value.
    pub fn new(field: impl Into<Kind>, keyword: impl Into<String>, short: Option<char>) -> Self {
        let kind = field.into();
        let mut syntax = Syntax::default();

        if !kind.takes_value() {
            syntax = syntax.with_optional_value();
        }

        Self {
            keyword: keyword.into(),
            short,
            placeholder: None,
            description: String::default(),
            syntax,
            conflicts: Vec::default(),
            kind,
        }
    }

    /// Document the text shown in place of the value in usage.
    /// Defaults to the keyword (nothing, for a [`Switch`]).
    ///
    /// List arguments show the placeholder as a delimited series, ex: `year1,...,yearn`.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder.replace(placeholder.into());
        self
    }

    /// Document the description shown in usage.
    /// If repeated, only the final description will apply.
    ///
    /// List arguments append their bounds, ex: `The years. (1 <= n <= 100)`.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the syntax flags.
    ///
    /// Conflicting pairs are repaired towards the `REQUIRED` member, and reported as warnings when the command line is built.
    /// A [`Switch`] never takes a value, so its value flags are always `VALUE_OPTIONAL`.
    pub fn syntax(mut self, syntax: Syntax) -> Self {
        let mut syntax = syntax;
        self.conflicts = syntax.validate_flags();

        if !self.kind.takes_value() {
            // The value flags are replaced outright, so there is nothing to report.
            self.conflicts.retain(|conflict| *conflict != SyntaxConflict::Value);
            syntax = syntax.with_optional_value();
        }

        self.syntax = syntax;
        self
    }

    /// The long form name.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The single character form, if any.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// The placeholder as shown in usage.
    pub fn placeholder_text(&self) -> String {
        match &self.placeholder {
            Some(placeholder) => self.kind.placeholder(placeholder),
            None if self.kind.takes_value() => self.kind.placeholder(&self.keyword),
            None => String::default(),
        }
    }

    /// The description as shown in usage.
    pub fn description_text(&self) -> String {
        self.kind.description(&self.description)
    }

    /// The syntax flags, after any repair.
    pub fn syntax_flags(&self) -> Syntax {
        self.syntax
    }

    /// The kind of value this argument takes.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Whether the argument is left out of usage.
    pub fn is_hidden(&self) -> bool {
        self.syntax.is_hidden()
    }

    /// Whether the argument may be omitted.
    pub fn is_optional(&self) -> bool {
        self.syntax.is_optional()
    }

    /// Whether the argument may appear without a value.
    pub fn is_value_optional(&self) -> bool {
        self.syntax.is_value_optional()
    }

    pub(crate) fn conflicts(&self) -> &[SyntaxConflict] {
        &self.conflicts
    }

    /// Whether `token` selects this argument.
    pub(crate) fn selected_by(&self, token: &str) -> bool {
        match token.strip_prefix('-') {
            Some(name) if name == self.keyword => true,
            Some(name) => match self.short {
                Some(short) => {
                    let mut chars = name.chars();
                    chars.next() == Some(short) && chars.next().is_none()
                }
                None => false,
            },
            None => false,
        }
    }
}

impl std::fmt::Debug for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let short = match &self.short {
            Some(s) => format!(" -{s},"),
            None => "".to_string(),
        };
        let description = if self.description.is_empty() {
            "".to_string()
        } else {
            format!(", {d}", d = self.description)
        };

        write!(
            f,
            "Arg[{t}, {syntax},{short} -{keyword}{description}]",
            t = self.kind.type_name(),
            syntax = self.syntax,
            keyword = self.keyword,
        )
    }
}
