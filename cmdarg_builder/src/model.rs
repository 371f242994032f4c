use std::ops::{BitOr, BitOrAssign};

/// The declarative syntax rules of an argument.
///
/// Flags come in two mutually exclusive pairs plus visibility:
/// * presence: [`Syntax::OPTIONAL`] or [`Syntax::REQUIRED`],
/// * value: [`Syntax::VALUE_OPTIONAL`] or [`Syntax::VALUE_REQUIRED`],
/// * [`Syntax::HIDDEN`] keeps the argument out of the usage block.
///
/// When neither member of a pair is given, the `REQUIRED` member applies.
///
/// ### Example
/// ```
/// # use cmdarg_builder as cmdarg;
/// use cmdarg::Syntax;
///
/// let syntax = Syntax::OPTIONAL | Syntax::HIDDEN;
/// assert!(syntax.is_optional());
/// assert!(syntax.is_hidden());
/// assert!(!syntax.is_value_optional());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Syntax(u8);

/// A mutually exclusive pair that was found with both members set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxConflict {
    /// Both `OPTIONAL` and `REQUIRED`; repaired to `REQUIRED`.
    Presence,
    /// Both `VALUE_OPTIONAL` and `VALUE_REQUIRED`; repaired to `VALUE_REQUIRED`.
    Value,
}

impl Syntax {
    /// The argument may be omitted from the command line.
    pub const OPTIONAL: Syntax = Syntax(0x01);
    /// The argument must be supplied on the command line.
    pub const REQUIRED: Syntax = Syntax(0x02);
    /// The argument may appear without a value.
    pub const VALUE_OPTIONAL: Syntax = Syntax(0x04);
    /// The argument must be followed by a value.
    pub const VALUE_REQUIRED: Syntax = Syntax(0x08);
    /// The argument is not shown in the usage block.
    pub const HIDDEN: Syntax = Syntax(0x10);

    const NAMES: [(Syntax, &'static str); 5] = [
        (Syntax::OPTIONAL, "OPTIONAL"),
        (Syntax::REQUIRED, "REQUIRED"),
        (Syntax::VALUE_OPTIONAL, "VALUE_OPTIONAL"),
        (Syntax::VALUE_REQUIRED, "VALUE_REQUIRED"),
        (Syntax::HIDDEN, "HIDDEN"),
    ];

    /// No flags at all.
    pub const fn empty() -> Self {
        Syntax(0)
    }

    /// Whether every flag in `other` is also set in `self`.
    pub const fn contains(self, other: Syntax) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the argument is left out of the usage block.
    pub fn is_hidden(self) -> bool {
        self.contains(Syntax::HIDDEN)
    }

    /// Whether the argument may be omitted.
    pub fn is_optional(self) -> bool {
        self.contains(Syntax::OPTIONAL)
    }

    /// Whether the argument may appear without a value.
    pub fn is_value_optional(self) -> bool {
        self.contains(Syntax::VALUE_OPTIONAL)
    }

    /// Repair the flags so that at most one member of each pair is set, filling in the default member for any empty pair.
    ///
    /// Returns the conflicts that were repaired; an empty result means the flags were already consistent.
    ///
    /// ### Example
    /// ```
    /// # use cmdarg_builder as cmdarg;
    /// use cmdarg::{Syntax, SyntaxConflict};
    ///
    /// let mut syntax = Syntax::OPTIONAL | Syntax::REQUIRED;
    /// assert_eq!(syntax.validate_flags(), vec![SyntaxConflict::Presence]);
    /// assert_eq!(syntax, Syntax::REQUIRED | Syntax::VALUE_REQUIRED);
    /// ```
    pub fn validate_flags(&mut self) -> Vec<SyntaxConflict> {
        let mut conflicts = Vec::default();

        if self.contains(Syntax::OPTIONAL | Syntax::REQUIRED) {
            self.0 &= !Syntax::OPTIONAL.0;
            conflicts.push(SyntaxConflict::Presence);
        } else if !self.is_optional() {
            self.0 |= Syntax::REQUIRED.0;
        }

        if self.contains(Syntax::VALUE_OPTIONAL | Syntax::VALUE_REQUIRED) {
            self.0 &= !Syntax::VALUE_OPTIONAL.0;
            conflicts.push(SyntaxConflict::Value);
        } else if !self.is_value_optional() {
            self.0 |= Syntax::VALUE_REQUIRED.0;
        }

        conflicts
    }

    pub(crate) fn with_optional_value(self) -> Self {
        Syntax((self.0 & !Syntax::VALUE_REQUIRED.0) | Syntax::VALUE_OPTIONAL.0)
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Syntax::REQUIRED | Syntax::VALUE_REQUIRED
    }
}

impl BitOr for Syntax {
    type Output = Syntax;

    fn bitor(self, rhs: Self) -> Self::Output {
        Syntax(self.0 | rhs.0)
    }
}

impl BitOrAssign for Syntax {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::fmt::Display for Syntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = Syntax::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", names.join(" | "))
    }
}

impl std::fmt::Debug for Syntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax[{self}]")
    }
}

/// What a single parse learned about one argument.
///
/// Starts out empty (bad) and only ever gains bits during a parse.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Status(u8);

impl Status {
    /// The switch was seen on the command line.
    pub const FOUND: Status = Status(0x01);
    /// A value followed the switch.
    pub const VALUE_FOUND: Status = Status(0x02);
    /// The value was converted (and, for lists, validated) successfully.
    pub const PARSE_OK: Status = Status(0x04);

    /// Whether nothing has been recorded.
    pub fn is_bad(self) -> bool {
        self.0 == 0
    }

    /// Whether the switch was seen.
    pub fn is_found(self) -> bool {
        self.0 & Status::FOUND.0 != 0
    }

    /// Whether a value followed the switch.
    pub fn is_value_found(self) -> bool {
        self.0 & Status::VALUE_FOUND.0 != 0
    }

    /// Whether the value parsed.
    pub fn is_parse_ok(self) -> bool {
        self.0 & Status::PARSE_OK.0 != 0
    }

    pub(crate) fn set(&mut self, status: Status) {
        self.0 |= status.0;
    }
}

impl std::fmt::Debug for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Status")
            .field("found", &self.is_found())
            .field("value_found", &self.is_value_found())
            .field("parse_ok", &self.is_parse_ok())
            .finish()
    }
}
