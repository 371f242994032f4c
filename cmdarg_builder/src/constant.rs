pub(crate) const DEFAULT_MIN_COUNT: usize = 1;
pub(crate) const DEFAULT_MAX_COUNT: usize = 100;

// Numeric elements may carry a sign or a decimal point, so '-' and '.' are not separators for them.
pub(crate) const NUMERIC_DELIMITERS: &str = ",~/";
pub(crate) const TEXT_DELIMITERS: &str = ",~/.-";

pub(crate) const HELP_KEYWORD: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';

// The "Where:" block right-aligns labels to the widest placeholder plus this much.
pub(crate) const LABEL_PADDING: usize = 5;
pub(crate) const LABEL_SEPARATOR: &str = " - ";
