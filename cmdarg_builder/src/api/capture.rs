use thiserror::Error;

use crate::constant::*;
use crate::prelude::Element;

/// Why a token could not be taken as the value of a switch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The switch was the final token, so there was nothing to take.
    #[error("no value follows the switch.")]
    Absent,
    /// Not even a prefix of the token reads as an integer.
    #[error("invalid integer value \"{token}\".")]
    InvalidInteger {
        /// The offending token.
        token: String,
    },
    /// Not even a prefix of the token reads as a float.
    #[error("invalid float value \"{token}\".")]
    InvalidFloat {
        /// The offending token.
        token: String,
    },
    /// A character element must be precisely one character.
    #[error("invalid char value \"{token}\".")]
    InvalidChar {
        /// The offending token.
        token: String,
    },
    /// A character value must be precisely one character.
    #[error("value \"{token}\" is too long.")]
    TooLong {
        /// The offending token.
        token: String,
    },
    /// String values may not start with '-'.
    #[error("value \"{token}\" looks like another switch.")]
    LooksLikeSwitch {
        /// The offending token.
        token: String,
    },
}

/// Why a list did not end up with an acceptable number of elements.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoundsError {
    /// Fewer elements than the list minimum.
    #[error("too few values (provided={provided}, min={min})")]
    TooFew {
        /// How many elements were provided.
        provided: usize,
        /// The list minimum.
        min: usize,
    },
    /// More elements than the list maximum.
    #[error("too many values (provided={provided}, max={max})")]
    TooMany {
        /// How many elements were provided.
        provided: usize,
        /// The list maximum.
        max: usize,
    },
}

impl Element for i64 {
    const DEFAULT_DELIMITERS: &'static str = NUMERIC_DELIMITERS;

    fn parse_element(token: &str) -> Result<Self, ValueError> {
        integer_prefix(token).ok_or_else(|| ValueError::InvalidInteger {
            token: token.to_string(),
        })
    }
}

impl Element for f64 {
    const DEFAULT_DELIMITERS: &'static str = NUMERIC_DELIMITERS;

    fn parse_element(token: &str) -> Result<Self, ValueError> {
        float_prefix(token).ok_or_else(|| ValueError::InvalidFloat {
            token: token.to_string(),
        })
    }
}

impl Element for String {
    const DEFAULT_DELIMITERS: &'static str = TEXT_DELIMITERS;

    fn parse_element(token: &str) -> Result<Self, ValueError> {
        Ok(token.to_string())
    }

    fn parse_scalar(token: &str) -> Result<Self, ValueError> {
        if token.starts_with('-') {
            Err(ValueError::LooksLikeSwitch {
                token: token.to_string(),
            })
        } else {
            Ok(token.to_string())
        }
    }
}

impl Element for char {
    const DEFAULT_DELIMITERS: &'static str = TEXT_DELIMITERS;

    fn parse_element(token: &str) -> Result<Self, ValueError> {
        let mut chars = token.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ValueError::InvalidChar {
                token: token.to_string(),
            }),
        }
    }

    fn parse_scalar(token: &str) -> Result<Self, ValueError> {
        let mut chars = token.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            (None, _) => Err(ValueError::InvalidChar {
                token: token.to_string(),
            }),
            (Some(_), Some(_)) => Err(ValueError::TooLong {
                token: token.to_string(),
            }),
        }
    }
}

fn skip_whitespace(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take_while(|b| b.is_ascii_whitespace() || **b == 0x0b)
        .count()
}

fn count_digits(bytes: &[u8], radix: u32) -> usize {
    bytes
        .iter()
        .take_while(|b| (**b as char).is_digit(radix))
        .count()
}

/// Read the longest integer prefix of `token`, `strtol(token, _, 0)` style.
///
/// The base is picked from the prefix: `0x`/`0X` is hexadecimal, a leading `0` is octal, anything else is decimal.
/// Trailing characters after the digits are ignored.
/// Values beyond the `i64` range saturate.
/// Returns `None` when no digits can be read at all.
pub(crate) fn integer_prefix(token: &str) -> Option<i64> {
    let bytes = token.as_bytes();
    let mut i = skip_whitespace(bytes);
    let negative = match bytes.get(i) {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let hexadecimal = bytes.get(i) == Some(&b'0')
        && matches!(bytes.get(i + 1), Some(b'x') | Some(b'X'))
        && bytes.get(i + 2).map_or(false, u8::is_ascii_hexdigit);
    let (radix, start) = if hexadecimal {
        (16, i + 2)
    } else if bytes.get(i) == Some(&b'0') {
        (8, i)
    } else {
        (10, i)
    };
    let digits = count_digits(&bytes[start..], radix);

    if digits == 0 {
        return None;
    }

    let mut value: i64 = 0;

    for b in &bytes[start..start + digits] {
        let digit = match (*b as char).to_digit(radix) {
            Some(d) => d as i64,
            None => unreachable!("internal error - digits were counted in this radix"),
        };
        // Accumulate towards the sign directly so that i64::MIN is reachable.
        let next = value.checked_mul(radix as i64).and_then(|v| {
            if negative {
                v.checked_sub(digit)
            } else {
                v.checked_add(digit)
            }
        });

        match next {
            Some(v) => value = v,
            None => return Some(if negative { i64::MIN } else { i64::MAX }),
        }
    }

    Some(value)
}

/// Read the longest floating point prefix of `token`, `strtod` style.
///
/// Accepts an optional sign followed by `inf`, `infinity`, `nan` (any case), or decimal digits with an optional fraction and exponent.
/// Trailing characters are ignored.
/// Returns `None` when no number can be read at all.
pub(crate) fn float_prefix(token: &str) -> Option<f64> {
    let start = skip_whitespace(token.as_bytes());
    let text = &token[start..];
    let bytes = text.as_bytes();
    let (negative, mut i) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };
    let rest = &bytes[i..];

    if rest.len() >= 3 && rest[..3].eq_ignore_ascii_case(b"inf") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    if rest.len() >= 3 && rest[..3].eq_ignore_ascii_case(b"nan") {
        return Some(f64::NAN);
    }

    let integer_digits = count_digits(rest, 10);
    i += integer_digits;
    let mut fraction_digits = 0;

    if bytes.get(i) == Some(&b'.') {
        fraction_digits = count_digits(&bytes[i + 1..], 10);

        if integer_digits + fraction_digits > 0 {
            i += 1 + fraction_digits;
        }
    }

    if integer_digits + fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;

        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }

        let exponent_digits = count_digits(&bytes[j..], 10);

        if exponent_digits > 0 {
            i = j + exponent_digits;
        }
    }

    text[..i].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("5", Some(5))]
    #[case("5abc", Some(5))]
    #[case("  42", Some(42))]
    #[case("-17", Some(-17))]
    #[case("+3", Some(3))]
    #[case("0x1F", Some(31))]
    #[case("0Xff", Some(255))]
    #[case("0x", Some(0))]
    #[case("0xg", Some(0))]
    #[case("010", Some(8))]
    #[case("09", Some(0))]
    #[case("0", Some(0))]
    #[case("12.7", Some(12))]
    #[case("99999999999999999999", Some(i64::MAX))]
    #[case("-99999999999999999999", Some(i64::MIN))]
    #[case("-9223372036854775808", Some(i64::MIN))]
    #[case("abc", None)]
    #[case("", None)]
    #[case("-", None)]
    #[case("- 5", None)]
    #[case("x5", None)]
    fn integer(#[case] token: &str, #[case] expected: Option<i64>) {
        assert_eq!(integer_prefix(token), expected);
    }

    #[rstest]
    #[case("1.5", Some(1.5))]
    #[case("1.5xyz", Some(1.5))]
    #[case("  -2", Some(-2.0))]
    #[case("+.25", Some(0.25))]
    #[case("7.", Some(7.0))]
    #[case("1e3", Some(1000.0))]
    #[case("1e", Some(1.0))]
    #[case("1e+", Some(1.0))]
    #[case("2.5E-1", Some(0.25))]
    #[case("inf", Some(f64::INFINITY))]
    #[case("-Infinity", Some(f64::NEG_INFINITY))]
    #[case("0x1A", Some(0.0))]
    #[case("abc", None)]
    #[case(".", None)]
    #[case("", None)]
    #[case("-e5", None)]
    fn float(#[case] token: &str, #[case] expected: Option<f64>) {
        assert_eq!(float_prefix(token), expected);
    }

    #[test]
    fn float_nan() {
        assert!(float_prefix("NaN").unwrap().is_nan());
        assert!(float_prefix("nan(123)").unwrap().is_nan());
    }

    #[test]
    fn integer_element() {
        assert_eq!(i64::parse_element("5abc"), Ok(5));
        assert_eq!(i64::parse_scalar("5abc"), Ok(5));
        assert_eq!(
            i64::parse_element("abc"),
            Err(ValueError::InvalidInteger {
                token: "abc".to_string()
            })
        );
    }

    #[test]
    fn float_element() {
        assert_eq!(f64::parse_element("0.5"), Ok(0.5));
        assert_matches!(f64::parse_scalar("x"), Err(ValueError::InvalidFloat { token }) if token == "x");
    }

    #[rstest]
    #[case("abc", Ok("abc".to_string()))]
    #[case("", Ok("".to_string()))]
    #[case("-abc", Err(ValueError::LooksLikeSwitch { token: "-abc".to_string() }))]
    #[case("-", Err(ValueError::LooksLikeSwitch { token: "-".to_string() }))]
    fn string_scalar(#[case] token: &str, #[case] expected: Result<String, ValueError>) {
        assert_eq!(String::parse_scalar(token), expected);
    }

    #[test]
    fn string_element() {
        // Only the scalar rejects a leading dash.
        assert_eq!(String::parse_element("-abc"), Ok("-abc".to_string()));
    }

    #[rstest]
    #[case("a", Ok('a'))]
    #[case("é", Ok('é'))]
    #[case("ab", Err(ValueError::TooLong { token: "ab".to_string() }))]
    #[case("", Err(ValueError::InvalidChar { token: "".to_string() }))]
    fn char_scalar(#[case] token: &str, #[case] expected: Result<char, ValueError>) {
        assert_eq!(char::parse_scalar(token), expected);
    }

    #[rstest]
    #[case("a", Ok('a'))]
    #[case("ab", Err(ValueError::InvalidChar { token: "ab".to_string() }))]
    fn char_element(#[case] token: &str, #[case] expected: Result<char, ValueError>) {
        assert_eq!(char::parse_element(token), expected);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ValueError::InvalidInteger {
                token: "abc".to_string()
            }
            .to_string(),
            "invalid integer value \"abc\"."
        );
        assert_eq!(
            BoundsError::TooMany {
                provided: 4,
                max: 3
            }
            .to_string(),
            "too many values (provided=4, max=3)"
        );
    }
}
