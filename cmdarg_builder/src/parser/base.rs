use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::api::field::ConsumeError;
use crate::api::{Argument, BoundsError, FromValue, Value, ValueError};
use crate::constant::*;
use crate::model::{Status, SyntaxConflict};
use crate::parser::interface::UserInterface;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A mistake in how the command line was declared.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A list delimiter set may not contain a space.
    #[error("Config error: space can't be a delimiter (delimiters '{delimiters}').")]
    SpaceDelimiter {
        /// The rejected delimiter set.
        delimiters: String,
    },
    /// A list needs at least one delimiter.
    #[error("Config error: delimiters may not be empty.")]
    EmptyDelimiters,
    /// A list minimum above its maximum can never be satisfied.
    #[error("Config error: list bounds are invalid (min={min}, max={max}).")]
    InvalidBounds {
        /// The requested minimum.
        min: usize,
        /// The requested maximum.
        max: usize,
    },
    /// Keywords must be unique within a command line.
    #[error("Config error: cannot duplicate the switch '-{0}'.")]
    DuplicateKeyword(String),
}

/// Why a parse did not complete.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token following a switch could not be read as its value.
    #[error("switch -{keyword} must take an argument: {error}")]
    InvalidValue {
        /// The switch.
        keyword: String,
        /// The position of the offending token.
        index: usize,
        /// What was wrong with it.
        error: ValueError,
    },
    /// A list switch ended up with too few or too many values.
    #[error("{error} for the switch -{keyword}.")]
    ListBounds {
        /// The switch.
        keyword: String,
        /// The position of the list token.
        index: usize,
        /// The bound that was broken.
        error: BoundsError,
    },
    /// A required switch was not on the command line.
    #[error("the switch -{keyword} must be supplied.")]
    MissingSwitch {
        /// The switch.
        keyword: String,
    },
    /// A switch requiring a value was the last token.
    #[error("the switch -{keyword} must take a value.")]
    MissingValue {
        /// The switch.
        keyword: String,
    },
    /// `-help` (or `-h`) was on the command line.
    #[error("help requested.")]
    HelpRequested,
}

impl ParseError {
    /// The exit code a program should use for this outcome: `0` for help, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            ParseError::HelpRequested => 0,
            _ => 1,
        }
    }

    /// The position of the token the error concerns, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            ParseError::InvalidValue { index, .. } | ParseError::ListBounds { index, .. } => {
                Some(*index)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ArgumentMatch {
    status: Status,
    value: Value,
}

/// The result of one parse: the status and value of every argument, by keyword.
///
/// ### Example
/// ```
/// # use cmdarg_builder as cmdarg;
/// use cmdarg::{Argument, CommandLineParser, Scalar, Switch, Syntax};
///
/// let command_line = CommandLineParser::new("program")
///     .add(Argument::new(Scalar::new(0i64), "count", Some('c')))
///     .add(Argument::new(Switch, "verbose", Some('v')).syntax(Syntax::OPTIONAL))
///     .build();
///
/// let matches = command_line.parse_tokens(vec!["-c", "3"].as_slice()).unwrap();
/// assert_eq!(matches.get::<i64>("count"), Some(3));
/// assert!(matches.status("count").is_parse_ok());
/// assert_eq!(matches.get::<bool>("verbose"), Some(false));
/// assert!(!matches.is_found("verbose"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matches {
    states: HashMap<String, ArgumentMatch>,
    ignored: Vec<String>,
}

impl Matches {
    /// The status of the switch; empty for an unknown keyword.
    pub fn status(&self, keyword: &str) -> Status {
        self.states
            .get(keyword)
            .map(|state| state.status)
            .unwrap_or_default()
    }

    /// Whether the switch was on the command line.
    pub fn is_found(&self, keyword: &str) -> bool {
        self.status(keyword).is_found()
    }

    /// The value of the switch (its initial value when it was not on the command line).
    pub fn value(&self, keyword: &str) -> Option<&Value> {
        self.states.get(keyword).map(|state| &state.value)
    }

    /// The typed value of the switch, or `None` for an unknown keyword or a mismatched type.
    pub fn get<T: FromValue>(&self, keyword: &str) -> Option<T> {
        self.value(keyword).and_then(T::from_value)
    }

    /// The tokens that matched no switch, in command line order.
    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }
}

#[derive(Debug)]
pub(crate) struct Parser {
    arguments: Vec<Argument>,
}

impl Parser {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default()).unwrap()
    }

    pub(crate) fn new(arguments: Vec<Argument>) -> Result<Self, ConfigError> {
        let mut keywords = HashSet::new();

        for argument in &arguments {
            if !keywords.insert(argument.keyword()) {
                return Err(ConfigError::DuplicateKeyword(
                    argument.keyword().to_string(),
                ));
            }
        }

        Ok(Self { arguments })
    }

    /// The non-fatal problems with the declaration.
    pub(crate) fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::default();

        for argument in &self.arguments {
            for conflict in argument.conflicts() {
                let keyword = argument.keyword();
                warnings.push(match conflict {
                    SyntaxConflict::Presence => format!(
                        "Warning: keyword {keyword} can't be optional AND required, changing the syntax of {keyword} to be required."
                    ),
                    SyntaxConflict::Value => format!(
                        "Warning: value for keyword {keyword} can't be optional AND required, changing the syntax of the value of {keyword} to be required."
                    ),
                });
            }
        }

        let mut shorts: HashMap<char, &str> = HashMap::default();

        for argument in &self.arguments {
            if let Some(short) = argument.short() {
                match shorts.get(&short) {
                    Some(first) => warnings.push(format!(
                        "Warning: -{short} is the short form of both -{first} and -{keyword}, it selects -{first}.",
                        keyword = argument.keyword(),
                    )),
                    None => {
                        shorts.insert(short, argument.keyword());
                    }
                }
            }
        }

        warnings
    }

    pub(crate) fn consume(
        &self,
        tokens: &[&str],
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<Matches, ParseError> {
        let mut states: Vec<ArgumentMatch> = self
            .arguments
            .iter()
            .map(|argument| ArgumentMatch {
                status: Status::default(),
                value: argument.kind().initial(),
            })
            .collect();
        let mut ignored = Vec::default();
        let mut cursor = 0;

        // 1. Match each token to a switch, letting the switch take its value.
        while cursor < tokens.len() {
            let token = tokens[cursor];

            match self
                .arguments
                .iter()
                .position(|argument| argument.selected_by(token))
            {
                Some(i) => {
                    let argument = &self.arguments[i];
                    let state = &mut states[i];
                    state.status.set(Status::FOUND);

                    match argument
                        .kind()
                        .consume_value(&mut cursor, tokens, &mut state.value)
                    {
                        Ok(()) => {
                            state.status.set(Status::PARSE_OK);

                            if argument.kind().takes_value() {
                                state.status.set(Status::VALUE_FOUND);
                            }

                            #[cfg(feature = "tracing_debug")]
                            {
                                debug!("Switch -{k} took value '{v}'.", k = argument.keyword(), v = state.value);
                            }
                        }
                        Err(ConsumeError::Value(ValueError::Absent)) => {
                            // Settled after the scan: fine for an optional value, otherwise a missing value.
                            #[cfg(feature = "tracing_debug")]
                            {
                                debug!("Switch -{k} has no value.", k = argument.keyword());
                            }
                        }
                        Err(ConsumeError::Value(error)) => {
                            return Err(ParseError::InvalidValue {
                                keyword: argument.keyword().to_string(),
                                index: cursor,
                                error,
                            });
                        }
                        Err(ConsumeError::Bounds(error)) => {
                            return Err(ParseError::ListBounds {
                                keyword: argument.keyword().to_string(),
                                index: cursor,
                                error,
                            });
                        }
                    }
                }
                None if is_help(token) => {
                    return Err(ParseError::HelpRequested);
                }
                None => {
                    user_interface.print_warning(format!(
                        "Warning: argument \"{token}\" looks strange, ignoring."
                    ));
                    ignored.push(token.to_string());
                }
            }

            cursor += 1;
        }

        // 2. Check every switch is complete.
        for (argument, state) in self.arguments.iter().zip(states.iter()) {
            if !argument.is_optional() && !state.status.is_found() {
                return Err(ParseError::MissingSwitch {
                    keyword: argument.keyword().to_string(),
                });
            }

            if state.status.is_found()
                && !argument.is_value_optional()
                && !state.status.is_value_found()
            {
                return Err(ParseError::MissingValue {
                    keyword: argument.keyword().to_string(),
                });
            }
        }

        Ok(Matches {
            states: self
                .arguments
                .iter()
                .map(|argument| argument.keyword().to_string())
                .zip(states)
                .collect(),
            ignored,
        })
    }
}

fn is_help(token: &str) -> bool {
    match token.strip_prefix('-') {
        Some(name) => name == HELP_KEYWORD || name.chars().eq([HELP_SHORT]),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Elements, List, Scalar, Switch};
    use crate::model::Syntax;
    use crate::parser::util::InMemoryInterface;
    use crate::test::assert_contains;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn institution() -> Argument {
        Argument::new(Scalar::new(0i64), "institution", Some('i'))
    }

    #[test]
    fn parser_empty() {
        // Setup
        let parser = Parser::empty();
        let interface = InMemoryInterface::default();

        // Execute
        let matches = parser.consume(empty::slice(), &interface).unwrap();

        // Verify
        assert!(matches.ignored().is_empty());
        assert_eq!(interface.consume(), (None, None, None, None));
    }

    #[rstest]
    #[case(vec!["-institution", "5"], 5)]
    #[case(vec!["-i", "5"], 5)]
    #[case(vec!["-i", "5abc"], 5)]
    #[case(vec!["-i", "0x10"], 16)]
    #[case(vec!["-i", "1", "-i", "2"], 2)]
    fn parser_scalar(#[case] tokens: Vec<&str>, #[case] expected: i64) {
        // Setup
        let parser = Parser::new(vec![institution()]).unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        let matches = parser.consume(tokens.as_slice(), &interface).unwrap();

        // Verify
        assert_eq!(matches.get::<i64>("institution"), Some(expected));
        let status = matches.status("institution");
        assert!(status.is_found());
        assert!(status.is_value_found());
        assert!(status.is_parse_ok());
    }

    #[test]
    fn parser_invalid_integer() {
        // Setup
        let parser = Parser::new(vec![institution()]).unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        let result = parser.consume(vec!["-i", "abc"].as_slice(), &interface);

        // Verify
        assert_eq!(
            result,
            Err(ParseError::InvalidValue {
                keyword: "institution".to_string(),
                index: 1,
                error: ValueError::InvalidInteger {
                    token: "abc".to_string()
                },
            })
        );
    }

    #[rstest]
    #[case(Argument::new(Scalar::<String>::default(), "name", Some('n')), vec!["-n", "-x"])]
    #[case(Argument::new(Scalar::new('a'), "name", Some('n')), vec!["-n", "xy"])]
    #[case(Argument::new(Scalar::new(0.0), "name", Some('n')), vec!["-n", "x1.0"])]
    #[case(Argument::new(List::<char>::new(), "name", Some('n')), vec!["-n", "a,bb"])]
    fn parser_invalid_value(#[case] argument: Argument, #[case] tokens: Vec<&str>) {
        // Setup
        let parser = Parser::new(vec![argument]).unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        let result = parser.consume(tokens.as_slice(), &interface);

        // Verify
        assert_matches!(result, Err(ParseError::InvalidValue { keyword, index: 1, .. }) if keyword == "name");
    }

    #[rstest]
    #[case(vec!["-l", "1,2,3"], Ok(vec![1, 2, 3]))]
    #[case(vec!["-l", "1"], Ok(vec![1]))]
    #[case(vec!["-l", "1,2", "-l", "3"], Ok(vec![1, 2, 3]))]
    #[case(vec!["-l", "1,2,3,4"], Err(BoundsError::TooMany { provided: 4, max: 3 }))]
    #[case(vec!["-l", ",,"], Err(BoundsError::TooFew { provided: 0, min: 1 }))]
    fn parser_list(#[case] tokens: Vec<&str>, #[case] expected: Result<Vec<i64>, BoundsError>) {
        // Setup
        let list = List::<i64>::new()
            .bounds(1, 3)
            .unwrap()
            .delimiters(",")
            .unwrap();
        let parser = Parser::new(vec![Argument::new(list, "list", Some('l'))]).unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        let result = parser.consume(tokens.as_slice(), &interface);

        // Verify
        match expected {
            Ok(items) => {
                let matches = result.unwrap();
                let elements: Elements<i64> = matches.get("list").unwrap();
                assert_eq!(elements.as_slice(), items.as_slice());
                assert!(matches.status("list").is_parse_ok());
            }
            Err(error) => {
                assert_matches!(result, Err(ParseError::ListBounds { error: e, .. }) if e == error);
            }
        }
    }

    #[test]
    fn parser_switch() {
        // Setup
        let parser = Parser::new(vec![
            Argument::new(Switch, "verbose", Some('v')),
            Argument::new(Scalar::<String>::default(), "name", None).syntax(Syntax::OPTIONAL),
        ])
        .unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        let matches = parser
            .consume(vec!["-v", "-name", "x"].as_slice(), &interface)
            .unwrap();

        // Verify
        assert_eq!(matches.get::<bool>("verbose"), Some(true));
        let status = matches.status("verbose");
        assert!(status.is_found());
        assert!(status.is_parse_ok());
        assert!(!status.is_value_found());
        // The switch did not swallow the following token.
        assert_eq!(matches.get::<String>("name"), Some("x".to_string()));
        assert!(matches.ignored().is_empty());
    }

    #[test]
    fn parser_switch_cursor() {
        // Setup
        let parser = Parser::new(vec![Argument::new(Switch, "verbose", Some('v'))]).unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        let matches = parser
            .consume(vec!["-v", "5"].as_slice(), &interface)
            .unwrap();

        // Verify
        assert_eq!(matches.ignored(), &["5".to_string()]);
    }

    #[rstest]
    #[case(vec!["-z"])]
    #[case(vec!["stray"])]
    #[case(vec!["--institution"])]
    fn parser_unrecognized(#[case] extra: Vec<&str>) {
        // Setup
        let parser = Parser::new(vec![
            institution(),
            Argument::new(Switch, "zoom", None).syntax(Syntax::OPTIONAL),
        ])
        .unwrap();
        let interface = InMemoryInterface::default();
        let mut tokens = extra.clone();
        tokens.extend(["-i", "1"]);

        // Execute
        let matches = parser.consume(tokens.as_slice(), &interface).unwrap();

        // Verify
        assert_eq!(matches.ignored(), extra.as_slice());
        assert!(!matches.is_found("zoom"));
        assert_eq!(matches.get::<i64>("institution"), Some(1));
        let (message, warning, error, error_context) = interface.consume();
        assert_eq!(message, None);
        let warning = warning.unwrap();
        assert_contains!(warning, &format!("\"{}\" looks strange", extra[0]));
        assert_eq!(error, None);
        assert_eq!(error_context, None);
    }

    #[test]
    fn parser_missing_switch() {
        // Setup
        let parser = Parser::new(vec![
            Argument::new(Switch, "verbose", Some('v')).syntax(Syntax::OPTIONAL),
            institution(),
        ])
        .unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        let result = parser.consume(vec!["-v"].as_slice(), &interface);

        // Verify
        assert_eq!(
            result,
            Err(ParseError::MissingSwitch {
                keyword: "institution".to_string()
            })
        );
    }

    #[rstest]
    #[case(Argument::new(Scalar::new(0i64), "value", Some('v')))]
    #[case(Argument::new(Scalar::new(0.0), "value", Some('v')))]
    #[case(Argument::new(Scalar::<String>::default(), "value", Some('v')))]
    #[case(Argument::new(Scalar::new('c'), "value", Some('v')))]
    #[case(Argument::new(List::<String>::new(), "value", Some('v')))]
    fn parser_missing_value(#[case] argument: Argument) {
        // Setup
        let parser = Parser::new(vec![argument.syntax(Syntax::OPTIONAL)]).unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        let result = parser.consume(vec!["-v"].as_slice(), &interface);

        // Verify
        assert_eq!(
            result,
            Err(ParseError::MissingValue {
                keyword: "value".to_string()
            })
        );
    }

    #[test]
    fn parser_optional_value() {
        // Setup
        let parser = Parser::new(vec![Argument::new(Scalar::new(9i64), "level", Some('l'))
            .syntax(Syntax::VALUE_OPTIONAL)])
        .unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        let matches = parser.consume(vec!["-l"].as_slice(), &interface).unwrap();

        // Verify
        let status = matches.status("level");
        assert!(status.is_found());
        assert!(!status.is_value_found());
        assert!(!status.is_parse_ok());
        assert_eq!(matches.get::<i64>("level"), Some(9));
    }

    #[test]
    fn parser_optional_absent() {
        // Setup
        let parser = Parser::new(vec![Argument::new(Scalar::new(9i64), "level", Some('l'))
            .syntax(Syntax::OPTIONAL)])
        .unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        let matches = parser.consume(empty::slice(), &interface).unwrap();

        // Verify
        assert!(matches.status("level").is_bad());
        assert_eq!(matches.get::<i64>("level"), Some(9));
        assert!(matches.status("unknown").is_bad());
        assert_eq!(matches.value("unknown"), None);
    }

    #[rstest]
    #[case(vec!["-help"])]
    #[case(vec!["-h"])]
    #[case(vec!["-i", "abc", "-h"])]
    #[case(vec!["-h", "-i", "abc"])]
    fn parser_help(#[case] tokens: Vec<&str>) {
        // Setup
        let parser = Parser::new(vec![
            Argument::new(Scalar::<String>::default(), "name", None),
            Argument::new(Scalar::new(0i64), "index", None),
        ])
        .unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        let result = parser.consume(tokens.as_slice(), &interface);

        // Verify
        assert_eq!(result, Err(ParseError::HelpRequested));
    }

    #[test]
    fn parser_help_declared() {
        // Setup
        let parser = Parser::new(vec![Argument::new(Switch, "hold", Some('h'))]).unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        let matches = parser.consume(vec!["-h"].as_slice(), &interface).unwrap();

        // Verify
        assert_eq!(matches.get::<bool>("hold"), Some(true));
    }

    #[test]
    fn parser_repeatable() {
        // Setup
        let parser = Parser::new(vec![
            Argument::new(List::<i64>::new(), "items", Some('l')),
            Argument::new(Switch, "verbose", Some('v')).syntax(Syntax::OPTIONAL),
        ])
        .unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        let first = parser
            .consume(vec!["-l", "1,2", "-v"].as_slice(), &interface)
            .unwrap();
        let second = parser.consume(vec!["-l", "3"].as_slice(), &interface).unwrap();

        // Verify
        assert_eq!(first.get::<Elements<i64>>("items").unwrap().as_slice(), &[1, 2]);
        assert!(first.is_found("verbose"));
        assert_eq!(second.get::<Elements<i64>>("items").unwrap().as_slice(), &[3]);
        assert!(!second.is_found("verbose"));
    }

    #[test]
    fn parser_first_short_wins() {
        // Setup
        let parser = Parser::new(vec![
            Argument::new(Scalar::<String>::default(), "request", Some('r')),
            Argument::new(Scalar::<String>::default(), "passwords", Some('r'))
                .syntax(Syntax::OPTIONAL),
        ])
        .unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        let matches = parser
            .consume(vec!["-r", "a.txt"].as_slice(), &interface)
            .unwrap();

        // Verify
        assert_eq!(matches.get::<String>("request"), Some("a.txt".to_string()));
        assert!(!matches.is_found("passwords"));
        assert_eq!(parser.warnings().len(), 1);
        assert_contains!(parser.warnings()[0], "-r is the short form of both -request and -passwords");
    }

    #[test]
    fn parser_duplicate_keyword() {
        let result = Parser::new(vec![
            Argument::new(Scalar::new(0i64), "flag", Some('a')),
            Argument::new(Switch, "flag", Some('b')),
        ]);
        assert_matches!(result, Err(ConfigError::DuplicateKeyword(keyword)) if keyword == "flag");
    }

    #[test]
    fn parser_syntax_warnings() {
        let parser = Parser::new(vec![
            Argument::new(Scalar::new(0i64), "a", None)
                .syntax(Syntax::OPTIONAL | Syntax::REQUIRED),
            Argument::new(Scalar::new(0i64), "b", None)
                .syntax(Syntax::VALUE_OPTIONAL | Syntax::VALUE_REQUIRED),
            Argument::new(Scalar::new(0i64), "c", None),
        ])
        .unwrap();
        let warnings = parser.warnings();
        assert_eq!(warnings.len(), 2);
        assert_contains!(warnings[0], "keyword a can't be optional AND required");
        assert_contains!(warnings[1], "value for keyword b can't be optional AND required");
    }

    #[test]
    fn parser_unrecognized_never_found() {
        let keywords = ["alpha", "beta", "gamma", "delta"];
        let parser = Parser::new(
            keywords
                .iter()
                .map(|k| Argument::new(Switch, *k, None).syntax(Syntax::OPTIONAL))
                .collect(),
        )
        .unwrap();
        let interface = InMemoryInterface::default();

        for _ in 0..50 {
            let length = thread_rng().gen_range(1..5);
            let tokens: Vec<String> = (0..length)
                .map(|_| format!("-{}", thread_rng().gen_range('i'..='z')))
                .collect();
            let matches = parser
                .consume(
                    tokens
                        .iter()
                        .map(AsRef::as_ref)
                        .collect::<Vec<&str>>()
                        .as_slice(),
                    &interface,
                )
                .unwrap();

            assert_eq!(matches.ignored(), tokens.as_slice());
            for keyword in keywords {
                assert!(matches.status(keyword).is_bad());
            }
        }
    }

    #[test]
    fn parse_error_exit_code() {
        assert_eq!(ParseError::HelpRequested.exit_code(), 0);
        assert_eq!(
            ParseError::MissingSwitch {
                keyword: "a".to_string()
            }
            .exit_code(),
            1
        );
        assert_eq!(
            ParseError::ListBounds {
                keyword: "a".to_string(),
                index: 3,
                error: BoundsError::TooFew { provided: 0, min: 1 },
            }
            .index(),
            Some(3)
        );
    }

    #[test]
    fn parse_error_messages() {
        assert_eq!(
            ParseError::InvalidValue {
                keyword: "n".to_string(),
                index: 1,
                error: ValueError::InvalidInteger {
                    token: "abc".to_string()
                },
            }
            .to_string(),
            "switch -n must take an argument: invalid integer value \"abc\"."
        );
        assert_eq!(
            ParseError::ListBounds {
                keyword: "n".to_string(),
                index: 1,
                error: BoundsError::TooMany { provided: 4, max: 3 },
            }
            .to_string(),
            "too many values (provided=4, max=3) for the switch -n."
        );
        assert_eq!(
            ParseError::MissingValue {
                keyword: "n".to_string()
            }
            .to_string(),
            "the switch -n must take a value."
        );
    }
}
