//! `cmdarg` is a typed, declarative command line switch parser for Rust.
//!
//! A program declares its switches up front (integers, floats, booleans, strings, single characters, and delimited lists of these), registers them on a command line, and parses `argv` against the declarations.
//! Each parse returns a [`Matches`] record of what was found, so a command line may be parsed any number of times.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/ofxget.rs")]
//! ```
//!
//! The above generates the following Cli program:
//! ```console
//! $ ofxget -h
//!
//! Usage: ofxget -request request_file -institution institution_id [-passwords passwords_file]
//! Where:
//!        request_file - File containing the OFX request.
//!      institution_id - Id of the financial institution to contact.
//!      passwords_file - File of passwords, one per institution.
//!
//! $ ofxget -r statement.req -i 17
//! Request: statement.req
//! Institution: 17
//!
//! $ ofxget -r statement.req -i seventeen
//! Error: switch -institution must take an argument: invalid integer value "seventeen".
//! -r statement.req -i seventeen
//!                     ^
//!
//! Usage: ofxget -request request_file -institution institution_id [-passwords passwords_file]
//! ...
//! ```
//!
//! # Arguments
//! Configure `cmdarg` by starting with a [`CommandLineParser`] and `add`ing [`Argument`]s.
//! Each argument takes a *field*, a keyword (selected with `-keyword`), and optionally a single character short form (selected with `-k`).
//!
//! The field decides the value the argument takes:
//! * [`Scalar`] takes the single token following the switch: `i64`, `f64`, `String` or `char`.
//! * [`Switch`] takes nothing; its presence sets it to `true`.
//! * [`List`] takes the single token following the switch, split on its delimiters, ex: `-years 2019,2020`.
//! Lists are bounded (`1 <= n <= 100` by default); the values of a repeated list switch accumulate.
//!
//! Conversions follow the C library: integers read the longest prefix in base 0 (`0x1F`, `017`, `5abc` are `31`, `15`, `5`), floats the longest decimal prefix.
//! A string value may not start with `-`, since it most likely is another switch.
//!
//! ```
//! use cmdarg::{Argument, CommandLineParser, Elements, List, Scalar, Switch, Syntax};
//!
//! let command_line = CommandLineParser::new("program")
//!     .add(Argument::new(Scalar::new(0i64), "count", Some('c')))
//!     .add(Argument::new(Switch, "verbose", Some('v')).syntax(Syntax::OPTIONAL))
//!     .add(Argument::new(List::<String>::new(), "names", None).syntax(Syntax::OPTIONAL))
//!     .build();
//!
//! let matches = command_line
//!     .parse_tokens(vec!["-c", "0x10", "-names", "a.b", "-names", "c"].as_slice())
//!     .unwrap();
//!
//! assert_eq!(matches.get::<i64>("count"), Some(16));
//! assert_eq!(matches.get::<bool>("verbose"), Some(false));
//! let names: Elements<String> = matches.get("names").unwrap();
//! assert_eq!(names.as_slice(), &["a", "b", "c"]);
//! ```
//!
//! # Syntax
//! By default an argument is required and must be followed by its value.
//! [`Syntax`] flags relax this: `OPTIONAL`, `VALUE_OPTIONAL`, and `HIDDEN` (left out of usage).
//! Conflicting flags (ex: `OPTIONAL | REQUIRED`) are repaired towards the required member, with a warning when the command line is built.
//!
//! # Parsing
//! Tokens are matched to the first registered argument they select.
//! A token that selects nothing is reported with a warning and ignored.
//! Once all tokens are matched, every required argument must have been found, and every found argument must have a value unless its value is optional.
//!
//! [`CommandLine::parse_tokens`] returns the outcome as a `Result`, without printing it.
//! [`CommandLine::parse`] reads [`std::env::args`] and terminates the program on failure: help (`-help` or `-h`) prints usage and exits with `0`, any error prints the error and usage and exits with `1`.
pub use cmdarg_builder::*;
