use std::env;

use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::printer::Printer;
use crate::parser::ErrorContext;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The configured command line.
/// Built via `CommandLineParser::build`.
///
/// A command line may be parsed any number of times; each parse returns its own [`Matches`].
pub struct CommandLine {
    parser: Parser,
    printer: Printer,
    user_interface: Box<dyn UserInterface>,
}

impl CommandLine {
    pub(crate) fn new(
        parser: Parser,
        printer: Printer,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            parser,
            printer,
            user_interface,
        }
    }

    /// Run the command line against the input tokens (not including the program name).
    ///
    /// Parsing happens in two phases:
    /// 1. Each token is matched to the first argument it selects, by `-KEYWORD` or `-SHORT`, and that argument takes its value from the following token.
    /// Tokens that select no argument are reported as warnings and ignored.
    /// 2. Once every token is matched, every argument is checked for completeness: required arguments must be found, and found arguments must have a value unless it is optional.
    ///
    /// Help (`-help` or `-h`, when no argument claims the token) stops the parse with [`ParseError::HelpRequested`].
    /// Nothing is printed for an error; see [`CommandLine::parse`] for the terminal behaviour.
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<Matches, ParseError> {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parsing tokens: {tokens:?}.");
        }

        self.parser.consume(tokens, self.user_interface.as_ref())
    }

    /// Print the usage block.
    pub fn usage(&self) {
        self.printer.print_usage(self.user_interface.as_ref());
    }

    /// Report a failed parse: the usage block for help, otherwise the error (with its context) followed by the usage block.
    /// Returns the exit code for the failure.
    pub fn report(&self, error: ParseError, tokens: &[&str]) -> i32 {
        let exit_code = error.exit_code();

        if error != ParseError::HelpRequested {
            let index = error.index();
            self.user_interface.print_error(error);

            if let Some(index) = index {
                self.user_interface
                    .print_error_context(ErrorContext::new(index, tokens));
            }
        }

        self.usage();
        exit_code
    }

    /// Run the command line against the Cli [`env::args`].
    ///
    /// Returns the matches for a successful parse.
    /// Otherwise the failure is reported and the process exits (via `std::process::exit`): with code `0` for help, `1` for anything else.
    pub fn parse(&self) -> Matches {
        let command_input: Vec<String> = env::args().skip(1).collect();
        let tokens: Vec<&str> = command_input.iter().map(AsRef::as_ref).collect();

        match self.parse_tokens(tokens.as_slice()) {
            Ok(matches) => matches,
            Err(error) => {
                let exit_code = self.report(error, tokens.as_slice());
                std::process::exit(exit_code);
            }
        }
    }
}

impl std::fmt::Debug for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandLine")
            .field("parser", &self.parser)
            .finish_non_exhaustive()
    }
}
