use crate::api::Argument;
use crate::parser::{
    CommandLine, ConfigError, ConsoleInterface, Entry, Parser, Printer, UserInterface,
};

/// The command line builder.
///
/// ### Example
/// ```
/// # use cmdarg_builder as cmdarg;
/// use cmdarg::CommandLineParser;
///
/// let command_line = CommandLineParser::new("program")
///     // Configure with CommandLineParser::add.
///     .build();
/// command_line.parse_tokens(empty::slice()).unwrap();
/// ```
pub struct CommandLineParser {
    program: String,
    arguments: Vec<Argument>,
}

impl CommandLineParser {
    /// Create a command line builder.
    /// `program` is the name shown in usage.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            arguments: Vec::default(),
        }
    }

    /// Register an argument on the command line.
    ///
    /// Registration order is the order of usage, and decides which argument a shared short form selects (the first).
    ///
    /// ### Example
    /// ```
    /// # use cmdarg_builder as cmdarg;
    /// use cmdarg::{Argument, CommandLineParser, Scalar};
    ///
    /// let command_line = CommandLineParser::new("program")
    ///     .add(Argument::new(Scalar::new(0i64), "a", None))
    ///     .add(Argument::new(Scalar::new(0i64), "b", None))
    ///     .build();
    ///
    /// let matches = command_line.parse_tokens(vec!["-b", "2", "-a", "1"].as_slice()).unwrap();
    ///
    /// assert_eq!(matches.get::<i64>("a"), Some(1));
    /// assert_eq!(matches.get::<i64>("b"), Some(2));
    /// ```
    pub fn add(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<CommandLine, ConfigError> {
        let entries = self.arguments.iter().map(Entry::from).collect();
        let parser = Parser::new(self.arguments)?;

        for warning in parser.warnings() {
            user_interface.print_warning(warning);
        }

        Ok(CommandLine::new(
            parser,
            Printer::terminal(self.program, entries),
            user_interface,
        ))
    }

    /// Build the command line as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated keyword).
    ///
    /// Problems that can be repaired (ex: `OPTIONAL | REQUIRED`) are reported as warnings on stderr.
    pub fn build_parser(self) -> Result<CommandLine, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the command line.
    /// This finalizes the configuration and checks for errors (ex: a repeated keyword).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> CommandLine {
        match self.build_parser() {
            Ok(command_line) => command_line,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
