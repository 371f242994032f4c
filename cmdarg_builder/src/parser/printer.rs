use terminal_size::{terminal_size, Width};

use crate::api::Argument;
use crate::constant::*;
use crate::parser::interface::{ColumnRenderer, UserInterface};

/// What the usage block shows of one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    keyword: String,
    placeholder: String,
    description: String,
    optional: bool,
    value_optional: bool,
    hidden: bool,
}

impl From<&Argument> for Entry {
    fn from(argument: &Argument) -> Self {
        Self {
            keyword: argument.keyword().to_string(),
            placeholder: argument.placeholder_text(),
            description: argument.description_text(),
            optional: argument.is_optional(),
            value_optional: argument.is_value_optional(),
            hidden: argument.is_hidden(),
        }
    }
}

impl Entry {
    fn summary(&self) -> String {
        let grammar = if self.value_optional {
            format!("-{}", self.keyword)
        } else {
            format!("-{} {}", self.keyword, self.placeholder)
        };

        if self.optional {
            format!("[{grammar}]")
        } else {
            grammar
        }
    }

    fn label(&self) -> &str {
        if self.value_optional {
            &self.keyword
        } else {
            &self.placeholder
        }
    }
}

pub(crate) struct Printer {
    program: String,
    entries: Vec<Entry>,
    terminal_width: Option<usize>,
}

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new("program", Vec::default(), None)
    }

    pub(crate) fn terminal(program: impl Into<String>, entries: Vec<Entry>) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(program, entries, terminal_width)
    }

    pub(crate) fn new(
        program: impl Into<String>,
        entries: Vec<Entry>,
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            program: program.into(),
            entries,
            terminal_width,
        }
    }

    pub(crate) fn print_usage(&self, user_interface: &(impl UserInterface + ?Sized)) {
        // Hidden arguments still take part in the label width.
        let label_width = self
            .entries
            .iter()
            .map(|entry| entry.placeholder.chars().count())
            .max()
            .unwrap_or(0)
            + LABEL_PADDING;
        let visible: Vec<&Entry> = self.entries.iter().filter(|entry| !entry.hidden).collect();
        let description_width = visible
            .iter()
            .map(|entry| entry.description.chars().count())
            .max()
            .unwrap_or(0);
        let column_renderer = match self.terminal_width {
            Some(total_width) => {
                ColumnRenderer::guided(label_width, description_width, total_width)
            }
            None => ColumnRenderer::new(label_width, description_width),
        };
        let mut usage = format!("Usage: {}", self.program);

        for entry in &visible {
            usage.push(' ');
            usage.push_str(&entry.summary());
        }

        user_interface.print(String::default());
        user_interface.print(usage);
        user_interface.print("Where:".to_string());

        for entry in &visible {
            for line in column_renderer.render(entry.label(), &entry.description) {
                user_interface.print(line);
            }
        }

        user_interface.print(String::default());
    }
}

/// The command line with a caret under the offending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    index: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(index: usize, tokens: &[&str]) -> Self {
        Self {
            index,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let projection = self.tokens.join(" ");
        // Each preceding token plus its separating space.
        let offset: usize = self
            .tokens
            .iter()
            .take(self.index)
            .map(|token| token.chars().count() + 1)
            .sum();
        let offset = std::cmp::min(offset, projection.chars().count());

        write!(f, "{projection}\n{:offset$}^", "")
    }
}
