use crate::constant::LABEL_SEPARATOR;
use crate::parser::base::ParseError;
use crate::parser::ErrorContext;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_DESCRIPTION_WIDTH: usize = 17;

/// Renders the two column "label - description" lines of the usage block.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    label: usize,
    description: usize,
}

impl ColumnRenderer {
    /// Produce a renderer that fits within `total_width`, wrapping descriptions only when they would overflow it.
    pub(crate) fn guided(label: usize, description: usize, total_width: usize) -> Self {
        let non_description = label + LABEL_SEPARATOR.len();
        let target_total_width = (total_width as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_description = std::cmp::max(description, MINIMUM_DESCRIPTION_WIDTH);

        if guided_description + non_description <= target_total_width {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Label {non_description} and description fit within the target total {target_total_width}.  Selecting description: {guided_description}.");
            }

            Self::new(label, guided_description)
        } else if non_description < total_width {
            let calculated = std::cmp::max(
                target_total_width.saturating_sub(non_description),
                MINIMUM_DESCRIPTION_WIDTH,
            );
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Label {non_description} fits within the total {total_width}.  Selecting description: {calculated}.");
            }

            Self::new(label, calculated)
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Label {non_description} does not fit within the total {total_width}.  Selecting description: {MINIMUM_DESCRIPTION_WIDTH}.");
            }

            Self::new(label, MINIMUM_DESCRIPTION_WIDTH)
        }
    }

    /// Produce a renderer that never wraps a description of at most `description` characters.
    pub(crate) fn new(label: usize, description: usize) -> Self {
        Self {
            label,
            // At least 2, so that words can be hyphenated.
            description: std::cmp::max(description, 2),
        }
    }

    pub(crate) fn render(&self, label: &str, description: &str) -> Vec<String> {
        let label_width = self.label;
        let separator_width = LABEL_SEPARATOR.len();
        let parts = chunk(description, self.description);

        if parts.is_empty() {
            return vec![format!("{label:>label_width$}{LABEL_SEPARATOR}")
                .trim_end()
                .to_string()];
        }

        parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                if i == 0 {
                    format!("{label:>label_width$}{LABEL_SEPARATOR}{part}")
                } else {
                    format!("{:label_width$}{:separator_width$}{part}", "", "")
                }
            })
            .collect()
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() < width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let chars: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;
    let mut right = increment;

    while right + 1 < chars.len() {
        lines.push(format!("{}-", chars[left..right].iter().collect::<String>()));
        left += increment;
        right += increment;
    }

    current.extend(&chars[left..]);
}

/// Where the user facing output of a command line goes.
pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_warning(&self, warning: String);
    fn print_error(&self, error: ParseError);
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_warning(&self, warning: String) {
        eprintln!("{warning}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("Error: {error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}
