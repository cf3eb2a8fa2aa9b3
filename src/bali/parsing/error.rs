//! Parse errors and their rendered diagnostics

use crate::bali::grammar;
use crate::bali::token::Token;
use std::fmt;

/// Longest token value quoted in a diagnostic header.
const MAX_VALUE_CHARS: usize = 40;

/// Preceding source lines shown above the offending one.
const CONTEXT_LINES: usize = 3;

/// Where a parse failed and what was expected there, rendered once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The offending token, or `None` at end of input.
    pub token: Option<Token>,
    /// The committed rule that could not be completed.
    pub rule: Option<&'static str>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(source: &str, token: Option<Token>, rule: Option<&'static str>) -> Self {
        let message = render(source, token.as_ref(), rule);
        Self {
            token,
            rule,
            message,
        }
    }
}

/// Errors that end a parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The scanner could not match the source at some position.
    Lexical(Diagnostic),
    /// A rule committed to a construct and then could not complete it.
    Syntax(Diagnostic),
    /// A complete document was followed by more tokens.
    TrailingInput(Diagnostic),
}

impl ParseError {
    pub fn diagnostic(&self) -> &Diagnostic {
        match self {
            ParseError::Lexical(diagnostic)
            | ParseError::Syntax(diagnostic)
            | ParseError::TrailingInput(diagnostic) => diagnostic,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostic().message)
    }
}

impl std::error::Error for ParseError {}

/// Type alias for parser results with boxed errors (reduces stack size)
pub type ParseResult<T> = Result<T, Box<ParseError>>;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Line and column just past the last character of `source`.
pub fn end_position(source: &str) -> (usize, usize) {
    let line = source.matches('\n').count() + 1;
    let last = source.rsplit('\n').next().unwrap_or_default();
    (line, last.chars().count() + 1)
}

/// Render the header, the numbered source context with a caret under the offending
/// column, and the expected rule's production when there is one.
pub fn render(source: &str, token: Option<&Token>, rule: Option<&'static str>) -> String {
    let (header, line, column) = match token {
        Some(token) => (
            format!(
                "An unexpected token was received by the parser: {} at line {}, column {}: {:?}",
                token.kind,
                token.line,
                token.column,
                truncate(&token.text, MAX_VALUE_CHARS)
            ),
            token.line,
            token.column,
        ),
        None => {
            let (line, column) = end_position(source);
            (
                format!(
                    "An unexpected end of input was reached by the parser at line {line}, column {column}"
                ),
                line,
                column,
            )
        }
    };

    let lines: Vec<&str> = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let text_of = |number: usize| lines.get(number - 1).copied().unwrap_or_default();

    let mut rendered = vec![header];
    for number in line.saturating_sub(CONTEXT_LINES).max(1)..line {
        rendered.push(format!("{number:04}: {}", text_of(number)));
    }
    rendered.push(format!("{line:04}: {}", text_of(line)));
    rendered.push(format!(" >>>─{}⌃", "─".repeat(column)));
    if line < lines.len() {
        rendered.push(format!("{:04}: {}", line + 1, text_of(line + 1)));
    }

    if let Some(rule) = rule {
        rendered.push(String::new());
        rendered.push("Was expecting:".to_string());
        rendered.push(format!(
            "  {rule}: {}",
            grammar::production(rule).unwrap_or_default()
        ));
    }
    rendered.join("\n")
}
