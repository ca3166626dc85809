use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Canonical text that is not a valid document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    InvalidSyntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Unexpected end of input at line {line}, column {column}")]
    UnexpectedEof { line: usize, column: usize },
}

impl ParseError {
    pub fn invalid_syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn unexpected_eof(line: usize, column: usize) -> Self {
        Self::UnexpectedEof { line, column }
    }

    pub fn line(&self) -> usize {
        match self {
            Self::InvalidSyntax { line, .. } | Self::UnexpectedEof { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            Self::InvalidSyntax { column, .. } | Self::UnexpectedEof { column, .. } => *column,
        }
    }

    /// Byte offset of the error position within `source`
    pub fn offset(&self, source: &str) -> usize {
        let line_start: usize = source
            .split_inclusive('\n')
            .take(self.line().saturating_sub(1))
            .map(str::len)
            .sum();
        (line_start + self.column().saturating_sub(1)).min(source.len())
    }

    /// Character index of the error position, as diagnostics count spans.
    /// A byte offset inside a multi-byte character snaps to that character.
    pub fn char_offset(&self, source: &str) -> usize {
        let mut offset = self.offset(source);
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        source[..offset].chars().count()
    }

    /// Render a labelled diagnostic for terminal output
    #[cfg(feature = "pretty-errors")]
    pub fn report(&self, source_name: &str, source: &str) -> String {
        use ariadne::{Config, Label, Report, ReportKind, Source};

        let offset = self.char_offset(source);
        let span = offset..(offset + 1).min(source.chars().count());
        let label = match self {
            Self::InvalidSyntax { message, .. } => message.clone(),
            Self::UnexpectedEof { .. } => "input ends here".to_string(),
        };

        let mut out = Vec::new();
        let written = Report::build(ReportKind::Error, source_name, offset)
            .with_config(Config::default().with_color(false))
            .with_message("Invalid JSON document")
            .with_label(Label::new((source_name, span)).with_message(label))
            .finish()
            .write((source_name, Source::from(source.to_string())), &mut out);

        match written {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        let (line, column) = (err.line(), err.column());
        if err.is_eof() {
            return Self::unexpected_eof(line, column);
        }
        // serde_json appends the position to its message; it is kept in fields instead
        let full = err.to_string();
        let suffix = format!(" at line {} column {}", line, column);
        let message = full.strip_suffix(&suffix).unwrap_or(&full);
        Self::invalid_syntax(line, column, message)
    }
}

/// A value that could not be written out as text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Serialization error: {message}")]
pub struct SerializeError {
    pub message: String,
}

impl From<serde_json::Error> for SerializeError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_keeps_position_out_of_message() {
        let err: ParseError = serde_json::from_str::<serde_json::Value>("{\"a\": tru}")
            .unwrap_err()
            .into();
        match &err {
            ParseError::InvalidSyntax { line, message, .. } => {
                assert_eq!(*line, 1);
                assert!(!message.contains("at line"));
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_input_is_eof() {
        let err: ParseError = serde_json::from_str::<serde_json::Value>("{\"a\": [1, 2")
            .unwrap_err()
            .into();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_offset_on_second_line() {
        let err = ParseError::invalid_syntax(2, 3, "boom");
        assert_eq!(err.offset("{\n  x\n}"), 4);
        assert_eq!(err.offset(""), 0);
    }

    #[test]
    fn test_char_offset_after_multibyte_text() {
        let source = "{\"é\": x}";
        let err = ParseError::invalid_syntax(1, 8, "bad token");
        assert_eq!(err.offset(source), 7);
        assert_eq!(err.char_offset(source), 6);

        let inside = ParseError::invalid_syntax(1, 4, "bad token");
        assert_eq!(inside.char_offset(source), 2);

        let second_line = ParseError::invalid_syntax(2, 2, "bad token");
        assert_eq!(second_line.char_offset("\"ü\"\n x"), 5);
    }

    #[cfg(feature = "pretty-errors")]
    #[test]
    fn test_report_labels_token_after_multibyte_text() {
        let source = "{\"日本\": x}";
        let err = ParseError::invalid_syntax(1, 12, "bad token");
        assert_eq!(err.char_offset(source), 7);

        let report = err.report("doc.json", source);
        assert!(report.contains("bad token"));
        assert!(report.contains("日本"));
    }

    #[cfg(feature = "pretty-errors")]
    #[test]
    fn test_report_mentions_source_name() {
        let source = "{\"a\": }";
        let err: ParseError = serde_json::from_str::<serde_json::Value>(source)
            .unwrap_err()
            .into();
        let report = err.report("doc.json", source);
        assert!(report.contains("doc.json"));
        assert!(report.contains("Invalid JSON document"));
    }
}
