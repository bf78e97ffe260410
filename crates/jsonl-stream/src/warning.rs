//! Warning types for non-fatal issues during resilient JSONL reading.
//!
//! Resilient loading keeps going when individual lines are malformed or
//! empty. Each skipped line is reported as a [`Warning`] so callers can
//! surface data-quality problems without aborting the whole read.

/// A non-fatal issue encountered while reading a JSONL stream resiliently.
///
/// Each variant carries the 1-based line number where the issue occurred.
///
/// # Examples
///
/// ```
/// use jsonl_stream::Warning;
///
/// let warning = Warning::MalformedJson {
///     line_number: 5,
///     error: "unexpected end of input".to_string(),
/// };
/// assert_eq!(warning.line_number(), 5);
/// assert_eq!(warning.kind(), "malformed_json");
/// assert!(warning.to_string().contains("line 5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A line was non-empty but contained invalid JSON and was skipped.
    MalformedJson {
        /// The 1-based line number where the error occurred.
        line_number: usize,
        /// A description of the JSON parsing error.
        error: String,
    },

    /// A line was skipped for a reason other than malformed JSON, such as
    /// being empty.
    SkippedLine {
        /// The 1-based line number that was skipped.
        line_number: usize,
        /// The reason the line was skipped.
        reason: String,
    },
}

impl Warning {
    /// Returns the 1-based line number associated with this warning.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedJson { line_number, .. } | Self::SkippedLine { line_number, .. } => {
                *line_number
            }
        }
    }

    /// Returns a static string identifying the warning kind, useful for
    /// filtering and grouping without matching on the variants.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedJson { .. } => "malformed_json",
            Self::SkippedLine { .. } => "skipped_line",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {line_number}: malformed JSON: {error}")
            }
            Self::SkippedLine {
                line_number,
                reason,
            } => {
                write!(f, "line {line_number}: skipped: {reason}")
            }
        }
    }
}

impl std::error::Error for Warning {}
