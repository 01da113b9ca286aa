use crate::stats::StatsField;

/// Errors produced while turning a raw stats body into a [`StatsRecord`].
///
/// [`StatsRecord`]: crate::stats::StatsRecord
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The body did not split into the expected number of comma-separated fields.
    #[error("invalid stats format: expected {expected} fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    /// A field could not be converted to its numeric type.
    #[error("failed to parse {field} from \"{value}\": {reason}")]
    InvalidField {
        field: StatsField,
        value: String,
        reason: String,
    },
}
