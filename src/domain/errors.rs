// Domain-level errors for aspect serialization.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    /// The incoming record cannot be applied; the aspect is rejected for this tick.
    #[error("malformed aspect data in `{field}`: {reason}")]
    MalformedAspectData {
        field: &'static str,
        reason: String,
    },
    /// The read stream ended before the named field.
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// A local value does not fit the field's wire width.
    #[error("value {value} of `{field}` does not fit the wire format")]
    OutOfRange { field: &'static str, value: i64 },
    #[error("packet framing: {0}")]
    Packet(#[from] serde_json::Error),
}

impl CodecError {
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        CodecError::MalformedAspectData {
            field,
            reason: reason.into(),
        }
    }
}
