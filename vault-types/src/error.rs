//! Error types for msgvault.

use thiserror::Error;

/// Errors produced while interpreting msgvault data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// A string did not name any variant of the expected enum.
    #[error("unknown {kind}: {value}")]
    UnknownVariant {
        /// Which enum was being parsed (e.g. "message platform").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}

impl VaultError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}
