//! Error types for the journal modal.

/// Result type alias using [`ModalError`].
pub type Result<T> = std::result::Result<T, ModalError>;

/// Errors that can occur while wiring or driving the journal modal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    /// A required element was not present when the controller attached.
    #[error("Required element #{id} not found")]
    MissingHandle {
        /// The element id that failed to resolve.
        id: String,
    },

    /// The item identifier was rejected by the configured policy.
    #[error("Invalid item identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ModalError {
    /// Create a missing-handle error.
    pub fn missing(id: impl Into<String>) -> Self {
        ModalError::MissingHandle { id: id.into() }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        ModalError::Config(msg.into())
    }

    /// Whether this is the silent initialization guard rather than a real failure.
    pub fn is_missing_handle(&self) -> bool {
        matches!(self, ModalError::MissingHandle { .. })
    }
}

impl From<serde_json::Error> for ModalError {
    fn from(err: serde_json::Error) -> Self {
        ModalError::Config(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for ModalError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        ModalError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_handle_message() {
        let err = ModalError::missing("journal-modal");
        assert_eq!(err.to_string(), "Required element #journal-modal not found");
        assert!(err.is_missing_handle());
    }

    #[test]
    fn test_json_error_maps_to_config() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ModalError = json_err.into();
        assert!(matches!(err, ModalError::Config(_)));
        assert!(!err.is_missing_handle());
    }
}
