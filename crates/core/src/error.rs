#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not found: {entity} '{name}'")]
    NotFound { entity: &'static str, name: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The user-facing message without the category prefix.
    ///
    /// Dialog shells show this text in a blocking popup.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Conflict(msg) | Self::Internal(msg) => msg.clone(),
            Self::NotFound { .. } => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_has_prefix() {
        let err = CoreError::Validation("Invalid task.".to_string());
        assert_eq!(err.to_string(), "Validation failed: Invalid task.");
    }

    #[test]
    fn message_strips_prefix() {
        let err = CoreError::Validation("Invalid task.".to_string());
        assert_eq!(err.message(), "Invalid task.");
    }

    #[test]
    fn not_found_names_entity() {
        let err = CoreError::NotFound {
            entity: "preset",
            name: "Feature".to_string(),
        };
        assert_eq!(err.to_string(), "Not found: preset 'Feature'");
        assert_eq!(err.message(), "Not found: preset 'Feature'");
    }
}
