//! Builder methods for creating errors with context

use super::types::Error;

// Helper methods for creating errors with context
impl Error {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create an unsettled deferred result error
    #[must_use]
    pub fn unsettled(operation: impl Into<String>) -> Self {
        Error::Unsettled {
            operation: operation.into(),
        }
    }

    /// Create a sequencing error
    #[must_use]
    pub fn sequencing(message: impl Into<String>) -> Self {
        Error::Sequencing {
            message: message.into(),
        }
    }
}
