//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument { operation, message } => {
                write!(f, "invalid argument to '{operation}': {message}")
            }
            Error::Unsettled { operation } => {
                write!(
                    f,
                    "deferred result for '{operation}' was dropped before it settled"
                )
            }
            Error::Sequencing { message } => {
                write!(f, "sequencing error: {message}")
            }
        }
    }
}
