//! Extension traits for error handling

use super::types::{Error, Result};

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a lazy message
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Sequencing {
            message: format!("{}: {e}", message.into()),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Error::Sequencing {
            message: format!("{}: {e}", f()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_prefixes_the_message() {
        let failing: std::result::Result<(), String> = Err("inner".to_string());
        let err = failing.context("while chaining").err().unwrap();
        assert_eq!(err.to_string(), "sequencing error: while chaining: inner");
    }

    #[test]
    fn test_with_context_is_lazy() {
        let ok: std::result::Result<i32, String> = Ok(1);
        let result = ok.with_context(|| unreachable!("message built on the error path"));
        assert_eq!(result.unwrap(), 1);
    }
}
