//! Core error type definitions

/// Result type alias for fnflow operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fnflow combinators using thiserror
///
/// Failures raised by caller-supplied callables are deliberately absent:
/// the sequencing combinators are generic over the caller's error type and
/// propagate it verbatim rather than wrapping it here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A combinator received an argument it cannot operate on,
    /// such as an empty composition sequence or a zero arity
    InvalidArgument { operation: String, message: String },

    /// A deferred result's settle handle was dropped before it settled
    Unsettled { operation: String },

    /// Misuse of a sequencing combinator
    Sequencing { message: String },
}
