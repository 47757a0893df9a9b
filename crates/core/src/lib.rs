//! Synchronous function combinators and the shared error taxonomy for `fnflow`.
//!
//! This crate provides the pure, stateless building blocks: composing
//! functions into pipelines, currying multi-argument callables, and the
//! `Error`/`Result` pair every fnflow crate reports failures through.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all failure modes for predictable error handling.
//! - **`compose`**: The `Compose` trait, the `compose!`/`pipe!` macros, and
//!   runtime composition over boxed unary functions.
//! - **`curry`**: Partial application with explicit arity tracking.

pub mod compose;
pub mod curry;
pub mod errors;

pub use self::{
    compose::{compose_all, operators, pipe_all, Compose, Pipe, UnaryFn},
    curry::{curry2, curry3, Applied, Curried},
    errors::{Error, Result, ResultExt},
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::compose::operators::*;
    pub use crate::compose::{compose_all, pipe_all, Compose, Pipe, UnaryFn};
    pub use crate::curry::{curry2, curry3, Applied, Curried};
    pub use crate::errors::{Error, Result, ResultExt};
    pub use crate::{async_pipeline, compose, pipe, pipeline};
}
