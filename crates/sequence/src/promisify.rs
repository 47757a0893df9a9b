//! Adapting callback-style callables into deferred results
//!
//! The wrapped callable keeps its leading arguments and receives a
//! synthetic [`Settle`] as its final parameter in place of an
//! `(error, result)` completion callback. Because [`Settle`] is consumed
//! on use, the completion convention's "call back exactly once" contract
//! is enforced by the type system rather than documented away.

use crate::deferred::{Deferred, Settle};

/// Adapt a callable taking one argument and a completion handle
pub fn promisify<A, T, E, F>(f: F) -> impl Fn(A) -> Deferred<T, E>
where
    F: Fn(A, Settle<T, E>),
{
    move |arg| {
        let (settle, deferred) = Deferred::new();
        f(arg, settle);
        deferred
    }
}

/// Adapt a callable taking only a completion handle
pub fn promisify0<T, E, F>(f: F) -> impl Fn() -> Deferred<T, E>
where
    F: Fn(Settle<T, E>),
{
    move || {
        let (settle, deferred) = Deferred::new();
        f(settle);
        deferred
    }
}

/// Adapt a callable taking two arguments and a completion handle
pub fn promisify2<A, B, T, E, F>(f: F) -> impl Fn(A, B) -> Deferred<T, E>
where
    F: Fn(A, B, Settle<T, E>),
{
    move |a, b| {
        let (settle, deferred) = Deferred::new();
        f(a, b, settle);
        deferred
    }
}
