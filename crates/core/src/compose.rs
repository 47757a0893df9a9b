//! Function composition combinators
//!
//! Composition comes in three flavours, matching how the callables are known
//! at the call site:
//!
//! - The [`Compose`] trait chains two statically-typed functions.
//! - The [`compose!`] and [`pipe!`] macros chain any number of
//!   heterogeneously-typed functions; an empty invocation is a compile error.
//! - [`compose_all`] and [`pipe_all`] chain a runtime sequence of boxed unary
//!   functions over one type, failing with
//!   [`Error::InvalidArgument`](crate::Error) on an empty sequence.
//!
//! [`Pipe`] applies the same left-to-right idea to a value instead of a
//! function, threading it through successive transformations.

use crate::errors::{Error, Result};
use std::fmt::Debug;
use std::future::Future;

/// A boxed unary function over a single type, for runtime-assembled chains
pub type UnaryFn<T> = Box<dyn Fn(T) -> T + Send + Sync>;

/// Function composition trait for chaining two callables
pub trait Compose<A, B> {
    /// Compose with a function applied first: `f.compose(g)` is `|x| f(g(x))`
    fn compose<G, C>(self, g: G) -> impl Fn(C) -> B
    where
        G: Fn(C) -> A,
        Self: Fn(A) -> B + Sized;

    /// Pipe into a function applied second: `f.pipe(g)` is `|x| g(f(x))`
    fn pipe<G, C>(self, g: G) -> impl Fn(A) -> C
    where
        G: Fn(B) -> C,
        Self: Fn(A) -> B + Sized;
}

impl<T, A, B> Compose<A, B> for T
where
    T: Fn(A) -> B,
{
    fn compose<G, C>(self, g: G) -> impl Fn(C) -> B
    where
        G: Fn(C) -> A,
    {
        move |x| self(g(x))
    }

    fn pipe<G, C>(self, g: G) -> impl Fn(A) -> C
    where
        G: Fn(B) -> C,
    {
        move |x| g(self(x))
    }
}

/// Compose a runtime sequence of unary functions, rightmost applied first.
///
/// `compose_all(vec![f, g, h])?` behaves as `|x| f(g(h(x)))`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `fns` is empty; no identity
/// fallback is defined.
pub fn compose_all<T>(fns: Vec<UnaryFn<T>>) -> Result<impl Fn(T) -> T> {
    if fns.is_empty() {
        return Err(Error::invalid_argument(
            "compose_all",
            "at least one function is required",
        ));
    }
    Ok(move |input: T| fns.iter().rev().fold(input, |value, f| f(value)))
}

/// Compose a runtime sequence of unary functions, leftmost applied first.
///
/// `pipe_all(vec![f, g, h])?` behaves as `|x| h(g(f(x)))`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `fns` is empty.
pub fn pipe_all<T>(fns: Vec<UnaryFn<T>>) -> Result<impl Fn(T) -> T> {
    if fns.is_empty() {
        return Err(Error::invalid_argument(
            "pipe_all",
            "at least one function is required",
        ));
    }
    Ok(move |input: T| fns.iter().fold(input, |value, f| f(value)))
}

/// A value being threaded through a left-to-right transformation pipeline
pub struct Pipe<T>(pub T);

impl<T> Pipe<T> {
    /// Start a pipeline from a value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Apply a transformation to the carried value
    pub fn pipe<F, U>(self, f: F) -> Pipe<U>
    where
        F: FnOnce(T) -> U,
    {
        Pipe(f(self.0))
    }

    /// Apply a fallible transformation to the carried value
    pub fn try_pipe<F, U, E>(self, f: F) -> std::result::Result<Pipe<U>, E>
    where
        F: FnOnce(T) -> std::result::Result<U, E>,
    {
        f(self.0).map(Pipe)
    }

    /// Observe the carried value without changing it
    pub fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        f(&self.0);
        self
    }

    /// Apply an asynchronous transformation to the carried value
    pub async fn pipe_async<F, Fut, U>(self, f: F) -> Pipe<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>,
    {
        Pipe(f(self.0).await)
    }

    /// Extract the carried value, ending the pipeline
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Debug> Debug for Pipe<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pipe({:?})", self.0)
    }
}

impl<T: Clone> Clone for Pipe<T> {
    fn clone(&self) -> Self {
        Pipe(self.0.clone())
    }
}

impl<T> From<T> for Pipe<T> {
    fn from(value: T) -> Self {
        Pipe(value)
    }
}

/// Small standalone combinators over plain functions
pub mod operators {

    /// Forward composition: `forward_compose(f, g)` is `|x| g(f(x))`
    pub fn forward_compose<A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> C
    where
        F: Fn(A) -> B,
        G: Fn(B) -> C,
    {
        move |a| g(f(a))
    }

    /// Backward composition: `backward_compose(f, g)` is `|x| f(g(x))`
    pub fn backward_compose<A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> C
    where
        F: Fn(B) -> C,
        G: Fn(A) -> B,
    {
        move |a| f(g(a))
    }

    /// Identity function
    pub fn identity<T>(x: T) -> T {
        x
    }

    /// Function ignoring its argument and returning a fixed value
    pub fn constant<T, U>(value: T) -> impl Fn(U) -> T
    where
        T: Clone,
    {
        move |_| value.clone()
    }

    /// Swap the arguments of a two-argument function
    pub fn flip<A, B, C, F>(f: F) -> impl Fn(B, A) -> C
    where
        F: Fn(A, B) -> C,
    {
        move |b, a| f(a, b)
    }
}

/// Composes any number of functions right to left.
///
/// `compose!(f, g, h)(x)` is equivalent to `f(g(h(x)))`: the rightmost
/// function receives the original argument, every other function receives
/// the prior result. `compose!(f)` is `f` itself. An empty invocation does
/// not compile, so the empty-sequence error condition cannot arise here.
#[macro_export]
macro_rules! compose {
    ($f:expr) => { $f };
    ($f:expr, $($rest:expr),+ $(,)?) => {
        move |x| ($f)(($crate::compose!($($rest),+))(x))
    };
}

/// Composes any number of functions left to right.
///
/// `pipe!(f, g, h)(x)` is equivalent to `h(g(f(x)))`: the leftmost function
/// receives the original argument. `pipe!(f)` is `f` itself.
#[macro_export]
macro_rules! pipe {
    ($f:expr) => { $f };
    ($f:expr, $($rest:expr),+ $(,)?) => {
        move |x| ($crate::pipe!($($rest),+))(($f)(x))
    };
}

/// Thread a value through successive transformations, left to right
#[macro_export]
macro_rules! pipeline {
    ($value:expr) => {
        $crate::compose::Pipe::new($value)
    };
    ($value:expr, $($func:expr),+ $(,)?) => {{
        let result = $crate::compose::Pipe::new($value);
        $(
            let result = result.pipe($func);
        )+
        result
    }};
}

/// Thread a value through successive asynchronous transformations
#[macro_export]
macro_rules! async_pipeline {
    ($value:expr) => {
        async move { $crate::compose::Pipe::new($value) }
    };
    ($value:expr, $($func:expr),+ $(,)?) => {
        async move {
            let result = $crate::compose::Pipe::new($value);
            $(
                let result = result.pipe_async($func).await;
            )+
            result
        }
    };
}
