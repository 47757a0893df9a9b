//! Currying and partial application
//!
//! [`curry2`] and [`curry3`] handle the statically-typed case, turning a
//! multi-argument function into nested single-argument callables. [`Curried`]
//! handles callables of runtime-declared arity over one argument type: it
//! carries an explicit arity alongside the accumulated arguments and invokes
//! the underlying callable exactly once, when enough arguments have arrived.

use crate::errors::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Curry a two-argument function into nested single-argument calls
pub fn curry2<A, B, C, F>(f: F) -> impl Fn(A) -> Box<dyn Fn(B) -> C>
where
    F: Fn(A, B) -> C + Clone + 'static,
    A: Clone + 'static,
    B: 'static,
    C: 'static,
{
    move |a| {
        let f = f.clone();
        Box::new(move |b| f(a.clone(), b))
    }
}

/// Curry a three-argument function into nested single-argument calls
pub fn curry3<A, B, C, D, F>(f: F) -> impl Fn(A) -> Box<dyn Fn(B) -> Box<dyn Fn(C) -> D>>
where
    F: Fn(A, B, C) -> D + Clone + 'static,
    A: Clone + 'static,
    B: Clone + 'static,
    C: 'static,
    D: 'static,
{
    move |a| {
        let f = f.clone();
        Box::new(move |b: B| {
            let f = f.clone();
            let a = a.clone();
            Box::new(move |c| f(a.clone(), b.clone(), c)) as Box<dyn Fn(C) -> D>
        })
    }
}

/// A callable of declared arity accumulating homogeneous arguments.
///
/// Each [`apply`](Curried::apply) step may supply zero or more arguments.
/// Accumulation is append-only: a partial application clones its state, so
/// the value it was derived from stays reusable. Once the accumulated count
/// reaches the declared arity, the underlying callable runs exactly once
/// with the full argument list, excess included.
pub struct Curried<T, R> {
    f: Arc<dyn Fn(&[T]) -> R + Send + Sync>,
    arity: usize,
    seen: Vec<T>,
}

/// Outcome of one partial application step
pub enum Applied<T, R> {
    /// Enough arguments arrived; the underlying callable ran
    Done(R),
    /// More arguments are still needed
    Partial(Curried<T, R>),
}

impl<T: Clone, R> Curried<T, R> {
    /// Wrap a callable with the arity it expects
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `arity` is zero, since the
    /// callable would never be distinguishable from its own result.
    pub fn new<F>(arity: usize, f: F) -> Result<Self>
    where
        F: Fn(&[T]) -> R + Send + Sync + 'static,
    {
        if arity == 0 {
            return Err(Error::invalid_argument(
                "Curried::new",
                "arity must be at least one",
            ));
        }
        Ok(Self {
            f: Arc::new(f),
            arity,
            seen: Vec::new(),
        })
    }

    /// The declared arity
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// How many arguments have been accumulated so far
    pub fn supplied(&self) -> usize {
        self.seen.len()
    }

    /// Supply zero or more further arguments.
    ///
    /// Returns [`Applied::Done`] with the callable's result once the
    /// accumulated count reaches the arity, otherwise [`Applied::Partial`]
    /// with a new accumulator; `self` is left untouched either way.
    pub fn apply<I>(&self, args: I) -> Applied<T, R>
    where
        I: IntoIterator<Item = T>,
    {
        let mut seen = self.seen.clone();
        seen.extend(args);
        if seen.len() >= self.arity {
            Applied::Done((self.f)(&seen))
        } else {
            Applied::Partial(Self {
                f: Arc::clone(&self.f),
                arity: self.arity,
                seen,
            })
        }
    }
}

impl<T: Clone, R> Clone for Curried<T, R> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
            arity: self.arity,
            seen: self.seen.clone(),
        }
    }
}

impl<T, R> fmt::Debug for Curried<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curried")
            .field("arity", &self.arity)
            .field("supplied", &self.seen.len())
            .finish()
    }
}

impl<T, R> Applied<T, R> {
    /// The result, if the callable ran
    pub fn done(self) -> Option<R> {
        match self {
            Applied::Done(value) => Some(value),
            Applied::Partial(_) => None,
        }
    }

    /// The continuing accumulator, if more arguments are needed
    pub fn partial(self) -> Option<Curried<T, R>> {
        match self {
            Applied::Done(_) => None,
            Applied::Partial(curried) => Some(curried),
        }
    }
}
