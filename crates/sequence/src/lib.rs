//! Asynchronous sequencing combinators for fnflow
//!
//! This crate handles the ordered execution of caller-supplied work:
//! - Deferred results with single-assignment settlement
//! - Adapting callback-style callables into deferred results (promisify)
//! - Continuation-driven step chains
//! - Strictly sequential execution of deferred-producing steps
//!
//! Failures raised by caller-supplied steps flow through unchanged; the
//! only failure these combinators add themselves is
//! [`fnflow_core::Error::Unsettled`], for a settle handle dropped before it
//! was used.

pub mod chain;
pub mod deferred;
pub mod promisify;
pub mod series;

pub use chain::{chain_async, Advance, Chain, ChainStatus, ChainStep};
pub use deferred::{Deferred, Settle};
pub use promisify::{promisify, promisify0, promisify2};
pub use series::{run_in_series, Series, SeriesStep};
