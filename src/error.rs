//! Error taxonomy for the engine.
//!
//! There is no `anyhow`-style boundary in this crate: every surface here
//! is library-level, so callers get a typed [`Error`] they can match on.

use std::fmt;

use thiserror::Error;

/// Errors raised by the priority queues, the queue factory, and graph
/// construction.
///
/// Unreachability is deliberately absent from this enum: per the engine's
/// contract it is never an error, only the ordinary return value `+∞`.
#[derive(Debug, Error)]
pub enum Error<N>
where
    N: fmt::Debug,
{
    /// `insert` was called with a node already live in the queue.
    #[error("node {0:?} already present in queue")]
    DuplicateNode(N),

    /// `decrease_key` was called with a node absent from the queue.
    #[error("node {0:?} not found in queue")]
    MissingNode(N),

    /// A radix-heap `insert` or `decrease_key` used a priority below
    /// `last_extracted`, violating the monotone-queue contract.
    #[error("priority {priority} is below last extracted {last_extracted}")]
    MonotonicityViolation { priority: u64, last_extracted: u64 },

    /// The queue factory was given a tag outside `{binary, fibonacci, radix}`.
    #[error("unknown queue variant: {0:?}")]
    UnknownQueueVariant(String),
}
