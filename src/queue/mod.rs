//! The three monotone priority-queue variants, behind one uniform contract.
//!
//! All three may hand back entries whose priority no longer matches the
//! caller's authoritative distance map (a *stale entry* — see each
//! variant's module docs). Callers are expected to compare against their
//! own distance map and discard stale pops; see `search::dijkstra` for the
//! canonical `d > dist[u]` check.

mod binary_heap;
mod fibonacci_heap;
mod radix_heap;

pub use binary_heap::BinaryHeap;
pub use fibonacci_heap::FibonacciHeap;
pub use radix_heap::RadixHeap;

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::Error;
use crate::graph::Weight;

/// Uniform contract shared by [`BinaryHeap`], [`FibonacciHeap`], and
/// [`RadixHeap`].
///
/// `N` must support equality and hashing; at most one live entry per `N`
/// may exist in a queue at a time (invariant I1).
pub trait PriorityQueue<N>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    /// Insert `node` with `priority`. Fails with [`Error::DuplicateNode`]
    /// if `node` is already live.
    fn insert(&mut self, node: N, priority: Weight) -> Result<(), Error<N>>;

    /// Remove and return the live entry with the smallest priority, or
    /// `None` if the queue is empty.
    fn extract_min(&mut self) -> Option<(N, Weight)>;

    /// Lower `node`'s priority to `priority`. Fails with
    /// [`Error::MissingNode`] if `node` is not live. A no-op if
    /// `priority` is not strictly smaller than the current priority.
    fn decrease_key(&mut self, node: &N, priority: Weight) -> Result<(), Error<N>>;

    /// Whether `node` currently has a live entry.
    fn contains(&self, node: &N) -> bool;

    /// Count of live entries.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The live minimum, without removing it.
    fn peek(&self) -> Option<(&N, Weight)>;
}

/// Selects which priority-queue implementation to instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueVariant {
    Binary,
    Fibonacci,
    Radix,
}

impl FromStr for QueueVariant {
    type Err = Error<String>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" => Ok(QueueVariant::Binary),
            "fibonacci" => Ok(QueueVariant::Fibonacci),
            "radix" => Ok(QueueVariant::Radix),
            other => Err(Error::UnknownQueueVariant(other.to_string())),
        }
    }
}

/// Instantiate a queue of the requested variant.
///
/// `max_key_hint` is only consulted for [`QueueVariant::Radix`], which
/// needs an upper bound on priorities it will ever see; pass
/// [`crate::graph::Graph::radix_max_key_hint`] for a Dijkstra-style run
/// over a whole graph.
pub fn make_queue<N>(variant: QueueVariant, max_key_hint: u64) -> Box<dyn PriorityQueue<N>>
where
    N: Eq + Hash + Clone + fmt::Debug + 'static,
{
    match variant {
        QueueVariant::Binary => Box::new(BinaryHeap::new()),
        QueueVariant::Fibonacci => Box::new(FibonacciHeap::new()),
        QueueVariant::Radix => Box::new(RadixHeap::new(max_key_hint)),
    }
}
