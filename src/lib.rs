//! Single-source and point-to-point shortest paths over directed,
//! non-negatively weighted graphs.
//!
//! Three query strategies share one graph view ([`graph::Graph`]) and
//! one priority-queue contract ([`queue::PriorityQueue`]):
//!
//! - [`search::dijkstra`]: full single-source distance map.
//! - [`search::BidirectionalDijkstra`]: skew-balanced point-to-point
//!   search.
//! - [`ch::ContractionHierarchy`]: preprocessed point-to-point queries
//!   over a rank-restricted bidirectional search.
//!
//! # Example
//! ```
//! use ch_core::graph::Graph;
//! use ch_core::queue::QueueVariant;
//! use ch_core::search::dijkstra;
//!
//! let g = Graph::new([
//!     ("A", vec![("B", 1u64)]),
//!     ("B", vec![("C", 1u64)]),
//!     ("C", vec![("D", 1u64)]),
//! ]);
//!
//! let dist = dijkstra(&g, &"A", QueueVariant::Binary);
//! assert_eq!(dist[&"D"], 3);
//! ```

pub mod ch;
pub mod error;
pub mod graph;
pub mod queue;
pub mod search;
