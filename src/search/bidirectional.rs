//! Skew-balanced bidirectional Dijkstra.
//!
//! Mirrors `examples/original_source/src/algorithms/bidirectional_skewed.py`:
//! two coupled frontiers over `G` and `G⁻¹`, a skew-weighted rule
//! deciding which frontier expands next, and a `min_f + min_b ≥ μ`
//! termination check against the best meeting length seen so far.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::graph::{Graph, Weight, INFINITE};
use crate::queue::{make_queue, PriorityQueue, QueueVariant};

/// Default skew: expand whichever frontier is currently smaller.
pub const DEFAULT_SKEW: f64 = 0.5;

pub struct BidirectionalDijkstra<'g, N>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    graph: &'g Graph<N>,
    variant: QueueVariant,
    skew: f64,
}

impl<'g, N> BidirectionalDijkstra<'g, N>
where
    N: Eq + Hash + Clone + fmt::Debug + 'static,
{
    pub fn new(graph: &'g Graph<N>, variant: QueueVariant) -> Self {
        Self::with_skew(graph, variant, DEFAULT_SKEW)
    }

    /// `skew` biases which frontier expands next: `0.5` expands
    /// whichever is smaller, `< 0.5` biases toward the backward
    /// frontier, `> 0.5` toward forward. Clamped to `[0, 1]`.
    pub fn with_skew(graph: &'g Graph<N>, variant: QueueVariant, skew: f64) -> Self {
        BidirectionalDijkstra {
            graph,
            variant,
            skew: skew.clamp(0.0, 1.0),
        }
    }

    /// Shortest `source -> target` distance, or [`INFINITE`] if no path
    /// exists. `source == target` always returns `0`; an unknown
    /// `source` or `target` returns [`INFINITE`].
    pub fn find_shortest_path(&self, source: &N, target: &N) -> Weight {
        if source == target {
            return 0;
        }
        let (Some(s), Some(t)) = (self.graph.dense(source), self.graph.dense(target)) else {
            return INFINITE;
        };

        let hint = self.graph.radix_max_key_hint();
        let mut q_f: Box<dyn PriorityQueue<u32>> = make_queue(self.variant, hint);
        let mut q_b: Box<dyn PriorityQueue<u32>> = make_queue(self.variant, hint);

        let mut dist_f: FxHashMap<u32, Weight> = FxHashMap::default();
        let mut dist_b: FxHashMap<u32, Weight> = FxHashMap::default();
        dist_f.insert(s, 0);
        dist_b.insert(t, 0);
        q_f.insert(s, 0).expect("s freshly inserted");
        q_b.insert(t, 0).expect("t freshly inserted");

        let mut mu = INFINITE;

        while !q_f.is_empty() && !q_b.is_empty() {
            let (_, f_min) = q_f.peek().expect("non-empty");
            let (_, b_min) = q_b.peek().expect("non-empty");
            if f_min.saturating_add(b_min) >= mu {
                return mu;
            }

            let expand_forward =
                (q_f.size() as f64) * (1.0 - self.skew) <= (q_b.size() as f64) * self.skew;

            if expand_forward {
                relax_step(self.graph, &mut q_f, &mut dist_f, &dist_b, &mut mu, true);
            } else {
                relax_step(self.graph, &mut q_b, &mut dist_b, &dist_f, &mut mu, false);
            }
        }

        mu
    }
}

/// One pop-and-relax step on either frontier. `forward` selects
/// `graph.out_edges` (search over `G`) vs. `graph.in_edges` (search
/// over `G⁻¹`).
fn relax_step<N>(
    graph: &Graph<N>,
    queue: &mut Box<dyn PriorityQueue<u32>>,
    dist: &mut FxHashMap<u32, Weight>,
    opposite: &FxHashMap<u32, Weight>,
    mu: &mut Weight,
    forward: bool,
) where
    N: Eq + Hash + Clone + fmt::Debug,
{
    let Some((u, d)) = queue.extract_min() else {
        return;
    };
    if d > *dist.get(&u).unwrap_or(&INFINITE) {
        return;
    }

    let edges: &[(u32, Weight)] = if forward {
        graph.out_edges(u)
    } else {
        graph.in_edges(u)
    };

    for &(v, w) in edges {
        let alt = d.saturating_add(w);
        if alt < *dist.get(&v).unwrap_or(&INFINITE) {
            dist.insert(v, alt);
            if queue.contains(&v) {
                queue.decrease_key(&v, alt).expect("v is contained");
            } else {
                queue.insert(v, alt).expect("v just checked absent");
            }
            if let Some(&od) = opposite.get(&v) {
                let total = alt.saturating_add(od);
                if total < *mu {
                    *mu = total;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::dijkstra;

    fn diamond() -> Graph<&'static str> {
        Graph::new([
            ("A", vec![("B", 1u64), ("C", 4u64)]),
            ("B", vec![("C", 2u64), ("D", 5u64)]),
            ("C", vec![("D", 1u64)]),
        ])
    }

    #[test]
    fn matches_dijkstra_on_diamond() {
        let g = diamond();
        let bd = BidirectionalDijkstra::new(&g, QueueVariant::Binary);
        assert_eq!(bd.find_shortest_path(&"A", &"D"), 4);
    }

    #[test]
    fn disconnected_graph_returns_infinite() {
        let g = Graph::new([("A", vec![("B", 1u64)]), ("C", vec![("D", 1u64)])]);
        let bd = BidirectionalDijkstra::new(&g, QueueVariant::Binary);
        assert_eq!(bd.find_shortest_path(&"A", &"C"), INFINITE);
    }

    #[test]
    fn identity_is_zero_even_for_unknown_node() {
        let g = diamond();
        let bd = BidirectionalDijkstra::new(&g, QueueVariant::Binary);
        assert_eq!(bd.find_shortest_path(&"A", &"A"), 0);
        assert_eq!(bd.find_shortest_path(&"Z", &"Z"), 0);
    }

    #[test]
    fn unknown_endpoint_is_infinite() {
        let g = diamond();
        let bd = BidirectionalDijkstra::new(&g, QueueVariant::Binary);
        assert_eq!(bd.find_shortest_path(&"A", &"Z"), INFINITE);
    }

    #[test]
    fn skew_does_not_change_the_result() {
        let g = diamond();
        for variant in [QueueVariant::Binary, QueueVariant::Fibonacci, QueueVariant::Radix] {
            for skew in [0.0, 0.1, 0.5, 0.9, 1.0] {
                let bd = BidirectionalDijkstra::with_skew(&g, variant, skew);
                let expected = dijkstra(&g, &"A", variant)[&"D"];
                assert_eq!(bd.find_shortest_path(&"A", &"D"), expected);
            }
        }
    }
}
