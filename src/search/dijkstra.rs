//! Single-source Dijkstra, parameterized by queue variant.
//!
//! Mirrors `examples/original_source/src/algorithms/dijkstra.py`'s
//! relax-and-insert-or-decrease-key loop, generalized over the three
//! queue variants instead of hardcoding a binary heap.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::graph::{Graph, Weight, INFINITE};
use crate::queue::{make_queue, PriorityQueue, QueueVariant};

/// Run Dijkstra from `source` over `graph` using the given queue
/// `variant`. Returns every reachable node's distance; unreachable
/// nodes are simply absent rather than mapped to [`INFINITE`] (callers
/// can treat a missing key as `+∞`).
///
/// Step 1 of the algorithm sets `dist[s] = 0` unconditionally, so a
/// `source` that is not in `graph` still yields `{source: 0}` rather
/// than an empty map.
pub fn dijkstra<N>(graph: &Graph<N>, source: &N, variant: QueueVariant) -> FxHashMap<N, Weight>
where
    N: Eq + Hash + Clone + fmt::Debug + 'static,
{
    let mut dist: FxHashMap<N, Weight> = FxHashMap::default();
    dist.insert(source.clone(), 0);

    let Some(source_dense) = graph.dense(source) else {
        return dist;
    };

    let mut queue: Box<dyn PriorityQueue<u32>> =
        make_queue(variant, graph.radix_max_key_hint());

    queue.insert(source_dense, 0).expect("source freshly inserted");

    while let Some((u, d)) = queue.extract_min() {
        let u_id = graph.node_at(u);
        if d > *dist.get(u_id).unwrap_or(&INFINITE) {
            // Stale entry: a cheaper path to u was already settled.
            continue;
        }

        for &(v, w) in graph.out_edges(u) {
            let new_dist = d.saturating_add(w);
            let v_id = graph.node_at(v);
            if new_dist < *dist.get(v_id).unwrap_or(&INFINITE) {
                dist.insert(v_id.clone(), new_dist);
                if queue.contains(&v) {
                    queue.decrease_key(&v, new_dist).expect("v is contained");
                } else {
                    queue.insert(v, new_dist).expect("v just checked absent");
                }
            }
        }
    }

    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Graph<&'static str> {
        Graph::new([
            ("A", vec![("B", 1u64)]),
            ("B", vec![("C", 1u64)]),
            ("C", vec![("D", 1u64)]),
        ])
    }

    fn diamond() -> Graph<&'static str> {
        Graph::new([
            ("A", vec![("B", 1u64), ("C", 4u64)]),
            ("B", vec![("C", 2u64), ("D", 5u64)]),
            ("C", vec![("D", 1u64)]),
        ])
    }

    #[test]
    fn chain_distances_agree_across_all_variants() {
        let g = chain();
        for variant in [QueueVariant::Binary, QueueVariant::Fibonacci, QueueVariant::Radix] {
            let dist = dijkstra(&g, &"A", variant);
            assert_eq!(dist[&"A"], 0);
            assert_eq!(dist[&"B"], 1);
            assert_eq!(dist[&"C"], 2);
            assert_eq!(dist[&"D"], 3);
        }
    }

    #[test]
    fn diamond_takes_the_cheaper_route() {
        let g = diamond();
        for variant in [QueueVariant::Binary, QueueVariant::Fibonacci, QueueVariant::Radix] {
            let dist = dijkstra(&g, &"A", variant);
            assert_eq!(dist[&"A"], 0);
            assert_eq!(dist[&"B"], 1);
            assert_eq!(dist[&"C"], 3);
            assert_eq!(dist[&"D"], 4);
        }
    }

    #[test]
    fn unreachable_nodes_are_absent() {
        let g = Graph::new([("A", vec![("B", 1u64)]), ("C", vec![("D", 1u64)])]);
        let dist = dijkstra(&g, &"A", QueueVariant::Binary);
        assert!(!dist.contains_key(&"C"));
        assert!(!dist.contains_key(&"D"));
    }

    #[test]
    fn unknown_source_is_recorded_at_zero() {
        let g = chain();
        let dist = dijkstra(&g, &"Z", QueueVariant::Binary);
        assert_eq!(dist.len(), 1);
        assert_eq!(dist[&"Z"], 0);
    }
}
