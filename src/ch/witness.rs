//! Bounded witness search: Dijkstra on `G_CH` from `p`, pruning `avoid`
//! and skipping contracted nodes, terminating as soon as `q` is popped
//! or the popped key exceeds `limit`.
//!
//! Grounded on
//! `examples/original_source/src/algorithms/contraction_hierarchy.py`'s
//! `_local_dijkstra`.

use rustc_hash::FxHashMap;

use super::ChState;
use crate::graph::{Dense, Weight, INFINITE};
use crate::queue::{make_queue, PriorityQueue, QueueVariant};

/// Distance from `p` to `q` in the non-contracted subgraph (excluding
/// `avoid`), or [`INFINITE`] if no such path within `limit` exists.
pub(super) fn search(
    state: &ChState,
    variant: QueueVariant,
    p: Dense,
    q: Dense,
    avoid: Dense,
    limit: Weight,
) -> Weight {
    if p == q {
        return 0;
    }

    let mut dist: FxHashMap<Dense, Weight> = FxHashMap::default();
    dist.insert(p, 0);
    let mut queue = make_queue(variant, state.radix_max_key_hint.max(limit));
    queue.insert(p, 0).expect("p freshly inserted");

    while let Some((u, d)) = queue.extract_min() {
        if d > limit {
            return INFINITE;
        }
        if u == q {
            return d;
        }
        if d > *dist.get(&u).unwrap_or(&INFINITE) {
            continue;
        }
        for &(v, w) in &state.out[u as usize] {
            if v == avoid || state.contracted[v as usize] {
                continue;
            }
            let new_dist = d.saturating_add(w);
            if new_dist < *dist.get(&v).unwrap_or(&INFINITE) {
                dist.insert(v, new_dist);
                if queue.contains(&v) {
                    queue.decrease_key(&v, new_dist).expect("v is contained");
                } else {
                    queue.insert(v, new_dist).expect("v just checked absent");
                }
            }
        }
    }

    *dist.get(&q).unwrap_or(&INFINITE)
}
