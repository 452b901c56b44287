//! Rank-restricted bidirectional query and path unpacking.
//!
//! Grounded on
//! `examples/original_source/src/algorithms/contraction_hierarchy.py`'s
//! `query`: one forward step and one backward step per loop iteration
//! (not skew-weighted, unlike `search::bidirectional`), each relaxing
//! only edges from lower rank to strictly higher rank (kept strict even
//! for zero-weight edges, since the up-down rank argument needs it).

use rustc_hash::FxHashMap;

use super::ChState;
use crate::graph::{Dense, Weight, INFINITE};
use crate::queue::{make_queue, PriorityQueue, QueueVariant};

/// Distance-only query: `s -> t` shortest-path length, or [`INFINITE`].
pub(super) fn distance(state: &ChState, variant: QueueVariant, s: Dense, t: Dense) -> Weight {
    if s == t {
        return 0;
    }
    search(state, variant, s, t).0
}

/// Full query tracking predecessors on both frontiers, so a concrete
/// node sequence can be reconstructed. Returns `(distance, node path in
/// G_CH)`, or `None` if unreachable.
pub(super) fn shortest_path_nodes(
    state: &ChState,
    variant: QueueVariant,
    s: Dense,
    t: Dense,
) -> Option<(Weight, Vec<Dense>)> {
    if s == t {
        return Some((0, vec![s]));
    }
    let (mu, meeting, pred_f, pred_b) = search_with_predecessors(state, variant, s, t);
    if mu == INFINITE {
        return None;
    }
    let meet = meeting.expect("finite mu implies a recorded meeting node");

    let mut forward = vec![meet];
    let mut cur = meet;
    while cur != s {
        cur = pred_f[&cur];
        forward.push(cur);
    }
    forward.reverse();

    let mut backward = Vec::new();
    let mut cur = meet;
    while cur != t {
        cur = pred_b[&cur];
        backward.push(cur);
    }

    forward.extend(backward);
    Some((mu, forward))
}

/// Expand every shortcut edge along `nodes` (a path in `G_CH`) back to
/// the concrete walk in the original graph.
pub(super) fn unpack_path(state: &ChState, nodes: &[Dense]) -> Vec<Dense> {
    let mut out = vec![nodes[0]];
    for w in nodes.windows(2) {
        expand_edge(state, w[0], w[1], &mut out);
        out.push(w[1]);
    }
    out
}

fn expand_edge(state: &ChState, u: Dense, v: Dense, out: &mut Vec<Dense>) {
    if let Some(&m) = state.shortcut_witness.get(&(u, v)) {
        expand_edge(state, u, m, out);
        out.push(m);
        expand_edge(state, m, v, out);
    }
}

fn search(state: &ChState, variant: QueueVariant, s: Dense, t: Dense) -> (Weight, Option<Dense>) {
    let (mu, meeting, _, _) = search_with_predecessors(state, variant, s, t);
    (mu, meeting)
}

#[allow(clippy::type_complexity)]
fn search_with_predecessors(
    state: &ChState,
    variant: QueueVariant,
    s: Dense,
    t: Dense,
) -> (
    Weight,
    Option<Dense>,
    FxHashMap<Dense, Dense>,
    FxHashMap<Dense, Dense>,
) {
    let mut dist_f: FxHashMap<Dense, Weight> = FxHashMap::default();
    let mut dist_b: FxHashMap<Dense, Weight> = FxHashMap::default();
    let mut pred_f: FxHashMap<Dense, Dense> = FxHashMap::default();
    let mut pred_b: FxHashMap<Dense, Dense> = FxHashMap::default();
    dist_f.insert(s, 0);
    dist_b.insert(t, 0);

    let hint = state.radix_max_key_hint;
    let mut q_f = make_queue(variant, hint);
    let mut q_b = make_queue(variant, hint);
    q_f.insert(s, 0).expect("s freshly inserted");
    q_b.insert(t, 0).expect("t freshly inserted");

    let mut mu = INFINITE;
    let mut meeting = None;

    while !q_f.is_empty() || !q_b.is_empty() {
        if !q_f.is_empty() {
            step(
                &state.out,
                &state.rank,
                &mut q_f,
                &mut dist_f,
                &mut pred_f,
                &dist_b,
                &mut mu,
                &mut meeting,
            );
        }
        if !q_b.is_empty() {
            step(
                &state.rev,
                &state.rank,
                &mut q_b,
                &mut dist_b,
                &mut pred_b,
                &dist_f,
                &mut mu,
                &mut meeting,
            );
        }
    }

    (mu, meeting, pred_f, pred_b)
}

#[allow(clippy::too_many_arguments)]
fn step(
    adjacency: &[Vec<(Dense, Weight)>],
    rank: &[u32],
    queue: &mut Box<dyn PriorityQueue<u32>>,
    dist: &mut FxHashMap<Dense, Weight>,
    pred: &mut FxHashMap<Dense, Dense>,
    opposite_dist: &FxHashMap<Dense, Weight>,
    mu: &mut Weight,
    meeting: &mut Option<Dense>,
) {
    let Some((u, d)) = queue.extract_min() else {
        return;
    };
    if d > *mu || d > *dist.get(&u).unwrap_or(&INFINITE) {
        return;
    }

    for &(v, w) in &adjacency[u as usize] {
        if rank[u as usize] >= rank[v as usize] {
            continue;
        }
        let alt = d.saturating_add(w);
        if alt < *dist.get(&v).unwrap_or(&INFINITE) {
            dist.insert(v, alt);
            pred.insert(v, u);
            if queue.contains(&v) {
                queue.decrease_key(&v, alt).expect("v is contained");
            } else {
                queue.insert(v, alt).expect("v just checked absent");
            }
            if let Some(&od) = opposite_dist.get(&v) {
                let total = alt.saturating_add(od);
                if total < *mu {
                    *mu = total;
                    *meeting = Some(v);
                }
            }
        }
    }
}
