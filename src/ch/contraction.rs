//! Node-importance scoring and the lazy best-first contraction loop.
//!
//! Grounded on
//! `examples/original_source/src/algorithms/contraction_hierarchy.py`'s
//! `preprocess`/`_compute_importance`/`_contract_node`.
//!
//! The importance score `I(u) = shortcuts(u) - (in_live + out_live)`
//! can be negative, but this crate's three queue variants all key on
//! `Weight = u64`. Rather than adding a fourth, signed-priority queue
//! just for this one internal use, importance scores are biased by a
//! constant large enough that they never go negative before being
//! pushed onto this crate's own [`crate::queue::BinaryHeap`] — the
//! ordering is unaffected since the bias is a constant shift. This
//! keeps the "own binary heap as the importance queue" choice recorded
//! in `DESIGN.md` without a second heap implementation.

use rustc_hash::FxHashSet;

use super::{witness, ChState};
use crate::graph::{Dense, Weight, INFINITE};
use crate::queue::{BinaryHeap, PriorityQueue, QueueVariant};

/// Large enough that `importance + IMPORTANCE_BIAS` never underflows
/// for any graph this crate can hold in memory (importance magnitude is
/// bounded by node degree).
const IMPORTANCE_BIAS: i64 = 1 << 32;

fn biased(importance: i64) -> Weight {
    (importance + IMPORTANCE_BIAS) as Weight
}

/// Nodes among `u`'s live (not-yet-contracted) neighbors, deduplicated.
fn live_neighbors(adjacency: &[(Dense, Weight)], contracted: &[bool]) -> Vec<Dense> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    for &(n, _) in adjacency {
        if !contracted[n as usize] && seen.insert(n) {
            out.push(n);
        }
    }
    out
}

fn min_weight(adjacency: &[(Dense, Weight)], target: Dense) -> Weight {
    adjacency
        .iter()
        .filter(|&&(t, _)| t == target)
        .map(|&(_, w)| w)
        .min()
        .unwrap_or(INFINITE)
}

/// `I(u)` against the *current* state: recomputed on every pop, never
/// cached, so contraction reflects shortcuts inserted by nodes
/// contracted since `u` was last evaluated.
fn importance(state: &ChState, variant: QueueVariant, u: Dense) -> i64 {
    let incoming = live_neighbors(&state.rev[u as usize], &state.contracted);
    let outgoing = live_neighbors(&state.out[u as usize], &state.contracted);
    let edges_removed = incoming.len() + outgoing.len();

    let mut shortcuts = 0usize;
    for &p in &incoming {
        let w_pu = min_weight(&state.out[p as usize], u);
        for &q in &outgoing {
            if p == q {
                continue;
            }
            let w_uq = min_weight(&state.out[u as usize], q);
            let d_star = w_pu.saturating_add(w_uq);
            let witness_dist = witness::search(state, variant, p, q, u, d_star);
            if witness_dist > d_star {
                shortcuts += 1;
            }
        }
    }

    shortcuts as i64 - edges_removed as i64
}

fn add_shortcut(state: &mut ChState, p: Dense, q: Dense, weight: Weight, middle: Dense) {
    state.out[p as usize].push((q, weight));
    state.rev[q as usize].push((p, weight));
    state.shortcut_witness.insert((p, q), middle);
    log::trace!("shortcut {p} -> {q} via {middle} (weight {weight})");
}

/// Contract `u`: for every live `(p, q)` predecessor/successor pair,
/// insert a shortcut unless a witness path no longer than `d*` survives
/// in the non-contracted subgraph without `u`.
fn contract_node(state: &mut ChState, variant: QueueVariant, u: Dense) {
    let incoming = live_neighbors(&state.rev[u as usize], &state.contracted);
    let outgoing = live_neighbors(&state.out[u as usize], &state.contracted);

    for &p in &incoming {
        let w_pu = min_weight(&state.out[p as usize], u);
        for &q in &outgoing {
            if p == q {
                continue;
            }
            let w_uq = min_weight(&state.out[u as usize], q);
            let d_star = w_pu.saturating_add(w_uq);
            let witness_dist = witness::search(state, variant, p, q, u, d_star);
            if witness_dist > d_star {
                add_shortcut(state, p, q, d_star, u);
            }
        }
    }
}

/// The full lazy best-first contraction loop: push every node keyed by
/// its initial importance, then repeatedly pop the candidate, recheck
/// its importance against the new minimum, defer if it got worse, and
/// otherwise contract it and assign the next rank.
pub(super) fn run(state: &mut ChState) {
    // Witness searches only ever need non-negative graph weights, so any
    // variant works; the binary heap keeps preprocessing independent of
    // the variant callers picked for querying.
    let witness_variant = QueueVariant::Binary;

    let n = state.out.len();
    log::debug!("preprocess: starting contraction of {n} nodes");
    let mut queue: BinaryHeap<Dense> = BinaryHeap::new();
    for u in 0..n as Dense {
        queue
            .insert(u, biased(importance(state, witness_variant, u)))
            .expect("each node inserted once");
    }

    let mut next_rank: u32 = 0;
    while let Some((u, _)) = queue.extract_min() {
        let current = importance(state, witness_variant, u);
        if let Some((_, next_key)) = queue.peek() {
            if biased(current) > next_key {
                log::trace!("defer {u}: importance {current} worse than next key");
                queue.insert(u, biased(current)).expect("u just extracted");
                continue;
            }
        }

        log::trace!("contract {u}: rank {next_rank}, importance {current}");
        state.rank[u as usize] = next_rank;
        next_rank += 1;
        contract_node(state, witness_variant, u);
        state.contracted[u as usize] = true;
    }

    log::info!(
        "preprocess: contracted {n} nodes, inserted {} shortcuts",
        state.shortcut_witness.len()
    );
}
