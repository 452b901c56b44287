//! Fibonacci heap: a circular doubly-linked root list of heap-ordered
//! trees, with a cached pointer to the minimum.
//!
//! Mirrors `examples/original_source/src/data_structures/fibonacci_heap.py`
//! exactly (insert / extract-min / decrease-key / consolidate / cut /
//! cascading-cut), with one structural change: the reference's cyclic
//! `parent`/`child`/`left`/`right` object pointers are encoded here as
//! indices into a slab (`Vec<FibNode<N>>`), with a free list recycling
//! slots vacated by `extract_min`. This sidesteps the need for unsafe or
//! reference-counted cycles under Rust's ownership rules.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use super::PriorityQueue;
use crate::error::Error;
use crate::graph::Weight;

type Slot = usize;

struct FibNode<N> {
    node: Option<N>,
    key: Weight,
    parent: Option<Slot>,
    child: Option<Slot>,
    left: Slot,
    right: Slot,
    degree: usize,
    mark: bool,
}

pub struct FibonacciHeap<N>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    arena: Vec<FibNode<N>>,
    free: Vec<Slot>,
    min: Option<Slot>,
    count: usize,
    index_of: FxHashMap<N, Slot>,
}

impl<N> FibonacciHeap<N>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    pub fn new() -> Self {
        FibonacciHeap {
            arena: Vec::new(),
            free: Vec::new(),
            min: None,
            count: 0,
            index_of: FxHashMap::default(),
        }
    }

    fn alloc(&mut self, node: N, key: Weight) -> Slot {
        let fresh = FibNode {
            node: Some(node),
            key,
            parent: None,
            child: None,
            left: 0,
            right: 0,
            degree: 0,
            mark: false,
        };
        if let Some(slot) = self.free.pop() {
            self.arena[slot] = fresh;
            self.arena[slot].left = slot;
            self.arena[slot].right = slot;
            slot
        } else {
            let slot = self.arena.len();
            self.arena.push(fresh);
            self.arena[slot].left = slot;
            self.arena[slot].right = slot;
            slot
        }
    }

    fn merge_with_root_list(&mut self, slot: Slot) {
        match self.min {
            None => {
                self.arena[slot].left = slot;
                self.arena[slot].right = slot;
                self.min = Some(slot);
            }
            Some(min) => {
                let min_right = self.arena[min].right;
                self.arena[slot].left = min;
                self.arena[slot].right = min_right;
                self.arena[min_right].left = slot;
                self.arena[min].right = slot;
            }
        }
    }

    fn remove_from_list(&mut self, slot: Slot) {
        let (l, r) = (self.arena[slot].left, self.arena[slot].right);
        self.arena[l].right = r;
        self.arena[r].left = l;
    }

    /// Collect every slot in the circular list starting at `head`.
    fn iterate(&self, head: Slot) -> Vec<Slot> {
        let mut out = Vec::new();
        let mut node = head;
        loop {
            out.push(node);
            node = self.arena[node].right;
            if node == head {
                break;
            }
        }
        out
    }

    fn link(&mut self, y: Slot, x: Slot) {
        self.remove_from_list(y);
        self.arena[y].parent = Some(x);
        match self.arena[x].child {
            None => {
                self.arena[x].child = Some(y);
                self.arena[y].left = y;
                self.arena[y].right = y;
            }
            Some(c) => {
                let c_right = self.arena[c].right;
                self.arena[y].left = c;
                self.arena[y].right = c_right;
                self.arena[c_right].left = y;
                self.arena[c].right = y;
            }
        }
        self.arena[x].degree += 1;
        self.arena[y].mark = false;
    }

    fn consolidate(&mut self) {
        let max_degree = log2_floor(self.count) + 2;
        let mut a: Vec<Option<Slot>> = vec![None; max_degree];

        let roots = self.iterate(self.min.expect("consolidate called with empty root list"));
        for w in roots {
            let mut x = w;
            let mut d = self.arena[x].degree;
            while let Some(y) = a.get(d).copied().flatten() {
                let mut y = y;
                if self.arena[x].key > self.arena[y].key {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                a[d] = None;
                d += 1;
                if d >= a.len() {
                    a.push(None);
                }
            }
            a[d] = Some(x);
        }

        self.min = None;
        for slot in a.into_iter().flatten() {
            match self.min {
                None => {
                    self.arena[slot].left = slot;
                    self.arena[slot].right = slot;
                    self.min = Some(slot);
                }
                Some(min) => {
                    self.merge_with_root_list(slot);
                    if self.arena[slot].key < self.arena[min].key {
                        self.min = Some(slot);
                    }
                }
            }
        }
    }

    fn cut(&mut self, x: Slot, y: Slot) {
        if self.arena[y].child == Some(x) {
            let x_right = self.arena[x].right;
            self.arena[y].child = if x_right != x { Some(x_right) } else { None };
        }
        self.remove_from_list(x);
        self.arena[y].degree -= 1;
        self.merge_with_root_list(x);
        self.arena[x].parent = None;
        self.arena[x].mark = false;
    }

    fn cascading_cut(&mut self, y: Slot) {
        if let Some(z) = self.arena[y].parent {
            if !self.arena[y].mark {
                self.arena[y].mark = true;
            } else {
                self.cut(y, z);
                self.cascading_cut(z);
            }
        }
    }
}

impl<N> Default for FibonacciHeap<N>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> PriorityQueue<N> for FibonacciHeap<N>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    fn insert(&mut self, node: N, priority: Weight) -> Result<(), Error<N>> {
        if self.index_of.contains_key(&node) {
            return Err(Error::DuplicateNode(node));
        }
        let slot = self.alloc(node.clone(), priority);
        self.merge_with_root_list(slot);
        match self.min {
            Some(min) if self.arena[min].key <= priority => {}
            _ => self.min = Some(slot),
        }
        self.index_of.insert(node, slot);
        self.count += 1;
        Ok(())
    }

    fn extract_min(&mut self) -> Option<(N, Weight)> {
        let z = self.min?;

        if let Some(child) = self.arena[z].child {
            for x in self.iterate(child) {
                self.merge_with_root_list(x);
                self.arena[x].parent = None;
            }
        }

        self.remove_from_list(z);
        let key = self.arena[z].key;
        let node = self.arena[z].node.take().expect("live slot always has a node");
        self.index_of.remove(&node);
        self.count -= 1;

        let z_right = self.arena[z].right;
        if z_right == z {
            self.min = None;
        } else {
            self.min = Some(z_right);
            self.consolidate();
        }
        self.free.push(z);

        Some((node, key))
    }

    fn decrease_key(&mut self, node: &N, priority: Weight) -> Result<(), Error<N>> {
        let Some(&x) = self.index_of.get(node) else {
            return Err(Error::MissingNode(node.clone()));
        };
        if priority >= self.arena[x].key {
            return Ok(());
        }
        self.arena[x].key = priority;
        if let Some(y) = self.arena[x].parent {
            if self.arena[x].key < self.arena[y].key {
                self.cut(x, y);
                self.cascading_cut(y);
            }
        }
        if self.arena[x].key < self.arena[self.min.expect("non-empty when decreasing")].key {
            self.min = Some(x);
        }
        Ok(())
    }

    fn contains(&self, node: &N) -> bool {
        self.index_of.contains_key(node)
    }

    fn size(&self) -> usize {
        self.count
    }

    fn peek(&self) -> Option<(&N, Weight)> {
        self.min
            .map(|m| (self.arena[m].node.as_ref().expect("live slot"), self.arena[m].key))
    }
}

fn log2_floor(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        (usize::BITS - 1 - n.leading_zeros()) as usize
    }
}
