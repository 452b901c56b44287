//! Array-backed binary min-heap with an auxiliary position index.
//!
//! Mirrors `examples/original_source/src/data_structures/binary_heap.py`:
//! `insert`/`extract_min` in `O(log n)`, `decrease_key` in `O(log n)` via
//! an indexed sift-up, `contains` in `O(1)` via the position map.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use super::PriorityQueue;
use crate::error::Error;
use crate::graph::Weight;

#[derive(Debug, Clone)]
pub struct BinaryHeap<N>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    heap: Vec<(N, Weight)>,
    position: FxHashMap<N, usize>,
}

impl<N> BinaryHeap<N>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    pub fn new() -> Self {
        BinaryHeap {
            heap: Vec::new(),
            position: FxHashMap::default(),
        }
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }

    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.heap.swap(i, j);
        self.position.insert(self.heap[i].0.clone(), i);
        self.position.insert(self.heap[j].0.clone(), j);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = Self::parent(i);
            if self.heap[i].1 < self.heap[p].1 {
                self.swap(i, p);
                i = p;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let (l, r) = (Self::left(i), Self::right(i));
            let mut smallest = i;
            if l < n && self.heap[l].1 < self.heap[smallest].1 {
                smallest = l;
            }
            if r < n && self.heap[r].1 < self.heap[smallest].1 {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<N> Default for BinaryHeap<N>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> PriorityQueue<N> for BinaryHeap<N>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    fn insert(&mut self, node: N, priority: Weight) -> Result<(), Error<N>> {
        if self.position.contains_key(&node) {
            return Err(Error::DuplicateNode(node));
        }
        self.heap.push((node.clone(), priority));
        let idx = self.heap.len() - 1;
        self.position.insert(node, idx);
        self.sift_up(idx);
        Ok(())
    }

    fn extract_min(&mut self) -> Option<(N, Weight)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (node, priority) = self.heap.pop().unwrap();
        self.position.remove(&node);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((node, priority))
    }

    fn decrease_key(&mut self, node: &N, priority: Weight) -> Result<(), Error<N>> {
        let Some(&idx) = self.position.get(node) else {
            return Err(Error::MissingNode(node.clone()));
        };
        if priority >= self.heap[idx].1 {
            return Ok(());
        }
        self.heap[idx].1 = priority;
        self.sift_up(idx);
        Ok(())
    }

    fn contains(&self, node: &N) -> bool {
        self.position.contains_key(node)
    }

    fn size(&self) -> usize {
        self.heap.len()
    }

    fn peek(&self) -> Option<(&N, Weight)> {
        self.heap.first().map(|(n, p)| (n, *p))
    }
}
