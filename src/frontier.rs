//! Open sets for the A* engine. Entries are arena indices into the
//! [SearchContext](crate::SearchContext) side table, scored by their `f` value.
use fxhash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

pub trait Frontier<C> {
    /// Adds a node that is not on the frontier yet.
    fn push(&mut self, index: usize, estimated_cost: C);
    /// Lowers the score of a node that is still on the frontier.
    fn decrease(&mut self, index: usize, estimated_cost: C);
    /// Removes and returns the node with the lowest score. Among equal scores
    /// the most recently pushed node wins.
    fn pop(&mut self) -> Option<usize>;
    fn len(&self) -> usize;
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unordered list that is sorted by descending score before every pop, after
/// which the tail is taken. The sort is stable, which fixes the tie-break.
#[derive(Clone, Debug)]
pub struct SortedFrontier<C> {
    entries: Vec<(usize, C)>,
}

impl<C> Default for SortedFrontier<C> {
    fn default() -> Self {
        SortedFrontier {
            entries: Vec::new(),
        }
    }
}

impl<C: PartialOrd + Copy> Frontier<C> for SortedFrontier<C> {
    fn push(&mut self, index: usize, estimated_cost: C) {
        self.entries.push((index, estimated_cost));
    }

    fn decrease(&mut self, index: usize, estimated_cost: C) {
        if let Some(entry) = self.entries.iter_mut().find(|(i, _)| *i == index) {
            entry.1 = estimated_cost;
        }
    }

    fn pop(&mut self) -> Option<usize> {
        self.entries
            .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        self.entries.pop().map(|(index, _)| index)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

struct SmallestCostHolder<C> {
    estimated_cost: C,
    seq: u64,
    index: usize,
}

impl<C: PartialOrd> Eq for SmallestCostHolder<C> {}

impl<C: PartialOrd> PartialEq for SmallestCostHolder<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: PartialOrd> PartialOrd for SmallestCostHolder<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: PartialOrd> Ord for SmallestCostHolder<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lowest estimate first, then the latest push, mirroring the stable
        // descending sort of SortedFrontier.
        match other.estimated_cost.partial_cmp(&self.estimated_cost) {
            Some(Ordering::Equal) | None => self.seq.cmp(&other.seq),
            Some(s) => s,
        }
    }
}

/// Binary heap with lazy deletion. Pops in the same order as [SortedFrontier]
/// as long as scores are never decreased; a decreased node keeps its original
/// push order for tie-breaking.
pub struct HeapFrontier<C> {
    heap: BinaryHeap<SmallestCostHolder<C>>,
    // Live entries: push sequence number and current score.
    live: FxHashMap<usize, (u64, C)>,
    next_seq: u64,
}

impl<C> Default for HeapFrontier<C> {
    fn default() -> Self {
        HeapFrontier {
            heap: BinaryHeap::new(),
            live: FxHashMap::default(),
            next_seq: 0,
        }
    }
}

impl<C: PartialOrd + Copy> Frontier<C> for HeapFrontier<C> {
    fn push(&mut self, index: usize, estimated_cost: C) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(index, (seq, estimated_cost));
        self.heap.push(SmallestCostHolder {
            estimated_cost,
            seq,
            index,
        });
    }

    fn decrease(&mut self, index: usize, estimated_cost: C) {
        if let Some(entry) = self.live.get_mut(&index) {
            entry.1 = estimated_cost;
            self.heap.push(SmallestCostHolder {
                estimated_cost,
                seq: entry.0,
                index,
            });
        }
    }

    fn pop(&mut self) -> Option<usize> {
        while let Some(SmallestCostHolder {
            estimated_cost,
            index,
            ..
        }) = self.heap.pop()
        {
            // Entries superseded by a decrease are skipped.
            let current = match self.live.get(&index) {
                Some(&(_, c)) => c,
                None => continue,
            };
            if current == estimated_cost {
                self.live.remove(&index);
                return Some(index);
            }
        }
        None
    }

    fn len(&self) -> usize {
        self.live.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
        self.next_seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<F: Frontier<i32>>(mut frontier: F) -> Vec<usize> {
        std::iter::from_fn(|| frontier.pop()).collect()
    }

    fn filled<F: Frontier<i32> + Default>() -> F {
        let mut frontier = F::default();
        for (index, f) in [(0, 5), (1, 3), (2, 5), (3, 3), (4, 1), (5, 5)] {
            frontier.push(index, f);
        }
        frontier
    }

    #[test]
    fn sorted_pops_lowest_latest_first() {
        let frontier: SortedFrontier<i32> = filled();
        assert_eq!(drain(frontier), vec![4, 3, 1, 5, 2, 0]);
    }

    #[test]
    fn heap_matches_sorted_order() {
        let sorted: SortedFrontier<i32> = filled();
        let heap: HeapFrontier<i32> = filled();
        assert_eq!(drain(sorted), drain(heap));
    }

    #[test]
    fn decrease_reorders() {
        let mut sorted: SortedFrontier<i32> = filled();
        let mut heap: HeapFrontier<i32> = filled();
        sorted.decrease(0, 0);
        heap.decrease(0, 0);
        assert_eq!(sorted.len(), 6);
        assert_eq!(heap.len(), 6);
        assert_eq!(sorted.pop(), Some(0));
        assert_eq!(heap.pop(), Some(0));
        assert_eq!(heap.len(), 5);
    }

    #[test]
    fn decrease_of_absent_node_is_ignored() {
        let mut heap: HeapFrontier<i32> = HeapFrontier::default();
        heap.decrease(7, 1);
        assert!(heap.is_empty());
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn interleaved_pushes_keep_tie_break() {
        let mut sorted: SortedFrontier<f64> = SortedFrontier::default();
        let mut heap: HeapFrontier<f64> = HeapFrontier::default();
        let mut order = (Vec::new(), Vec::new());
        for round in 0..4usize {
            for k in 0..3usize {
                let index = round * 3 + k;
                let f = (index % 2) as f64;
                sorted.push(index, f);
                heap.push(index, f);
            }
            order.0.push(sorted.pop());
            order.1.push(heap.pop());
        }
        assert_eq!(order.0, order.1);
        sorted.clear();
        heap.clear();
        assert!(sorted.is_empty() && heap.is_empty());
    }
}
