//! Open set for the A* search.
//!
//! A binary min-heap with decrease-key by lazy deletion: every cell has at most
//! one live entry, tracked in `live`. Superseded heap entries are skipped when
//! they surface. Equal priorities come out in insertion order.

use crate::error::SearchError;
use crate::grid::Cost;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

#[derive(Debug, Clone)]
struct FrontierEntry<K> {
    priority: Cost,
    seq: u64,
    key: K,
}

impl<K> PartialEq for FrontierEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<K> Eq for FrontierEntry<K> {}

impl<K> PartialOrd for FrontierEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for FrontierEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone)]
pub struct PriorityFrontier<K> {
    heap: BinaryHeap<FrontierEntry<K>>,
    live: HashMap<K, (Cost, u64)>,
    next_seq: u64,
}

impl<K: Copy + Eq + Hash> Default for PriorityFrontier<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> PriorityFrontier<K> {
    pub fn new() -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Insert `key`, or lower its priority if `priority` is strictly cheaper.
    ///
    /// Returns false (and changes nothing) when the live entry is already as cheap.
    /// A decrease takes a fresh sequence number, so it queues behind entries
    /// that already hold the same priority.
    pub fn insert_or_decrease(&mut self, key: K, priority: Cost) -> bool {
        if let Some(&(current, _)) = self.live.get(&key) {
            if current <= priority {
                return false;
            }
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(key, (priority, seq));
        self.heap.push(FrontierEntry { priority, seq, key });
        true
    }

    /// Remove and return the cheapest live entry
    pub fn extract_min(&mut self) -> Result<(K, Cost), SearchError> {
        while let Some(entry) = self.heap.pop() {
            if self.live.get(&entry.key) == Some(&(entry.priority, entry.seq)) {
                self.live.remove(&entry.key);
                return Ok((entry.key, entry.priority));
            }
        }
        Err(SearchError::EmptyFrontier)
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.live.contains_key(key)
    }

    pub fn priority_of(&self, key: &K) -> Option<Cost> {
        self.live.get(key).map(|&(p, _)| p)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
        self.next_seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_priority_order() {
        let mut f = PriorityFrontier::new();
        f.insert_or_decrease('a', 5);
        f.insert_or_decrease('b', 1);
        f.insert_or_decrease('c', 3);
        assert_eq!(f.extract_min(), Ok(('b', 1)));
        assert_eq!(f.extract_min(), Ok(('c', 3)));
        assert_eq!(f.extract_min(), Ok(('a', 5)));
        assert!(f.is_empty());
    }

    #[test]
    fn equal_priorities_are_fifo() {
        let mut f = PriorityFrontier::new();
        for key in ['x', 'y', 'z'] {
            f.insert_or_decrease(key, 4);
        }
        assert_eq!(f.extract_min().unwrap().0, 'x');
        assert_eq!(f.extract_min().unwrap().0, 'y');
        assert_eq!(f.extract_min().unwrap().0, 'z');
    }

    #[test]
    fn decrease_key_keeps_one_live_entry() {
        let mut f = PriorityFrontier::new();
        assert!(f.insert_or_decrease('a', 9));
        assert!(f.insert_or_decrease('b', 5));
        assert!(f.insert_or_decrease('a', 2));
        assert_eq!(f.len(), 2);
        assert_eq!(f.priority_of(&'a'), Some(2));

        assert_eq!(f.extract_min(), Ok(('a', 2)));
        assert_eq!(f.extract_min(), Ok(('b', 5)));
        // The superseded ('a', 9) heap entry must not resurface
        assert!(f.is_empty());
        assert_eq!(f.extract_min(), Err(SearchError::EmptyFrontier));
    }

    #[test]
    fn higher_or_equal_priority_is_a_no_op() {
        let mut f = PriorityFrontier::new();
        f.insert_or_decrease('a', 3);
        assert!(!f.insert_or_decrease('a', 3));
        assert!(!f.insert_or_decrease('a', 7));
        assert_eq!(f.priority_of(&'a'), Some(3));
    }

    #[test]
    fn decreased_entry_queues_behind_existing_ties() {
        let mut f = PriorityFrontier::new();
        f.insert_or_decrease('a', 8);
        f.insert_or_decrease('b', 4);
        f.insert_or_decrease('a', 4);
        assert_eq!(f.extract_min().unwrap().0, 'b');
        assert_eq!(f.extract_min().unwrap().0, 'a');
    }

    #[test]
    fn empty_frontier_errors() {
        let mut f: PriorityFrontier<u8> = PriorityFrontier::new();
        assert!(f.is_empty());
        assert_eq!(f.extract_min(), Err(SearchError::EmptyFrontier));
    }

    #[test]
    fn reinsert_after_extract() {
        let mut f = PriorityFrontier::new();
        f.insert_or_decrease(1u32, 2);
        assert_eq!(f.extract_min(), Ok((1, 2)));
        assert!(!f.contains(&1));
        assert!(f.insert_or_decrease(1, 6));
        assert_eq!(f.extract_min(), Ok((1, 6)));
    }
}
