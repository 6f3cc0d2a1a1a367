//! Priority queue of tree nodes, lowest frequency first.
//!
//! The order in which equal frequencies come out decides the shape of the tree,
//! and therefore the exact bits of the compressed stream.  The rule is that a node
//! goes behind every queued node with the same frequency, i.e., ties are resolved
//! in insertion order.  This is kept by pairing each node with a sequence number
//! that serves as the secondary sort key.

use std::collections::BinaryHeap;
use std::cmp::Ordering;
use super::node::SymbolNode;
use crate::{Error,ALPH_SIZE,PSEUDO_EOF};

struct Entry {
    freq: u64,
    seq: u64,
    node: SymbolNode
}

impl PartialEq for Entry {
    fn eq(&self,other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self,other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    /// reversed, so that the max-heap yields the smallest key
    fn cmp(&self,other: &Self) -> Ordering {
        (other.freq,other.seq).cmp(&(self.freq,self.seq))
    }
}

pub struct FreqQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64
}

impl FreqQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0
        }
    }
    /// Queue a leaf for every symbol with a nonzero count, in symbol order,
    /// followed by the end of data marker with frequency 1.
    /// Only the first `ALPH_SIZE` counts are considered.
    pub fn from_counts(counts: &[u32]) -> Self {
        let mut ans = Self::new();
        for (symbol,count) in counts.iter().take(ALPH_SIZE).enumerate() {
            if *count != 0 {
                ans.enqueue(SymbolNode::leaf(symbol,*count as u64));
            }
        }
        ans.enqueue(SymbolNode::leaf(PSEUDO_EOF,1));
        ans
    }
    pub fn enqueue(&mut self,node: SymbolNode) {
        let entry = Entry {
            freq: node.freq(),
            seq: self.next_seq,
            node
        };
        self.next_seq += 1;
        self.heap.push(entry);
    }
    pub fn dequeue(&mut self) -> Result<SymbolNode,Error> {
        match self.heap.pop() {
            Some(entry) => Ok(entry.node),
            None => Err(Error::EmptyQueue)
        }
    }
    pub fn front(&self) -> Result<&SymbolNode,Error> {
        match self.heap.peek() {
            Some(entry) => Ok(&entry.node),
            None => Err(Error::EmptyQueue)
        }
    }
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    pub fn size(&self) -> usize {
        self.heap.len()
    }
}

#[test]
fn ascending_with_stable_ties() {
    let mut q = FreqQueue::new();
    q.enqueue(SymbolNode::leaf(1,3));
    q.enqueue(SymbolNode::leaf(2,1));
    q.enqueue(SymbolNode::leaf(3,3));
    q.enqueue(SymbolNode::leaf(4,2));
    q.enqueue(SymbolNode::leaf(5,1));
    assert_eq!(q.size(),5);
    assert_eq!(q.front().expect("empty"),&SymbolNode::leaf(2,1));
    let order: Vec<SymbolNode> = (0..5).map(|_| q.dequeue().expect("empty")).collect();
    assert_eq!(order,vec![
        SymbolNode::leaf(2,1),
        SymbolNode::leaf(5,1),
        SymbolNode::leaf(4,2),
        SymbolNode::leaf(1,3),
        SymbolNode::leaf(3,3)
    ]);
    assert!(q.is_empty());
}

#[test]
fn late_arrival_goes_behind_equals() {
    let mut q = FreqQueue::new();
    q.enqueue(SymbolNode::leaf(b'B' as usize,3));
    q.enqueue(SymbolNode::leaf(b'A' as usize,5));
    q.enqueue(SymbolNode::combine(SymbolNode::leaf(256,1),SymbolNode::leaf(b'C' as usize,2)));
    assert_eq!(q.dequeue().expect("empty"),SymbolNode::leaf(b'B' as usize,3));
    assert_eq!(q.dequeue().expect("empty").freq(),3);
    assert_eq!(q.dequeue().expect("empty"),SymbolNode::leaf(b'A' as usize,5));
}

#[test]
fn counts_add_eof() {
    let mut counts = vec![0u32;ALPH_SIZE];
    counts[b'x' as usize] = 4;
    let mut q = FreqQueue::from_counts(&counts);
    assert_eq!(q.size(),2);
    assert_eq!(q.dequeue().expect("empty"),SymbolNode::leaf(PSEUDO_EOF,1));
    assert_eq!(q.dequeue().expect("empty"),SymbolNode::leaf(b'x' as usize,4));
}

#[test]
fn empty_queue_errors() {
    let mut q = FreqQueue::new();
    assert!(matches!(q.front(),Err(Error::EmptyQueue)));
    assert!(matches!(q.dequeue(),Err(Error::EmptyQueue)));
}
