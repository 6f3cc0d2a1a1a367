//! Nodes of the prefix tree.

/// Frequency carried by nodes rebuilt from a tree header, where counts are not transmitted
pub const UNKNOWN_FREQ: u64 = 0;

/// A node owns its children, so the root owns the whole tree.
#[derive(Debug,Clone,PartialEq,Eq)]
pub enum SymbolNode {
    Leaf {
        symbol: usize,
        freq: u64
    },
    Internal {
        freq: u64,
        left: Box<SymbolNode>,
        right: Box<SymbolNode>
    }
}

impl SymbolNode {
    pub fn leaf(symbol: usize,freq: u64) -> Self {
        Self::Leaf { symbol, freq }
    }
    /// Combine two nodes under a new parent, `left` is the one that came out of the queue first.
    pub fn combine(left: SymbolNode,right: SymbolNode) -> Self {
        Self::Internal {
            freq: left.freq() + right.freq(),
            left: Box::new(left),
            right: Box::new(right)
        }
    }
    pub fn freq(&self) -> u64 {
        match self {
            Self::Leaf { freq, .. } => *freq,
            Self::Internal { freq, .. } => *freq
        }
    }
    pub fn is_leaf(&self) -> bool {
        matches!(self,Self::Leaf { .. })
    }
}

#[test]
fn combine_sums_frequencies() {
    let n = SymbolNode::combine(SymbolNode::leaf(b'C' as usize,2),SymbolNode::leaf(256,1));
    assert_eq!(n.freq(),3);
    assert!(!n.is_leaf());
    match n {
        SymbolNode::Internal { left, .. } => assert_eq!(*left,SymbolNode::leaf(b'C' as usize,2)),
        _ => panic!("expected internal node")
    }
}
