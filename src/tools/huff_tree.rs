//! Static Huffman tree.
//!
//! The tree is either built from a `FreqQueue`, or rebuilt from the pre-order
//! structure written by `write_tree`.  In the structure an internal node is a 0 bit,
//! a leaf is a 1 bit followed by the symbol in `BITS_PER_WORD+1` bits, the extra bit
//! being needed for the end of data marker.

use bit_vec::BitVec;
use std::collections::HashMap;
use std::io::{Read,Write};
use super::bit_io::{BitReader,BitWriter};
use super::freq_queue::FreqQueue;
use super::node::{SymbolNode,UNKNOWN_FREQ};
use crate::{Error,DYNERR,BITS_PER_WORD,ALPH_SIZE,PSEUDO_EOF};

const INTERNAL_NODE: bool = false;
const GO_LEFT: bool = false;
/// bits in a symbol stored in the tree structure
const TREE_SYMBOL_BITS: usize = BITS_PER_WORD + 1;
/// nodes in a full tree with every symbol and the end of data marker
const MAX_NODES: usize = 2 * (ALPH_SIZE + 1) - 1;

/// map from symbol to its path from the root, false is left, true is right
pub type PathTable = HashMap<usize,BitVec>;

/// Internal node during reconstruction, waiting for its children in pre-order.
/// A node is done as soon as its right child arrives, at which point it is
/// taken off the stack and attached to its own parent.
enum Slot {
    AwaitingLeft,
    AwaitingRight(SymbolNode)
}

#[derive(Debug,Clone)]
pub struct HuffmanTree {
    root: SymbolNode
}

/// Bits needed to store the structure of the subtree at `node`, 0 if there is no node.
pub fn count_tree_bits(node: Option<&SymbolNode>) -> usize {
    match node {
        None => 0,
        Some(SymbolNode::Leaf { .. }) => 1 + TREE_SYMBOL_BITS,
        Some(SymbolNode::Internal { left, right, .. }) => {
            1 + count_tree_bits(Some(left.as_ref())) + count_tree_bits(Some(right.as_ref()))
        }
    }
}

impl HuffmanTree {
    /// Combine the two lowest nodes until a single node remains, which becomes the root.
    /// The first node dequeued is always the left child.
    pub fn create(que: &mut FreqQueue) -> Result<Self,Error> {
        while que.size() > 1 {
            let left = que.dequeue()?;
            let right = que.dequeue()?;
            que.enqueue(SymbolNode::combine(left,right));
        }
        if que.is_empty() {
            return Err(Error::EmptyQueue);
        }
        log::debug!("tree built with total frequency {}",que.front()?.freq());
        Ok(Self { root: que.dequeue()? })
    }
    /// Rebuild the tree from the structure written by `write_tree`.
    /// Reconstructed nodes carry `UNKNOWN_FREQ`.
    pub fn recreate<R: Read>(bit: &mut BitReader<R>) -> Result<Self,DYNERR> {
        let mut pending: Vec<Slot> = Vec::new();
        let mut nodes_read = 0;
        loop {
            nodes_read += 1;
            if nodes_read > MAX_NODES {
                log::error!("tree structure has more than {} nodes",MAX_NODES);
                return Err(Box::new(Error::MalformedTree));
            }
            let mut done = match bit.get_bit()? {
                None => return Err(Box::new(Error::UnexpectedEnd)),
                Some(INTERNAL_NODE) => {
                    pending.push(Slot::AwaitingLeft);
                    continue;
                },
                Some(_) => {
                    let symbol = match bit.get_code::<usize>(TREE_SYMBOL_BITS)? {
                        Some(s) => s,
                        None => return Err(Box::new(Error::UnexpectedEnd))
                    };
                    if symbol > PSEUDO_EOF {
                        log::error!("leaf symbol {} is out of range",symbol);
                        return Err(Box::new(Error::MalformedTree));
                    }
                    SymbolNode::leaf(symbol,UNKNOWN_FREQ)
                }
            };
            // attach the finished subtree, finishing parents whose right child this was
            loop {
                match pending.pop() {
                    Some(Slot::AwaitingLeft) => {
                        pending.push(Slot::AwaitingRight(done));
                        break;
                    },
                    Some(Slot::AwaitingRight(left)) => {
                        done = SymbolNode::Internal {
                            freq: UNKNOWN_FREQ,
                            left: Box::new(left),
                            right: Box::new(done)
                        };
                    },
                    None => {
                        let tree = Self { root: done };
                        tree.verify()?;
                        return Ok(tree);
                    }
                }
            }
        }
    }
    /// Make sure decoding can terminate, the end of data marker must be a leaf.
    /// This also rules out a lone root leaf that is anything else.
    fn verify(&self) -> Result<(),Error> {
        if !Self::has_leaf(&self.root,PSEUDO_EOF) {
            log::error!("tree has no end of data marker");
            return Err(Error::MalformedTree);
        }
        Ok(())
    }
    fn has_leaf(n: &SymbolNode,target: usize) -> bool {
        match n {
            SymbolNode::Leaf { symbol, .. } => *symbol == target,
            SymbolNode::Internal { left, right, .. } => Self::has_leaf(left,target) || Self::has_leaf(right,target)
        }
    }
    pub fn root(&self) -> &SymbolNode {
        &self.root
    }
    /// Paths to every leaf, a root that is a leaf gets the empty path.
    pub fn path_table(&self) -> PathTable {
        let mut table = PathTable::new();
        let mut path = BitVec::new();
        Self::travel(&self.root,&mut path,&mut table);
        table
    }
    fn travel(n: &SymbolNode,path: &mut BitVec,table: &mut PathTable) {
        match n {
            SymbolNode::Leaf { symbol, .. } => {
                table.insert(*symbol,path.clone());
            },
            SymbolNode::Internal { left, right, .. } => {
                path.push(false);
                Self::travel(left,path,table);
                path.pop();
                path.push(true);
                Self::travel(right,path,table);
                path.pop();
            }
        }
    }
    /// bits that `write_tree` will produce
    pub fn size_in_bits(&self) -> usize {
        count_tree_bits(Some(&self.root))
    }
    /// Write the pre-order structure, returns the number of bits written.
    pub fn write_tree<W: Write>(&self,bot: &mut BitWriter<W>) -> Result<usize,std::io::Error> {
        Self::write_node(&self.root,bot)
    }
    fn write_node<W: Write>(n: &SymbolNode,bot: &mut BitWriter<W>) -> Result<usize,std::io::Error> {
        match n {
            SymbolNode::Leaf { symbol, .. } => {
                bot.put_bit(!INTERNAL_NODE)?;
                bot.put_code(TREE_SYMBOL_BITS,*symbol)?;
                Ok(1 + TREE_SYMBOL_BITS)
            },
            SymbolNode::Internal { left, right, .. } => {
                bot.put_bit(INTERNAL_NODE)?;
                let mut sum = 1;
                sum += Self::write_node(left,bot)?;
                sum += Self::write_node(right,bot)?;
                Ok(sum)
            }
        }
    }
    /// Walk the tree following bits from `bit`.  At a leaf, emit the symbol and
    /// go back to the root without consuming a bit, until the end of data marker is reached.
    /// Returns the number of bits written.  Trees from `create` and `recreate` always have the marker.
    pub fn decode<R: Read,W: Write>(&self,bit: &mut BitReader<R>,bot: &mut BitWriter<W>) -> Result<u64,DYNERR> {
        let mut written: u64 = 0;
        let mut trav = &self.root;
        log::debug!("entering payload loop");
        loop {
            match trav {
                SymbolNode::Leaf { symbol, .. } if *symbol == PSEUDO_EOF => {
                    break;
                },
                SymbolNode::Leaf { symbol, .. } => {
                    log::trace!("decoded {}",symbol);
                    bot.put_code(BITS_PER_WORD,*symbol)?;
                    written += BITS_PER_WORD as u64;
                    trav = &self.root;
                },
                SymbolNode::Internal { left, right, .. } => {
                    trav = match bit.get_bit()? {
                        Some(GO_LEFT) => left.as_ref(),
                        Some(_) => right.as_ref(),
                        None => return Err(Box::new(Error::UnexpectedEnd))
                    };
                }
            }
        }
        log::debug!("end of data after {} bits",written);
        Ok(written)
    }
}

#[cfg(test)]
fn tree_from_bytes(dat: &[u8]) -> HuffmanTree {
    let mut counts = vec![0u32;ALPH_SIZE];
    for b in dat {
        counts[*b as usize] += 1;
    }
    HuffmanTree::create(&mut FreqQueue::from_counts(&counts)).expect("could not build tree")
}

#[cfg(test)]
fn path_str(table: &PathTable,symbol: usize) -> String {
    table[&symbol].iter().map(|b| if b {'1'} else {'0'}).collect()
}

#[test]
fn scenario_paths() {
    // A=5, B=3, C=2, EOF=1; EOF pairs with C, then the new 3 goes behind B
    let tree = tree_from_bytes("AAAAABBBCC".as_bytes());
    let table = tree.path_table();
    assert_eq!(table.len(),4);
    assert_eq!(path_str(&table,b'A' as usize),"0");
    assert_eq!(path_str(&table,b'B' as usize),"10");
    assert_eq!(path_str(&table,PSEUDO_EOF),"110");
    assert_eq!(path_str(&table,b'C' as usize),"111");
    assert_eq!(tree.root().freq(),11);
    assert_eq!(tree.size_in_bits(),43);
}

#[test]
fn empty_input_tree() {
    let tree = tree_from_bytes(&[]);
    assert!(tree.root().is_leaf());
    assert_eq!(tree.path_table()[&PSEUDO_EOF].len(),0);
    assert_eq!(count_tree_bits(None),0);
    assert_eq!(tree.size_in_bits(),10);
}

#[test]
fn paths_are_prefix_free() {
    let samples: Vec<Vec<u8>> = vec![
        "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes().to_vec(),
        (0..=255u8).collect(),
        (0..3000u32).map(|i| ((i*i) % 251) as u8).collect()
    ];
    for dat in samples {
        let table = tree_from_bytes(&dat).path_table();
        let paths: Vec<&BitVec> = table.values().collect();
        for (i,p) in paths.iter().enumerate() {
            for (j,q) in paths.iter().enumerate() {
                if i != j && p.len() <= q.len() {
                    let is_prefix = p.iter().zip(q.iter()).all(|(a,b)| a==b);
                    assert!(!is_prefix,"path {:?} is a prefix of {:?}",p,q);
                }
            }
        }
    }
}

#[test]
fn structure_round_trip() {
    let tree = tree_from_bytes("I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes());
    let mut buf: Vec<u8> = Vec::new();
    let mut bot = BitWriter::new(&mut buf);
    let written = tree.write_tree(&mut bot).expect("write failed");
    bot.finish().expect("flush failed");
    assert_eq!(written,tree.size_in_bits());
    let mut bit = BitReader::new(buf.as_slice());
    let rebuilt = HuffmanTree::recreate(&mut bit).expect("recreate failed");
    assert_eq!(bit.bits_read() as usize,tree.size_in_bits());
    assert_eq!(rebuilt.path_table(),tree.path_table());
    assert_eq!(rebuilt.root().freq(),UNKNOWN_FREQ);
}

#[test]
fn truncated_structure() {
    // internal node, then a leaf whose symbol is cut off
    let buf = [0b0100_0000u8];
    let mut bit = BitReader::new(&buf[..]);
    let err = HuffmanTree::recreate(&mut bit).expect_err("should fail");
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::UnexpectedEnd)));
}

#[test]
fn structure_without_eof() {
    // 0 1'A' 1'B'
    let mut buf: Vec<u8> = Vec::new();
    let mut bot = BitWriter::new(&mut buf);
    bot.put_bit(false).expect("write failed");
    bot.put_bit(true).expect("write failed");
    bot.put_code(9,b'A' as u16).expect("write failed");
    bot.put_bit(true).expect("write failed");
    bot.put_code(9,b'B' as u16).expect("write failed");
    bot.finish().expect("flush failed");
    let err = HuffmanTree::recreate(&mut BitReader::new(buf.as_slice())).expect_err("should fail");
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::MalformedTree)));
}

#[test]
fn symbol_out_of_range() {
    let mut buf: Vec<u8> = Vec::new();
    let mut bot = BitWriter::new(&mut buf);
    bot.put_bit(true).expect("write failed");
    bot.put_code(9,300u16).expect("write failed");
    bot.finish().expect("flush failed");
    let err = HuffmanTree::recreate(&mut BitReader::new(buf.as_slice())).expect_err("should fail");
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::MalformedTree)));
}

#[test]
fn decode_stops_at_eof() {
    let tree = tree_from_bytes("AAAAABBBCC".as_bytes());
    // B A EOF, then bits that must be ignored
    let payload = [0b1001_1011u8,0xff];
    let mut out: Vec<u8> = Vec::new();
    let mut bot = BitWriter::new(&mut out);
    let mut bit = BitReader::new(&payload[..]);
    assert_eq!(tree.decode(&mut bit,&mut bot).expect("decode failed"),16);
    bot.finish().expect("flush failed");
    assert_eq!(out,"BA".as_bytes().to_vec());
}

#[test]
fn decode_past_end() {
    let tree = tree_from_bytes("AAAAABBBCC".as_bytes());
    let payload = [0u8];
    let mut out: Vec<u8> = Vec::new();
    let mut bot = BitWriter::new(&mut out);
    let err = tree.decode(&mut BitReader::new(&payload[..]),&mut bot).expect_err("should fail");
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::UnexpectedEnd)));
}

#[test]
fn eof_leaf_is_found() {
    for dat in [&b""[..],&b"z"[..],&b"AAAAABBBCC"[..]] {
        let tree = tree_from_bytes(dat);
        assert!(HuffmanTree::has_leaf(tree.root(),PSEUDO_EOF));
        assert!(tree.verify().is_ok());
    }
    let tree = HuffmanTree { root: SymbolNode::leaf(b'z' as usize,UNKNOWN_FREQ) };
    assert!(!HuffmanTree::has_leaf(tree.root(),PSEUDO_EOF));
    assert!(matches!(tree.verify(),Err(Error::MalformedTree)));
}
