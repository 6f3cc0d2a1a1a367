//! # huffpress
//!
//! Lossless compression of byte streams with a static Huffman code.
//! The whole file is scanned once to count symbols, a prefix tree is built from
//! the counts, and the tree is transmitted ahead of the payload in one of two
//! header formats.  See the `huff` module for the stream layout.

mod tools;
pub mod huff;

use num_derive::FromPrimitive;

type DYNERR = Box<dyn std::error::Error>;

/// bits in one natural symbol
pub const BITS_PER_WORD: usize = 8;
/// bits in every header integer
pub const BITS_PER_INT: usize = 32;
/// number of natural symbols
pub const ALPH_SIZE: usize = 1 << BITS_PER_WORD;
/// end of data marker, one past the largest natural symbol
pub const PSEUDO_EOF: usize = ALPH_SIZE;
/// first 32 bits of every compressed stream
pub const MAGIC_NUMBER: u32 = 0xface8200;

/// Codec Errors
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("priority queue is empty")]
    EmptyQueue,
    #[error("compress called before plan")]
    NotPlanned,
    #[error("file did not start with the magic number, found {0:#010x}")]
    BadMagicNumber(u32),
    #[error("unknown header format {0}")]
    UnknownHeaderFormat(u32),
    #[error("tree header claims {expected} bits, but {actual} were read")]
    TreeSizeMismatch { expected: usize, actual: usize },
    #[error("malformed tree in header")]
    MalformedTree,
    #[error("compressed data ended before the end of data marker")]
    UnexpectedEnd,
    #[error("symbol {0} was not counted during planning")]
    SymbolNotPlanned(usize),
    #[error("file too large")]
    FileTooLarge
}

/// Header format, the numeric value is what appears in the stream
#[derive(FromPrimitive,Clone,Copy,Debug,PartialEq,Eq)]
pub enum HeaderFormat {
    /// one 32 bit count for every natural symbol
    StoreCounts = 0,
    /// 32 bit size followed by the pre-order tree structure
    StoreTree = 1
}

/// Options controlling compression
#[derive(Clone)]
pub struct Options {
    /// how the tree is sent to the decoder
    pub format: HeaderFormat,
    /// write the output even if it is larger than the input
    pub force: bool,
    /// return error if file is larger
    pub max_file_size: u64
}

pub const STD_OPTIONS: Options = Options {
    format: HeaderFormat::StoreTree,
    force: false,
    max_file_size: u32::MAX as u64
};
