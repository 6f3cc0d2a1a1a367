//! Building blocks shared by the codec driver.

pub mod bit_io;
pub mod node;
pub mod freq_queue;
pub mod huff_tree;
