//! Static Huffman Compression
//!
//! Compression takes two passes.  The first pass (`HuffProcessor::plan`) counts the
//! symbols, builds the tree, and works out how many bits would be saved.  The second
//! pass (`HuffProcessor::compress`) writes the stream, or refuses to if nothing would
//! be saved, unless forced.  Expansion takes one pass.
//!
//! Stream layout, all integers are 32 bits, MSB first:
//! * magic number `0xface8200`
//! * header format, 0 for counts, 1 for tree
//! * counts header: one count for each of the 256 byte values
//! * tree header: number of bits in the structure, followed by the structure
//! * the code of every byte, then the code of the end of data marker
//! * zeros to fill the last byte
//!
//! The tree built from counts depends on how ties are broken in the priority queue,
//! see `tools::freq_queue`.  Any change there makes streams with the counts header
//! unreadable by earlier versions.

use std::io::{Cursor,Read,Write,Seek,SeekFrom};
use num_traits::FromPrimitive;
use crate::tools::bit_io::{BitReader,BitWriter};
use crate::tools::freq_queue::FreqQueue;
use crate::tools::huff_tree::{HuffmanTree,PathTable};
use crate::{Error,HeaderFormat,Options,DYNERR,STD_OPTIONS};
use crate::{BITS_PER_WORD,BITS_PER_INT,ALPH_SIZE,PSEUDO_EOF,MAGIC_NUMBER};

/// Receives messages meant for whoever is running the codec.
pub trait Reporter {
    fn update(&self,msg: &str);
    fn show_error(&self,msg: &str);
}

/// Default reporter, forwards to the `log` facade.
pub struct LogReporter;

impl Reporter for LogReporter {
    fn update(&self,msg: &str) {
        log::warn!("{}",msg);
    }
    fn show_error(&self,msg: &str) {
        log::error!("{}",msg);
    }
}

/// Numbers worked out during planning
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct PlanStats {
    pub format: HeaderFormat,
    /// bits in the input
    pub bits_before: u64,
    /// bits in the compressed stream, not counting padding
    pub bits_after: u64,
    /// can be negative
    pub bits_saved: i64
}

/// What happened when compression was requested
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum Outcome {
    /// stream was written, `bits` does not count padding
    Written { bits: u64 },
    /// nothing was written, because the output would be larger by `excess_bits`
    Refused { excess_bits: u64 }
}

/// Everything the second pass needs from the first
struct Planned {
    stats: PlanStats,
    counts: Vec<u32>,
    tree: HuffmanTree,
    codes: PathTable
}

/// Codec driver.  Holds the state of one file between planning and compression,
/// so use one instance per file, or call `plan` again to start over.
pub struct HuffProcessor {
    planned: Option<Planned>,
    reporter: Box<dyn Reporter>,
    max_file_size: u64
}

impl HuffProcessor {
    pub fn new() -> Self {
        Self::with_options(&STD_OPTIONS)
    }
    /// Only the size limit is taken from `opt`, format and force are passed to each pass.
    pub fn with_options(opt: &Options) -> Self {
        Self {
            planned: None,
            reporter: Box::new(LogReporter),
            max_file_size: opt.max_file_size
        }
    }
    pub fn set_reporter(&mut self,reporter: Box<dyn Reporter>) {
        self.reporter = reporter;
    }
    /// statistics from the last successful `plan`
    pub fn stats(&self) -> Option<PlanStats> {
        self.planned.as_ref().map(|p| p.stats)
    }
    /// Count symbols in `expanded_in`, build the tree, and return the number of bits
    /// that would be saved by compressing with the given header format.
    /// Nothing is written.  Any earlier plan is discarded.
    pub fn plan<R: Read>(&mut self,expanded_in: &mut R,format: HeaderFormat) -> Result<i64,DYNERR> {
        self.planned = None;
        let mut bit = BitReader::new(expanded_in);
        let mut counts = vec![0u32;ALPH_SIZE+1];
        counts[PSEUDO_EOF] = 1;
        let mut symbol_count: u64 = 0;
        log::debug!("counting symbols");
        while let Some(symbol) = bit.get_code::<usize>(BITS_PER_WORD)? {
            symbol_count += 1;
            if symbol_count > self.max_file_size {
                return Err(Box::new(Error::FileTooLarge));
            }
            counts[symbol] = match counts[symbol].checked_add(1) {
                Some(c) => c,
                None => return Err(Box::new(Error::FileTooLarge))
            };
        }
        let mut que = FreqQueue::from_counts(&counts);
        let tree = HuffmanTree::create(&mut que)?;
        let codes = tree.path_table();
        if tree.root().is_leaf() {
            log::debug!("no data, only the end of data marker");
        }

        let mut bits_before: u64 = 0;
        let mut payload: u64 = 0;
        for symbol in 0..ALPH_SIZE {
            let freq = counts[symbol] as u64;
            bits_before += freq * BITS_PER_WORD as u64;
            if let Some(path) = codes.get(&symbol) {
                payload += freq * path.len() as u64;
            }
        }
        // end of data marker is written once
        let eof_bits = match codes.get(&PSEUDO_EOF) {
            Some(path) => path.len() as u64,
            None => return Err(Box::new(Error::MalformedTree))
        };
        let header = match format {
            HeaderFormat::StoreCounts => (ALPH_SIZE * BITS_PER_INT) as u64,
            HeaderFormat::StoreTree => (BITS_PER_INT + tree.size_in_bits()) as u64
        };
        let bits_after = 2 * BITS_PER_INT as u64 + header + payload + eof_bits;
        let bits_saved = bits_before as i64 - bits_after as i64;
        log::debug!("{} symbols, {} distinct, header {} bits",symbol_count,codes.len(),header);
        log::info!("planned {} bits down to {}, saving {}",bits_before,bits_after,bits_saved);
        self.planned = Some(Planned {
            stats: PlanStats { format, bits_before, bits_after, bits_saved },
            counts,
            tree,
            codes
        });
        Ok(bits_saved)
    }
    /// Compress `expanded_in`, which must hold the same data that was given to `plan`.
    /// If no bits would be saved, nothing is written unless `force` is true.
    /// On any error nothing is written.
    pub fn compress<R: Read,W: Write>(&self,expanded_in: &mut R,compressed_out: &mut W,force: bool) -> Result<Outcome,DYNERR> {
        let planned = match &self.planned {
            Some(p) => p,
            None => return Err(Box::new(Error::NotPlanned))
        };
        let bits_saved = planned.stats.bits_saved;
        if bits_saved <= 0 && !force {
            let excess_bits = bits_saved.unsigned_abs();
            self.reporter.update(&format!(
                "Compressed file would have {} more bits than the uncompressed file, use the force option to compress anyway.",
                excess_bits));
            return Ok(Outcome::Refused { excess_bits });
        }
        let eof_path = match planned.codes.get(&PSEUDO_EOF) {
            Some(path) => path,
            None => return Err(Box::new(Error::MalformedTree))
        };
        let mut bit = BitReader::new(expanded_in);
        // stream is built in memory and only goes out once complete
        let mut stream: Vec<u8> = Vec::new();
        let mut bot = BitWriter::new(&mut stream);
        bot.put_code(BITS_PER_INT,MAGIC_NUMBER)?;
        bot.put_code(BITS_PER_INT,planned.stats.format as u32)?;
        match planned.stats.format {
            HeaderFormat::StoreCounts => {
                for count in &planned.counts[0..ALPH_SIZE] {
                    bot.put_code(BITS_PER_INT,*count)?;
                }
            },
            HeaderFormat::StoreTree => {
                let size = planned.tree.size_in_bits();
                bot.put_code(BITS_PER_INT,size as u32)?;
                let written = planned.tree.write_tree(&mut bot)?;
                log::debug!("tree header has {} bits",written);
            }
        }
        log::debug!("header ends at bit {}, entering payload loop",bot.bits_written());
        while let Some(symbol) = bit.get_code::<usize>(BITS_PER_WORD)? {
            let path = match planned.codes.get(&symbol) {
                Some(p) => p,
                None => return Err(Box::new(Error::SymbolNotPlanned(symbol)))
            };
            for b in path.iter() {
                bot.put_bit(b)?;
            }
        }
        for b in eof_path.iter() {
            bot.put_bit(b)?;
        }
        let bits = bot.finish()?;
        compressed_out.write_all(&stream)?;
        compressed_out.flush()?;
        log::debug!("wrote {} bits",bits);
        Ok(Outcome::Written { bits })
    }
    /// Expand a stream produced by `compress`.  On any error nothing is written.
    /// Returns the number of bits written.
    pub fn decompress<R: Read,W: Write>(&self,compressed_in: &mut R,expanded_out: &mut W) -> Result<u64,DYNERR> {
        let mut bit = BitReader::new(compressed_in);
        let magic = match bit.get_code::<u32>(BITS_PER_INT)? {
            Some(m) => m,
            None => {
                self.reporter.show_error("Error reading compressed file.\nFile is too short to hold the magic number.");
                return Err(Box::new(Error::UnexpectedEnd));
            }
        };
        if magic != MAGIC_NUMBER {
            self.reporter.show_error("Error reading compressed file.\nFile did not start with the huff magic number.");
            return Err(Box::new(Error::BadMagicNumber(magic)));
        }
        let selector = match bit.get_code::<u32>(BITS_PER_INT)? {
            Some(s) => s,
            None => return Err(Box::new(Error::UnexpectedEnd))
        };
        let tree = match HeaderFormat::from_u32(selector) {
            Some(HeaderFormat::StoreCounts) => {
                log::debug!("rebuild tree from counts");
                let mut counts = vec![0u32;ALPH_SIZE];
                for count in counts.iter_mut() {
                    *count = match bit.get_code::<u32>(BITS_PER_INT)? {
                        Some(c) => c,
                        None => return Err(Box::new(Error::UnexpectedEnd))
                    };
                }
                HuffmanTree::create(&mut FreqQueue::from_counts(&counts))?
            },
            Some(HeaderFormat::StoreTree) => {
                log::debug!("rebuild tree from structure");
                let expected = match bit.get_code::<u32>(BITS_PER_INT)? {
                    Some(s) => s as usize,
                    None => return Err(Box::new(Error::UnexpectedEnd))
                };
                let start = bit.bits_read();
                let tree = HuffmanTree::recreate(&mut bit)?;
                let actual = (bit.bits_read() - start) as usize;
                if actual != expected {
                    log::error!("tree size mismatch");
                    return Err(Box::new(Error::TreeSizeMismatch { expected, actual }));
                }
                tree
            },
            None => {
                self.reporter.show_error(&format!("Unknown header format {}.",selector));
                return Err(Box::new(Error::UnknownHeaderFormat(selector)));
            }
        };
        // nothing reaches `expanded_out` unless the end of data marker is found
        let mut expanded: Vec<u8> = Vec::new();
        let mut bot = BitWriter::new(&mut expanded);
        let written = tree.decode(&mut bit,&mut bot)?;
        bot.finish()?;
        expanded_out.write_all(&expanded)?;
        expanded_out.flush()?;
        Ok(written)
    }
}

/// Main compression function.
/// `expanded_in` is an object with `Read` and `Seek` traits, usually `std::fs::File`, or `std::io::Cursor<&[u8]>`.
/// `compressed_out` is an object with `Write` and `Seek` traits, usually `std::fs::File`, or `std::io::Cursor<Vec<u8>>`.
/// The input is read twice, starting from its current position each time.
/// Returns (in_size,out_size) in bytes, out_size is 0 if compression was refused.
pub fn compress<R,W>(expanded_in: &mut R, compressed_out: &mut W, opt: &Options) -> Result<(u64,u64),DYNERR>
where R: Read + Seek, W: Write + Seek {
    let mut processor = HuffProcessor::with_options(opt);
    let in_start = expanded_in.stream_position()?;
    let out_start = compressed_out.stream_position()?;
    processor.plan(expanded_in,opt.format)?;
    let in_size = expanded_in.stream_position()? - in_start;
    expanded_in.seek(SeekFrom::Start(in_start))?;
    match processor.compress(expanded_in,compressed_out,opt.force)? {
        Outcome::Written { .. } => Ok((in_size,compressed_out.stream_position()? - out_start)),
        Outcome::Refused { .. } => Ok((in_size,0))
    }
}

/// Main decompression function.
/// `compressed_in` is an object with `Read` and `Seek` traits, usually `std::fs::File`, or `std::io::Cursor<&[u8]>`.
/// `expanded_out` is an object with `Write` and `Seek` traits, usually `std::fs::File`, or `std::io::Cursor<Vec<u8>>`.
/// Returns (in_size,out_size) in bytes.
pub fn expand<R,W>(compressed_in: &mut R, expanded_out: &mut W) -> Result<(u64,u64),DYNERR>
where R: Read + Seek, W: Write + Seek {
    let processor = HuffProcessor::new();
    let in_start = compressed_in.stream_position()?;
    let in_size = compressed_in.seek(SeekFrom::End(0))? - in_start;
    compressed_in.seek(SeekFrom::Start(in_start))?;
    let out_start = expanded_out.stream_position()?;
    processor.decompress(compressed_in,expanded_out)?;
    Ok((in_size,expanded_out.stream_position()? - out_start))
}

/// Convenience function, calls `compress` with a slice returning a Vec
pub fn compress_slice(slice: &[u8],opt: &Options) -> Result<Vec<u8>,DYNERR> {
    let mut src = Cursor::new(slice);
    let mut ans: Cursor<Vec<u8>> = Cursor::new(Vec::new());
    compress(&mut src,&mut ans,opt)?;
    Ok(ans.into_inner())
}

/// Convenience function, calls `expand` with a slice returning a Vec
pub fn expand_slice(slice: &[u8]) -> Result<Vec<u8>,DYNERR> {
    let mut src = Cursor::new(slice);
    let mut ans: Cursor<Vec<u8>> = Cursor::new(Vec::new());
    expand(&mut src,&mut ans)?;
    Ok(ans.into_inner())
}


// *************** TESTS *****************

#[cfg(test)]
use std::{cell::RefCell,rc::Rc};

#[cfg(test)]
struct Recorder(Rc<RefCell<Vec<String>>>);

#[cfg(test)]
impl Reporter for Recorder {
    fn update(&self,msg: &str) {
        self.0.borrow_mut().push(msg.to_string());
    }
    fn show_error(&self,msg: &str) {
        self.0.borrow_mut().push(msg.to_string());
    }
}

#[cfg(test)]
fn forced(format: HeaderFormat) -> Options {
    let mut opt = STD_OPTIONS;
    opt.format = format;
    opt.force = true;
    opt
}

#[cfg(test)]
fn sample_inputs() -> Vec<Vec<u8>> {
    vec![
        Vec::new(),
        vec![b'z'],
        "AAAAABBBCC".as_bytes().to_vec(),
        "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes().to_vec(),
        (0..=255u8).collect(),
        (0..5000u32).map(|i| ((i*7919) % 97) as u8).collect(),
        vec![0xff;1000]
    ]
}

#[test]
fn compression_works_tree_header() {
    let compressed = compress_slice("AAAAABBBCC".as_bytes(),&forced(HeaderFormat::StoreTree)).expect("compression failed");
    let expected = "FA CE 82 00 00 00 00 01 00 00 00 2B 48 29 09 80 48 60 AB FC";
    assert_eq!(compressed,hex::decode(expected.replace(" ","")).unwrap());
}

#[test]
fn compression_works_counts_header() {
    let compressed = compress_slice("AAAAABBBCC".as_bytes(),&forced(HeaderFormat::StoreCounts)).expect("compression failed");
    assert_eq!(compressed.len(),1035);
    assert_eq!(compressed[0..8].to_vec(),hex::decode("FACE820000000000").unwrap());
    let count_at = |symbol: usize| compressed[8+4*symbol..12+4*symbol].to_vec();
    assert_eq!(count_at(b'A' as usize),vec![0,0,0,5]);
    assert_eq!(count_at(b'B' as usize),vec![0,0,0,3]);
    assert_eq!(count_at(b'C' as usize),vec![0,0,0,2]);
    assert_eq!(count_at(b'D' as usize),vec![0,0,0,0]);
    // 00000 101010 111111 110 and padding
    assert_eq!(compressed[1032..].to_vec(),vec![0x05,0x5f,0xe0]);
}

#[test]
fn invertibility() {
    for format in [HeaderFormat::StoreCounts,HeaderFormat::StoreTree] {
        for test_data in sample_inputs() {
            let compressed = compress_slice(&test_data,&forced(format)).expect("compression failed");
            let expanded = expand_slice(&compressed).expect("expansion failed");
            assert_eq!(test_data,expanded);
        }
    }
}

#[test]
fn payload_is_independent_of_header() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    let by_counts = compress_slice(test_data,&forced(HeaderFormat::StoreCounts)).expect("compression failed");
    let by_tree = compress_slice(test_data,&forced(HeaderFormat::StoreTree)).expect("compression failed");
    assert_ne!(by_counts,by_tree);
    assert_eq!(expand_slice(&by_counts).expect("expansion failed"),expand_slice(&by_tree).expect("expansion failed"));
}

#[test]
fn savings_arithmetic() {
    let test_data = "AAAAABBBCC".as_bytes();
    let mut processor = HuffProcessor::new();
    assert_eq!(processor.plan(&mut Cursor::new(test_data),HeaderFormat::StoreTree).expect("plan failed"),-79);
    assert_eq!(processor.stats(),Some(PlanStats {
        format: HeaderFormat::StoreTree,
        bits_before: 80,
        bits_after: 159,
        bits_saved: -79
    }));
    // 64 + 256*32 + 17 + 3
    assert_eq!(processor.plan(&mut Cursor::new(test_data),HeaderFormat::StoreCounts).expect("plan failed"),80-8276);
}

#[test]
fn written_bits_match_plan() {
    for format in [HeaderFormat::StoreCounts,HeaderFormat::StoreTree] {
        for test_data in sample_inputs() {
            let mut processor = HuffProcessor::new();
            processor.plan(&mut Cursor::new(&test_data),format).expect("plan failed");
            let mut out: Vec<u8> = Vec::new();
            let outcome = processor.compress(&mut Cursor::new(&test_data),&mut out,true).expect("compression failed");
            let bits_after = processor.stats().expect("no stats").bits_after;
            assert_eq!(outcome,Outcome::Written { bits: bits_after });
            assert_eq!(out.len() as u64,(bits_after + 7) / 8);
        }
    }
}

#[test]
fn savings_grow_linearly() {
    let mut processor = HuffProcessor::new();
    let mut saved = Vec::new();
    for n in [100usize,200,400] {
        saved.push(processor.plan(&mut Cursor::new(vec![b'x';n]),HeaderFormat::StoreTree).expect("plan failed"));
    }
    // 8 bits in, 1 bit out, for every byte
    assert_eq!(saved[1] - saved[0],700);
    assert_eq!(saved[2] - saved[1],1400);
    assert!(saved[0] > 0);
}

#[test]
fn refusal() {
    let test_data = "ab".as_bytes();
    let messages = Rc::new(RefCell::new(Vec::new()));
    let mut processor = HuffProcessor::new();
    processor.set_reporter(Box::new(Recorder(messages.clone())));
    let saved = processor.plan(&mut Cursor::new(test_data),HeaderFormat::StoreTree).expect("plan failed");
    assert!(saved <= 0);
    let mut out: Vec<u8> = Vec::new();
    let outcome = processor.compress(&mut Cursor::new(test_data),&mut out,false).expect("compression failed");
    assert_eq!(outcome,Outcome::Refused { excess_bits: saved.unsigned_abs() });
    assert!(out.is_empty());
    assert_eq!(messages.borrow().len(),1);
    // the slice API reports refusal as empty output
    assert!(compress_slice(test_data,&STD_OPTIONS).expect("compression failed").is_empty());

    let outcome = processor.compress(&mut Cursor::new(test_data),&mut out,true).expect("compression failed");
    assert!(matches!(outcome,Outcome::Written { .. }));
    assert_eq!(expand_slice(&out).expect("expansion failed"),test_data.to_vec());
}

#[test]
fn compress_before_plan() {
    let processor = HuffProcessor::new();
    let mut out: Vec<u8> = Vec::new();
    let err = processor.compress(&mut Cursor::new(b"abc"),&mut out,true).expect_err("should fail");
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::NotPlanned)));
    assert!(processor.stats().is_none());
}

#[test]
fn unplanned_symbol() {
    let mut processor = HuffProcessor::new();
    processor.plan(&mut Cursor::new(b"aaaa"),HeaderFormat::StoreTree).expect("plan failed");
    let mut out: Vec<u8> = Vec::new();
    let err = processor.compress(&mut Cursor::new(b"ab"),&mut out,true).expect_err("should fail");
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::SymbolNotPlanned(98))));
}

#[test]
fn file_too_large() {
    let mut opt = STD_OPTIONS;
    opt.max_file_size = 4;
    let mut processor = HuffProcessor::with_options(&opt);
    let err = processor.plan(&mut Cursor::new(b"abcde"),HeaderFormat::StoreTree).expect_err("should fail");
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::FileTooLarge)));
    assert!(processor.plan(&mut Cursor::new(b"abcd"),HeaderFormat::StoreTree).is_ok());
}

#[test]
fn bad_magic_number() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    let mut compressed = compress_slice(test_data,&forced(HeaderFormat::StoreTree)).expect("compression failed");
    compressed[0..4].copy_from_slice(&[0x12,0x34,0x56,0x78]);
    let messages = Rc::new(RefCell::new(Vec::new()));
    let mut processor = HuffProcessor::new();
    processor.set_reporter(Box::new(Recorder(messages.clone())));
    let mut out: Vec<u8> = Vec::new();
    let err = processor.decompress(&mut Cursor::new(&compressed),&mut out).expect_err("should fail");
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::BadMagicNumber(0x12345678))));
    assert!(out.is_empty());
    assert!(messages.borrow()[0].contains("magic number"));
}

#[test]
fn unknown_header_format() {
    let stream = hex::decode("FACE820000000002").unwrap();
    let err = expand_slice(&stream).expect_err("should fail");
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::UnknownHeaderFormat(2))));
}

#[test]
fn tree_size_mismatch() {
    let mut compressed = compress_slice("AAAAABBBCC".as_bytes(),&forced(HeaderFormat::StoreTree)).expect("compression failed");
    compressed[11] = 0x2c;
    let err = expand_slice(&compressed).expect_err("should fail");
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::TreeSizeMismatch { expected: 44, actual: 43 })));
}

#[test]
fn truncated_stream() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    for format in [HeaderFormat::StoreCounts,HeaderFormat::StoreTree] {
        let compressed = compress_slice(test_data,&forced(format)).expect("compression failed");
        let err = expand_slice(&compressed[0..compressed.len()-6]).expect_err("should fail");
        assert!(matches!(err.downcast_ref::<Error>(),Some(Error::UnexpectedEnd)));
    }
    let err = expand_slice(&[0xfa,0xce]).expect_err("should fail");
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::UnexpectedEnd)));
}

#[test]
fn failed_decompress_writes_nothing() {
    let test_data: Vec<u8> = (0..200000u32).map(|i| ((i*7919) % 97) as u8).collect();
    let compressed = compress_slice(&test_data,&forced(HeaderFormat::StoreTree)).expect("compression failed");
    let processor = HuffProcessor::new();
    let mut out: Vec<u8> = Vec::new();
    let half = &compressed[0..compressed.len()/2];
    let err = processor.decompress(&mut Cursor::new(half),&mut out).expect_err("should fail");
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::UnexpectedEnd)));
    assert!(out.is_empty());
    let mut cursor_out = Cursor::new(Vec::new());
    assert!(expand(&mut Cursor::new(half),&mut cursor_out).is_err());
    assert!(cursor_out.into_inner().is_empty());
}

#[test]
fn failed_compress_writes_nothing() {
    let mut test_data = vec![b'a';20000];
    let mut processor = HuffProcessor::new();
    processor.plan(&mut Cursor::new(&test_data),HeaderFormat::StoreTree).expect("plan failed");
    test_data.push(b'b');
    let mut out: Vec<u8> = Vec::new();
    let err = processor.compress(&mut Cursor::new(&test_data),&mut out,true).expect_err("should fail");
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::SymbolNotPlanned(98))));
    assert!(out.is_empty());
}
