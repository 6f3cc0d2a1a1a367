//! Bit streams over byte oriented readers and writers.
//! Codes are always packed starting from the MSB, both within a code and within a byte.
//! The writer pads the last byte with zeros, the reader reports the end of the
//! underlying stream as `None` rather than an error.

use bit_vec::BitVec;
use num_traits::PrimInt;
use std::io::{Read,Write,BufReader,BufWriter,ErrorKind};

/// bytes to accumulate before passing them to the writer
const CHUNK_BYTES: usize = 512;

pub struct BitWriter<W: Write> {
    writer: BufWriter<W>,
    bits: BitVec,
    count: u64
}

pub struct BitReader<R: Read> {
    reader: BufReader<R>,
    bits: BitVec,
    ptr: usize,
    count: u64
}

impl <W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
            bits: BitVec::new(),
            count: 0
        }
    }
    /// pass the whole bytes accumulated so far to the writer, must be byte aligned
    fn drain(&mut self) -> Result<(),std::io::Error> {
        self.writer.write_all(&self.bits.to_bytes())?;
        self.bits = BitVec::new();
        Ok(())
    }
    pub fn put_bit(&mut self,bit: bool) -> Result<(),std::io::Error> {
        self.bits.push(bit);
        self.count += 1;
        if self.bits.len() == 8*CHUNK_BYTES {
            self.drain()?;
        }
        Ok(())
    }
    /// output `num_bits` of `code` starting from the MSB
    pub fn put_code<T: PrimInt>(&mut self,num_bits: usize,code: T) -> Result<(),std::io::Error> {
        for i in (0..num_bits).rev() {
            self.put_bit((code >> i) & T::one() == T::one())?;
        }
        Ok(())
    }
    /// bits written so far, not counting padding
    pub fn bits_written(&self) -> u64 {
        self.count
    }
    /// Pad to a byte boundary and flush everything.
    /// Returns the number of bits written, not counting padding.
    pub fn finish(mut self) -> Result<u64,std::io::Error> {
        // to_bytes pads the partial byte with zeros
        self.drain()?;
        self.writer.flush()?;
        Ok(self.count)
    }
}

impl <R: Read> BitReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            bits: BitVec::new(),
            ptr: 0,
            count: 0
        }
    }
    /// Get the next bit, reading from the stream as needed.
    /// When the stream is exhausted `None` is returned.
    pub fn get_bit(&mut self) -> Result<Option<bool>,std::io::Error> {
        if self.ptr >= self.bits.len() {
            let mut by: [u8;1] = [0];
            match self.reader.read_exact(&mut by) {
                Ok(()) => {
                    self.bits = BitVec::from_bytes(&by);
                    self.ptr = 0;
                },
                Err(e) if e.kind()==ErrorKind::UnexpectedEof => return Ok(None),
                Err(e) => return Err(e)
            }
        }
        let bit = self.bits.get(self.ptr);
        self.ptr += 1;
        self.count += 1;
        Ok(bit)
    }
    /// Get `num_bits` starting from the MSB, `None` if the stream ends first.
    pub fn get_code<T: PrimInt>(&mut self,num_bits: usize) -> Result<Option<T>,std::io::Error> {
        let mut ans = T::zero();
        for _i in 0..num_bits {
            match self.get_bit()? {
                Some(bit) => {
                    ans = ans << 1;
                    if bit {
                        ans = ans | T::one();
                    }
                },
                None => return Ok(None)
            }
        }
        Ok(Some(ans))
    }
    /// bits consumed so far
    pub fn bits_read(&self) -> u64 {
        self.count
    }
}

#[test]
fn codes_are_msb_first() {
    let mut buf: Vec<u8> = Vec::new();
    let mut writer = BitWriter::new(&mut buf);
    writer.put_code(32,0xface8200 as u32).expect("write failed");
    writer.put_code(9,256 as u16).expect("write failed");
    writer.put_bit(true).expect("write failed");
    assert_eq!(writer.finish().expect("flush failed"),42);
    assert_eq!(buf,vec![0xfa,0xce,0x82,0x00,0x80,0x40]);
}

#[test]
fn reader_inverts_writer() {
    let mut buf: Vec<u8> = Vec::new();
    let mut writer = BitWriter::new(&mut buf);
    for i in 0..2000u32 {
        writer.put_code(11,i).expect("write failed");
    }
    writer.finish().expect("flush failed");
    let mut reader = BitReader::new(buf.as_slice());
    for i in 0..2000u32 {
        assert_eq!(reader.get_code::<u32>(11).expect("read failed"),Some(i));
    }
    assert_eq!(reader.bits_read(),22000);
}

#[test]
fn end_of_stream_is_none() {
    let buf = [0xa5u8];
    let mut reader = BitReader::new(&buf[..]);
    assert_eq!(reader.get_code::<u8>(4).expect("read failed"),Some(0xa));
    assert_eq!(reader.get_bit().expect("read failed"),Some(false));
    assert_eq!(reader.get_code::<u8>(8).expect("read failed"),None);
    assert_eq!(reader.get_bit().expect("read failed"),None);
}
