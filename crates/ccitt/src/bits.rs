//! # Bit Reader and Writer
//!
//! Both sides address the buffer with an absolute bit position. Bits are
//! packed MSB first within each byte.

use std::borrow::Cow;

use crate::{
    tables::{Code, EOL},
    FaxError, FaxResult,
};

/// Up to 16 bits read from an arbitrary bit offset
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Window {
    /// The bits, MSB first, zero padded on the right
    pub bits: u16,
    /// How many of the bits came from the buffer
    pub available: u8,
    /// The bit offset after the available bits
    pub next: usize,
}

/// Read 16 bits starting at `bit_offset`
///
/// Bits past the end of the buffer are read as zeros and not counted in
/// [`Window::available`].
pub fn fetch_next_code(buffer: &[u8], bit_offset: usize) -> Window {
    let total = buffer.len() * 8;
    let available = total.saturating_sub(bit_offset).min(16);
    let index = bit_offset / 8;
    let shift = bit_offset % 8;
    let byte = |i: usize| buffer.get(index + i).copied().unwrap_or(0) as u32;
    let word = byte(0) << 16 | byte(1) << 8 | byte(2);
    let bits = ((word << shift) >> 8) as u16;
    Window {
        bits,
        available: available as u8,
        next: bit_offset + available,
    }
}

/// Append `code` to `buffer` at `bit_offset` and return the new offset
///
/// The buffer grows by whole bytes. Bits at and after `bit_offset` in the
/// last byte are expected to be zero.
pub fn add_code(buffer: &mut Vec<u8>, bit_offset: usize, code: Code) -> usize {
    let end = bit_offset + code.length as usize;
    let needed = (end + 7) / 8;
    if buffer.len() < needed {
        buffer.resize(needed, 0);
    }
    let index = bit_offset / 8;
    let shift = bit_offset % 8;
    let word = (code.codeword as u32) << 8 >> shift;
    for (i, part) in [(word >> 16) as u8, (word >> 8) as u8, word as u8]
        .into_iter()
        .enumerate()
    {
        if index + i < needed {
            buffer[index + i] |= part;
        }
    }
    end
}

/// A bitwise writer
#[derive(Debug, Default)]
pub struct BitWriter {
    buffer: Vec<u8>,
    pos: usize,
}

impl BitWriter {
    /// Creates a new instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new instance with the given capacity of bits
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity((capacity + 7) / 8),
            pos: 0,
        }
    }

    /// The current bit position
    pub fn bit_pos(&self) -> usize {
        self.pos
    }

    /// Write a single bit
    pub fn write(&mut self, b: bool) {
        self.write_code(Code::new(b as u16, 1));
    }

    /// Write the lowest `len` bits of `val`
    pub fn write_bits(&mut self, val: u16, len: u8) {
        self.write_code(Code::new(val, len));
    }

    /// Write a code
    pub fn write_code(&mut self, code: Code) {
        self.pos = add_code(&mut self.buffer, self.pos, code);
    }

    /// Write an EOL code `count` times
    pub fn write_eols(&mut self, code: Code, count: usize) {
        debug_assert!(code.is_prefix_of(&EOL) || EOL.is_prefix_of(&code));
        for _ in 0..count {
            self.write_code(code);
        }
    }

    /// Pad with zeros up to the next byte boundary
    pub fn align(&mut self) {
        self.pos = (self.pos + 7) / 8 * 8;
        self.buffer.resize(self.pos / 8, 0);
    }

    /// Flush and return the buffer
    pub fn done(mut self) -> Vec<u8> {
        self.align();
        self.buffer
    }
}

/// Read bits from a slice
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new instance
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The current bit position
    pub fn bit_pos(&self) -> usize {
        self.pos
    }

    /// The number of bits left
    pub fn remaining(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.pos)
    }

    /// Look at the next 16 bits without consuming them
    pub fn peek(&self) -> Window {
        fetch_next_code(self.data, self.pos)
    }

    /// Consume `n` bits
    pub fn consume(&mut self, n: u8) {
        self.pos += n as usize;
    }

    /// Read a single bit
    pub fn read_bit(&mut self) -> FaxResult<bool> {
        let bit = self.bit_at(self.pos).ok_or(FaxError::BufferExhausted { bit_pos: self.pos })?;
        self.pos += 1;
        Ok(bit)
    }

    /// Skip to the next byte boundary
    pub fn align(&mut self) {
        self.pos = (self.pos + 7) / 8 * 8;
    }

    fn bit_at(&self, pos: usize) -> Option<bool> {
        let byte = self.data.get(pos / 8)?;
        Some(byte & (0x80 >> (pos % 8)) != 0)
    }

    /// Whether there are no more `1` bits, i.e. only padding is left
    pub fn is_exhausted(&self) -> bool {
        let index = self.pos / 8;
        match self.data.get(index) {
            None => true,
            Some(first) => {
                let mask = 0xFFu8 >> (self.pos % 8);
                first & mask == 0 && self.data[index + 1..].iter().all(|b| *b == 0)
            }
        }
    }

    /// If the stream continues with an EOL (possibly preceded by fill
    /// zeros), consume it and return `true`
    pub fn try_eol(&mut self) -> bool {
        match self.find_one(self.pos) {
            Some(one) if one - self.pos >= EOL.length as usize - 1 => {
                self.pos = one + 1;
                true
            }
            _ => false,
        }
    }

    /// Move to the start of the next EOL (fill zeros included), or to the
    /// end of the data if there is none
    pub fn seek_eol(&mut self) -> bool {
        let mut zeros_from = self.pos;
        loop {
            match self.find_one(zeros_from) {
                Some(one) if one - zeros_from >= EOL.length as usize - 1 => {
                    self.pos = zeros_from;
                    return true;
                }
                Some(one) => zeros_from = one + 1,
                None => {
                    self.pos = self.data.len() * 8;
                    return false;
                }
            }
        }
    }

    fn find_one(&self, mut pos: usize) -> Option<usize> {
        loop {
            if self.bit_at(pos)? {
                return Some(pos);
            }
            pos += 1;
        }
    }
}

/// Order of writing/reading bits to/from a byte (see TIFF spec)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub enum FillOrder {
    /// A byte is iterated from most- to least-significant bit
    #[default]
    MsbToLsb = 1,
    /// A byte is iterated from lest- to most-significant bit
    LsbToMsb = 2,
}

impl FillOrder {
    /// Bring input bytes into MSB-first order
    pub fn normalize<'a>(&self, data: &'a [u8]) -> Cow<'a, [u8]> {
        match self {
            FillOrder::MsbToLsb => Cow::Borrowed(data),
            FillOrder::LsbToMsb => Cow::Owned(data.iter().map(|b| b.reverse_bits()).collect()),
        }
    }

    /// Bring MSB-first output bytes into this order
    pub fn apply(&self, data: &mut [u8]) {
        if let FillOrder::LsbToMsb = self {
            for b in data {
                *b = b.reverse_bits();
            }
        }
    }
}
