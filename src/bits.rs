//! MSB-first bit packing over byte slices.
use crate::error::{HuffmanError, Result};

/// Maximum number of bits moved by a single read or write.
pub const MAX_BITS: u8 = 64;

/// Position in a bit stream: a byte index and the next bit within it (0-7, 0 is the MSB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitCursor {
    pub byte: usize,
    pub bit: u8,
}

impl BitCursor {
    fn advance(&mut self, bits: u32) {
        let bit = self.bit as u32 + bits;
        self.byte += (bit / 8) as usize;
        self.bit = (bit % 8) as u8;
    }

    /// Absolute position in bits.
    pub fn bit_position(&self) -> u64 {
        self.byte as u64 * 8 + self.bit as u64
    }

    /// Bytes touched so far, counting a partially filled byte.
    pub fn bytes_used(&self) -> usize {
        self.byte + usize::from(self.bit > 0)
    }
}

fn low_mask(bits: u32) -> u8 {
    debug_assert!((1..=8).contains(&bits));
    u8::MAX >> (8 - bits)
}

/// Writes codes into a zero-initialized buffer sized by the caller.
#[derive(Debug)]
pub struct BitWriter<'a> {
    buffer: &'a mut [u8],
    cursor: BitCursor,
}

impl<'a> BitWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            cursor: BitCursor::default(),
        }
    }

    /// Appends the low `length` bits of `value`, most significant first.
    /// Writing 0 bits is a no-op.
    ///
    /// Panics if the buffer is too small; callers size it exactly up front.
    pub fn write(&mut self, length: u8, value: u64) {
        assert!(length <= MAX_BITS, "cannot write {length} bits at once");
        let mut remaining = length as u32;
        while remaining > 0 {
            let free = 8 - self.cursor.bit as u32;
            let take = remaining.min(free);
            let chunk = (value >> (remaining - take)) as u8 & low_mask(take);
            self.buffer[self.cursor.byte] |= chunk << (free - take);
            remaining -= take;
            self.cursor.advance(take);
        }
    }

    pub fn cursor(&self) -> BitCursor {
        self.cursor
    }
}

/// Reads codes back out of a byte slice, failing rather than running past its end.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: BitCursor,
}

impl<'a> BitReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: BitCursor::default(),
        }
    }

    /// Bits left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> u64 {
        self.buffer.len() as u64 * 8 - self.cursor.bit_position()
    }

    /// Reads the next `length` bits as an unsigned value, most significant first.
    pub fn read(&mut self, length: u8) -> Result<u64> {
        assert!(length <= MAX_BITS, "cannot read {length} bits at once");
        let available = self.remaining();
        if (length as u64) > available {
            return Err(HuffmanError::TruncatedStream {
                needed: length as u64,
                available,
            });
        }
        let mut value = 0u64;
        let mut remaining = length as u32;
        while remaining > 0 {
            let unread = 8 - self.cursor.bit as u32;
            let take = remaining.min(unread);
            let chunk = (self.buffer[self.cursor.byte] >> (unread - take)) & low_mask(take);
            value = (value << take) | chunk as u64;
            remaining -= take;
            self.cursor.advance(take);
        }
        Ok(value)
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        self.read(1).map(|bit| bit == 1)
    }

    pub fn cursor(&self) -> BitCursor {
        self.cursor
    }
}
