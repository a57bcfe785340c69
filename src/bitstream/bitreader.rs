//! BitReader: reads a packed, most significant bit first, bitstream.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!

use log::error;

const BUFFER_SIZE: usize = 64 * 1024;

/// Reads a packed bitstream, refilling its buffer from the source as needed.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    source: R,
}

impl<R: std::io::Read> BitReader<R> {
    /// Creates a new bitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            bit_index: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> bool {
        // Only try to read more data when the whole buffer has been consumed
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = match self.source.read(&mut self.buffer) {
                Ok(size) => size,
                Err(e) => {
                    error!("Unable to read source data: {}", e);
                    0
                }
            };
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                self.buffer.clear();
                self.cursor = 0;
                return false;
            }
            // Adjust the buffer if we read less than the buffer size
            self.buffer.truncate(size);
            self.cursor = 0;
            self.bit_index = 0;
        }
        true
    }

    /// Return bit as Option<usize> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<usize> {
        if self.bit_index == 0 && !self.have_data() {
            return None;
        }
        let bit = (self.buffer[self.cursor] >> (7 - self.bit_index)) & 1;
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Some(bit as usize)
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Return the next n (at most 64) bits as a number, or None if the data runs out first.
    pub fn bint(&mut self, n: usize) -> Option<u64> {
        // Take as many bits as possible from each byte rather than going a bit at a time.
        let mut result = 0_u64;
        let mut needed = n.min(64);
        while needed > 0 {
            if self.bit_index == 0 && !self.have_data() {
                return None;
            }
            let avail = 8 - self.bit_index;
            let take = needed.min(avail);
            let bits = (self.buffer[self.cursor] as u64 >> (avail - take)) & ((1 << take) - 1);
            result = result << take | bits;
            self.bit_index += take;
            if self.bit_index == 8 {
                self.bit_index = 0;
                self.cursor += 1;
            }
            needed -= take;
        }
        Some(result)
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to read. This is
    /// a convenience function, and calls bint(8).
    pub fn byte(&mut self) -> Option<u8> {
        self.bint(8).map(|byte| byte as u8)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}
