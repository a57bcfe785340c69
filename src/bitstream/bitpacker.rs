use log::error;

use crate::huffman_coding::code_assigner::Codeword;

/// Creates a bitstream for output, most significant bit first.
pub struct BitPacker {
    pub output: Vec<u8>,
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of size specified. Call flush() to flush
    /// the bit queue to the buffer before using the output.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
        }
    }

    /// Internal bitstream write function common to all out.XX functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.queue = (self.queue << 1) | bit as u64;
        self.q_bits += 1;
        if self.q_bits > 56 {
            self.write_stream();
        }
    }

    /// Puts every bit of a huffman codeword on the stream, root end first.
    pub fn out_code(&mut self, code: &Codeword) {
        code.bits().iter().for_each(|&bit| self.out_bit(bit));
    }

    /*
    NOTE: out24 takes a u32.  The 8 most significant bits of the word indicate how
    many of the least significant bits will be written. Those bits must be aligned to
    the least signficant bit. (The middle bits are masked out.)

    Eg 0000100_00000000_00000000_00000010 writes out 0010.
    */
    /// Writes 0-24 bits encoded with the number of bits to write in the most
    /// significant byte of a 32 bit word.
    pub fn out24(&mut self, data: u32) {
        let depth = (data >> 24) as u8; //get bit length by shifting out the 24 data bits
        if depth == 0 {
            return;
        }
        self.write_stream(); //make room in the queue
        self.queue <<= depth; //shift queue by bit length
        self.queue |= (data & (0xffffffff >> (32 - depth))) as u64; //add data portion to queue
        self.q_bits += depth; //update depth of queue bits
        self.write_stream();
    }

    /// Puts a 16 bit word of pre-packed binary encoded data on the stream.
    pub fn out16(&mut self, data: u16) {
        self.write_stream();
        self.queue <<= 16;
        self.queue |= data as u64;
        self.q_bits += 16;
        self.write_stream();
    }

    /// Puts a 32 bit word of pre-packed binary encoded data on the stream.
    pub fn out32(&mut self, data: u32) {
        self.write_stream();
        self.queue <<= 32;
        self.queue |= data as u64;
        self.q_bits += 32;
        self.write_stream();
    }

    /// Puts a 64 bit word on the stream, as two 32 bit halves.
    pub fn out64(&mut self, data: u64) {
        self.out32((data >> 32) as u32);
        self.out32(data as u32);
    }

    /// Flushes the remaining bits (1-7) from the buffer, padding with 0s in the least
    /// signficant bits
    pub fn flush(&mut self) {
        self.write_stream();
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits += 8 - self.q_bits;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
    }

    /// Count of bits put on the stream so far, including any still queued.
    pub fn bit_len(&self) -> usize {
        self.output.len() * 8 + self.q_bits as usize
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format! {"[{}.{}]", self.bit_len() / 8, self.bit_len() % 8}
    }
}

#[cfg(test)]
mod test {
    use super::BitPacker;
    use crate::huffman_coding::code_assigner::Codeword;

    #[test]
    fn out16_test() {
        let mut bw = BitPacker::new(100);
        let data = 0b00100001_00100000;
        bw.out16(data);
        bw.flush();
        let out = bw.output;
        assert_eq!(out, "! ".as_bytes());
    }

    #[test]
    fn out24_and_loc_test() {
        let mut bw = BitPacker::new(100);
        let data = 0b00001000_00000000_00000000_00100001;
        bw.out24(data);
        bw.flush();
        let out = &bw.output;
        assert_eq!(out, "!".as_bytes());
        assert_eq!("[1.0]", &bw.loc());
        let data = 0b00011000_00000000_00000000_00000011;
        bw.out24(data);
        bw.flush();
        let out2 = &bw.output;
        assert_eq!(out2, &[33, 0, 0, 3]); // Note: '33' is data from previous call
        assert_eq!("[4.0]", &bw.loc());
    }

    #[test]
    fn out32_and_out64_test() {
        let mut bw = BitPacker::new(100);
        bw.out32(0b00100001_00100000_00100001_00100000);
        bw.out64(0x0102_0304_0506_0708);
        bw.flush();
        assert_eq!(bw.output, [33, 32, 33, 32, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn out_code_pads_last_byte_test() {
        let mut bw = BitPacker::new(100);
        let code = Codeword::from(vec![true, false, true]);
        bw.out_code(&code);
        bw.out_code(&code);
        assert_eq!(bw.bit_len(), 6);
        assert_eq!(bw.loc(), "[0.6]");
        bw.flush();
        assert_eq!(bw.output, [0b1011_0100]);
        assert_eq!(bw.loc(), "[1.0]");
    }

    #[test]
    fn many_bits_test() {
        let mut bw = BitPacker::new(100);
        (0..100).for_each(|i| bw.out_bit(i % 3 == 0));
        bw.out32(0xdead_beef);
        bw.flush();
        assert_eq!(bw.output.len(), (100 + 32 + 7) / 8);
        assert_eq!(bw.output[0], 0b1001_0010);
    }
}
