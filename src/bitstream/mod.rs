//! The bitstream module forms the I/O subsystem for packing huffman codewords.
//!
//! Codewords are variable length and rarely line up with byte boundaries. The BitPacker queues
//! bits and pushes them out a byte at a time, most significant bit first. The BitReader reverses
//! this, handing back one bit (or a fixed width number) at a time from any reader.
//!
//! This I/O subsystem is designed to efficiently interface with the other modules within this
//! crate. It has not been generalized for other uses.
//!
pub mod bitpacker;
pub mod bitreader;
