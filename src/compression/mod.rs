//! The compression module manages whole files for huffcode.
//!
//! Compression happens in the following steps:
//! - Frequency count: Tally how many times each byte value occurs in the file.
//! - Tree build: Merge the two least frequent nodes until a single tree remains.
//! - Code assignment: Read each byte's codeword off the path from the root to its leaf.
//! - Packing: Write the counts as a header, then every byte of the file as its codeword.
//!
//! Decompression reads the counts back, rebuilds the identical tree, and walks it one bit at a
//! time until each leaf is reached.
//!
//! The report submodule prints the code table for a file without compressing it.
//!

pub mod compress;
pub mod decompress;
pub mod report;
