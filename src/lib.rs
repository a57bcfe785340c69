//! Huffman code builder and compressor.
//!
//! Counts the bytes of an input, builds a huffman tree by repeatedly merging the two least
//! frequent nodes (the earliest one wins a tie), and reads each byte's codeword off the path from
//! the root to its leaf. The resulting code is prefix free and of minimal total length for the
//! counts it was built from.
//!
//! Basic usage to print the code table of a file is as follows:
//!
//! `$> huffcode -t test.txt`
//!
//! and to compress it:
//!
//! `$> huffcode -z test.txt`
//!
//! This will compress the file and create the file test.txt.huf.
//! The original file will be deleted unless -k is given.
//!
//! As a library:
//!
//! ```
//! use huffcode::huffman_coding::build_code;
//! use huffcode::tools::freq_count::FrequencyTable;
//!
//! let freqs = FrequencyTable::from_bytes(b"abracadabra");
//! let code = build_code(&freqs).unwrap();
//! assert_eq!(code.codeword(b'a').map(|c| c.len()), Some(1));
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod huffman_coding;
pub mod tools;
