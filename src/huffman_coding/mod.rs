//! The huffman module builds a prefix free code for the bytes in an input.
//!
//! Each byte value that occurs becomes a leaf weighted by its count. The two lightest nodes are
//! merged again and again until one tree remains, and the path from the root to each leaf is that
//! byte's codeword. Heavier bytes end up nearer the root and get shorter codewords.
//!
//! - node: the tree node, a leaf or an internal node owning two children.
//! - tree_builder: the greedy merge, with its first-found tie break.
//! - code_assigner: reads the codewords off the finished tree.
//! - huffman: ties the above together into build_code().
//! - codec: packs and unpacks byte data with a finished code.
//!
//! The process of building a code is inherently sequential and does not benefit from multithreading.
//!

pub mod code_assigner;
pub mod codec;
pub mod error;
pub mod huffman;
pub mod node;
pub mod tree_builder;

pub use code_assigner::{CodeTable, Codeword};
pub use error::{BuildError, DecodeError};
pub use huffman::{build_code, build_code_with, HuffmanCode};
pub use node::ForestNode;
pub use tree_builder::MergeStrategy;
