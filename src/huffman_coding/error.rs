//! Error types for building and using a huffman code.

use thiserror::Error;

/// Failure to build a huffman tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No symbol had a nonzero count, so there is nothing to build a tree from.
    #[error("empty alphabet: no symbols to build a huffman tree from")]
    EmptyAlphabet,

    /// The counts add up to more than a u64 can hold.
    #[error("symbol counts overflow a 64 bit total")]
    FrequencyOverflow,
}

/// Failure while encoding or decoding a bitstream with a huffman code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The bitstream ended in the middle of a codeword, or before all symbols were read.
    #[error("unexpected end of bitstream after {decoded} symbols")]
    UnexpectedEnd { decoded: usize },

    /// The data contains a byte that has no codeword in the table.
    #[error("symbol {0:#04x} has no codeword in this table")]
    UnknownSymbol(u8),

    /// There is no memory for the number of symbols asked for.
    #[error("cannot allocate room for {symbols} decoded symbols")]
    TooLarge { symbols: usize },

    /// The code could not be built from the supplied frequencies.
    #[error("could not build code: {0}")]
    Build(#[from] BuildError),
}

impl From<DecodeError> for std::io::Error {
    fn from(e: DecodeError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    }
}

impl From<BuildError> for std::io::Error {
    fn from(e: BuildError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    }
}
