//! Packs bytes into a bitstream with a huffman code, and unpacks them again by walking the tree.

use log::{debug, warn};

use super::error::DecodeError;
use super::huffman::{build_code_with, HuffmanCode};
use super::tree_builder::MergeStrategy;
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitreader::BitReader;
use crate::tools::freq_count::FrequencyTable;

/// Encodes and decodes byte data with one huffman code.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    code: HuffmanCode,
}

impl HuffmanCodec {
    /// Count the data and build a code fitted to it.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        Self::from_frequencies(&FrequencyTable::from_bytes(data), MergeStrategy::default())
    }

    /// Build a code from counts that were already taken (for instance, read back from a header).
    pub fn from_frequencies(
        freqs: &FrequencyTable,
        strategy: MergeStrategy,
    ) -> Result<Self, DecodeError> {
        Ok(Self {
            code: build_code_with(freqs, strategy)?,
        })
    }

    pub fn code(&self) -> &HuffmanCode {
        &self.code
    }

    /// Pack the data into a bitstream. Returns the packed bytes and the number of valid bits.
    ///
    /// When the code has a single symbol its codeword is empty, so nothing is written. The
    /// symbol count alone is enough to decode that case.
    pub fn encode(&self, data: &[u8]) -> Result<(Vec<u8>, usize), DecodeError> {
        let mut bp = BitPacker::new(data.len() / 2 + 1);
        for &byte in data {
            let code = self
                .code
                .codeword(byte)
                .ok_or(DecodeError::UnknownSymbol(byte))?;
            bp.out_code(code);
        }
        let bits = bp.bit_len();
        bp.flush();
        debug!(
            "Encoded {} bytes into {} bits ({} bytes)",
            data.len(),
            bits,
            bp.output.len()
        );
        Ok((bp.output, bits))
    }

    /// Unpack symbol_count symbols from a bitstream made by encode().
    ///
    /// A single symbol code reads no bits, so its output is symbol_count copies of the symbol.
    /// Reserving that room can fail, which is reported as TooLarge rather than aborting.
    pub fn decode(&self, packed: &[u8], symbol_count: usize) -> Result<Vec<u8>, DecodeError> {
        let mut output: Vec<u8> = Vec::new();
        if let Some(sym) = self.code.root().symbol() {
            output
                .try_reserve_exact(symbol_count)
                .map_err(|_| DecodeError::TooLarge {
                    symbols: symbol_count,
                })?;
            output.resize(symbol_count, sym);
            return Ok(output);
        }

        // Every codeword is at least one bit, so the payload bounds the real output size.
        output.reserve(symbol_count.min(packed.len() * 8));
        let mut br = BitReader::new(packed);
        let mut bits = std::iter::from_fn(|| br.bool_bit());
        for decoded in 0..symbol_count {
            match self.code.decode_symbol(&mut bits) {
                Some(sym) => output.push(sym),
                None => {
                    warn!("Bitstream ended after {} of {} symbols", decoded, symbol_count);
                    return Err(DecodeError::UnexpectedEnd { decoded });
                }
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip_test() {
        let data = b"Peter Piper picked a peck of pickled peppers.".to_vec();
        let codec = HuffmanCodec::from_bytes(&data).unwrap();
        let (packed, bits) = codec.encode(&data).unwrap();
        assert_eq!(packed.len(), (bits + 7) / 8);
        assert!(packed.len() < data.len());
        assert_eq!(codec.decode(&packed, data.len()).unwrap(), data);
    }

    #[test]
    fn encoded_length_matches_weighted_length_test() {
        let data = b"she sells sea shells by the sea shore".to_vec();
        let freqs = FrequencyTable::from_bytes(&data);
        let codec = HuffmanCodec::from_frequencies(&freqs, MergeStrategy::Heap).unwrap();
        let (_, bits) = codec.encode(&data).unwrap();
        assert_eq!(bits as u64, codec.code().table().weighted_length(&freqs));
    }

    #[test]
    fn single_symbol_round_trip_test() {
        let data = vec![b'z'; 17];
        let codec = HuffmanCodec::from_bytes(&data).unwrap();
        let (packed, bits) = codec.encode(&data).unwrap();
        assert_eq!(bits, 0);
        assert!(packed.is_empty());
        assert_eq!(codec.decode(&packed, 17).unwrap(), data);
    }

    #[test]
    fn empty_input_fails_test() {
        assert!(matches!(
            HuffmanCodec::from_bytes(&[]),
            Err(DecodeError::Build(_))
        ));
    }

    #[test]
    fn unknown_symbol_test() {
        let codec = HuffmanCodec::from_bytes(b"aabb").unwrap();
        assert_eq!(codec.encode(b"abc"), Err(DecodeError::UnknownSymbol(b'c')));
    }

    #[test]
    fn truncated_stream_test() {
        let data = b"the rain in spain stays mainly in the plain".to_vec();
        let codec = HuffmanCodec::from_bytes(&data).unwrap();
        let (packed, _) = codec.encode(&data).unwrap();
        let short = &packed[..packed.len() / 2];
        assert!(matches!(
            codec.decode(short, data.len()),
            Err(DecodeError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn oversized_count_test() {
        // More symbols than the payload could hold fails on the bits, not on the allocation.
        let codec = HuffmanCodec::from_bytes(b"ab").unwrap();
        assert_eq!(
            codec.decode(&[0b0101_0101], usize::MAX / 2),
            Err(DecodeError::UnexpectedEnd { decoded: 8 })
        );

        let codec = HuffmanCodec::from_bytes(b"a").unwrap();
        assert_eq!(
            codec.decode(&[], usize::MAX),
            Err(DecodeError::TooLarge {
                symbols: usize::MAX
            })
        );
    }

    #[test]
    fn binary_data_round_trip_test() {
        let data = (0..5_000_u32)
            .map(|i| ((i * i) % 251) as u8)
            .collect::<Vec<u8>>();
        let codec = HuffmanCodec::from_bytes(&data).unwrap();
        let (packed, _) = codec.encode(&data).unwrap();
        assert_eq!(codec.decode(&packed, data.len()).unwrap(), data);
    }
}
