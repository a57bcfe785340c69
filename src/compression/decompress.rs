use std::fs;
use std::io::{self, Error, ErrorKind};

use log::{debug, info, warn};

use super::compress::{remove_input, write_output, EXTENSION, MAGIC};
use crate::bitstream::bitreader::BitReader;
use crate::huffman_coding::codec::HuffmanCodec;
use crate::huffman_coding::MergeStrategy;
use crate::tools::cli::HuffOpts;
use crate::tools::freq_count::FrequencyTable;

/// Decompress each file specified in opts (HuffOpts). The .huf extension is stripped from the
/// output name, or .out is added if the input did not have one.
pub fn decompress(opts: &HuffOpts) -> io::Result<()> {
    for fname in &opts.files {
        info!("Decompressing {}", fname);
        let out_name = match fname.strip_suffix(EXTENSION) {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => {
                warn!("{} does not end in {}, writing to {}.out", fname, EXTENSION, fname);
                format!("{}.out", fname)
            }
        };

        let packed = fs::read(fname)?;
        let data = unpack(&packed, opts.strategy)?;
        info!("{}: {} bytes in, {} bytes out", fname, packed.len(), data.len());

        if !write_output(&out_name, &data, opts)? {
            continue;
        }
        remove_input(fname, opts)?;
    }
    Ok(())
}

/// Rebuild the code from the header of a compressed file and decode its payload.
///
/// Both merge strategies build the same tree, so the file decodes no matter which one it was
/// written with. The header counts are checked against each other and against the payload
/// before anything is decoded.
pub fn unpack(packed: &[u8], strategy: MergeStrategy) -> io::Result<Vec<u8>> {
    let mut br = BitReader::new(packed);
    let short = || Error::new(ErrorKind::UnexpectedEof, "compressed header is truncated");
    let invalid = |msg: String| Error::new(ErrorKind::InvalidData, msg);

    let magic = br.bint(32).ok_or_else(short)?;
    if magic != MAGIC as u64 {
        return Err(invalid(format!(
            "bad magic number {:#010x}, not a huffcode file",
            magic
        )));
    }

    let symbols = br.bint(16).ok_or_else(short)? as usize;
    if symbols > 256 {
        return Err(invalid(format!("header claims {} distinct symbols", symbols)));
    }

    let mut freqs = FrequencyTable::new();
    let mut total = 0_u64;
    for _ in 0..symbols {
        let sym = br.byte().ok_or_else(short)?;
        let count = br.bint(64).ok_or_else(short)?;
        if count == 0 || freqs.get(sym) != 0 {
            return Err(invalid(format!("bad header entry for symbol {:#04x}", sym)));
        }
        total = total
            .checked_add(count)
            .ok_or_else(|| invalid("symbol counts overflow a 64 bit total".to_string()))?;
        freqs.insert(sym, count);
    }
    let bits = br.bint(64).ok_or_else(short)?;
    debug!("Header ends at {}", br.loc());

    // With two or more symbols every codeword takes at least one bit.
    if symbols > 1 && total > bits {
        return Err(invalid(format!(
            "header counts {} symbols but only {} payload bits",
            total, bits
        )));
    }
    let total = usize::try_from(total)
        .map_err(|_| invalid(format!("{} symbols is too many for this platform", total)))?;
    let bits = usize::try_from(bits)
        .map_err(|_| invalid(format!("{} payload bits is too many for this platform", bits)))?;

    let header_len = 4 + 2 + symbols * 9 + 8;
    let payload = &packed[header_len..];
    debug!(
        "Header: {} symbols, {} total, payload {} bits in {} bytes",
        symbols,
        total,
        bits,
        payload.len()
    );
    if payload.len() < bits / 8 + (bits % 8 != 0) as usize {
        return Err(Error::new(
            ErrorKind::UnexpectedEof,
            format!("payload is {} bytes, header says {} bits", payload.len(), bits),
        ));
    }

    if freqs.is_empty() {
        return Ok(Vec::new());
    }
    let codec = HuffmanCodec::from_frequencies(&freqs, strategy)?;
    Ok(codec.decode(payload, total)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::compression::compress::{compress, pack};

    #[test]
    fn round_trip_test() {
        let data = b"Round and round the rugged rock the ragged rascal ran.".to_vec();
        let packed = pack(&data, MergeStrategy::LinearScan).unwrap();
        assert_eq!(unpack(&packed, MergeStrategy::LinearScan).unwrap(), data);
        assert_eq!(unpack(&packed, MergeStrategy::Heap).unwrap(), data);
    }

    #[test]
    fn empty_and_single_symbol_test() {
        let packed = pack(&[], MergeStrategy::LinearScan).unwrap();
        assert!(unpack(&packed, MergeStrategy::LinearScan).unwrap().is_empty());

        let data = vec![0_u8; 1000];
        let packed = pack(&data, MergeStrategy::LinearScan).unwrap();
        assert_eq!(packed.len(), 4 + 2 + 9 + 8);
        assert_eq!(unpack(&packed, MergeStrategy::LinearScan).unwrap(), data);
    }

    #[test]
    fn large_input_round_trip_test() {
        // Over 64k, so the counts are taken in parallel.
        let data = (0..150_000_u32)
            .map(|i| (i % 7 + i % 13 + i % 101) as u8)
            .collect::<Vec<u8>>();
        let packed = pack(&data, MergeStrategy::Heap).unwrap();
        assert!(packed.len() < data.len());
        assert_eq!(unpack(&packed, MergeStrategy::LinearScan).unwrap(), data);
    }

    #[test]
    fn bad_magic_test() {
        let mut packed = pack(b"hello", MergeStrategy::LinearScan).unwrap();
        packed[0] = b'X';
        let err = unpack(&packed, MergeStrategy::LinearScan).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn truncated_test() {
        let data = b"hello hello hello, is there anybody in there?".to_vec();
        let packed = pack(&data, MergeStrategy::LinearScan).unwrap();
        // header cut short
        let err = unpack(&packed[..10], MergeStrategy::LinearScan).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
        // payload cut short
        let err = unpack(&packed[..packed.len() - 3], MergeStrategy::LinearScan).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
        // a bit count with no payload behind it
        let file = raw_file(1, &[(b'a', 3)], u64::MAX, &[]);
        assert_eq!(rejected(&file), ErrorKind::UnexpectedEof);
    }

    /// Assemble a compressed file by hand: declared symbol count, entries, payload bit count,
    /// then the payload bytes.
    fn raw_file(declared: u16, entries: &[(u8, u64)], bits: u64, payload: &[u8]) -> Vec<u8> {
        let mut file = b"HUF1".to_vec();
        file.extend_from_slice(&declared.to_be_bytes());
        for &(sym, count) in entries {
            file.push(sym);
            file.extend_from_slice(&count.to_be_bytes());
        }
        file.extend_from_slice(&bits.to_be_bytes());
        file.extend_from_slice(payload);
        file
    }

    fn rejected(file: &[u8]) -> ErrorKind {
        unpack(file, MergeStrategy::LinearScan).unwrap_err().kind()
    }

    #[test]
    fn raw_file_matches_pack_test() {
        let packed = pack(b"aab", MergeStrategy::LinearScan).unwrap();
        assert_eq!(packed, raw_file(2, &[(b'a', 2), (b'b', 1)], 3, &[0b1100_0000]));
        assert_eq!(unpack(&packed, MergeStrategy::LinearScan).unwrap(), b"aab");
    }

    #[test]
    fn too_many_symbols_test() {
        let file = raw_file(257, &[], 0, &[]);
        assert_eq!(rejected(&file), ErrorKind::InvalidData);
    }

    #[test]
    fn duplicate_symbol_test() {
        let file = raw_file(2, &[(b'a', 1), (b'a', 1)], 2, &[0]);
        assert_eq!(rejected(&file), ErrorKind::InvalidData);
    }

    #[test]
    fn zero_count_test() {
        let file = raw_file(2, &[(b'a', 0), (b'b', 1)], 1, &[0]);
        assert_eq!(rejected(&file), ErrorKind::InvalidData);
    }

    #[test]
    fn count_overflow_test() {
        let file = raw_file(2, &[(b'a', u64::MAX), (b'b', u64::MAX)], u64::MAX, &[]);
        assert_eq!(rejected(&file), ErrorKind::InvalidData);
    }

    #[test]
    fn counts_exceed_payload_bits_test() {
        // Ten symbols cannot fit in three bits when every codeword is at least one bit long.
        let file = raw_file(2, &[(b'a', 5), (b'b', 5)], 3, &[0]);
        assert_eq!(rejected(&file), ErrorKind::InvalidData);

        let file = raw_file(2, &[(b'a', 1 << 62), (b'b', 1)], 8, &[0]);
        assert_eq!(rejected(&file), ErrorKind::InvalidData);
    }

    #[test]
    fn huge_single_symbol_count_test() {
        // 23 bytes claiming 2^62 copies of one symbol with an empty payload.
        let file = raw_file(1, &[(b'a', 1 << 62)], 0, &[]);
        assert_eq!(file.len(), 23);
        assert_eq!(rejected(&file), ErrorKind::InvalidData);
    }

    #[test]
    fn decompress_file_test() {
        let dir = std::env::temp_dir().join(format!("huffcode_decompress_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("story.txt");
        let text = b"Once upon a time there was a small file that wanted to be smaller.".to_vec();
        fs::write(&input, &text).unwrap();

        let mut opts = HuffOpts::new();
        opts.files = vec![input.to_string_lossy().to_string()];
        compress(&opts).unwrap();
        assert!(!input.exists());

        opts.files = vec![dir.join("story.txt.huf").to_string_lossy().to_string()];
        decompress(&opts).unwrap();
        assert_eq!(fs::read(&input).unwrap(), text);
        assert!(!dir.join("story.txt.huf").exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
