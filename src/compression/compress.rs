use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::{debug, error, info, warn};

use crate::bitstream::bitpacker::BitPacker;
use crate::huffman_coding::codec::HuffmanCodec;
use crate::huffman_coding::MergeStrategy;
use crate::tools::cli::{HuffOpts, Output};
use crate::tools::freq_count::FrequencyTable;

/// "HUF1" - marks the start of every compressed file.
pub const MAGIC: u32 = 0x4855_4631;

/// Extension added to compressed files.
pub const EXTENSION: &str = ".huf";

/*
    Compressed file layout, all values big endian:

    magic           u32     "HUF1"
    symbol count    u16     number of distinct bytes in the input (0-256)
    per symbol      u8 symbol, u64 count, in ascending symbol order
    payload bits    u64     number of valid bits in the payload
    payload         packed codewords, zero padded to a whole byte

    The decoder rebuilds the same tree from the counts, so no codewords are stored.
    The number of symbols to decode is the sum of the counts.
*/

/// Compress each input file defined in opts <HuffOpts> to <file>.huf.
pub fn compress(opts: &HuffOpts) -> io::Result<()> {
    for fname in &opts.files {
        info!("Compressing {}", fname);
        let data = fs::read(fname)?;
        let packed = pack(&data, opts.strategy)?;
        info!(
            "{}: {} bytes in, {} bytes out",
            fname,
            data.len(),
            packed.len()
        );

        let mut out_name = fname.clone();
        out_name.push_str(EXTENSION);
        if !write_output(&out_name, &packed, opts)? {
            continue;
        }
        remove_input(fname, opts)?;
    }
    Ok(())
}

/// Build the code for data and return the complete compressed file contents.
pub fn pack(data: &[u8], strategy: MergeStrategy) -> io::Result<Vec<u8>> {
    let freqs = FrequencyTable::from_bytes(data);

    let (payload, bits) = if freqs.is_empty() {
        // Nothing to build a tree from. Write a header with no symbols.
        (Vec::new(), 0)
    } else {
        let codec = HuffmanCodec::from_frequencies(&freqs, strategy)?;
        let encoded = codec.encode(data)?;
        info!(
            "{} symbols: {} bits encoded, entropy {:.3} bits/symbol",
            freqs.total(),
            encoded.1,
            freqs.entropy()
        );
        encoded
    };

    let mut bp = BitPacker::new(payload.len() + 14 + freqs.len() * 9);
    bp.out32(MAGIC);
    bp.out16(freqs.len() as u16);
    for (sym, count) in freqs.iter() {
        bp.out24((8 << 24) | sym as u32);
        bp.out64(count);
    }
    bp.out64(bits as u64);
    bp.flush();
    debug!("Header ends at {}, payload {} bits", bp.loc(), bits);

    let mut output = bp.output;
    output.extend_from_slice(&payload);
    Ok(output)
}

/// Write data to the named file, or to stdout. Returns false if the file was left alone because
/// it already exists.
pub(crate) fn write_output(out_name: &str, data: &[u8], opts: &HuffOpts) -> io::Result<bool> {
    match opts.output {
        Output::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
        }
        Output::File => {
            if Path::new(out_name).exists() && !opts.force_overwrite {
                warn!("Output file {} already exists, skipping. (Use -f to overwrite.)", out_name);
                return Ok(false);
            }
            fs::write(out_name, data)?;
            info!("Wrote {}", out_name);
        }
    }
    Ok(true)
}

/// Delete the input file once its output is written, unless we were told to keep it.
pub(crate) fn remove_input(fname: &str, opts: &HuffOpts) -> io::Result<()> {
    if opts.keep_input_files || opts.output == Output::Stdout {
        return Ok(());
    }
    fs::remove_file(fname).map_err(|e| {
        error!("Could not remove {}: {}", fname, e);
        e
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn header_layout_test() {
        let packed = pack(b"aab", MergeStrategy::LinearScan).unwrap();
        // magic, 2 symbols, (a, 2), (b, 1), 3 payload bits, one payload byte
        let mut expected = b"HUF1".to_vec();
        expected.extend_from_slice(&[0, 2]);
        expected.push(b'a');
        expected.extend_from_slice(&2_u64.to_be_bytes());
        expected.push(b'b');
        expected.extend_from_slice(&1_u64.to_be_bytes());
        expected.extend_from_slice(&3_u64.to_be_bytes());
        // b has the lower count, so it merges first and sits on the left: b = 0, a = 1
        expected.push(0b1100_0000);
        assert_eq!(packed, expected);
    }

    #[test]
    fn empty_input_test() {
        let packed = pack(&[], MergeStrategy::LinearScan).unwrap();
        let mut expected = b"HUF1".to_vec();
        expected.extend_from_slice(&[0, 0]);
        expected.extend_from_slice(&0_u64.to_be_bytes());
        assert_eq!(packed, expected);
    }

    #[test]
    fn compress_file_test() {
        let dir = std::env::temp_dir().join(format!("huffcode_compress_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("input.txt");
        fs::write(&input, b"compress me, compress me again").unwrap();

        let mut opts = HuffOpts::new();
        opts.files = vec![input.to_string_lossy().to_string()];
        compress(&opts).unwrap();

        let output = dir.join("input.txt.huf");
        assert!(output.exists());
        assert!(!input.exists());
        assert!(fs::read(&output).unwrap().starts_with(b"HUF1"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn existing_output_is_kept_test() {
        let dir = std::env::temp_dir().join(format!("huffcode_exists_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("in.txt");
        let output = dir.join("in.txt.huf");
        fs::write(&input, b"data").unwrap();
        fs::write(&output, b"old").unwrap();

        let mut opts = HuffOpts::new();
        opts.files = vec![input.to_string_lossy().to_string()];
        compress(&opts).unwrap();
        assert_eq!(fs::read(&output).unwrap(), b"old");
        assert!(input.exists());

        opts.force_overwrite = true;
        opts.keep_input_files = true;
        compress(&opts).unwrap();
        assert!(fs::read(&output).unwrap().starts_with(b"HUF1"));
        assert!(input.exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
