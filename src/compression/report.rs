use std::fs;
use std::io;

use log::{info, warn};

use crate::huffman_coding::{build_code_with, HuffmanCode};
use crate::tools::cli::HuffOpts;
use crate::tools::freq_count::FrequencyTable;

/// Print the code table for each input file. Empty files have no table and are skipped.
pub fn table(opts: &HuffOpts) -> io::Result<()> {
    for fname in &opts.files {
        let data = fs::read(fname)?;
        let freqs = FrequencyTable::from_bytes(&data);
        if freqs.is_empty() {
            warn!("{} is empty, no code to build", fname);
            continue;
        }
        let code = build_code_with(&freqs, opts.strategy)?;
        info!("Code table for {}", fname);
        println!("{}", format_table(fname, &freqs, &code));
    }
    Ok(())
}

/// One line per symbol (byte value, count, codeword), followed by a summary line.
pub fn format_table(name: &str, freqs: &FrequencyTable, code: &HuffmanCode) -> String {
    let mut lines = vec![format!("{}: {} symbols, {} distinct", name, freqs.total(), freqs.len())];
    for (sym, word) in code.table().iter() {
        let shown = if sym.is_ascii_graphic() {
            format!("'{}'", sym as char)
        } else {
            "   ".to_string()
        };
        lines.push(format!(
            "  {:#04x} {} {:>10} {}",
            sym,
            shown,
            freqs.get(sym),
            word
        ));
    }
    let bits = code.table().weighted_length(freqs);
    lines.push(format!(
        "  {} bits ({} bytes), {:.3} bits/symbol, entropy {:.3}",
        bits,
        (bits + 7) / 8,
        bits as f64 / freqs.total() as f64,
        freqs.entropy()
    ));
    lines.join("\n")
}
