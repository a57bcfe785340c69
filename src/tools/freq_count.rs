use log::trace;
use rayon::prelude::*;

/// Occurrence counts for each byte value. Symbols that never occur are treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count the bytes in data and return the table.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.count(data);
        table
    }

    /// Add the bytes in data to the running counts. Uses parallelism when data set is over 64k.
    pub fn count(&mut self, data: &[u8]) {
        let freqs = freqs(data);
        self.counts
            .iter_mut()
            .zip(freqs.iter())
            .for_each(|(c, f)| *c = c.saturating_add(*f));
        trace!("Counted {} bytes, {} distinct symbols", data.len(), self.len());
    }

    /// Set the count for a symbol directly. A count of zero removes the symbol.
    pub fn insert(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    /// Count for a symbol (0 when absent).
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols present.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Total number of symbols counted. Saturates at u64::MAX, see checked_total().
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0, |sum, &c| sum.saturating_add(c))
    }

    /// Total number of symbols counted, or None if it does not fit in a u64.
    pub fn checked_total(&self) -> Option<u64> {
        self.counts.iter().try_fold(0_u64, |sum, &c| sum.checked_add(c))
    }

    /// Present symbols and their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(sym, &c)| (sym as u8, c))
    }

    /// Shannon entropy of the distribution in bits per symbol. 0.0 when empty.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        self.iter()
            .map(|(_, c)| {
                let p = c as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    /// Build a table from explicit (symbol, count) pairs. Repeated symbols accumulate, saturating
    /// at u64::MAX.
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (sym, count) in iter {
            let slot = &mut table.counts[sym as usize];
            *slot = slot.saturating_add(count);
        }
        table
    }
}

/// Returns a frequency count of the input data. Uses parallelism when data set is over 64k.
pub fn freqs(data: &[u8]) -> Vec<u64> {
    if data.len() > 64_000 {
        // 16k is pretty much the sweet spot for chunk size.
        data.par_chunks(16_000)
            .fold(
                || vec![0_u64; 256],
                |mut freqs, chunk| {
                    chunk.iter().for_each(|&el| freqs[el as usize] += 1);
                    freqs
                },
            )
            .reduce(
                || vec![0_u64; 256],
                |s, f| s.iter().zip(&f).map(|(a, b)| a + b).collect::<Vec<u64>>(),
            )
    } else {
        let mut freqs = vec![0_u64; 256];
        data.iter().for_each(|&el| freqs[el as usize] += 1);
        freqs
    }
}
