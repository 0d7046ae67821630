use std::fmt;

use itertools::Itertools;

pub const BUCKETS: usize = 256;

/// Per-byte occurrence table.
#[derive(Clone, PartialEq, Eq)]
pub struct Occurrences {
    counts: [u64; BUCKETS],
}

impl Default for Occurrences {
    fn default() -> Self {
        Self {
            counts: [0; BUCKETS],
        }
    }
}

impl fmt::Debug for Occurrences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(byte, count)| (byte as char, count)))
            .finish()
    }
}

impl Occurrences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` for every byte of `bytes`, repeated bytes included.
    pub fn add(&mut self, bytes: &[u8], count: u64) {
        for &byte in bytes {
            let slot = &mut self.counts[byte as usize];
            *slot = slot.saturating_add(count);
        }
    }

    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Saturates like [`add`](Self::add) does.
    pub fn total(&self) -> u64 {
        saturating_total(&self.counts)
    }

    pub fn reset(&mut self) {
        self.counts = [0; BUCKETS];
    }

    /// Non-zero entries in byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(byte, count)| (byte as u8, *count))
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    pub fn information_content(&self) -> f64 {
        estimate(self.as_slice())
    }

    /// Snapshot of the terms of [`estimate`] so that projections onto this
    /// table cost `O(len)` instead of `O(BUCKETS)`.
    pub fn projection(&self) -> Projection<'_> {
        Projection {
            base: self,
            total: self.total(),
            symbols: self.counts.iter().map(|n| plogp(*n)).sum(),
        }
    }
}

/// Scores "this table plus some bytes" without materializing the table.
#[derive(Debug, Clone, Copy)]
pub struct Projection<'a> {
    base: &'a Occurrences,
    total: u64,
    symbols: f64,
}

impl Projection<'_> {
    /// Equal, up to rounding, to cloning the base table, adding `bytes`
    /// `count` times and calling [`Occurrences::information_content`].
    pub fn information_content(&self, bytes: &[u8], count: u64) -> f64 {
        let mut sorted = bytes.to_vec();
        sorted.sort_unstable();

        let mut changes = sorted
            .into_iter()
            .dedup_with_count()
            .map(|(times, byte)| {
                let before = self.base.get(byte);
                (before, before.saturating_add(count.saturating_mul(times as u64)))
            })
            .collect_vec();

        // projections that only differ by which bytes they touch tie exactly
        changes.sort_unstable();

        let mut total = self.total;
        let mut delta = 0.0;

        for (before, after) in changes {
            total = total.saturating_add(after - before);
            delta += plogp(after) - plogp(before);
        }

        let symbols = self.symbols + delta;

        if total == 0 {
            return 0.0;
        }

        plogp(total) - symbols
    }
}

fn saturating_total(counts: &[u64]) -> u64 {
    counts.iter().fold(0u64, |total, n| total.saturating_add(*n))
}

fn plogp(n: u64) -> f64 {
    if n == 0 {
        return 0.0;
    }

    let n = n as f64;
    n * n.log2()
}

/// Estimated size in bits of a stream with the given symbol counts under an
/// order-0 entropy coder: `total*log2(total) - sum(n*log2(n))`.
///
/// An empty table is 0 bits.
pub fn estimate(counts: &[u64]) -> f64 {
    let total = saturating_total(counts);

    if total == 0 {
        return 0.0;
    }

    let symbols: f64 = counts.iter().map(|n| plogp(*n)).sum();

    plogp(total) - symbols
}
