//! Backward search (LF-mapping) over a BWT.
//!
//! The pattern is consumed from its last symbol to its first. Each step maps
//! the current suffix-array interval to the interval of suffixes that start
//! with one more symbol:
//!
//! ```text
//! lo' = C[c] + rank(c, lo - 1)
//! hi' = C[c] + rank(c, hi) - 1
//! ```
//!
//! The step is identical for every [`RankProvider`].

use crate::bwt::CTable;
use crate::rank::RankProvider;

/// Inclusive range of suffix-array rows; empty when `lo > hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchInterval {
    pub lo: usize,
    pub hi: usize,
}

impl SearchInterval {
    pub fn new(lo: usize, hi: usize) -> Self {
        Self { lo, hi }
    }

    pub fn empty() -> Self {
        Self { lo: 1, hi: 0 }
    }

    /// Every row of a suffix array with `n` entries.
    pub fn whole(n: usize) -> Self {
        if n == 0 { Self::empty() } else { Self { lo: 0, hi: n - 1 } }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    /// Number of rows, which is the occurrence count of the matched pattern.
    #[inline]
    pub fn len(&self) -> usize {
        if self.is_empty() { 0 } else { self.hi - self.lo + 1 }
    }

    pub fn rows(&self) -> std::ops::RangeInclusive<usize> {
        self.lo..=self.hi
    }
}

/// One LF-mapping step. Returns the empty interval when `code` does not
/// precede any suffix of `interval` or lies outside the C-table.
#[inline]
pub fn lf_step<R>(c_table: &CTable, rank: &R, interval: SearchInterval, code: u8) -> SearchInterval
where
    R: RankProvider + ?Sized,
{
    if interval.is_empty() {
        return SearchInterval::empty();
    }
    let Some(start) = c_table.get(code) else {
        return SearchInterval::empty();
    };
    let lo = start + rank.rank(code, interval.lo as isize - 1);
    let end = start + rank.rank(code, interval.hi as isize);
    if lo >= end {
        SearchInterval::empty()
    } else {
        SearchInterval::new(lo, end - 1)
    }
}

/// Backward search bound to one C-table and one rank provider.
pub struct BackwardSearch<'a, R: RankProvider + ?Sized> {
    c_table: &'a CTable,
    rank: &'a R,
}

impl<'a, R: RankProvider + ?Sized> BackwardSearch<'a, R> {
    pub fn new(c_table: &'a CTable, rank: &'a R) -> Self {
        Self { c_table, rank }
    }

    /// Searches an already encoded pattern. The empty pattern matches every row.
    pub fn search_codes(&self, pattern: &[u8]) -> Option<SearchInterval> {
        let mut interval = SearchInterval::whole(self.rank.len());
        for &code in pattern.iter().rev() {
            interval = lf_step(self.c_table, self.rank, interval, code);
            if interval.is_empty() {
                log::trace!("backward search: no rows left at code {}", code);
                return None;
            }
        }
        Some(interval)
    }
}
