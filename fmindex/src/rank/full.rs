use crate::bwt::Bwt;

use super::{RankProvider, check_bounds};

/// Running count of every symbol at every prefix length.
///
/// Row `end` holds the counts of `bwt[..end]`, so the table has `n + 1` rows of
/// `sigma` counters and every query is a single lookup.
#[derive(Debug, Clone)]
pub struct FullOccTable {
    occ: Vec<u32>,
    sigma: usize,
    len: usize,
}

impl FullOccTable {
    pub fn new(bwt: &Bwt) -> Self {
        let sigma = bwt.sigma();
        let len = bwt.len();
        let mut occ = Vec::with_capacity((len + 1) * sigma);
        let mut counts = vec![0u32; sigma];

        occ.extend_from_slice(&counts);
        for &code in bwt.symbols() {
            counts[code as usize] += 1;
            occ.extend_from_slice(&counts);
        }

        Self { occ, sigma, len }
    }
}

impl RankProvider for FullOccTable {
    #[inline]
    fn count_prefix(&self, code: u8, end: usize) -> usize {
        check_bounds(end, self.len);
        let code = code as usize;
        if code >= self.sigma {
            return 0;
        }
        self.occ[end * self.sigma + code] as usize
    }

    fn len(&self) -> usize {
        self.len
    }

    fn heap_bytes(&self) -> usize {
        self.occ.capacity() * std::mem::size_of::<u32>()
    }

    fn name(&self) -> &'static str {
        "full"
    }
}
