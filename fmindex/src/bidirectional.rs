//! Bidirectional extension: grow a pattern at either end while keeping its
//! interval in the forward index (text `T$`) and in the reverse index
//! (`reverse(T)$`) in sync.
//!
//! Every [`BiInterval`] carries, for each code `a`, how many occurrences of
//! the current pattern are preceded by `a` (counted in the forward BWT
//! interval) and how many are followed by `a` (counted in the reverse BWT
//! interval). Inside the reverse interval the rows are ordered by the symbol
//! that precedes the pattern in `T`, so prepending `c` keeps the sub-range
//! that starts after the rows of every smaller code:
//!
//! ```text
//! rev' = [rev.lo + sum(fwd_counts[..c]), .. + fwd_counts[c] - 1]
//! ```
//!
//! Appending is the mirror image on the reverse index. Both directions cost
//! one LF step plus `O(sigma)` rank queries.

use crate::alphabet::Alphabet;
use crate::bwt::CTable;
use crate::error::Result;
use crate::index::{IndexConfig, IndexCore};
use crate::rank::{RankBackend, RankProvider};
use crate::search::{SearchInterval, lf_step};

/// Search state of one pattern in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiInterval {
    fwd: SearchInterval,
    rev: SearchInterval,
    fwd_counts: Vec<usize>,
    rev_counts: Vec<usize>,
}

impl BiInterval {
    fn empty(sigma: usize) -> Self {
        Self {
            fwd: SearchInterval::empty(),
            rev: SearchInterval::empty(),
            fwd_counts: vec![0; sigma],
            rev_counts: vec![0; sigma],
        }
    }

    /// Rows of the forward suffix array whose suffixes start with the pattern.
    pub fn forward(&self) -> SearchInterval {
        self.fwd
    }

    /// Rows of the reverse suffix array whose suffixes start with the reversed pattern.
    pub fn reverse(&self) -> SearchInterval {
        self.rev
    }

    pub fn is_empty(&self) -> bool {
        self.fwd.is_empty() || self.rev.is_empty()
    }

    /// Number of occurrences of the pattern.
    pub fn len(&self) -> usize {
        if self.is_empty() { 0 } else { self.fwd.len() }
    }

    /// Occurrences of the pattern preceded by `code`; code 0 counts a match at offset 0.
    pub fn preceded_by(&self, code: u8) -> usize {
        self.fwd_counts.get(code as usize).copied().unwrap_or(0)
    }

    /// Occurrences of the pattern followed by `code`; code 0 counts a match at the end of the text.
    pub fn followed_by(&self, code: u8) -> usize {
        self.rev_counts.get(code as usize).copied().unwrap_or(0)
    }
}

pub struct BidirectionalIndex {
    forward: IndexCore,
    reverse: IndexCore,
    fwd_rank: Box<dyn RankProvider>,
    rev_rank: Box<dyn RankProvider>,
    backend: RankBackend,
}

impl BidirectionalIndex {
    pub fn build(text: &[u8], config: &IndexConfig) -> Result<Self> {
        config.backend.validate()?;
        let alphabet = config.alphabet_for(text)?;
        let forward = IndexCore::build(text, alphabet)?;

        let body = &forward.text()[..forward.len() - 1];
        let mut reversed: Vec<u8> = body.iter().rev().copied().collect();
        reversed.push(0);
        let reverse = IndexCore::from_codes(reversed, forward.alphabet().clone())?;

        let fwd_rank = forward.rank_provider(config.backend)?;
        let rev_rank = reverse.rank_provider(config.backend)?;
        log::debug!(
            "bidirectional index: n={} backend={}",
            forward.len(),
            fwd_rank.name()
        );

        Ok(Self {
            forward,
            reverse,
            fwd_rank,
            rev_rank,
            backend: config.backend,
        })
    }

    pub fn forward(&self) -> &IndexCore {
        &self.forward
    }

    pub fn reverse(&self) -> &IndexCore {
        &self.reverse
    }

    pub fn backend(&self) -> RankBackend {
        self.backend
    }

    pub fn alphabet(&self) -> &Alphabet {
        self.forward.alphabet()
    }

    fn sigma(&self) -> usize {
        self.forward.alphabet().len()
    }

    /// State of the empty pattern: every row in both directions.
    pub fn initial(&self) -> BiInterval {
        let n = self.forward.len();
        self.state(SearchInterval::whole(n), SearchInterval::whole(n))
    }

    /// Prepends `symbol` to the pattern.
    pub fn extend_backward(&self, state: &BiInterval, symbol: u8) -> BiInterval {
        let Some(code) = self.extension_code(state, symbol) else {
            return BiInterval::empty(self.sigma());
        };
        let stepped = extend(
            self.forward.bwt().c_table(),
            self.fwd_rank.as_ref(),
            state.fwd,
            &state.fwd_counts,
            state.rev,
            code,
        );
        match stepped {
            Some((fwd, rev)) => self.state(fwd, rev),
            None => BiInterval::empty(self.sigma()),
        }
    }

    /// Appends `symbol` to the pattern.
    pub fn extend_forward(&self, state: &BiInterval, symbol: u8) -> BiInterval {
        let Some(code) = self.extension_code(state, symbol) else {
            return BiInterval::empty(self.sigma());
        };
        let stepped = extend(
            self.reverse.bwt().c_table(),
            self.rev_rank.as_ref(),
            state.rev,
            &state.rev_counts,
            state.fwd,
            code,
        );
        match stepped {
            Some((rev, fwd)) => self.state(fwd, rev),
            None => BiInterval::empty(self.sigma()),
        }
    }

    /// Matches `pattern` by prepending its symbols from last to first.
    pub fn search(&self, pattern: &[u8]) -> Option<BiInterval> {
        let mut state = self.initial();
        for &symbol in pattern.iter().rev() {
            state = self.extend_backward(&state, symbol);
            if state.is_empty() {
                return None;
            }
        }
        Some(state)
    }

    /// Starting offsets in the forward text, ascending.
    pub fn locate(&self, state: &BiInterval) -> Vec<usize> {
        if state.is_empty() {
            return Vec::new();
        }
        self.forward.locate(state.fwd)
    }

    // The sentinel only ends the text, so it never extends a pattern.
    fn extension_code(&self, state: &BiInterval, symbol: u8) -> Option<u8> {
        if state.is_empty() {
            return None;
        }
        match self.forward.alphabet().code(symbol) {
            Some(0) | None => {
                log::trace!("cannot extend with symbol {:#04x}", symbol);
                None
            }
            code => code,
        }
    }

    fn state(&self, fwd: SearchInterval, rev: SearchInterval) -> BiInterval {
        let sigma = self.sigma();
        BiInterval {
            fwd,
            rev,
            fwd_counts: interval_counts(self.fwd_rank.as_ref(), fwd, sigma),
            rev_counts: interval_counts(self.rev_rank.as_ref(), rev, sigma),
        }
    }
}

/// LF step on `stepped` and the matching shift of `other`, returned in that order.
fn extend(
    c_table: &CTable,
    rank: &dyn RankProvider,
    stepped: SearchInterval,
    stepped_counts: &[usize],
    other: SearchInterval,
    code: u8,
) -> Option<(SearchInterval, SearchInterval)> {
    let next = lf_step(c_table, rank, stepped, code);
    if next.is_empty() {
        return None;
    }
    let size = stepped_counts[code as usize];
    debug_assert_eq!(size, next.len());
    let offset: usize = stepped_counts[..code as usize].iter().sum();
    let lo = other.lo + offset;
    Some((next, SearchInterval::new(lo, lo + size - 1)))
}

fn interval_counts(rank: &dyn RankProvider, interval: SearchInterval, sigma: usize) -> Vec<usize> {
    if interval.is_empty() {
        return vec![0; sigma];
    }
    (0..sigma)
        .map(|code| {
            let code = code as u8;
            rank.count_prefix(code, interval.hi + 1) - rank.count_prefix(code, interval.lo)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::FmIndex;

    fn build(text: &[u8], backend: RankBackend) -> BidirectionalIndex {
        BidirectionalIndex::build(text, &IndexConfig::with_backend(backend)).unwrap()
    }

    #[test]
    fn test_initial_state_covers_everything() {
        let index = build(b"GATTACA", RankBackend::Full);
        let state = index.initial();
        assert_eq!(state.forward(), SearchInterval::new(0, 7));
        assert_eq!(state.reverse(), SearchInterval::new(0, 7));
        assert_eq!(state.len(), 8);
        assert_eq!(index.reverse().text(), index.alphabet().encode(b"ACATTAG").unwrap());
    }

    #[test]
    fn test_counts_of_single_symbol() {
        let index = build(b"GATTACA", RankBackend::Full);
        let alphabet = index.alphabet().clone();
        let code = |b: u8| alphabet.code(b).unwrap();
        let a = index.extend_forward(&index.initial(), b'A');

        assert_eq!(a.len(), 3);
        // A occurs at 1, 4 and 6.
        assert_eq!(a.preceded_by(code(b'G')), 1);
        assert_eq!(a.preceded_by(code(b'T')), 1);
        assert_eq!(a.preceded_by(code(b'C')), 1);
        assert_eq!(a.preceded_by(code(b'A')), 0);
        assert_eq!(a.followed_by(code(b'T')), 1);
        assert_eq!(a.followed_by(code(b'C')), 1);
        assert_eq!(a.followed_by(0), 1);
    }

    #[test]
    fn test_both_directions_reach_same_state() {
        let index = build(b"GATTACA", RankBackend::checkpointed());
        let init = index.initial();

        let left = index.extend_backward(&index.extend_backward(&init, b'A'), b'T');
        let right = index.extend_forward(&index.extend_forward(&init, b'T'), b'A');
        assert_eq!(left, right);
        assert_eq!(left.forward(), SearchInterval::new(6, 6));
        assert_eq!(index.locate(&left), vec![3]);

        let reversed = index.reverse().rank_provider(RankBackend::Full).unwrap();
        assert_eq!(
            index.reverse().search_with(reversed.as_ref(), b"AT"),
            Some(left.reverse())
        );
    }

    #[test]
    fn test_any_extension_order_matches_backward_search() {
        let text = b"ACGTTGCAACGTAGGATCCATTAGACGTT";
        for backend in [RankBackend::Full, RankBackend::checkpointed(), RankBackend::wavelet_tree()] {
            let index = build(text, backend);
            let plain = FmIndex::build(text, &IndexConfig::with_backend(backend)).unwrap();

            for start in 0..text.len() {
                for end in start + 1..=(start + 6).min(text.len()) {
                    let pattern = &text[start..end];
                    let expected = plain.search(pattern);
                    for seed in 0..pattern.len() {
                        // Seed with one symbol, then alternate between both ends.
                        let mut state = index.extend_forward(&index.initial(), pattern[seed]);
                        let (mut lo, mut hi) = (seed, seed + 1);
                        while lo > 0 || hi < pattern.len() {
                            if hi < pattern.len() && (lo == 0 || (hi - lo) % 2 == 0) {
                                state = index.extend_forward(&state, pattern[hi]);
                                hi += 1;
                            } else {
                                lo -= 1;
                                state = index.extend_backward(&state, pattern[lo]);
                            }
                        }
                        assert_eq!(Some(state.forward()), expected, "pattern {:?}", pattern);
                        assert_eq!(state.forward().len(), state.reverse().len());
                    }
                }
            }
        }
    }

    #[test]
    fn test_missing_extension_is_terminal() {
        let index = build(b"GATTACA", RankBackend::wavelet_tree());
        let gat = index.search(b"GAT").unwrap();
        let dead = index.extend_forward(&gat, b'C');
        assert!(dead.is_empty());
        assert_eq!(dead.len(), 0);
        assert!(index.extend_backward(&dead, b'A').is_empty());
        assert!(index.extend_forward(&dead, b'T').is_empty());
        assert!(index.extend_forward(&gat, b'N').is_empty());
        assert!(index.extend_backward(&gat, b'$').is_empty());
        assert_eq!(index.search(b"CAG"), None);
    }

    #[test]
    fn test_search_and_locate() {
        let index = build(b"ACGTACGTACGT", RankBackend::Full);
        let state = index.search(b"ACGT").unwrap();
        assert_eq!(state.len(), 3);
        assert_eq!(index.locate(&state), vec![0, 4, 8]);
        assert_eq!(index.search(b"").map(|s| s.len()), Some(13));
    }
}
