use std::sync::Arc;

use crate::alphabet::{Alphabet, DEFAULT_SENTINEL};
use crate::bwt::Bwt;
use crate::error::{Error, Result};
use crate::rank::{RankBackend, RankProvider};
use crate::sa;
use crate::search::{BackwardSearch, SearchInterval};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    pub sentinel: u8,
    /// Explicit symbol set; derived from the text when `None`.
    pub alphabet: Option<Vec<u8>>,
    pub backend: RankBackend,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL,
            alphabet: None,
            backend: RankBackend::default(),
        }
    }
}

impl IndexConfig {
    pub fn with_backend(backend: RankBackend) -> Self {
        Self {
            backend,
            ..Self::default()
        }
    }

    pub fn alphabet_for(&self, text: &[u8]) -> Result<Alphabet> {
        match &self.alphabet {
            Some(symbols) => Alphabet::with_symbols(symbols, self.sentinel),
            None => Ok(Alphabet::from_text(text, self.sentinel)),
        }
    }
}

/// Text, suffix array, BWT and C-table of one sentinel-terminated text.
///
/// Built once and never mutated. Rank providers are built on demand from the
/// shared BWT, and several may exist at the same time.
#[derive(Debug, Clone)]
pub struct IndexCore {
    alphabet: Alphabet,
    text: Vec<u8>,
    sa: Vec<usize>,
    bwt: Arc<Bwt>,
}

impl IndexCore {
    pub fn build(text: &[u8], alphabet: Alphabet) -> Result<Self> {
        let text = alphabet.encode(text)?;
        Self::from_codes(text, alphabet)
    }

    /// Builds from codes that are already sentinel-terminated under `alphabet`.
    pub(crate) fn from_codes(text: Vec<u8>, alphabet: Alphabet) -> Result<Self> {
        if text.len() > u32::MAX as usize {
            return Err(Error::TextTooLong { len: text.len() });
        }
        log::debug!(
            "building index: n={} sigma={}",
            text.len(),
            alphabet.len()
        );

        let sa = sa::build(&text);
        let bwt = Arc::new(Bwt::build(&text, &sa, alphabet.len()));

        Ok(Self {
            alphabet,
            text,
            sa,
            bwt,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The encoded text, sentinel included.
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn suffix_array(&self) -> &[usize] {
        &self.sa
    }

    pub fn bwt(&self) -> &Arc<Bwt> {
        &self.bwt
    }

    /// Length including the sentinel.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn rank_provider(&self, backend: RankBackend) -> Result<Box<dyn RankProvider>> {
        backend.build(&self.bwt)
    }

    pub fn backward_search<'a, R>(&'a self, rank: &'a R) -> BackwardSearch<'a, R>
    where
        R: RankProvider + ?Sized,
    {
        BackwardSearch::new(self.bwt.c_table(), rank)
    }

    /// Searches `pattern` using `rank`; any symbol missing from the alphabet means no match.
    pub fn search_with<R>(&self, rank: &R, pattern: &[u8]) -> Option<SearchInterval>
    where
        R: RankProvider + ?Sized,
    {
        let codes = self.alphabet.encode_pattern(pattern)?;
        self.backward_search(rank).search_codes(&codes)
    }

    /// Text offsets of the rows in `interval`, ascending.
    pub fn locate(&self, interval: SearchInterval) -> Vec<usize> {
        if interval.is_empty() {
            return Vec::new();
        }
        let mut offsets = self.sa[interval.rows()].to_vec();
        offsets.sort_unstable();
        offsets
    }
}

/// An [`IndexCore`] paired with the rank backend chosen by configuration.
pub struct FmIndex {
    core: IndexCore,
    rank: Box<dyn RankProvider>,
    backend: RankBackend,
}

impl FmIndex {
    pub fn build(text: &[u8], config: &IndexConfig) -> Result<Self> {
        config.backend.validate()?;
        let alphabet = config.alphabet_for(text)?;
        let core = IndexCore::build(text, alphabet)?;
        Self::with_core(core, config.backend)
    }

    pub fn with_core(core: IndexCore, backend: RankBackend) -> Result<Self> {
        let rank = core.rank_provider(backend)?;
        Ok(Self {
            core,
            rank,
            backend,
        })
    }

    pub fn core(&self) -> &IndexCore {
        &self.core
    }

    pub fn backend(&self) -> RankBackend {
        self.backend
    }

    pub fn rank(&self) -> &dyn RankProvider {
        self.rank.as_ref()
    }

    /// Suffix-array rows whose suffixes start with `pattern`.
    pub fn search(&self, pattern: &[u8]) -> Option<SearchInterval> {
        self.core.search_with(self.rank.as_ref(), pattern)
    }

    pub fn contains(&self, pattern: &[u8]) -> bool {
        self.search(pattern).is_some()
    }

    pub fn count(&self, pattern: &[u8]) -> usize {
        self.search(pattern).map_or(0, |interval| interval.len())
    }

    /// Starting offsets of every occurrence of `pattern`, ascending.
    pub fn locate(&self, pattern: &[u8]) -> Vec<usize> {
        match self.search(pattern) {
            Some(interval) => self.core.locate(interval),
            None => Vec::new(),
        }
    }

    /// Length of the indexed text without the sentinel.
    pub fn text_len(&self) -> usize {
        self.core.len() - 1
    }

    /// Approximate heap memory of the index: text, suffix array, BWT and rank structure.
    pub fn heap_bytes(&self) -> usize {
        self.core.text.capacity()
            + self.core.sa.capacity() * std::mem::size_of::<usize>()
            + self.core.bwt.len()
            + self.rank.heap_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gattaca_examples() {
        let index = FmIndex::build(b"GATTACA", &IndexConfig::default()).unwrap();
        assert_eq!(index.count(b"TA"), 1);
        assert_eq!(index.locate(b"TA"), vec![3]);
        assert!(!index.contains(b"CAG"));
        assert_eq!(index.search(b""), Some(SearchInterval::new(0, 7)));
        assert_eq!(index.count(b"A"), 3);
        assert_eq!(index.locate(b"A"), vec![1, 4, 6]);
    }

    #[test]
    fn test_unknown_symbol_is_not_found() {
        let index = FmIndex::build(b"GATTACA", &IndexConfig::default()).unwrap();
        assert_eq!(index.search(b"GAN"), None);
        assert_eq!(index.count(b"N"), 0);
        assert!(index.locate(b"xyz").is_empty());
    }

    #[test]
    fn test_trailing_sentinel_is_kept() {
        let with = FmIndex::build(b"GATTACA$", &IndexConfig::default()).unwrap();
        let without = FmIndex::build(b"GATTACA", &IndexConfig::default()).unwrap();
        assert_eq!(with.core().text(), without.core().text());
        assert_eq!(with.text_len(), 7);
    }

    #[test]
    fn test_empty_input_is_sentinel_only() {
        let index = FmIndex::build(b"", &IndexConfig::default()).unwrap();
        assert_eq!(index.core().len(), 1);
        assert_eq!(index.core().suffix_array(), &[0]);
        assert_eq!(index.count(b""), 1);
        assert!(!index.contains(b"A"));
    }

    #[test]
    fn test_configuration_errors() {
        assert_eq!(
            FmIndex::build(b"GA$TTACA", &IndexConfig::default()).err(),
            Some(Error::MisplacedSentinel { position: 2 })
        );
        let config = IndexConfig::with_backend(RankBackend::Checkpointed { interval: 0 });
        assert_eq!(
            FmIndex::build(b"GATTACA", &config).err(),
            Some(Error::InvalidCheckpointInterval)
        );
        let config = IndexConfig {
            alphabet: Some(b"ACGT".to_vec()),
            ..IndexConfig::default()
        };
        assert_eq!(
            FmIndex::build(b"GATNACA", &config).err(),
            Some(Error::SymbolOutsideAlphabet {
                symbol: b'N',
                position: 3
            })
        );
    }

    #[test]
    fn test_explicit_alphabet_allows_absent_symbols() {
        let config = IndexConfig {
            alphabet: Some(b"ACGT".to_vec()),
            backend: RankBackend::wavelet_tree(),
            ..IndexConfig::default()
        };
        let index = FmIndex::build(b"AAAATTTT", &config).unwrap();
        assert_eq!(index.core().alphabet().len(), 5);
        assert!(!index.contains(b"G"));
        assert_eq!(index.count(b"AT"), 1);
    }

    #[test]
    fn test_custom_sentinel() {
        let config = IndexConfig {
            sentinel: b'#',
            ..IndexConfig::default()
        };
        let index = FmIndex::build(b"a$b$a", &config).unwrap();
        assert_eq!(index.count(b"$"), 2);
        assert_eq!(index.locate(b"a"), vec![0, 4]);
    }

    #[test]
    fn test_providers_share_one_core() {
        let core = IndexCore::build(b"ACGTTGCAACGT", Alphabet::dna()).unwrap();
        let full = core.rank_provider(RankBackend::Full).unwrap();
        let wavelet = core.rank_provider(RankBackend::wavelet_tree()).unwrap();
        assert_eq!(
            core.search_with(full.as_ref(), b"ACGT"),
            core.search_with(wavelet.as_ref(), b"ACGT")
        );
        assert_eq!(Arc::strong_count(core.bwt()), 1);
        let checkpointed = core.rank_provider(RankBackend::checkpointed()).unwrap();
        assert_eq!(Arc::strong_count(core.bwt()), 2);
        assert_eq!(core.search_with(checkpointed.as_ref(), b"GT").map(|i| i.len()), Some(2));
    }
}
