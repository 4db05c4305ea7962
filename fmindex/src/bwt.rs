//! Burrows-Wheeler Transform and C-table.
//!
//! Everything here works on dense codes (see [`crate::alphabet`]): the
//! sentinel is code 0, so the C-table is a plain prefix sum over codes.

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};

/// `C[c]`: number of BWT symbols with a code strictly smaller than `c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CTable {
    starts: Vec<usize>,
    counts: Vec<usize>,
}

impl CTable {
    pub fn from_symbols(symbols: &[u8], sigma: usize) -> Self {
        let mut counts = vec![0usize; sigma];
        for &c in symbols {
            counts[c as usize] += 1;
        }

        let mut starts = Vec::with_capacity(sigma);
        let mut total = 0usize;
        for &count in &counts {
            starts.push(total);
            total += count;
        }

        Self { starts, counts }
    }

    /// `C[code]`, or `None` for a code outside the alphabet.
    #[inline]
    pub fn get(&self, code: u8) -> Option<usize> {
        self.starts.get(code as usize).copied()
    }

    /// Occurrences of `code` in the whole BWT.
    #[inline]
    pub fn count(&self, code: u8) -> usize {
        self.counts.get(code as usize).copied().unwrap_or(0)
    }

    /// Number of codes covered, sentinel included.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> usize {
        match (self.starts.last(), self.counts.last()) {
            (Some(start), Some(count)) => start + count,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bwt {
    symbols: Vec<u8>,
    c_table: CTable,
    sigma: usize,
}

impl Bwt {
    /// `bwt[i] = text[sa[i] - 1]`, or the sentinel where `sa[i] == 0`.
    pub fn build(text: &[u8], sa: &[usize], sigma: usize) -> Self {
        let mut symbols = Vec::with_capacity(sa.len());
        for &pos in sa {
            if pos == 0 {
                symbols.push(0);
            } else {
                symbols.push(text[pos - 1]);
            }
        }
        let c_table = CTable::from_symbols(&symbols, sigma);
        log::debug!("bwt: n={} sigma={}", symbols.len(), sigma);

        Self {
            symbols,
            c_table,
            sigma,
        }
    }

    /// Wraps an arbitrary symbol string as a BWT so rank structures can be
    /// built over it directly. No suffix-order checks are made.
    pub fn from_symbols(alphabet: &Alphabet, raw: &[u8]) -> Result<Self> {
        let mut symbols = Vec::with_capacity(raw.len());
        for (position, &symbol) in raw.iter().enumerate() {
            let code = alphabet
                .code(symbol)
                .ok_or(Error::SymbolOutsideAlphabet { symbol, position })?;
            symbols.push(code);
        }
        let c_table = CTable::from_symbols(&symbols, alphabet.len());

        Ok(Self {
            symbols,
            c_table,
            sigma: alphabet.len(),
        })
    }

    #[inline]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    #[inline]
    pub fn c_table(&self) -> &CTable {
        &self.c_table
    }

    /// Number of codes, sentinel included.
    #[inline]
    pub fn sigma(&self) -> usize {
        self.sigma
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sa;

    fn build_for(raw: &[u8], alphabet: &Alphabet) -> Bwt {
        let text = alphabet.encode(raw).unwrap();
        let sa = sa::build(&text);
        Bwt::build(&text, &sa, alphabet.len())
    }

    #[test]
    fn test_banana_bwt() {
        let alphabet = Alphabet::from_text(b"banana", b'$');
        let bwt = build_for(b"banana", &alphabet);
        assert_eq!(alphabet.decode(bwt.symbols()), b"annb$aa".to_vec());
    }

    #[test]
    fn test_gattaca_bwt() {
        let alphabet = Alphabet::dna();
        let bwt = build_for(b"GATTACA", &alphabet);
        assert_eq!(alphabet.decode(bwt.symbols()), b"ACTGA$TA".to_vec());
    }

    #[test]
    fn test_c_table() {
        let alphabet = Alphabet::dna();
        let bwt = build_for(b"GATTACA", &alphabet);
        let c = bwt.c_table();
        // $ A A A C G T T
        assert_eq!(c.get(0), Some(0));
        assert_eq!(c.get(1), Some(1));
        assert_eq!(c.get(2), Some(4));
        assert_eq!(c.get(3), Some(5));
        assert_eq!(c.get(4), Some(6));
        assert_eq!(c.get(5), None);
        assert_eq!(c.get(4).unwrap() + c.count(4), bwt.len());
        assert_eq!(c.total(), bwt.len());
    }

    #[test]
    fn test_c_table_with_absent_symbol() {
        // 'G' is in the alphabet but not in the text.
        let alphabet = Alphabet::dna();
        let bwt = build_for(b"ACCA", &alphabet);
        let c = bwt.c_table();
        assert_eq!(c.count(3), 0);
        assert_eq!(c.get(3), c.get(4));
        assert_eq!(c.total(), 5);
    }

    #[test]
    fn test_sentinel_only_text() {
        let alphabet = Alphabet::dna();
        let bwt = build_for(b"", &alphabet);
        assert_eq!(bwt.symbols(), &[0]);
        assert_eq!(bwt.c_table().total(), 1);
    }

    #[test]
    fn test_from_symbols() {
        let alphabet = Alphabet::dna();
        let bwt = Bwt::from_symbols(&alphabet, b"ACGTACGT$").unwrap();
        assert_eq!(bwt.len(), 9);
        assert_eq!(bwt.c_table().get(1), Some(1));
        assert!(matches!(
            Bwt::from_symbols(&alphabet, b"ACXT"),
            Err(Error::SymbolOutsideAlphabet { symbol: b'X', position: 2 })
        ));
    }
}
