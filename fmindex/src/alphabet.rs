// Byte symbols are remapped to dense codes so that the sentinel is always code 0
// and sorts before everything else, whatever its byte value.
use crate::error::{Error, Result};

pub const DEFAULT_SENTINEL: u8 = b'$';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    sentinel: u8,
    byte_to_code: [i16; 256],
    code_to_byte: Vec<u8>,
}

impl Alphabet {
    /// Alphabet of every distinct byte in `text` other than the sentinel.
    pub fn from_text(text: &[u8], sentinel: u8) -> Self {
        let mut seen = [false; 256];
        for &b in text {
            seen[b as usize] = true;
        }
        seen[sentinel as usize] = false;

        let symbols: Vec<u8> = (0..256u16)
            .map(|b| b as u8)
            .filter(|&b| seen[b as usize])
            .collect();
        Self::build(&symbols, sentinel)
    }

    /// Alphabet with an explicit symbol set. Duplicates are ignored.
    pub fn with_symbols(symbols: &[u8], sentinel: u8) -> Result<Self> {
        if symbols.contains(&sentinel) {
            return Err(Error::SentinelInAlphabet { sentinel });
        }
        let mut sorted = symbols.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        Ok(Self::build(&sorted, sentinel))
    }

    pub fn dna() -> Self {
        Self::build(b"ACGT", DEFAULT_SENTINEL)
    }

    fn build(sorted_symbols: &[u8], sentinel: u8) -> Self {
        let mut byte_to_code = [-1i16; 256];
        let mut code_to_byte = Vec::with_capacity(sorted_symbols.len() + 1);

        byte_to_code[sentinel as usize] = 0;
        code_to_byte.push(sentinel);
        for &b in sorted_symbols {
            byte_to_code[b as usize] = code_to_byte.len() as i16;
            code_to_byte.push(b);
        }

        Self {
            sentinel,
            byte_to_code,
            code_to_byte,
        }
    }

    pub fn sentinel(&self) -> u8 {
        self.sentinel
    }

    /// Number of codes, sentinel included.
    pub fn len(&self) -> usize {
        self.code_to_byte.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_to_byte.len() <= 1
    }

    /// Symbols in code order, without the sentinel.
    pub fn symbols(&self) -> &[u8] {
        &self.code_to_byte[1..]
    }

    pub fn code(&self, symbol: u8) -> Option<u8> {
        let code = self.byte_to_code[symbol as usize];
        if code < 0 { None } else { Some(code as u8) }
    }

    pub fn symbol(&self, code: u8) -> Option<u8> {
        self.code_to_byte.get(code as usize).copied()
    }

    /// Translates `text` into codes, appending the sentinel when it is missing.
    pub fn encode(&self, text: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(text.len() + 1);
        for (position, &symbol) in text.iter().enumerate() {
            if symbol == self.sentinel && position + 1 != text.len() {
                return Err(Error::MisplacedSentinel { position });
            }
            let code = self
                .code(symbol)
                .ok_or(Error::SymbolOutsideAlphabet { symbol, position })?;
            out.push(code);
        }
        if out.last() != Some(&0) {
            out.push(0);
        }
        Ok(out)
    }

    /// Translates a pattern; `None` when it uses a symbol the alphabet lacks.
    pub fn encode_pattern(&self, pattern: &[u8]) -> Option<Vec<u8>> {
        pattern.iter().map(|&b| self.code(b)).collect()
    }

    pub fn decode(&self, codes: &[u8]) -> Vec<u8> {
        codes
            .iter()
            .map(|&c| self.code_to_byte[c as usize])
            .collect()
    }
}
