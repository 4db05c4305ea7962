use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The sentinel occurs somewhere other than the last position of the text.
    MisplacedSentinel { position: usize },
    /// A checkpoint interval of zero was requested.
    InvalidCheckpointInterval,
    /// The text contains a symbol the configured alphabet does not list.
    SymbolOutsideAlphabet { symbol: u8, position: usize },
    /// The configured alphabet lists the sentinel byte itself.
    SentinelInAlphabet { sentinel: u8 },
    /// The text does not fit the 32-bit occurrence counters.
    TextTooLong { len: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MisplacedSentinel { position } => {
                write!(f, "sentinel found at position {position}; it may only end the text")
            }
            Error::InvalidCheckpointInterval => {
                write!(f, "checkpoint interval must be a positive integer")
            }
            Error::SymbolOutsideAlphabet { symbol, position } => write!(
                f,
                "symbol {:?} at position {position} is not part of the alphabet",
                *symbol as char
            ),
            Error::SentinelInAlphabet { sentinel } => write!(
                f,
                "alphabet must not contain the sentinel {:?}",
                *sentinel as char
            ),
            Error::TextTooLong { len } => {
                write!(f, "text of {len} symbols exceeds the supported maximum of {}", u32::MAX)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
