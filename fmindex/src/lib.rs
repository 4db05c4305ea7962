pub mod alphabet;
pub mod bidirectional;
pub mod bwt;
pub mod error;
pub mod index;
pub mod naive;
pub mod rank;
pub mod sa;
pub mod search;

pub use alphabet::{Alphabet, DEFAULT_SENTINEL};
pub use bidirectional::{BiInterval, BidirectionalIndex};
pub use bwt::{Bwt, CTable};
pub use error::{Error, Result};
pub use index::{FmIndex, IndexConfig, IndexCore};
pub use rank::{CheckpointedOcc, FullOccTable, RankBackend, RankProvider, WaveletTreeRank};
pub use search::{BackwardSearch, SearchInterval};
