//! Rank queries over a BWT: how many times does a symbol occur in a prefix.
//!
//! Three interchangeable backends trade memory for query latency:
//!
//! | Backend | Query | Space |
//! |---------|-------|-------|
//! | [`FullOccTable`] | O(1) | O(σ · n) counters |
//! | [`CheckpointedOcc`] | O(interval) | O(σ · n / interval) counters |
//! | [`WaveletTreeRank`] | O(log σ · interval) | O(n log σ) bits |

mod checkpointed;
mod full;
mod wavelet;

use std::sync::Arc;

pub use checkpointed::CheckpointedOcc;
pub use full::FullOccTable;
pub use wavelet::WaveletTreeRank;

use crate::bwt::Bwt;
use crate::error::{Error, Result};

pub const DEFAULT_OCC_CHECKPOINT: usize = 4;
pub const DEFAULT_WAVELET_CHECKPOINT: usize = 32;

pub trait RankProvider: Send + Sync {
    /// Occurrences of `code` in `bwt[..end]`.
    ///
    /// Codes outside the alphabet count zero.
    ///
    /// # Panics
    /// If `end > self.len()`.
    fn count_prefix(&self, code: u8, end: usize) -> usize;

    /// Length of the underlying BWT.
    fn len(&self) -> usize;

    /// Approximate heap memory owned by this structure, excluding the shared BWT.
    fn heap_bytes(&self) -> usize;

    fn name(&self) -> &'static str;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Occurrences of `code` in `bwt[0..=idx]`; zero for any negative `idx`.
    ///
    /// # Panics
    /// If `idx >= self.len()`.
    fn rank(&self, code: u8, idx: isize) -> usize {
        if idx < 0 {
            0
        } else {
            self.count_prefix(code, idx as usize + 1)
        }
    }
}

#[inline]
fn check_bounds(end: usize, len: usize) {
    assert!(end <= len, "rank index {} out of bounds for bwt of length {}", end, len);
}

/// Selects which [`RankProvider`] to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankBackend {
    #[default]
    Full,
    Checkpointed { interval: usize },
    WaveletTree { interval: usize },
}

impl RankBackend {
    pub fn checkpointed() -> Self {
        RankBackend::Checkpointed {
            interval: DEFAULT_OCC_CHECKPOINT,
        }
    }

    pub fn wavelet_tree() -> Self {
        RankBackend::WaveletTree {
            interval: DEFAULT_WAVELET_CHECKPOINT,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            RankBackend::Full => Ok(()),
            RankBackend::Checkpointed { interval } | RankBackend::WaveletTree { interval } => {
                if interval == 0 {
                    Err(Error::InvalidCheckpointInterval)
                } else {
                    Ok(())
                }
            }
        }
    }

    pub fn build(&self, bwt: &Arc<Bwt>) -> Result<Box<dyn RankProvider>> {
        let provider: Box<dyn RankProvider> = match *self {
            RankBackend::Full => Box::new(FullOccTable::new(bwt)),
            RankBackend::Checkpointed { interval } => {
                Box::new(CheckpointedOcc::new(Arc::clone(bwt), interval)?)
            }
            RankBackend::WaveletTree { interval } => {
                Box::new(WaveletTreeRank::new(bwt, interval)?)
            }
        };
        log::debug!(
            "rank backend {}: {} bytes for n={}",
            provider.name(),
            provider.heap_bytes(),
            provider.len()
        );
        Ok(provider)
    }
}
