use std::sync::Arc;

use crate::bwt::Bwt;
use crate::error::{Error, Result};

use super::{RankProvider, check_bounds};

/// Occurrence counts sampled every `interval` positions.
///
/// Checkpoint `k` holds the per-symbol counts of `bwt[..k * interval]`; a
/// query starts from the checkpoint covering its block and scans the rest of
/// the block in the shared BWT.
#[derive(Debug, Clone)]
pub struct CheckpointedOcc {
    bwt: Arc<Bwt>,
    checkpoints: Vec<u32>,
    interval: usize,
    sigma: usize,
}

impl CheckpointedOcc {
    pub fn new(bwt: Arc<Bwt>, interval: usize) -> Result<Self> {
        if interval == 0 {
            return Err(Error::InvalidCheckpointInterval);
        }
        let sigma = bwt.sigma();
        let mut checkpoints = Vec::with_capacity((bwt.len() / interval + 1) * sigma);
        let mut counts = vec![0u32; sigma];
        checkpoints.extend_from_slice(&counts);

        for (idx, &code) in bwt.symbols().iter().enumerate() {
            counts[code as usize] += 1;
            if (idx + 1) % interval == 0 {
                checkpoints.extend_from_slice(&counts);
            }
        }

        Ok(Self {
            bwt,
            checkpoints,
            interval,
            sigma,
        })
    }

    pub fn interval(&self) -> usize {
        self.interval
    }
}

impl RankProvider for CheckpointedOcc {
    fn count_prefix(&self, code: u8, end: usize) -> usize {
        check_bounds(end, self.bwt.len());
        if end == 0 || code as usize >= self.sigma {
            return 0;
        }
        let idx = end - 1;
        let block = idx / self.interval;
        let base = block * self.interval;

        let mut count = self.checkpoints[block * self.sigma + code as usize] as usize;
        for &c in &self.bwt.symbols()[base..end] {
            if c == code {
                count += 1;
            }
        }
        count
    }

    fn len(&self) -> usize {
        self.bwt.len()
    }

    fn heap_bytes(&self) -> usize {
        self.checkpoints.capacity() * std::mem::size_of::<u32>()
    }

    fn name(&self) -> &'static str {
        "checkpointed"
    }
}
