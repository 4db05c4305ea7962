// Wavelet tree stored as an arena: nodes are addressed by index, the root is
// node 0, and every node owns its bitmap, its checkpoints and its two child slots.
use crate::bwt::Bwt;
use crate::error::{Error, Result};

use super::{RankProvider, check_bounds};

#[derive(Debug, Clone)]
struct Node {
    // Code range [lo, hi) handled by this node; the left child takes [lo, mid).
    lo: usize,
    mid: usize,
    hi: usize,
    len: usize,
    // Bit i is set when the i'th symbol routed here belongs to [mid, hi).
    bits: Vec<u64>,
    // checkpoints[k] = set bits in bits[..k * interval].
    checkpoints: Vec<u32>,
    left: Option<usize>,
    right: Option<usize>,
}

impl Node {
    fn is_leaf(&self) -> bool {
        self.hi - self.lo == 1
    }

    #[inline]
    fn ones_before(&self, end: usize, interval: usize) -> usize {
        let block = end / interval;
        let base = block * interval;
        self.checkpoints[block] as usize + count_ones(&self.bits, base, end)
    }
}

#[inline]
fn count_ones(bits: &[u64], start: usize, end: usize) -> usize {
    let mut count = 0usize;
    let mut pos = start;
    while pos < end {
        let word = pos / 64;
        let offset = pos % 64;
        let take = (64 - offset).min(end - pos);
        let mask = if take == 64 {
            u64::MAX
        } else {
            ((1u64 << take) - 1) << offset
        };
        count += (bits[word] & mask).count_ones() as usize;
        pos += take;
    }
    count
}

/// Rank over a BWT through a balanced wavelet tree on the code alphabet.
///
/// Each level halves the alphabet. A query walks from the root to the leaf of
/// its symbol, translating the prefix length at every node through that
/// node's bitmap: `O(log sigma)` nodes, each costing one checkpoint lookup
/// plus at most `interval` bits of popcount.
#[derive(Debug, Clone)]
pub struct WaveletTreeRank {
    nodes: Vec<Node>,
    interval: usize,
    sigma: usize,
    len: usize,
}

impl WaveletTreeRank {
    pub fn new(bwt: &Bwt, interval: usize) -> Result<Self> {
        if interval == 0 {
            return Err(Error::InvalidCheckpointInterval);
        }
        let sigma = bwt.sigma().max(1);
        let mut nodes = Vec::with_capacity(2 * sigma - 1);
        build_node(&mut nodes, bwt.symbols(), 0, sigma, interval);
        log::debug!(
            "wavelet tree: {} nodes over sigma={} interval={}",
            nodes.len(),
            sigma,
            interval
        );

        Ok(Self {
            nodes,
            interval,
            sigma,
            len: bwt.len(),
        })
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn build_node(nodes: &mut Vec<Node>, symbols: &[u8], lo: usize, hi: usize, interval: usize) -> usize {
    let id = nodes.len();
    let len = symbols.len();

    if hi - lo == 1 {
        nodes.push(Node {
            lo,
            mid: hi,
            hi,
            len,
            bits: Vec::new(),
            checkpoints: Vec::new(),
            left: None,
            right: None,
        });
        return id;
    }

    let mid = lo + (hi - lo) / 2;
    let mut bits = vec![0u64; len.div_ceil(64)];
    let mut checkpoints = Vec::with_capacity(len / interval + 1);
    let mut left_symbols = Vec::new();
    let mut right_symbols = Vec::new();
    let mut ones = 0u32;

    for (i, &code) in symbols.iter().enumerate() {
        if i % interval == 0 {
            checkpoints.push(ones);
        }
        if (code as usize) < mid {
            left_symbols.push(code);
        } else {
            bits[i / 64] |= 1 << (i % 64);
            right_symbols.push(code);
            ones += 1;
        }
    }
    // A prefix ending exactly on the last block boundary needs its own entry.
    if len % interval == 0 {
        checkpoints.push(ones);
    }

    nodes.push(Node {
        lo,
        mid,
        hi,
        len,
        bits,
        checkpoints,
        left: None,
        right: None,
    });

    let left = if left_symbols.is_empty() {
        None
    } else {
        Some(build_node(nodes, &left_symbols, lo, mid, interval))
    };
    let right = if right_symbols.is_empty() {
        None
    } else {
        Some(build_node(nodes, &right_symbols, mid, hi, interval))
    };
    nodes[id].left = left;
    nodes[id].right = right;
    id
}

impl RankProvider for WaveletTreeRank {
    fn count_prefix(&self, code: u8, end: usize) -> usize {
        check_bounds(end, self.len);
        let code = code as usize;
        if code >= self.sigma {
            return 0;
        }

        let mut node = &self.nodes[0];
        let mut end = end;
        loop {
            debug_assert!(end <= node.len);
            if node.is_leaf() || end == 0 {
                return end;
            }
            let ones = node.ones_before(end, self.interval);
            let next = if code < node.mid {
                end -= ones;
                node.left
            } else {
                end = ones;
                node.right
            };
            match next {
                Some(child) => node = &self.nodes[child],
                None => return 0,
            }
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn heap_bytes(&self) -> usize {
        let nodes = self.nodes.capacity() * std::mem::size_of::<Node>();
        let payload: usize = self
            .nodes
            .iter()
            .map(|n| {
                n.bits.capacity() * std::mem::size_of::<u64>()
                    + n.checkpoints.capacity() * std::mem::size_of::<u32>()
            })
            .sum();
        nodes + payload
    }

    fn name(&self) -> &'static str {
        "wavelet"
    }
}
