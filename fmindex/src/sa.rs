// Suffix array construction by prefix doubling (Manber-Myers).
// O(n log^2 n): every round is a comparison sort over (rank, rank + k, offset) triples.

/// Builds the suffix array of a sentinel-terminated code sequence.
///
/// Codes must already be dense with the sentinel as code 0, so the initial
/// ranks are the codes themselves.
pub fn build(text: &[u8]) -> Vec<usize> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }

    let mut rank: Vec<usize> = text.iter().map(|&c| c as usize).collect();
    let mut next_rank = vec![0usize; n];
    let mut triples: Vec<(usize, isize, usize)> = Vec::with_capacity(n);
    let mut sa = vec![0usize; n];
    let mut k = 1usize;
    let mut rounds = 0usize;

    loop {
        triples.clear();
        for i in 0..n {
            let second = if i + k < n { rank[i + k] as isize } else { -1 };
            triples.push((rank[i], second, i));
        }
        triples.sort();
        rounds += 1;

        sa[0] = triples[0].2;
        next_rank[sa[0]] = 0;
        for i in 1..n {
            let (prev, curr) = (triples[i - 1], triples[i]);
            sa[i] = curr.2;
            next_rank[sa[i]] = if prev.0 == curr.0 && prev.1 == curr.1 {
                next_rank[sa[i - 1]]
            } else {
                next_rank[sa[i - 1]] + 1
            };
        }
        std::mem::swap(&mut rank, &mut next_rank);

        if rank[sa[n - 1]] == n - 1 || k >= n {
            break;
        }
        k *= 2;
    }

    log::debug!("suffix array: n={} rounds={} final k={}", n, rounds, k);
    sa
}

/// Checks that `sa` is a permutation of `[0, text.len())` listing suffixes in
/// non-decreasing order.
pub fn is_valid(text: &[u8], sa: &[usize]) -> bool {
    if sa.len() != text.len() {
        return false;
    }
    let mut seen = vec![false; sa.len()];
    for &offset in sa {
        if offset >= sa.len() || seen[offset] {
            return false;
        }
        seen[offset] = true;
    }
    sa.windows(2).all(|w| text[w[0]..] <= text[w[1]..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;

    fn naive_sa(text: &[u8]) -> Vec<usize> {
        let mut sa: Vec<usize> = (0..text.len()).collect();
        sa.sort_by(|&a, &b| text[a..].cmp(&text[b..]));
        sa
    }

    #[test]
    fn test_banana() {
        let text = Alphabet::from_text(b"banana", b'$').encode(b"banana").unwrap();
        assert_eq!(build(&text), vec![6, 5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn test_gattaca() {
        let alphabet = Alphabet::dna();
        let text = alphabet.encode(b"GATTACA").unwrap();
        let sa = build(&text);
        // $, A$, ACA$, ATTACA$, CA$, GATTACA$, TACA$, TTACA$
        assert_eq!(sa, vec![7, 6, 4, 1, 5, 0, 3, 2]);
        assert!(is_valid(&text, &sa));
    }

    #[test]
    fn test_sentinel_only() {
        assert_eq!(build(&[0]), vec![0]);
    }

    #[test]
    fn test_empty() {
        assert!(build(&[]).is_empty());
    }

    #[test]
    fn test_repetitive_text_matches_naive() {
        let raw = b"AAAAAAAAAAAAAAAAACAAAAAAAAAAAAAAAAAAA";
        let text = Alphabet::dna().encode(raw).unwrap();
        assert_eq!(build(&text), naive_sa(&text));
    }

    #[test]
    fn test_mississippi_matches_naive() {
        let raw = b"mississippi";
        let text = Alphabet::from_text(raw, b'$').encode(raw).unwrap();
        let sa = build(&text);
        assert_eq!(sa, naive_sa(&text));
        assert_eq!(sa[0], text.len() - 1);
    }

    #[test]
    fn test_is_valid_rejects_bad_arrays() {
        let text = Alphabet::dna().encode(b"ACGT").unwrap();
        assert!(!is_valid(&text, &[4, 0, 1, 2]));
        assert!(!is_valid(&text, &[4, 0, 0, 2, 3]));
        assert!(!is_valid(&text, &[0, 4, 1, 2, 3]));
        assert!(is_valid(&text, &[4, 0, 1, 2, 3]));
    }
}
