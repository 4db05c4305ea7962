//! Brute-force substring scan, used to cross-check the index.

/// Every offset where `pattern` starts in `text`. The empty pattern matches at
/// each of the `text.len() + 1` positions.
pub fn find_all(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    let n = text.len();
    let m = pattern.len();

    if m == 0 {
        return (0..=n).collect();
    }
    if m > n {
        return Vec::new();
    }

    let mut result = Vec::new();
    for i in 0..=n - m {
        let mut matched = true;
        for j in 0..m {
            if text[i + j] != pattern[j] {
                matched = false;
                break;
            }
        }
        if matched {
            result.push(i);
        }
    }
    result
}

pub fn count(text: &[u8], pattern: &[u8]) -> usize {
    find_all(text, pattern).len()
}
