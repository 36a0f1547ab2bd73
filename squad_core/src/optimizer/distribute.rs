//! Point distribution near a target ratio

/// Power : precision : evasion : hull
pub const DEFAULT_RATIO: [u32; 4] = [1, 4, 4, 3];

/// Largest allowed distance of a category from its ideal share
pub const DEFAULT_TOLERANCE: u32 = 3;

/// Enumerate every split of `n_points` into `ratio.len()` categories where
/// each category is within `tolerance` of `round(n_points * ratio_i / sum)`.
///
/// Results are in lexicographic order. Enumeration is iterative; each
/// category's range is narrowed to what the remaining categories' windows
/// can still absorb, so dead branches are never entered.
pub fn distribute_points(n_points: u32, ratio: &[u32], tolerance: u32) -> Vec<Vec<u32>> {
    let k = ratio.len();
    if k == 0 {
        return Vec::new();
    }

    let n = n_points as i64;
    let tol = tolerance as i64;
    let ratio_sum: u32 = ratio.iter().sum();
    let ideal: Vec<i64> = ratio
        .iter()
        .map(|&r| {
            if ratio_sum == 0 {
                0
            } else {
                (n as f64 * r as f64 / ratio_sum as f64).round() as i64
            }
        })
        .collect();
    let lo: Vec<i64> = ideal.iter().map(|&i| (i - tol).max(0)).collect();
    let hi: Vec<i64> = ideal.iter().map(|&i| i + tol).collect();

    // min/max points categories i.. can absorb
    let mut suffix_lo = vec![0i64; k + 1];
    let mut suffix_hi = vec![0i64; k + 1];
    for i in (0..k).rev() {
        suffix_lo[i] = suffix_lo[i + 1] + lo[i];
        suffix_hi[i] = suffix_hi[i + 1] + hi[i];
    }

    let mut results = Vec::new();
    if n < suffix_lo[0] || n > suffix_hi[0] {
        return results;
    }

    let last = k - 1;
    let mut parts: Vec<i64> = Vec::with_capacity(k);
    let mut next = vec![0i64; k];
    let mut remaining = n;
    next[0] = lo[0].max(remaining - suffix_hi[1]);

    loop {
        let depth = parts.len();

        if depth == last {
            // the final category takes whatever is left
            if (lo[last]..=hi[last]).contains(&remaining) {
                results.push(
                    parts
                        .iter()
                        .chain(std::iter::once(&remaining))
                        .map(|&v| v as u32)
                        .collect(),
                );
            }
            match parts.pop() {
                Some(v) => remaining += v,
                None => break,
            }
            continue;
        }

        let upper = hi[depth].min(remaining - suffix_lo[depth + 1]);
        let value = next[depth];
        if value > upper {
            match parts.pop() {
                Some(v) => remaining += v,
                None => break,
            }
            continue;
        }

        next[depth] = value + 1;
        parts.push(value);
        remaining -= value;
        next[depth + 1] = lo[depth + 1].max(remaining - suffix_hi[depth + 2]);
    }

    results
}
