//! Longest common contiguous token run.

use super::SAFE_DIV;

/// Length of the longest run of tokens appearing contiguously in both sequences.
///
/// Classic dynamic programming over a rolling row, O(n·m) time and O(m) space.
pub fn longest_common_run<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let mut best = 0;

    for token_a in a {
        for (j, token_b) in b.iter().enumerate() {
            curr[j + 1] = if token_a == token_b { prev[j] + 1 } else { 0 };
            best = best.max(curr[j + 1]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

/// Longest common run relative to the combined token count of both questions.
pub fn longest_common_run_ratio<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let run = longest_common_run(a, b) as f64;
    (run / ((a.len() + b.len()) as f64 + SAFE_DIV)).clamp(0.0, 1.0)
}
