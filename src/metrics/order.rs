use super::measured::{Degeneracy, Measured};

/// Length of the longest common subsequence of `a` and `b`.
#[must_use]
pub fn lcs_length(a: &[usize], b: &[usize]) -> usize {
    // Single rolling row of the classic DP table.
    let mut row = vec![0usize; b.len() + 1];
    for x in a {
        let mut diag = 0;
        for (j, y) in b.iter().enumerate() {
            let up = row[j + 1];
            row[j + 1] = if x == y { diag + 1 } else { up.max(row[j]) };
            diag = up;
        }
    }
    row[b.len()]
}

/// LCS length of the two orders over the longer order's length.
///
/// Degenerate with sentinel `0.0` when either order is empty.
#[must_use]
pub fn vertex_order_similarity(submitted: &[usize], true_order: &[usize]) -> Measured<f64> {
    if submitted.is_empty() || true_order.is_empty() {
        return Measured::degenerate(Degeneracy::EmptyInput, 0.0);
    }
    let longest = submitted.len().max(true_order.len());
    #[allow(clippy::cast_precision_loss)]
    let ratio = lcs_length(submitted, true_order) as f64 / longest as f64;
    Measured::ok(ratio)
}

/// Fraction of `true_order` matched by the longest correct prefix of
/// `submitted`; 0 for an empty true order.
#[must_use]
pub fn prefix_accuracy(true_order: &[usize], submitted: &[usize]) -> f64 {
    if true_order.is_empty() {
        return 0.0;
    }
    let matched = true_order
        .iter()
        .zip(submitted)
        .take_while(|(t, s)| t == s)
        .count();
    #[allow(clippy::cast_precision_loss)]
    let acc = matched as f64 / true_order.len() as f64;
    acc
}

/// Fraction of `true_order` positions the submission got right,
/// position by position; 0 for an empty true order.
#[must_use]
pub fn positional_accuracy(true_order: &[usize], submitted: &[usize]) -> f64 {
    if true_order.is_empty() {
        return 0.0;
    }
    let matched = true_order
        .iter()
        .zip(submitted)
        .filter(|(t, s)| t == s)
        .count();
    #[allow(clippy::cast_precision_loss)]
    let acc = matched as f64 / true_order.len() as f64;
    acc
}
