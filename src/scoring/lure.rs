use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::kernel::delaunay_edges;
use crate::math::Point2;
use crate::metrics::{Degeneracy, Measured};

/// How often wrong moves followed a Delaunay edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LureAnalysis {
    /// `total_lure_errors / total_mistakes`, 0 without mistakes.
    pub lure_susceptibility: f64,
    pub total_lure_errors: usize,
    pub total_mistakes: usize,
    /// Fraction of correct moves that run along a Delaunay edge.
    pub delaunay_compliance: f64,
}

/// Classifies each consecutive pair of `clicks` against `true_order`.
///
/// A move `prev -> curr` is correct when `curr` immediately follows `prev`
/// in the true order. Any other move is a mistake, and a lure when
/// `prev`-`curr` is an edge of the Delaunay graph of `points`. Indices out
/// of range count as mistakes but never as lures.
///
/// Degenerate with an all-zero sentinel when `points` cannot be
/// triangulated.
#[must_use]
pub fn lure_analysis(
    points: &[Point2],
    true_order: &[usize],
    clicks: &[usize],
) -> Measured<LureAnalysis> {
    if points.len() < 3 {
        return Measured::degenerate(Degeneracy::TooFewPoints, LureAnalysis::default());
    }
    let Ok(edges) = delaunay_edges(points) else {
        return Measured::degenerate(Degeneracy::Untriangulable, LureAnalysis::default());
    };
    let edges: BTreeSet<(usize, usize)> = edges.into_iter().collect();
    let is_edge = |a: usize, b: usize| edges.contains(&(a.min(b), a.max(b)));

    // Successor of each vertex in the true order; first occurrence wins.
    let mut next: HashMap<usize, usize> = HashMap::new();
    for pair in true_order.windows(2) {
        next.entry(pair[0]).or_insert(pair[1]);
    }

    let mut mistakes = 0usize;
    let mut lures = 0usize;
    let mut correct = 0usize;
    let mut correct_on_edge = 0usize;
    for pair in clicks.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        if next.get(&prev) == Some(&curr) {
            correct += 1;
            if is_edge(prev, curr) {
                correct_on_edge += 1;
            }
        } else {
            mistakes += 1;
            if is_edge(prev, curr) {
                lures += 1;
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };
    Measured::ok(LureAnalysis {
        lure_susceptibility: ratio(lures, mistakes),
        total_lure_errors: lures,
        total_mistakes: mistakes,
        delaunay_compliance: ratio(correct_on_edge, correct),
    })
}
