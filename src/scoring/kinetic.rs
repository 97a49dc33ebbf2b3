use serde::{Deserialize, Serialize};

use crate::metrics::{Degeneracy, Measured};

/// Area of the moving points' convex hull at time `t` (seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullSample {
    pub t: f64,
    pub area: f64,
}

/// A timestamped vertex selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Click {
    pub index: usize,
    pub timestamp_ms: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KineticAnalysis {
    /// Pearson correlation of hull expansion rate against reaction time.
    pub hull_rt_correlation: f64,
    /// Mean expansion rate in area units per second.
    pub avg_expansion_rate: f64,
    /// Inter-click intervals that had at least two hull samples.
    pub intervals: usize,
}

/// Relates how fast the hull grew between two clicks to how long the
/// subject took.
///
/// Clicks are taken in timestamp order; `start_ms` is the session epoch
/// that hull sample times are relative to. Intervals with no positive
/// duration or fewer than two samples are skipped. Degenerate with an
/// all-zero sentinel for fewer than 3 usable intervals.
#[must_use]
pub fn kinetic_hull_analysis(
    samples: &[HullSample],
    clicks: &[Click],
    start_ms: i64,
) -> Measured<KineticAnalysis> {
    let mut clicks = clicks.to_vec();
    clicks.sort_by_key(|c| c.timestamp_ms);

    let mut reaction_times = Vec::new();
    let mut rates = Vec::new();
    for pair in clicks.windows(2) {
        #[allow(clippy::cast_precision_loss)]
        let (from, to) = (
            pair[0].timestamp_ms.saturating_sub(start_ms) as f64 / 1000.0,
            pair[1].timestamp_ms.saturating_sub(start_ms) as f64 / 1000.0,
        );
        let rt = to - from;
        if rt <= 0.0 {
            continue;
        }
        let inside: Vec<&HullSample> = samples
            .iter()
            .filter(|s| s.t >= from && s.t <= to)
            .collect();
        if let (Some(first), Some(last)) = (inside.first(), inside.last()) {
            if inside.len() > 1 {
                reaction_times.push(rt);
                rates.push((last.area - first.area) / rt);
            }
        }
    }

    let intervals = rates.len();
    if intervals < 3 {
        return Measured::degenerate(
            Degeneracy::TooFewPoints,
            KineticAnalysis {
                intervals,
                ..KineticAnalysis::default()
            },
        );
    }
    #[allow(clippy::cast_precision_loss)]
    let avg_expansion_rate = rates.iter().sum::<f64>() / intervals as f64;
    Measured::ok(KineticAnalysis {
        hull_rt_correlation: pearson(&rates, &reaction_times),
        avg_expansion_rate,
        intervals,
    })
}

/// Sample Pearson correlation; 0 when either series is constant.
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let nf = n as f64;
    let mx = x[..n].iter().sum::<f64>() / nf;
    let my = y[..n].iter().sum::<f64>() / nf;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x[..n].iter().zip(&y[..n]) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let denom = (sxx * syy).sqrt();
    if denom > 0.0 && denom.is_finite() {
        (sxy / denom).clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn click(index: usize, timestamp_ms: i64) -> Click {
        Click {
            index,
            timestamp_ms,
        }
    }

    /// Area grows linearly at 1 unit per second, sampled every 100 ms.
    fn linear_samples(until_s: f64) -> Vec<HullSample> {
        let mut out = Vec::new();
        let mut t = 0.0;
        while t <= until_s {
            out.push(HullSample { t, area: t });
            t += 0.1;
        }
        out
    }

    #[test]
    fn pearson_of_linear_series() {
        assert_relative_eq!(pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), -1.0, epsilon = 1e-12);
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn steady_growth_has_unit_rate() {
        let samples = linear_samples(6.0);
        let clicks = [click(0, 1000), click(1, 2000), click(2, 3500), click(3, 5500)];
        let k = kinetic_hull_analysis(&samples, &clicks, 0);
        assert!(!k.is_degenerate());
        let k = k.value();
        assert_eq!(k.intervals, 3);
        assert!((k.avg_expansion_rate - 1.0).abs() < 0.15);
    }

    #[test]
    fn clicks_are_sorted_first() {
        let samples = linear_samples(6.0);
        let ordered = [click(0, 1000), click(1, 2000), click(2, 3500), click(3, 5500)];
        let shuffled = [ordered[2], ordered[0], ordered[3], ordered[1]];
        assert_eq!(
            kinetic_hull_analysis(&samples, &ordered, 0),
            kinetic_hull_analysis(&samples, &shuffled, 0)
        );
    }

    #[test]
    fn too_few_intervals_is_degenerate() {
        let samples = linear_samples(3.0);
        let k = kinetic_hull_analysis(&samples, &[click(0, 500), click(1, 1500)], 0);
        assert!(k.is_degenerate());
        assert_eq!(k.value().hull_rt_correlation, 0.0);
        assert_eq!(k.value().intervals, 1);
    }

    #[test]
    fn simultaneous_clicks_are_skipped() {
        let samples = linear_samples(6.0);
        let clicks = [click(0, 1000), click(1, 1000), click(2, 2000)];
        assert_eq!(kinetic_hull_analysis(&samples, &clicks, 0).value().intervals, 1);
    }

    #[test]
    fn extreme_timestamps_saturate() {
        let samples = linear_samples(6.0);
        let clicks = [click(0, i64::MIN), click(1, 0), click(2, i64::MAX)];
        assert!(kinetic_hull_analysis(&samples, &clicks, 0).is_degenerate());
        assert!(kinetic_hull_analysis(&samples, &clicks, i64::MAX).is_degenerate());
    }
}
