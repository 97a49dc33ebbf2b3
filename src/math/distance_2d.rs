use super::Point2;

/// Total length of an open polyline.
#[must_use]
pub fn polyline_length(points: &[Point2]) -> f64 {
    points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    // ── polyline tests ──

    #[test]
    fn polyline_length_l_shape() {
        let pts = [p(0.0, 0.0), p(3.0, 0.0), p(3.0, 4.0)];
        assert!((polyline_length(&pts) - 7.0).abs() < TOL);
        assert!(polyline_length(&pts[..1]).abs() < TOL);
    }
}
