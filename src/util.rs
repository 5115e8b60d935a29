//! Geometry helpers for the rasteriser.

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Calculates the two base corners of an arrowhead.
///
/// The head has its tip at `tip` and points away from `tail`. Its length is
/// capped at 40% of the segment so short lines still read as arrows.
///
/// # Arguments
/// * `tip` - Arrowhead tip
/// * `tail` - Other end of the segment
/// * `length` - Desired arrowhead length in pixels
/// * `angle_degrees` - Angle between each arrowhead side and the segment
///
/// # Returns
/// `[(left_x, left_y), (right_x, right_y)]`. If the segment is shorter than a
/// pixel, both points equal `tip`.
pub fn calculate_arrowhead(
    tip: (f64, f64),
    tail: (f64, f64),
    length: f64,
    angle_degrees: f64,
) -> [(f64, f64); 2] {
    let dx = tip.0 - tail.0;
    let dy = tip.1 - tail.1;
    let line_length = (dx * dx + dy * dy).sqrt();

    if line_length < 1.0 {
        return [tip, tip];
    }

    let ux = dx / line_length;
    let uy = dy / line_length;
    let head = length.min(line_length * 0.4);

    let angle = angle_degrees.to_radians();
    let cos_a = angle.cos();
    let sin_a = angle.sin();

    let left = (
        tip.0 - head * (ux * cos_a - uy * sin_a),
        tip.1 - head * (uy * cos_a + ux * sin_a),
    );
    let right = (
        tip.0 - head * (ux * cos_a + uy * sin_a),
        tip.1 - head * (uy * cos_a - ux * sin_a),
    );

    [left, right]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrowhead_is_symmetric_about_the_segment() {
        let [left, right] = calculate_arrowhead((100.0, 50.0), (0.0, 50.0), 10.0, 30.0);
        assert!(left.0 < 100.0 && right.0 < 100.0);
        assert!((left.0 - right.0).abs() < 1e-9);
        assert!(((left.1 - 50.0) + (right.1 - 50.0)).abs() < 1e-9);
    }

    #[test]
    fn degenerate_segment_collapses_to_tip() {
        let tip = (5.0, 5.0);
        assert_eq!(calculate_arrowhead(tip, (5.2, 5.1), 10.0, 30.0), [tip, tip]);
    }
}
