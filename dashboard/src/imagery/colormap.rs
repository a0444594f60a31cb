//! The `bone` grayscale colormap with a blue tint.
//!
//! Each channel is a piecewise linear ramp through fixed anchor points on
//! `[0, 1]`, matching the familiar matplotlib colormap of the same name.

/// Anchor points `(position, intensity)` for one color channel
type Channel = &'static [(f64, f64)];

const BONE_RED: Channel = &[(0.0, 0.0), (0.746032, 0.652778), (1.0, 1.0)];
const BONE_GREEN: Channel = &[
    (0.0, 0.0),
    (0.365079, 0.319444),
    (0.746032, 0.777778),
    (1.0, 1.0),
];
const BONE_BLUE: Channel = &[(0.0, 0.0), (0.365079, 0.444444), (1.0, 1.0)];

/// Linear interpolation through sorted anchor points, clamped at both ends
fn interp(t: f64, anchors: Channel) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let idx = anchors.partition_point(|&(x, _)| x < t);

    if idx == 0 {
        return anchors[0].1;
    }
    if idx >= anchors.len() {
        return anchors[anchors.len() - 1].1;
    }

    let (x0, y0) = anchors[idx - 1];
    let (x1, y1) = anchors[idx];
    y0 + (t - x0) / (x1 - x0) * (y1 - y0)
}

fn to_byte(intensity: f64) -> u8 {
    (intensity * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Color for a normalized value in `[0, 1]`; values outside are clamped
pub fn bone(t: f64) -> (u8, u8, u8) {
    let t = if t.is_finite() { t } else { 0.0 };
    (
        to_byte(interp(t, BONE_RED)),
        to_byte(interp(t, BONE_GREEN)),
        to_byte(interp(t, BONE_BLUE)),
    )
}

/// Map `value` from `[vmin, vmax]` onto `[0, 1]`
///
/// A degenerate range maps everything to 0.
pub fn normalize(value: f64, vmin: f64, vmax: f64) -> f64 {
    if vmax <= vmin || !value.is_finite() {
        return 0.0;
    }
    ((value - vmin) / (vmax - vmin)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bone_endpoints() {
        assert_eq!(bone(0.0), (0, 0, 0));
        assert_eq!(bone(1.0), (255, 255, 255));
    }

    #[test]
    fn test_bone_is_blue_tinted_in_shadows() {
        let (r, g, b) = bone(0.3);
        assert!(b > g && b > r, "expected blue tint, got ({r}, {g}, {b})");
    }

    #[test]
    fn test_bone_clamps_out_of_range() {
        assert_eq!(bone(-2.0), bone(0.0));
        assert_eq!(bone(5.0), bone(1.0));
        assert_eq!(bone(f64::NAN), bone(0.0));
    }

    #[test]
    fn test_interp_hits_anchors() {
        assert_relative_eq!(interp(0.365079, BONE_GREEN), 0.319444);
        assert_relative_eq!(interp(0.746032, BONE_RED), 0.652778);
        assert_relative_eq!(interp(0.5, &[(0.0, 0.0), (1.0, 2.0)]), 1.0);
    }

    #[test]
    fn test_normalize() {
        assert_relative_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_relative_eq!(normalize(-1.0, 0.0, 10.0), 0.0);
        assert_relative_eq!(normalize(11.0, 0.0, 10.0), 1.0);
        assert_relative_eq!(normalize(3.0, 2.0, 2.0), 0.0);
    }
}
