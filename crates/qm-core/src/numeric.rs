use crate::{QmError, QmResult};

/// Pass `v` through if it is finite.
pub fn ensure_finite(v: f64, what: &'static str) -> QmResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(QmError::NonFinite { what, value: v })
    }
}

/// Round to a fixed number of decimal places.
///
/// Non-finite values pass through unchanged.
pub fn round_to(v: f64, decimals: u32) -> f64 {
    if !v.is_finite() {
        return v;
    }
    let scale = 10f64.powi(decimals as i32);
    (v * scale).round() / scale
}

/// Linear interpolation on a uniformly spaced grid starting at `x0`.
///
/// Outside the grid the end segments are extrapolated.
pub fn interp_uniform(x0: f64, dx: f64, ys: &[f64], x: f64) -> f64 {
    debug_assert!(ys.len() >= 2);
    let last = ys.len() - 2;
    let pos = (x - x0) / dx;
    let i = if pos <= 0.0 {
        0
    } else {
        (pos.floor() as usize).min(last)
    };
    let xi = x0 + dx * i as f64;
    ys[i] + (ys[i + 1] - ys[i]) * (x - xi) / dx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(f64::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn round_to_fixed_places() {
        assert_eq!(round_to(1.234_56, 2), 1.23);
        assert_eq!(round_to(-0.000_49, 3), -0.0);
        assert!(round_to(f64::INFINITY, 4).is_infinite());
    }

    #[test]
    fn interp_inside_and_outside_grid() {
        let ys = [0.0, 10.0, 30.0];
        assert_eq!(interp_uniform(0.0, 1.0, &ys, 0.5), 5.0);
        assert_eq!(interp_uniform(0.0, 1.0, &ys, 1.5), 20.0);
        // extrapolates the end segments
        assert_eq!(interp_uniform(0.0, 1.0, &ys, 3.0), 50.0);
        assert_eq!(interp_uniform(0.0, 1.0, &ys, -1.0), -10.0);
    }
}
