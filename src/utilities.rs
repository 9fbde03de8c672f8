/// Linear interpolation over a tabulated function.
///
/// `x` must be ascending. Outside `[x[0], x[n-1]]` the nearest endpoint value
/// is returned (no extrapolation). Exact matches on a tabulated abscissa return
/// the tabulated ordinate bit-for-bit. A NaN `x_new` gives NaN.
pub fn interpolate_linear(x: &[f64], y: &[f64], x_new: f64) -> f64 {
    if x_new.is_nan() {
        return f64::NAN;
    }
    match x.len() {
        0 => return f64::NAN,
        1 => return y[0],
        _ => {}
    }
    let last = x.len() - 1;
    if x_new <= x[0] {
        return y[0];
    }
    if x_new >= x[last] {
        return y[last];
    }

    // First index whose abscissa is strictly greater than x_new
    let upper = x.partition_point(|&xi| xi <= x_new);
    let lower = upper - 1;
    if x[lower] == x_new {
        return y[lower];
    }
    let (x1, x2) = (x[lower], x[upper]);
    let (y1, y2) = (y[lower], y[upper]);
    y1 + (x_new - x1) * (y2 - y1) / (x2 - x1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_exact_nodes() {
        let x = [1.0, 2.0, 4.0];
        let y = [10.0, 20.0, 0.5];
        assert_eq!(interpolate_linear(&x, &y, 2.0), 20.0);
        assert_eq!(interpolate_linear(&x, &y, 4.0), 0.5);
    }

    #[test]
    fn test_interpolate_between_nodes() {
        let x = [1.0, 2.0, 4.0];
        let y = [10.0, 20.0, 0.0];
        assert!((interpolate_linear(&x, &y, 1.5) - 15.0).abs() < 1e-12);
        assert!((interpolate_linear(&x, &y, 3.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_clamps_outside_range() {
        let x = [1.0, 2.0];
        let y = [3.0, 7.0];
        assert_eq!(interpolate_linear(&x, &y, -5.0), 3.0);
        assert_eq!(interpolate_linear(&x, &y, 50.0), 7.0);
    }

    #[test]
    fn test_interpolate_degenerate_tables() {
        assert!(interpolate_linear(&[], &[], 1.0).is_nan());
        assert_eq!(interpolate_linear(&[1.0], &[0.3], 9.0), 0.3);
    }

    #[test]
    fn test_interpolate_nan_abscissa() {
        let x = [1.0, 2.0, 4.0];
        let y = [10.0, 20.0, 0.5];
        assert!(interpolate_linear(&x, &y, f64::NAN).is_nan());
    }
}
