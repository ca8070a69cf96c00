//! Mathematical utility functions for fluctuation analysis.
//!
//! This module provides the numerical foundation shared by the analysis stages:
//! exponentially spaced integer sequences, profile integration, polynomial least
//! squares, numerical differentiation and NaN-aware reductions. Every function
//! here follows IEEE semantics for degenerate input: divisions by zero, logs of
//! zero and powers of zero yield NaN or infinity instead of an error.

use crate::errors::{DfaError, DfaResult};
use nalgebra::{DMatrix, SVD};

/// Evenly spaced values over `[start, stop]`, endpoint included.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut values: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
            // Pin the endpoint exactly; accumulated rounding would otherwise shift it.
            values[num - 1] = stop;
            values
        }
    }
}

/// Exponentially spaced integer sequence between `start` and `stop` (base 2).
///
/// The points are spaced evenly in log2 space and rounded half-to-even to
/// integers, so consecutive values may repeat for dense sequences.
///
/// # Example
/// ```rust
/// use fractal_dfa::math_utils::expspace;
///
/// assert_eq!(expspace(10.0, 80.0, 4), vec![10, 20, 40, 80]);
/// ```
pub fn expspace(start: f64, stop: f64, num: usize) -> Vec<usize> {
    linspace(start.log2(), stop.log2(), num)
        .into_iter()
        .map(|exponent| exponent.exp2().round_ties_even().max(0.0) as usize)
        .collect()
}

/// Integrate time series (cumulative sum with mean removal)
///
/// Produces the profile of the signal: the running sum of its deviations from
/// the mean, i.e. a random-walk transform of the input.
///
/// # Arguments
/// * `data` - Input time series
///
/// # Returns
/// Integrated (cumulative sum) series with mean removed
pub fn integrate_series(data: &[f64]) -> Vec<f64> {
    if data.is_empty() {
        return Vec::new();
    }

    let mean = data.iter().sum::<f64>() / data.len() as f64;
    data.iter()
        .scan(0.0, |cumsum, &value| {
            *cumsum += value - mean;
            Some(*cumsum)
        })
        .collect()
}

/// Vandermonde matrix with decreasing powers: row `i` is `[x_i^order, ..., x_i, 1]`.
pub fn vandermonde(x: &[f64], order: usize) -> DMatrix<f64> {
    DMatrix::from_fn(x.len(), order + 1, |row, col| {
        x[row].powi((order - col) as i32)
    })
}

/// Least-squares polynomial coefficients for several right-hand sides at once.
///
/// `y` holds one series per column, each sampled at `x`. Returns an
/// `(order + 1) x columns` matrix of coefficients, highest power first.
/// The Vandermonde columns are scaled to unit norm before the SVD solve and
/// singular values below `len(x) * eps` relative to the largest are treated as
/// zero, so rank-deficient fits return the minimum-norm solution.
pub fn polyfit_columns(x: &[f64], y: &DMatrix<f64>, order: usize) -> DfaResult<DMatrix<f64>> {
    if x.len() != y.nrows() {
        return Err(DfaError::NumericalError {
            reason: format!(
                "Polynomial fit needs one abscissa per sample: {} abscissae, {} samples",
                x.len(),
                y.nrows()
            ),
        });
    }

    let mut design = vandermonde(x, order);
    let norms: Vec<f64> = design
        .column_iter()
        .map(|column| {
            let norm = column.norm();
            if norm > 0.0 {
                norm
            } else {
                1.0
            }
        })
        .collect();
    for (mut column, &norm) in design.column_iter_mut().zip(&norms) {
        column /= norm;
    }

    let svd = SVD::new(design, true, true);
    let rcond = x.len() as f64 * f64::EPSILON;
    let threshold = rcond * svd.singular_values.max();
    let mut coefficients = svd
        .solve(y, threshold)
        .map_err(|reason| DfaError::NumericalError {
            reason: format!("Polynomial least squares failed: {}", reason),
        })?;

    for (mut row, &norm) in coefficients.row_iter_mut().zip(&norms) {
        row /= norm;
    }

    Ok(coefficients)
}

/// First-degree least-squares fit returning `(slope, intercept)`.
///
/// Unlike a checked regression this never fails: any NaN or infinite input
/// propagates to a NaN slope, which is how scale-fluctuation pairs with a zero
/// fluctuation (log of zero) are reported.
pub fn polyfit_line(x: &[f64], y: &[f64]) -> (f64, f64) {
    let n = x.len().min(y.len());
    if n == 0 {
        return (f64::NAN, f64::NAN);
    }

    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let (sxy, sxx) = x[..n]
        .iter()
        .zip(&y[..n])
        .fold((0.0, 0.0), |(sxy, sxx), (xi, yi)| {
            let dx = xi - mean_x;
            (sxy + dx * (yi - mean_y), sxx + dx * dx)
        });

    let slope = sxy / sxx;
    (slope, mean_y - slope * mean_x)
}

/// Numerical gradient with unit spacing.
///
/// Central differences in the interior and one-sided differences at the
/// boundaries. A single value has no defined gradient and yields NaN.
pub fn gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    match n {
        0 => Vec::new(),
        1 => vec![f64::NAN],
        _ => (0..n)
            .map(|i| {
                if i == 0 {
                    values[1] - values[0]
                } else if i == n - 1 {
                    values[n - 1] - values[n - 2]
                } else {
                    (values[i + 1] - values[i - 1]) / 2.0
                }
            })
            .collect(),
    }
}

/// Maximum ignoring NaN; NaN when no value is a number.
pub fn nan_max(values: &[f64]) -> f64 {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .fold(f64::NAN, |acc, &v| if acc.is_nan() || v > acc { v } else { acc })
}

/// Minimum ignoring NaN; NaN when no value is a number.
pub fn nan_min(values: &[f64]) -> f64 {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .fold(f64::NAN, |acc, &v| if acc.is_nan() || v < acc { v } else { acc })
}

/// Mean ignoring NaN; NaN when no value is a number.
pub fn nan_mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), &v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Index of the first maximum ignoring NaN.
pub fn nan_argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, current)) if current >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_linspace_endpoints() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);

        let values = linspace(0.0, 1.0, 5);
        assert_eq!(values.len(), 5);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[4], 1.0);
        assert_approx_eq!(values[2], 0.5);
    }

    #[test]
    fn test_expspace_powers_of_two() {
        assert_eq!(expspace(10.0, 80.0, 4), vec![10, 20, 40, 80]);
        assert_eq!(expspace(4.0, 64.0, 5), vec![4, 8, 16, 32, 64]);
    }

    #[test]
    fn test_expspace_descending_range() {
        // stop below start still yields a (decreasing) sequence
        let values = expspace(10.0, 5.0, 2);
        assert_eq!(values, vec![10, 5]);
    }

    #[test]
    fn test_integrate_series_is_mean_centred_cumsum() {
        let profile = integrate_series(&[1.0, 2.0, 3.0, 4.0]);
        // mean = 2.5 -> deviations -1.5, -0.5, 0.5, 1.5
        let expected = [-1.5, -2.0, -1.5, 0.0];
        for (p, e) in profile.iter().zip(expected.iter()) {
            assert_approx_eq!(*p, *e);
        }
        assert!(integrate_series(&[]).is_empty());
    }

    #[test]
    fn test_polyfit_columns_recovers_quadratic() {
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        // two right-hand sides: 2x^2 - x + 3 and -x + 1
        let y = DMatrix::from_fn(10, 2, |row, col| {
            let xi = x[row];
            if col == 0 {
                2.0 * xi * xi - xi + 3.0
            } else {
                -xi + 1.0
            }
        });

        let coefficients = polyfit_columns(&x, &y, 2).unwrap();
        assert_eq!(coefficients.shape(), (3, 2));
        assert_approx_eq!(coefficients[(0, 0)], 2.0, 1e-9);
        assert_approx_eq!(coefficients[(1, 0)], -1.0, 1e-9);
        assert_approx_eq!(coefficients[(2, 0)], 3.0, 1e-9);
        assert_approx_eq!(coefficients[(0, 1)], 0.0, 1e-9);
        assert_approx_eq!(coefficients[(1, 1)], -1.0, 1e-9);
        assert_approx_eq!(coefficients[(2, 1)], 1.0, 1e-9);
    }

    #[test]
    fn test_polyfit_columns_length_mismatch() {
        let y = DMatrix::zeros(4, 1);
        assert!(polyfit_columns(&[0.0, 1.0], &y, 1).is_err());
    }

    #[test]
    fn test_polyfit_line_exact() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let (slope, intercept) = polyfit_line(&x, &y);
        assert_approx_eq!(slope, 2.0);
        assert_approx_eq!(intercept, 0.0);
    }

    #[test]
    fn test_polyfit_line_propagates_nan() {
        let x = [1.0, 2.0, 3.0];
        let (slope, _) = polyfit_line(&x, &[1.0, f64::NEG_INFINITY, 3.0]);
        assert!(slope.is_nan());

        let (slope, _) = polyfit_line(&x, &[1.0, f64::NAN, 3.0]);
        assert!(slope.is_nan());
    }

    #[test]
    fn test_gradient_matches_central_differences() {
        let g = gradient(&[1.0, 2.0, 4.0, 7.0, 11.0]);
        assert_eq!(g, vec![1.0, 1.5, 2.5, 3.5, 4.0]);
        assert!(gradient(&[]).is_empty());
        assert!(gradient(&[3.0])[0].is_nan());
        assert_eq!(gradient(&[1.0, 3.0]), vec![2.0, 2.0]);
    }

    #[test]
    fn test_nan_reductions() {
        let values = [f64::NAN, 1.0, 5.0, f64::NAN, -2.0];
        assert_eq!(nan_max(&values), 5.0);
        assert_eq!(nan_min(&values), -2.0);
        assert_approx_eq!(nan_mean(&values), 4.0 / 3.0);
        assert_eq!(nan_argmax(&values), Some(2));

        let all_nan = [f64::NAN, f64::NAN];
        assert!(nan_max(&all_nan).is_nan());
        assert!(nan_min(&all_nan).is_nan());
        assert!(nan_mean(&all_nan).is_nan());
        assert_eq!(nan_argmax(&all_nan), None);
    }

    #[test]
    fn test_nan_argmax_first_of_ties() {
        assert_eq!(nan_argmax(&[1.0, 3.0, 3.0, 2.0]), Some(1));
    }
}
