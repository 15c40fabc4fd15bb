//! Linear interpolation implementation.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator.
///
/// Stores sorted (x, y) data points and performs linear interpolation
/// between adjacent points. At least 2 points are required and the
/// x-coordinates must be distinct.
///
/// # Example
///
/// ```
/// use tabula_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::<f64>::new(&[0.0, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap();
/// assert_eq!(interp.domain(), (0.0, 2.0));
/// assert!((interp.interpolate(0.5).unwrap() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Construct a linear interpolator from x and y data points.
    ///
    /// Points are sorted by x-coordinate during construction.
    ///
    /// # Errors
    ///
    /// * `InterpolationError::InvalidInput` - Mismatched lengths or duplicate x
    /// * `InterpolationError::InsufficientData` - Fewer than 2 data points
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }

        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }

        let mut pairs: Vec<(T, T)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        if pairs.windows(2).any(|w| w[0].0 == w[1].0) {
            return Err(InterpolationError::InvalidInput(
                "x-coordinates must be distinct".to_string(),
            ));
        }

        let (xs, ys): (Vec<T>, Vec<T>) = pairs.into_iter().unzip();
        Ok(Self { xs, ys })
    }

    /// Returns the sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns the y-values in sorted x order.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Returns the number of data points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed interpolator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Index `i` such that `xs[i] <= x < xs[i+1]`, clamped to `[0, n-2]`.
    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        if pos == 0 {
            0
        } else if pos >= self.xs.len() {
            self.xs.len() - 2
        } else {
            pos - 1
        }
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();

        if x < x_min || x > x_max {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }

        let i = self.find_segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);

        // y = y0 + (y1 - y0) * (x - x0) / (x1 - x0)
        Ok(y0 + (y1 - y0) * ((x - x0) / (x1 - x0)))
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_sorts_points() {
        let interp = LinearInterpolator::new(&[2.0, 0.0, 1.0], &[4.0, 0.0, 2.0]).unwrap();
        assert_eq!(interp.xs(), &[0.0, 1.0, 2.0]);
        assert_eq!(interp.ys(), &[0.0, 2.0, 4.0]);
        assert_eq!(interp.len(), 3);
        assert!(!interp.is_empty());
    }

    #[test]
    fn test_new_insufficient_data() {
        let result = LinearInterpolator::new(&[0.0], &[0.0]);
        assert!(matches!(
            result,
            Err(InterpolationError::InsufficientData { got: 1, need: 2 })
        ));
    }

    #[test]
    fn test_new_mismatched_lengths() {
        let result = LinearInterpolator::new(&[0.0, 1.0], &[0.0]);
        assert!(matches!(result, Err(InterpolationError::InvalidInput(_))));
    }

    #[test]
    fn test_new_duplicate_x() {
        let result = LinearInterpolator::new(&[0.0, 1.0, 1.0], &[0.0, 1.0, 2.0]);
        assert!(matches!(result, Err(InterpolationError::InvalidInput(_))));
    }

    #[test]
    fn test_interpolate_knots_and_midpoints() {
        let interp = LinearInterpolator::new(&[0.0, 1.0, 3.0], &[1.0, 3.0, 7.0]).unwrap();
        assert_relative_eq!(interp.interpolate(0.0).unwrap(), 1.0);
        assert_relative_eq!(interp.interpolate(1.0).unwrap(), 3.0);
        assert_relative_eq!(interp.interpolate(3.0).unwrap(), 7.0);
        assert_relative_eq!(interp.interpolate(0.5).unwrap(), 2.0);
        assert_relative_eq!(interp.interpolate(2.0).unwrap(), 5.0);
    }

    #[test]
    fn test_interpolate_out_of_bounds() {
        let interp = LinearInterpolator::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        match interp.interpolate(1.5) {
            Err(InterpolationError::OutOfBounds { x, min, max }) => {
                assert_eq!((x, min, max), (1.5, 0.0, 1.0));
            }
            other => panic!("Expected OutOfBounds, got {:?}", other),
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_interpolation_bounded_by_neighbours(
                y0 in -100.0..100.0_f64,
                y1 in -100.0..100.0_f64,
                y2 in -100.0..100.0_f64,
                x in 0.0..2.0_f64
            ) {
                let interp = LinearInterpolator::new(&[0.0, 1.0, 2.0], &[y0, y1, y2]).unwrap();
                let y = interp.interpolate(x).unwrap();
                let (lo, hi) = if x <= 1.0 { (y0.min(y1), y0.max(y1)) } else { (y1.min(y2), y1.max(y2)) };
                prop_assert!(y >= lo - 1e-9 && y <= hi + 1e-9);
            }
        }
    }
}
