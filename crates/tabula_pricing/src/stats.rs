//! Reduction of path vectors into prices and diagnostics.

use std::collections::BTreeMap;

use serde::Serialize;

/// Mean, sample standard deviation and standard error of a path vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (`n - 1` denominator); zero for one path.
    pub std_dev: f64,
    /// `std_dev / sqrt(n)`.
    pub std_error: f64,
}

impl Summary {
    /// Summarise `values`.
    ///
    /// Sums run sequentially in path order, so the result is identical for
    /// any thread count.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabula_pricing::stats::Summary;
    ///
    /// let summary = Summary::from_values(&[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(summary.mean, 2.5);
    /// assert!((summary.std_dev - 1.2909944).abs() < 1e-7);
    /// assert!((summary.std_error - summary.std_dev / 2.0).abs() < 1e-15);
    /// ```
    pub fn from_values(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self::default();
        }
        let mean = values.iter().sum::<f64>() / n as f64;
        if n == 1 {
            return Self {
                mean,
                std_dev: 0.0,
                std_error: 0.0,
            };
        }
        let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        let std_dev = (sum_sq / (n - 1) as f64).sqrt();
        Self {
            mean,
            std_dev,
            std_error: std_dev / (n as f64).sqrt(),
        }
    }
}

/// Diagnostics of one pricing run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PricingStats {
    /// Mean of the main track.
    pub mean: f64,
    /// Standard error of the mean.
    pub std_error: f64,
    /// Sample standard deviation of the main track.
    pub std_dev: f64,
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Number of time grid points walked.
    pub n_grid_points: usize,
    /// Number of events evaluated.
    pub n_events: usize,
    /// Per-path present values of the main track (`RAW_PV`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pv_vec: Option<Vec<f64>>,
    /// Final per-path vectors of every other track (`RAW_TRACKS`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_vectors: Option<BTreeMap<String, Vec<f64>>>,
}

/// Result of a pricing run.
///
/// # Examples
///
/// ```rust
/// use tabula_pricing::stats::{PricingResult, PricingStats};
///
/// let result = PricingResult {
///     price: 252.4,
///     std_error: 1.1,
///     stats: PricingStats::default(),
/// };
///
/// println!("Price: {} +/- {}", result.price, result.confidence_95());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PricingResult {
    /// Present value estimate: mean of the main track.
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Run diagnostics and requested raw vectors.
    pub stats: PricingStats,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summary_single_path() {
        let summary = Summary::from_values(&[7.5]);
        assert_eq!(summary.mean, 7.5);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.std_error, 0.0);
    }

    #[test]
    fn test_summary_constant_values() {
        let summary = Summary::from_values(&[3.0; 100]);
        assert_relative_eq!(summary.mean, 3.0);
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(Summary::from_values(&[]), Summary::default());
    }

    #[test]
    fn test_confidence_intervals() {
        let result = PricingResult {
            price: 10.0,
            std_error: 0.5,
            stats: PricingStats::default(),
        };
        assert_relative_eq!(result.confidence_95(), 0.98);
        assert_relative_eq!(result.confidence_99(), 1.288);
    }

    #[test]
    fn test_raw_vectors_skipped_when_absent() {
        let result = PricingResult::default();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["stats"].get("pv_vec").is_none());
        assert!(json["stats"].get("track_vectors").is_none());
        assert_eq!(json["stats"]["n_paths"], 0);
    }
}
