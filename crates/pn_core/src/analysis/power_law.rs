//! # Power-Law Fit
//!
//! Maximum-likelihood power-law fit over a degree sample, with the
//! lower cutoff `xmin` selected by Kolmogorov-Smirnov distance
//! minimization over candidate cutoffs (Clauset-style).
//!
//! ## Algorithm
//! 1. Drop non-positive values; reject non-finite input.
//! 2. Detect whether the sample is integer-valued; if so, apply the
//!    discrete MLE correction (shift `xmin` by 0.5), otherwise use the
//!    continuous (Hill) estimator.
//! 3. For every distinct value as candidate `xmin` with a large enough
//!    tail: estimate alpha, compute the KS distance between empirical
//!    and fitted tail CDF.
//! 4. Keep the candidate with the smallest KS distance.

use crate::error::FitError;
use serde::{Deserialize, Serialize};

/// Minimum number of tail samples for a candidate cutoff.
pub const MIN_TAIL_SIZE: usize = 10;

/// Result of a power-law fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerLawFit {
    /// Fitted exponent (> 1).
    pub alpha: f64,
    /// Selected lower cutoff.
    pub xmin: f64,
    /// KS distance of the winning fit.
    pub ks_distance: f64,
    /// Number of samples at or above `xmin`.
    pub tail_size: usize,
    /// Whether the discrete MLE correction was applied.
    pub discrete: bool,
}

/// One point of the fitted-vs-empirical density series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfPoint {
    /// Bin center (geometric mean of the bin edges).
    pub x: f64,
    /// Empirical density in the bin.
    pub empirical: f64,
    /// Fitted power-law density at the bin center.
    pub fitted: f64,
}

/// Fit a power law to a sample of (weighted) degrees.
///
/// Non-positive values are ignored; they carry no tail information.
pub fn fit_power_law(samples: &[f64]) -> Result<PowerLawFit, FitError> {
    if samples.iter().any(|x| !x.is_finite()) {
        return Err(FitError::NonFiniteSample);
    }

    let mut data: Vec<f64> = samples.iter().copied().filter(|&x| x > 0.0).collect();
    if data.len() < MIN_TAIL_SIZE {
        return Err(FitError::InsufficientData(data.len()));
    }
    data.sort_by(|a, b| a.partial_cmp(b).expect("finite values compare"));

    // Integer-valued samples get the discrete correction, matching how
    // count-like degree data is usually fitted.
    let discrete = data[0] >= 1.0 && data.iter().all(|x| x.fract() == 0.0);

    let mut candidates = data.clone();
    candidates.dedup();

    let mut best: Option<PowerLawFit> = None;
    for &xmin in &candidates {
        let tail = &data[data.partition_point(|&x| x < xmin)..];
        if tail.len() < MIN_TAIL_SIZE {
            // Candidates ascend, tails only shrink from here.
            break;
        }
        // A single-valued tail cannot pin down an exponent.
        if tail.first() == tail.last() {
            continue;
        }

        let alpha = mle_alpha(tail, xmin, discrete);
        if !alpha.is_finite() || alpha <= 1.0 {
            continue;
        }

        let ks = ks_distance(tail, xmin, alpha, discrete);
        if best.as_ref().map_or(true, |b| ks < b.ks_distance) {
            best = Some(PowerLawFit {
                alpha,
                xmin,
                ks_distance: ks,
                tail_size: tail.len(),
                discrete,
            });
        }
    }

    best.ok_or(FitError::InsufficientData(data.len()))
}

/// Empirical and fitted density series over log-spaced bins of the
/// fitted tail, for the plotting collaborator.
pub fn pdf_series(samples: &[f64], fit: &PowerLawFit, bins: usize) -> Vec<PdfPoint> {
    let tail: Vec<f64> = samples
        .iter()
        .copied()
        .filter(|&x| x.is_finite() && x >= fit.xmin)
        .collect();
    if tail.is_empty() || bins == 0 {
        return Vec::new();
    }

    let max = tail.iter().copied().fold(fit.xmin, f64::max);
    if max <= fit.xmin {
        return Vec::new();
    }

    let log_min = fit.xmin.ln();
    let log_step = (max.ln() - log_min) / bins as f64;
    let edge = |i: usize| (log_min + log_step * i as f64).exp();

    let mut counts = vec![0u32; bins];
    for &x in &tail {
        let mut bin = ((x.ln() - log_min) / log_step) as usize;
        if bin >= bins {
            bin = bins - 1; // max lands on the last edge
        }
        counts[bin] += 1;
    }

    let n = tail.len() as f64;
    let shift = if fit.discrete { fit.xmin - 0.5 } else { fit.xmin };

    (0..bins)
        .filter(|&i| counts[i] > 0)
        .map(|i| {
            let (lo, hi) = (edge(i), edge(i + 1));
            let x = (lo * hi).sqrt();
            let empirical = counts[i] as f64 / (n * (hi - lo));
            let fitted = (fit.alpha - 1.0) / shift * (x / shift).powf(-fit.alpha);
            PdfPoint {
                x,
                empirical,
                fitted,
            }
        })
        .collect()
}

/// MLE exponent for a tail at the given cutoff.
fn mle_alpha(tail: &[f64], xmin: f64, discrete: bool) -> f64 {
    let shift = if discrete { xmin - 0.5 } else { xmin };
    let log_sum: f64 = tail.iter().map(|&x| (x / shift).ln()).sum();
    1.0 + tail.len() as f64 / log_sum
}

/// KS distance between the empirical tail CDF and the fitted model.
fn ks_distance(tail: &[f64], xmin: f64, alpha: f64, discrete: bool) -> f64 {
    let shift = if discrete { xmin - 0.5 } else { xmin };
    let n = tail.len() as f64;

    let mut max_dist = 0.0f64;
    for (i, &x) in tail.iter().enumerate() {
        let x_shift = if discrete { x - 0.5 } else { x };
        let model_cdf = 1.0 - (x_shift / shift).powf(1.0 - alpha);
        let below = i as f64 / n;
        let above = (i as f64 + 1.0) / n;
        max_dist = max_dist
            .max((model_cdf - below).abs())
            .max((model_cdf - above).abs());
    }
    max_dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Continuous Pareto sample via inverse transform.
    fn pareto_sample(alpha: f64, xmin: f64, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let u: f64 = rng.gen_range(0.0..1.0);
                xmin * (1.0 - u).powf(-1.0 / (alpha - 1.0))
            })
            .collect()
    }

    #[test]
    fn test_recovers_continuous_exponent() {
        let samples = pareto_sample(2.5, 1.0, 2000, 42);
        let fit = fit_power_law(&samples).unwrap();

        assert!(!fit.discrete);
        assert!(
            (fit.alpha - 2.5).abs() < 0.3,
            "alpha {} too far from 2.5",
            fit.alpha
        );
        assert!(fit.xmin < 3.0, "xmin {} unexpectedly deep in the tail", fit.xmin);
        assert!(fit.tail_size >= MIN_TAIL_SIZE);
        assert!(fit.ks_distance < 0.1);
    }

    #[test]
    fn test_detects_integer_valued_sample() {
        let samples: Vec<f64> = pareto_sample(2.2, 1.0, 2000, 7)
            .into_iter()
            .map(f64::floor)
            .collect();
        let fit = fit_power_law(&samples).unwrap();

        assert!(fit.discrete);
        assert!(fit.alpha > 1.5 && fit.alpha < 4.0, "alpha {}", fit.alpha);
        assert!(fit.xmin >= 1.0);
    }

    #[test]
    fn test_non_positive_values_ignored() {
        let mut samples = pareto_sample(2.5, 1.0, 500, 3);
        samples.extend([0.0; 50]);
        let fit = fit_power_law(&samples).unwrap();
        assert!(fit.tail_size <= 500);
    }

    #[test]
    fn test_insufficient_data() {
        let samples = [1.0, 2.0, 3.0];
        assert_eq!(
            fit_power_law(&samples),
            Err(crate::error::FitError::InsufficientData(3))
        );
    }

    #[test]
    fn test_constant_sample_cannot_fit() {
        let samples = [2.0; 50];
        assert!(fit_power_law(&samples).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let samples = [1.0, f64::NAN, 2.0];
        assert_eq!(
            fit_power_law(&samples),
            Err(crate::error::FitError::NonFiniteSample)
        );
    }

    #[test]
    fn test_pdf_series_tracks_fit() {
        let samples = pareto_sample(2.5, 1.0, 1000, 11);
        let fit = fit_power_law(&samples).unwrap();
        let series = pdf_series(&samples, &fit, 10);

        assert!(!series.is_empty());
        assert!(series.len() <= 10);
        for point in &series {
            assert!(point.x >= fit.xmin);
            assert!(point.empirical > 0.0);
            assert!(point.fitted > 0.0);
            // Densities should agree within an order of magnitude on
            // clean synthetic data.
            let ratio = point.empirical / point.fitted;
            assert!(ratio > 0.1 && ratio < 10.0, "ratio {ratio} at x {}", point.x);
        }
    }
}
