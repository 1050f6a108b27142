//! Noise injection — Gaussian and SNR-scaled white noise.
//!
//! Purpose
//! -------
//! Produce the two noisy variants of a generated series that go into the
//! final report: one with additive Gaussian noise of a fixed standard
//! deviation, one with noise scaled to a target signal-to-noise ratio.
//!
//! Key behaviors
//! -------------
//! - Gaussian branch: `x_t + ε_t`, `ε_t ~ N(0, level)` (`level` is the
//!   standard deviation).
//! - SNR branch: `level` is an SNR in dB; noise variance is
//!   `mean(x²) / 10^(level / 10)`.
//! - A zero standard deviation (level 0 in the Gaussian branch, or an
//!   all-zero signal in the SNR branch) returns the series unchanged without
//!   drawing.
//!
//! Conventions
//! -----------
//! - Noise is drawn from `statrs::distribution::Normal` through the
//!   `rand::distributions::Distribution` interface, Gaussian branch first.
use ndarray::{Array1, ArrayView1};
use rand::{Rng, distributions::Distribution};
use statrs::distribution::Normal;

use crate::processing::errors::{ProcessingError, ProcessingResult};

/// NoisySeries — the two noisy variants of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct NoisySeries {
    pub gaussian: Array1<f64>,
    pub snr: Array1<f64>,
}

/// Noise standard deviation for a target SNR (dB) given the signal.
pub fn snr_noise_std(series: ArrayView1<'_, f64>, snr_db: f64) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let power = series.mapv(|x| x * x).mean().unwrap_or(0.0);
    (power / 10f64.powf(snr_db / 10.0)).sqrt()
}

fn perturb<R: Rng + ?Sized>(
    series: ArrayView1<'_, f64>, std_dev: f64, rng: &mut R,
) -> ProcessingResult<Array1<f64>> {
    if std_dev == 0.0 {
        return Ok(series.to_owned());
    }
    let normal = Normal::new(0.0, std_dev)?;
    Ok(series.mapv(|x| x + normal.sample(rng)))
}

/// Add Gaussian and SNR-scaled noise to `series`.
///
/// Parameters
/// ----------
/// - `series`: `ArrayView1<f64>`
///   Clean series (finite values).
/// - `level`: `f64`
///   Gaussian standard deviation and SNR in dB (≥ 0).
/// - `rng`: `&mut R`
///   Source of the noise draws.
///
/// Errors
/// ------
/// - `ProcessingError::InvalidNoiseLevel` for a negative or non-finite level.
/// - `ProcessingError::NonFiniteValue` for NaN/±inf series values.
pub fn add_noise<R: Rng + ?Sized>(
    series: ArrayView1<'_, f64>, level: f64, rng: &mut R,
) -> ProcessingResult<NoisySeries> {
    if !level.is_finite() || level < 0.0 {
        return Err(ProcessingError::InvalidNoiseLevel { value: level });
    }
    if let Some((index, &value)) = series.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ProcessingError::NonFiniteValue { index, value });
    }
    let gaussian = perturb(series, level, rng)?;
    let snr = perturb(series, snr_noise_std(series, level), rng)?;
    Ok(NoisySeries { gaussian, snr })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    // Purpose
    // -------
    // The SNR standard deviation follows `sqrt(P / 10^(dB/10))`.
    //
    // Given
    // -----
    // - Signal [2, -2, 2, -2] (power 4) at 10 dB and 0 dB.
    //
    // Expect
    // ------
    // - σ = sqrt(0.4) at 10 dB and 2 at 0 dB.
    fn snr_std_matches_power_ratio() {
        let signal = array![2.0, -2.0, 2.0, -2.0];
        assert_relative_eq!(snr_noise_std(signal.view(), 10.0), 0.4f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(snr_noise_std(signal.view(), 0.0), 2.0, epsilon = 1e-12);
        assert_eq!(snr_noise_std(Array1::<f64>::zeros(3).view(), 5.0), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Gaussian noise has roughly the requested standard deviation.
    //
    // Given
    // -----
    // - 20 000 zeros, level 0.5, fixed seed.
    //
    // Expect
    // ------
    // - Sample std of the Gaussian residuals within 5% of 0.5.
    // - The SNR branch is untouched (a zero signal has zero noise power).
    fn gaussian_branch_has_requested_spread() {
        // Arrange
        let series = Array1::<f64>::zeros(20_000);
        let mut rng = StdRng::seed_from_u64(17);

        // Act
        let noisy = add_noise(series.view(), 0.5, &mut rng).unwrap();

        // Assert
        let resid = &noisy.gaussian - &series;
        let std = resid.std(1.0);
        assert_relative_eq!(std, 0.5, max_relative = 0.05);
        assert_eq!(noisy.snr, series);
    }

    #[test]
    // Purpose
    // -------
    // A zero level leaves the Gaussian branch untouched.
    fn zero_level_leaves_gaussian_branch_clean() {
        let series = array![1.0, 2.0, 3.0];
        let mut rng = StdRng::seed_from_u64(1);
        let noisy = add_noise(series.view(), 0.0, &mut rng).unwrap();
        assert_eq!(noisy.gaussian, series);
        assert_eq!(noisy.snr.len(), 3);
        assert_ne!(noisy.snr, series);
    }

    #[test]
    fn invalid_levels_and_values_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            add_noise(array![1.0].view(), -1.0, &mut rng),
            Err(ProcessingError::InvalidNoiseLevel { value: -1.0 })
        );
        assert!(matches!(
            add_noise(array![1.0, f64::INFINITY].view(), 0.1, &mut rng),
            Err(ProcessingError::NonFiniteValue { index: 1, .. })
        ));
    }
}
