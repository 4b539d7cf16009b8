//! Simple exponential smoothing (level only, no trend, no seasonality).
//!
//! ```text
//! L[0] = y[0]
//! L[t] = alpha * y[t] + (1 - alpha) * L[t-1]
//! ```
//!
//! The level is seeded with the first observation. Every forecast step equals
//! the final level, whatever the horizon.

use crate::error::{ForecastError, Result};
use log::debug;

/// Smoothed levels and forecast produced by [`smooth`].
#[derive(Debug, Clone, PartialEq)]
pub struct SesOutput {
    /// Level at each observed time step
    pub fitted: Vec<f64>,
    /// Flat forecast, one value per future step
    pub forecast: Vec<f64>,
}

/// Simple exponential smoothing estimator.
///
/// Holds only the smoothing parameter, so one estimator can fit any number
/// of series, from any number of threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleExpSmoothing {
    alpha: f64,
}

impl SimpleExpSmoothing {
    /// Create an estimator with smoothing parameter `alpha`.
    ///
    /// Fails with [`ForecastError::InvalidParameter`] unless `0 < alpha <= 1`.
    pub fn new(alpha: f64) -> Result<Self> {
        validate_alpha(alpha)?;
        Ok(Self { alpha })
    }

    /// Returns the smoothing parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fit the level recurrence to `series`.
    pub fn fit(&self, series: &[f64]) -> Result<SesFit> {
        validate_series(series)?;

        let alpha = self.alpha;
        let mut levels = Vec::with_capacity(series.len());
        let mut residuals = Vec::with_capacity(series.len());

        let mut level = series[0];
        levels.push(level);
        residuals.push(0.0);

        for &y in &series[1..] {
            residuals.push(y - level);
            level = alpha * y + (1.0 - alpha) * level;
            levels.push(level);
        }

        debug!(
            "SES fit: n={}, alpha={}, final level={}",
            series.len(),
            alpha,
            level
        );

        Ok(SesFit {
            alpha,
            levels,
            residuals,
        })
    }
}

/// Result of fitting [`SimpleExpSmoothing`] to a series.
#[derive(Debug, Clone, PartialEq)]
pub struct SesFit {
    alpha: f64,
    levels: Vec<f64>,
    residuals: Vec<f64>,
}

impl SesFit {
    /// Smoothing parameter used for the fit.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Smoothed level at each observed time step.
    pub fn fitted(&self) -> &[f64] {
        &self.levels
    }

    /// Final level, the basis of every forecast.
    pub fn level(&self) -> f64 {
        // A fit is only built from a non-empty series.
        self.levels[self.levels.len() - 1]
    }

    /// Number of observations the model was fitted on.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false: fitting rejects empty series.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Forecast `horizon` steps past the end of the series.
    pub fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        validate_horizon(horizon)?;
        Ok(vec![self.level(); horizon])
    }

    /// In-sample one-step-ahead predictions: `[L[0], L[0], L[1], .., L[n-2]]`.
    pub fn one_step_ahead(&self) -> Vec<f64> {
        let mut pred = Vec::with_capacity(self.levels.len());
        pred.push(self.levels[0]);
        pred.extend_from_slice(&self.levels[..self.levels.len() - 1]);
        pred
    }

    /// One-step-ahead errors `y[t] - L[t-1]`; the first entry is 0.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Sum of squared one-step-ahead errors.
    pub fn sse(&self) -> f64 {
        self.residuals.iter().map(|e| e * e).sum()
    }
}

/// Smooth `series` and forecast `horizon` steps (one step when `None`).
///
/// All inputs are checked before any smoothing is done.
///
/// # Example
/// ```
/// use sales_fcst_core::ses::smooth;
/// let out = smooth(&[10.0, 12.0, 11.0, 15.0, 14.0], 0.2, None).unwrap();
/// assert!((out.forecast[0] - 11.9328).abs() < 1e-9);
/// ```
pub fn smooth(series: &[f64], alpha: f64, horizon: Option<usize>) -> Result<SesOutput> {
    let horizon = horizon.unwrap_or(1);
    validate_horizon(horizon)?;

    let fit = SimpleExpSmoothing::new(alpha)?.fit(series)?;
    let forecast = fit.forecast(horizon)?;

    Ok(SesOutput {
        fitted: fit.levels,
        forecast,
    })
}

pub(crate) fn validate_alpha(alpha: f64) -> Result<()> {
    // NaN fails both comparisons
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(())
    } else {
        Err(ForecastError::invalid_alpha(alpha))
    }
}

pub(crate) fn validate_horizon(horizon: usize) -> Result<()> {
    if horizon < 1 {
        return Err(ForecastError::InvalidHorizon(horizon));
    }
    Ok(())
}

/// Reject empty series and non-finite observations.
pub(crate) fn validate_series(series: &[f64]) -> Result<()> {
    if series.is_empty() {
        return Err(ForecastError::EmptySeries);
    }

    if let Some((index, value)) = series.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        let reason = if value.is_nan() {
            "value is NaN".to_string()
        } else {
            format!("value is {}", value)
        };
        return Err(ForecastError::InvalidData { index, reason });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SALES: [f64; 5] = [10.0, 12.0, 11.0, 15.0, 14.0];

    #[test]
    fn test_reference_example() {
        let out = smooth(&SALES, 0.2, Some(1)).unwrap();
        let expected = [10.0, 10.4, 10.52, 11.416, 11.9328];

        assert_eq!(out.fitted.len(), 5);
        for (got, want) in out.fitted.iter().zip(expected.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12);
        }
        assert_eq!(out.forecast.len(), 1);
        assert_relative_eq!(out.forecast[0], 11.9328, epsilon = 1e-12);
    }

    #[test]
    fn test_default_horizon_is_one_step() {
        let out = smooth(&SALES, 0.2, None).unwrap();
        assert_eq!(out.forecast.len(), 1);
    }

    #[test]
    fn test_first_level_is_first_observation() {
        for &alpha in &[1e-9, 0.05, 0.2, 0.5, 0.99, 1.0] {
            let fit = SimpleExpSmoothing::new(alpha).unwrap().fit(&SALES).unwrap();
            assert_eq!(fit.fitted()[0], SALES[0]);
        }
    }

    #[test]
    fn test_level_between_observation_and_previous_level() {
        let series = [3.0, 120.5, -4.0, 0.0, 77.7, 77.7, 1e6, 2.5, 13.0];
        for &alpha in &[0.01, 0.2, 0.5, 0.8, 1.0] {
            let fit = SimpleExpSmoothing::new(alpha)
                .unwrap()
                .fit(&series)
                .unwrap();
            let levels = fit.fitted();
            for t in 1..series.len() {
                let lo = series[t].min(levels[t - 1]);
                let hi = series[t].max(levels[t - 1]);
                let tol = 1e-9 * hi.abs().max(1.0);
                assert!(
                    levels[t] >= lo - tol && levels[t] <= hi + tol,
                    "alpha={} t={} level={} not in [{}, {}]",
                    alpha,
                    t,
                    levels[t],
                    lo,
                    hi
                );
            }
        }
    }

    #[test]
    fn test_alpha_one_reproduces_series() {
        let out = smooth(&SALES, 1.0, None).unwrap();
        assert_eq!(out.fitted, SALES.to_vec());
        assert_eq!(out.forecast, vec![14.0]);
    }

    #[test]
    fn test_tiny_alpha_flattens_series() {
        let out = smooth(&SALES, 1e-12, None).unwrap();
        for &level in &out.fitted {
            assert_relative_eq!(level, SALES[0], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_forecast_is_flat_for_any_horizon() {
        let fit = SimpleExpSmoothing::new(0.3).unwrap().fit(&SALES).unwrap();
        let one = fit.forecast(1).unwrap();
        let many = fit.forecast(31).unwrap();

        assert_eq!(many.len(), 31);
        assert!(many.iter().all(|&v| v == one[0]));
        assert_eq!(one[0], fit.level());
    }

    #[test]
    fn test_fit_is_deterministic() {
        let series: Vec<f64> = (0..365)
            .map(|i| 1000.0 + ((i * 37 + 11) % 97) as f64 * 3.7)
            .collect();
        let a = smooth(&series, 0.2, Some(7)).unwrap();
        let b = smooth(&series, 0.2, Some(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_observation() {
        for &alpha in &[0.1, 0.5, 1.0] {
            let out = smooth(&[42.0], alpha, Some(3)).unwrap();
            assert_eq!(out.fitted, vec![42.0]);
            assert_eq!(out.forecast, vec![42.0; 3]);
        }
    }

    #[test]
    fn test_invalid_alpha() {
        for &alpha in &[0.0, -0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = SimpleExpSmoothing::new(alpha).unwrap_err();
            assert!(matches!(err, ForecastError::InvalidParameter { .. }));
        }
        assert!(matches!(
            smooth(&SALES, 0.0, None),
            Err(ForecastError::InvalidParameter { .. })
        ));
        assert!(matches!(
            smooth(&SALES, 1.5, None),
            Err(ForecastError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_empty_series() {
        let ses = SimpleExpSmoothing::new(0.2).unwrap();
        assert_eq!(ses.fit(&[]).unwrap_err(), ForecastError::EmptySeries);
        assert_eq!(
            smooth(&[], 0.2, None).unwrap_err(),
            ForecastError::EmptySeries
        );
    }

    #[test]
    fn test_zero_horizon() {
        assert_eq!(
            smooth(&SALES, 0.2, Some(0)).unwrap_err(),
            ForecastError::InvalidHorizon(0)
        );
        let fit = SimpleExpSmoothing::new(0.2).unwrap().fit(&SALES).unwrap();
        assert_eq!(fit.forecast(0).unwrap_err(), ForecastError::InvalidHorizon(0));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let ses = SimpleExpSmoothing::new(0.2).unwrap();

        let err = ses.fit(&[1.0, 2.0, f64::NAN, 4.0]).unwrap_err();
        assert_eq!(
            err,
            ForecastError::InvalidData {
                index: 2,
                reason: "value is NaN".into()
            }
        );

        let err = ses.fit(&[1.0, f64::NEG_INFINITY]).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidData { index: 1, .. }));
    }

    #[test]
    fn test_one_step_ahead_and_residuals() {
        let fit = SimpleExpSmoothing::new(0.2).unwrap().fit(&SALES).unwrap();
        let pred = fit.one_step_ahead();
        let levels = fit.fitted();

        assert_eq!(pred.len(), SALES.len());
        assert_eq!(pred[0], levels[0]);
        assert_eq!(&pred[1..], &levels[..4]);

        for t in 0..SALES.len() {
            assert_relative_eq!(fit.residuals()[t], SALES[t] - pred[t], epsilon = 1e-12);
        }
        // 2^2 + 0.6^2 + 4.48^2 + 2.584^2
        assert_relative_eq!(fit.sse(), 31.107456, epsilon = 1e-9);
    }
}
