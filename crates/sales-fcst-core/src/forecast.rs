//! One-call sales forecasting on top of the SES estimator.

use crate::error::{ForecastError, Result};
use crate::metrics::mse;
use crate::optimize::{optimize_alpha, OptimizerOptions};
use crate::ses::{validate_alpha, validate_horizon, validate_series, SesFit, SimpleExpSmoothing};
use statrs::distribution::{ContinuousCDF, Normal};

/// How the smoothing parameter is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlphaSelection {
    /// Caller-supplied alpha in (0, 1]
    Fixed(f64),
    /// Minimise in-sample one-step-ahead SSE
    Optimized(OptimizerOptions),
}

impl Default for AlphaSelection {
    fn default() -> Self {
        AlphaSelection::Fixed(0.2)
    }
}

impl std::str::FromStr for AlphaSelection {
    type Err = ForecastError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "optimized" | "optimised" | "auto" => {
                Ok(AlphaSelection::Optimized(OptimizerOptions::default()))
            }
            other => {
                let alpha: f64 = other.parse().map_err(|_| ForecastError::InvalidParameter {
                    param: "alpha".into(),
                    value: other.into(),
                    reason: "expected a number or 'optimized'".into(),
                })?;
                validate_alpha(alpha)?;
                Ok(AlphaSelection::Fixed(alpha))
            }
        }
    }
}

/// Forecast options.
#[derive(Debug, Clone)]
pub struct ForecastOptions {
    /// Smoothing parameter or how to estimate it
    pub alpha: AlphaSelection,
    /// Forecast horizon in days
    pub horizon: usize,
    /// Prediction interval coverage (0-1)
    pub confidence_level: f64,
    /// Include smoothed levels
    pub include_fitted: bool,
    /// Include one-step-ahead residuals
    pub include_residuals: bool,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            alpha: AlphaSelection::default(),
            horizon: 1,
            confidence_level: 0.95,
            include_fitted: false,
            include_residuals: false,
        }
    }
}

/// Forecast result.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOutput {
    /// Point forecasts (all equal to `level`)
    pub point: Vec<f64>,
    /// Lower prediction bounds
    pub lower: Vec<f64>,
    /// Upper prediction bounds
    pub upper: Vec<f64>,
    /// Smoothed levels (in-sample)
    pub fitted: Option<Vec<f64>>,
    /// One-step-ahead residuals
    pub residuals: Option<Vec<f64>>,
    /// Alpha used for the fit
    pub alpha: f64,
    /// Final level
    pub level: f64,
    /// MSE of the one-step-ahead predictions
    pub mse: f64,
}

/// Forecast a complete daily series.
pub fn forecast(values: &[f64], options: &ForecastOptions) -> Result<ForecastOutput> {
    validate_horizon(options.horizon)?;
    validate_confidence(options.confidence_level)?;
    validate_series(values)?;

    let alpha = match options.alpha {
        AlphaSelection::Fixed(alpha) => alpha,
        AlphaSelection::Optimized(ref opts) => optimize_alpha(values, opts)?.alpha,
    };

    let fit = SimpleExpSmoothing::new(alpha)?.fit(values)?;
    let point = fit.forecast(options.horizon)?;
    let (lower, upper) = prediction_intervals(&fit, options.horizon, options.confidence_level)?;
    let in_sample_mse = mse(values, &fit.one_step_ahead())?;

    Ok(ForecastOutput {
        point,
        lower,
        upper,
        fitted: options.include_fitted.then(|| fit.fitted().to_vec()),
        residuals: options.include_residuals.then(|| fit.residuals().to_vec()),
        alpha,
        level: fit.level(),
        mse: in_sample_mse,
    })
}

/// Normal-theory prediction bounds for a flat SES forecast.
///
/// Step `j` (1-based) has variance `sigma² * (1 + (j - 1) * alpha²)`, where
/// `sigma²` is the residual variance of the one-step-ahead errors.
pub fn prediction_intervals(
    fit: &SesFit,
    horizon: usize,
    confidence_level: f64,
) -> Result<(Vec<f64>, Vec<f64>)> {
    validate_horizon(horizon)?;
    validate_confidence(confidence_level)?;

    // First residual is 0 by construction, n - 1 real errors
    let sigma = if fit.len() > 1 {
        (fit.sse() / (fit.len() - 1) as f64).sqrt()
    } else {
        0.0
    };

    let normal = Normal::new(0.0, 1.0).map_err(|e| ForecastError::InvalidInput(e.to_string()))?;
    let z = normal.inverse_cdf((1.0 + confidence_level) / 2.0);
    let alpha_sq = fit.alpha() * fit.alpha();
    let level = fit.level();

    let (lower, upper): (Vec<f64>, Vec<f64>) = (0..horizon)
        .map(|j| {
            let half = z * sigma * (1.0 + j as f64 * alpha_sq).sqrt();
            (level - half, level + half)
        })
        .unzip();

    Ok((lower, upper))
}

fn validate_confidence(level: f64) -> Result<()> {
    if level > 0.0 && level < 1.0 {
        Ok(())
    } else {
        Err(ForecastError::InvalidParameter {
            param: "confidence_level".into(),
            value: level.to_string(),
            reason: "must satisfy 0 < confidence_level < 1".into(),
        })
    }
}
