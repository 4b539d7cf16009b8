//! Accuracy metrics for in-sample fits and holdout forecasts.
//!
//! | Metric | Use When |
//! |--------|----------|
//! | MAE | Need interpretable error in original units (sales) |
//! | MSE | Comparing fits; what the alpha optimizer minimises (as SSE) |
//! | RMSE | MSE in original units |
//! | MAPE | Need percentage-based comparison across stores or products |

use crate::error::{ForecastError, Result};

/// Mean Absolute Error.
///
/// # Formula
/// MAE = (1/n) * Σ|actual_i - forecast_i|
///
/// # Example
/// ```
/// use sales_fcst_core::metrics::mae;
/// let actual = vec![1.0, 2.0, 3.0];
/// let forecast = vec![1.1, 2.2, 2.8];
/// let error = mae(&actual, &forecast).unwrap();
/// assert!((error - 0.166).abs() < 0.01);
/// ```
pub fn mae(actual: &[f64], forecast: &[f64]) -> Result<f64> {
    validate_inputs(actual, forecast)?;
    let sum: f64 = actual
        .iter()
        .zip(forecast)
        .map(|(a, f)| (a - f).abs())
        .sum();
    Ok(sum / actual.len() as f64)
}

/// Mean Squared Error.
///
/// # Formula
/// MSE = (1/n) * Σ(actual_i - forecast_i)²
pub fn mse(actual: &[f64], forecast: &[f64]) -> Result<f64> {
    validate_inputs(actual, forecast)?;
    let sum: f64 = actual
        .iter()
        .zip(forecast)
        .map(|(a, f)| (a - f).powi(2))
        .sum();
    Ok(sum / actual.len() as f64)
}

/// Root Mean Squared Error.
pub fn rmse(actual: &[f64], forecast: &[f64]) -> Result<f64> {
    Ok(mse(actual, forecast)?.sqrt())
}

/// Mean Absolute Percentage Error, in percent.
///
/// Days with zero actual sales are skipped; if every actual is zero the
/// result is NaN.
pub fn mape(actual: &[f64], forecast: &[f64]) -> Result<f64> {
    validate_inputs(actual, forecast)?;
    let (sum, count) = actual
        .iter()
        .zip(forecast)
        .filter(|(a, _)| a.abs() > f64::EPSILON)
        .fold((0.0, 0usize), |(s, c), (a, f)| (s + ((a - f) / a).abs(), c + 1));

    if count == 0 {
        return Ok(f64::NAN);
    }
    Ok(100.0 * sum / count as f64)
}

fn validate_inputs(actual: &[f64], forecast: &[f64]) -> Result<()> {
    if actual.is_empty() {
        return Err(ForecastError::EmptySeries);
    }
    if actual.len() != forecast.len() {
        return Err(ForecastError::InvalidInput(format!(
            "actual has {} values but forecast has {}",
            actual.len(),
            forecast.len()
        )));
    }
    Ok(())
}
