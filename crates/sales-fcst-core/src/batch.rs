//! Forecasting many independent series at once.

use crate::error::Result;
use crate::forecast::{forecast, ForecastOptions, ForecastOutput};

#[cfg(feature = "native")]
use rayon::prelude::*;

/// Forecast each series independently with the same options.
///
/// Results keep input order; a failing series does not affect the others.
#[cfg(feature = "native")]
pub fn fit_many(series: &[Vec<f64>], options: &ForecastOptions) -> Vec<Result<ForecastOutput>> {
    series.par_iter().map(|s| forecast(s, options)).collect()
}

/// Forecast each series independently with the same options.
///
/// Results keep input order; a failing series does not affect the others.
#[cfg(not(feature = "native"))]
pub fn fit_many(series: &[Vec<f64>], options: &ForecastOptions) -> Vec<Result<ForecastOutput>> {
    series.iter().map(|s| forecast(s, options)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;

    #[test]
    fn test_fit_many_matches_single_fits() {
        let series: Vec<Vec<f64>> = (0..16)
            .map(|k| (0..100).map(|i| ((i * (k + 3)) % 17) as f64 + k as f64).collect())
            .collect();
        let options = ForecastOptions {
            horizon: 5,
            include_fitted: true,
            ..Default::default()
        };

        let batch = fit_many(&series, &options);
        assert_eq!(batch.len(), series.len());
        for (s, result) in series.iter().zip(batch) {
            assert_eq!(result.unwrap(), forecast(s, &options).unwrap());
        }
    }

    #[test]
    fn test_fit_many_keeps_errors_per_series() {
        let series = vec![vec![1.0, 2.0], vec![], vec![3.0, f64::NAN], vec![5.0]];
        let batch = fit_many(&series, &ForecastOptions::default());

        assert!(batch[0].is_ok());
        assert_eq!(batch[1].as_ref().unwrap_err(), &ForecastError::EmptySeries);
        assert!(matches!(
            batch[2],
            Err(ForecastError::InvalidData { index: 1, .. })
        ));
        assert_eq!(batch[3].as_ref().unwrap().point, vec![5.0]);
    }

    #[test]
    fn test_fit_many_empty() {
        assert!(fit_many(&[], &ForecastOptions::default()).is_empty());
    }
}
