//! Daily sales forecasting with simple exponential smoothing.
//!
//! The estimator lives in [`ses`]; everything else prepares its input
//! ([`gaps`], [`imputation`]) or packages its output ([`forecast`],
//! [`batch`], [`metrics`]).

pub mod batch;
pub mod error;
pub mod forecast;
pub mod gaps;
pub mod imputation;
pub mod metrics;
pub mod optimize;
pub mod ses;

// Re-exports for convenience
pub use batch::fit_many;
pub use error::{ForecastError, Result};
pub use forecast::{
    forecast, prediction_intervals, AlphaSelection, ForecastOptions, ForecastOutput,
};
pub use gaps::{as_daily, check_daily, detect_frequency, forecast_dates, DailySeries};
pub use imputation::{impute, require_complete, FillMethod};
pub use metrics::{mae, mape, mse, rmse};
pub use optimize::{optimize_alpha, OptimizedAlpha, OptimizerOptions};
pub use ses::{smooth, SesFit, SesOutput, SimpleExpSmoothing};
