//! Opt-in estimation of the smoothing parameter.
//!
//! Alpha is chosen by golden-section search to minimise the in-sample sum of
//! squared one-step-ahead errors. The objective is evaluated with the same
//! `y[0]` level seed as [`crate::ses`].

use crate::error::{ForecastError, Result};
use crate::ses::validate_series;
use log::{debug, trace};

/// 1 / golden ratio
const INV_PHI: f64 = 0.618_033_988_749_894_8;

const GRID_POINTS: usize = 20;

/// Search settings for [`optimize_alpha`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerOptions {
    /// Smallest alpha considered (upper bound is always 1)
    pub lower: f64,
    /// Stop once the bracket is narrower than this
    pub tolerance: f64,
    /// Hard cap on search iterations
    pub max_iterations: usize,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            lower: 1e-4,
            tolerance: 1e-6,
            max_iterations: 200,
        }
    }
}

/// Alpha selected by [`optimize_alpha`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizedAlpha {
    pub alpha: f64,
    /// In-sample SSE at `alpha`
    pub sse: f64,
    pub iterations: usize,
}

/// Find the alpha in `[options.lower, 1]` minimising one-step-ahead SSE.
pub fn optimize_alpha(series: &[f64], options: &OptimizerOptions) -> Result<OptimizedAlpha> {
    validate_options(options)?;
    validate_series(series)?;

    if series.len() < 2 {
        return Ok(OptimizedAlpha {
            alpha: 1.0,
            sse: 0.0,
            iterations: 0,
        });
    }

    // Coarse scan picks the bracket so the golden-section step stays in the
    // best basin when the objective is not unimodal.
    let grid: Vec<f64> = (0..=GRID_POINTS)
        .map(|k| options.lower + (1.0 - options.lower) * k as f64 / GRID_POINTS as f64)
        .collect();
    let best_k = grid
        .iter()
        .map(|&alpha| sse_at(series, alpha))
        .enumerate()
        .fold((0, f64::INFINITY), |(bk, bs), (k, s)| {
            if s < bs {
                (k, s)
            } else {
                (bk, bs)
            }
        })
        .0;
    let coarse = grid[best_k];

    let mut a = grid[best_k.saturating_sub(1)];
    let mut b = grid[(best_k + 1).min(GRID_POINTS)];
    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = sse_at(series, c);
    let mut fd = sse_at(series, d);
    let mut iterations = 0;

    while (b - a) > options.tolerance && iterations < options.max_iterations {
        if fc <= fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = sse_at(series, c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = sse_at(series, d);
        }
        iterations += 1;
        trace!("alpha search {}: [{:.6}, {:.6}]", iterations, a, b);
    }

    let mut best = OptimizedAlpha {
        alpha: (a + b) / 2.0,
        sse: sse_at(series, (a + b) / 2.0),
        iterations,
    };

    // The interior search never lands exactly on the bracket ends.
    for candidate in [a, b, coarse, options.lower, 1.0] {
        let sse = sse_at(series, candidate);
        if sse < best.sse {
            best.alpha = candidate;
            best.sse = sse;
        }
    }

    debug!(
        "optimized alpha={} (sse={}, {} iterations)",
        best.alpha, best.sse, best.iterations
    );
    Ok(best)
}

fn sse_at(series: &[f64], alpha: f64) -> f64 {
    let mut level = series[0];
    let mut sse = 0.0;
    for &y in &series[1..] {
        let err = y - level;
        sse += err * err;
        level = alpha * y + (1.0 - alpha) * level;
    }
    sse
}

fn validate_options(options: &OptimizerOptions) -> Result<()> {
    if !(options.lower > 0.0 && options.lower < 1.0) {
        return Err(ForecastError::InvalidParameter {
            param: "lower".into(),
            value: options.lower.to_string(),
            reason: "must satisfy 0 < lower < 1".into(),
        });
    }
    if !(options.tolerance > 0.0) {
        return Err(ForecastError::InvalidParameter {
            param: "tolerance".into(),
            value: options.tolerance.to_string(),
            reason: "must be positive".into(),
        });
    }
    Ok(())
}
