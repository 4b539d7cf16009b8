//! Missing value imputation for daily series.

use crate::error::{ForecastError, Result};
use std::str::FromStr;

/// How to fill days without an observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillMethod {
    /// Carry the last observed value forward (LOCF)
    Forward,
    /// Carry the next observed value backward (NOCB)
    Backward,
    /// Straight line between the surrounding observations
    Linear,
    /// Use a fixed value, e.g. 0 for days without sales
    Constant(f64),
}

impl FromStr for FillMethod {
    type Err = ForecastError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" | "ffill" | "locf" => Ok(FillMethod::Forward),
            "backward" | "bfill" | "nocb" => Ok(FillMethod::Backward),
            "linear" | "interpolate" => Ok(FillMethod::Linear),
            "zero" => Ok(FillMethod::Constant(0.0)),
            other => Err(ForecastError::InvalidParameter {
                param: "fill_method".into(),
                value: other.into(),
                reason: "expected forward, backward, linear or zero".into(),
            }),
        }
    }
}

/// Fill missing values.
///
/// Gaps the method cannot reach (a leading gap under `Forward`, a trailing
/// gap under `Backward`, either edge under `Linear`) stay `None`.
pub fn impute(values: &[Option<f64>], method: FillMethod) -> Vec<Option<f64>> {
    match method {
        FillMethod::Forward => carry(values.iter().copied()),
        FillMethod::Backward => {
            let mut out = carry(values.iter().rev().copied());
            out.reverse();
            out
        }
        FillMethod::Linear => interpolate(values),
        FillMethod::Constant(c) => values.iter().map(|v| Some(v.unwrap_or(c))).collect(),
    }
}

/// Unwrap a fully observed series; the first missing value is an error.
pub fn require_complete(values: &[Option<f64>]) -> Result<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(index, v)| {
            v.ok_or_else(|| ForecastError::InvalidData {
                index,
                reason: "missing value".to_string(),
            })
        })
        .collect()
}

fn carry(values: impl Iterator<Item = Option<f64>>) -> Vec<Option<f64>> {
    let mut last = None;
    values
        .map(|v| {
            if v.is_some() {
                last = v;
            }
            last
        })
        .collect()
}

fn interpolate(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = values.to_vec();
    let mut prev: Option<(usize, f64)> = None;

    for (i, v) in values.iter().enumerate() {
        let Some(y) = *v else { continue };
        if let Some((p, py)) = prev {
            let gap = i - p;
            let slope = (y - py) / gap as f64;
            for (j, slot) in out.iter_mut().enumerate().take(i).skip(p + 1) {
                *slot = Some(py + slope * (j - p) as f64);
            }
        }
        prev = Some((i, y));
    }

    out
}
