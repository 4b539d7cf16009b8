//! Daily frequency assignment and gap detection.
//!
//! The smoother expects one value per calendar day, in order. These helpers
//! establish and check that precondition on raw dated observations; they
//! never fill values themselves (see [`crate::imputation`]).

use crate::error::{ForecastError, Result};
use crate::imputation::{impute, require_complete, FillMethod};
use chrono::{Days, NaiveDate};
use log::warn;
use std::collections::HashMap;

/// Sales series on a contiguous daily calendar.
///
/// Days with no observation hold `None` until imputed.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<Option<f64>>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of days without a value.
    pub fn n_missing(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Fill missing days with `method`, keeping the calendar.
    pub fn impute(self, method: FillMethod) -> Self {
        let values = impute(&self.values, method);
        Self {
            dates: self.dates,
            values,
        }
    }

    /// Values ready for smoothing; fails if any day is still missing.
    pub fn into_values(self) -> Result<Vec<f64>> {
        require_complete(&self.values)
    }
}

/// Put dated observations on a daily calendar.
///
/// Sorts by date and inserts a `None` for each calendar day that has no
/// observation. Duplicate dates are rejected.
pub fn as_daily(dates: &[NaiveDate], values: &[Option<f64>]) -> Result<DailySeries> {
    if dates.len() != values.len() {
        return Err(ForecastError::InvalidInput(
            "Dates and values must have the same length".to_string(),
        ));
    }

    let mut pairs: Vec<(NaiveDate, Option<f64>)> =
        dates.iter().copied().zip(values.iter().copied()).collect();
    pairs.sort_by_key(|(d, _)| *d);

    let mut out = DailySeries {
        dates: Vec::with_capacity(pairs.len()),
        values: Vec::with_capacity(pairs.len()),
    };

    let mut inserted = 0usize;
    for (date, value) in pairs {
        if let Some(&prev) = out.dates.last() {
            if date == prev {
                return Err(ForecastError::InvalidInput(format!(
                    "Duplicate observation for {}",
                    date
                )));
            }
            let mut day = prev;
            while let Some(next) = day.checked_add_days(Days::new(1)) {
                if next >= date {
                    break;
                }
                out.dates.push(next);
                out.values.push(None);
                inserted += 1;
                day = next;
            }
        }
        out.dates.push(date);
        out.values.push(value);
    }

    if inserted > 0 {
        warn!("inserted {} missing days into daily series", inserted);
    }

    Ok(out)
}

/// Check that `dates` are sorted, unique and exactly one day apart.
pub fn check_daily(dates: &[NaiveDate]) -> Result<()> {
    for (i, w) in dates.windows(2).enumerate() {
        let step = (w[1] - w[0]).num_days();
        if step != 1 {
            return Err(ForecastError::InvalidFrequency(format!(
                "expected consecutive days, found {} -> {} at position {}",
                w[0],
                w[1],
                i + 1
            )));
        }
    }
    Ok(())
}

/// Detect the most common spacing between observations, in days.
pub fn detect_frequency(dates: &[NaiveDate]) -> Result<i64> {
    if dates.len() < 2 {
        return Err(ForecastError::InsufficientData {
            needed: 2,
            got: dates.len(),
        });
    }

    let mut sorted = dates.to_vec();
    sorted.sort();

    let mut counts: HashMap<i64, usize> = HashMap::new();
    for w in sorted.windows(2) {
        let d = (w[1] - w[0]).num_days();
        if d > 0 {
            *counts.entry(d).or_insert(0) += 1;
        }
    }

    // Ties go to the shorter spacing
    counts
        .into_iter()
        .max_by(|(da, ca), (db, cb)| ca.cmp(cb).then(db.cmp(da)))
        .map(|(diff, _)| diff)
        .ok_or_else(|| ForecastError::InvalidFrequency("all dates are identical".to_string()))
}

/// The `horizon` calendar days following `last`.
pub fn forecast_dates(last: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    (1..=horizon as u64)
        .map_while(|k| last.checked_add_days(Days::new(k)))
        .collect()
}
