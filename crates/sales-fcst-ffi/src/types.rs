//! C-compatible type definitions for the FFI boundary.

use libc::{c_char, c_double, c_int, size_t};
use sales_fcst_core::{AlphaSelection, ForecastError, ForecastOptions, OptimizerOptions};
use std::ptr;

use crate::conversion::to_option_usize;

/// Error codes for FFI boundary.
///
/// Values 2-8 match `ForecastError::to_code`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    NullPointer = 1,
    EmptySeries = 2,
    InvalidParameter = 3,
    InvalidHorizon = 4,
    InvalidData = 5,
    InvalidInput = 6,
    InsufficientData = 7,
    InvalidFrequency = 8,
    PanicCaught = 9,
    AllocationError = 10,
}

impl From<&ForecastError> for ErrorCode {
    fn from(err: &ForecastError) -> Self {
        match err {
            ForecastError::EmptySeries => ErrorCode::EmptySeries,
            ForecastError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            ForecastError::InvalidHorizon(_) => ErrorCode::InvalidHorizon,
            ForecastError::InvalidData { .. } => ErrorCode::InvalidData,
            ForecastError::InvalidInput(_) => ErrorCode::InvalidInput,
            ForecastError::InsufficientData { .. } => ErrorCode::InsufficientData,
            ForecastError::InvalidFrequency(_) => ErrorCode::InvalidFrequency,
        }
    }
}

/// Error structure with message buffer for FFI.
#[repr(C)]
pub struct FcstError {
    pub code: ErrorCode,
    pub message: [c_char; 256],
}

impl FcstError {
    /// Create a success error (no error).
    pub fn success() -> Self {
        Self {
            code: ErrorCode::Success,
            message: [0; 256],
        }
    }

    /// Set an error with code and message.
    pub fn set_error(&mut self, code: ErrorCode, msg: &str) {
        self.code = code;
        let bytes = msg.as_bytes();
        let len = bytes.len().min(255);
        for (dst, &b) in self.message.iter_mut().zip(&bytes[..len]) {
            *dst = b as c_char;
        }
        self.message[len] = 0; // Null terminator
    }

    /// Message as a Rust string, up to the terminator.
    pub fn message(&self) -> String {
        self.message
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| c as u8 as char)
            .collect()
    }
}

impl Default for FcstError {
    fn default() -> Self {
        Self::success()
    }
}

/// SES forecast options.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SesOptions {
    /// Smoothing parameter, ignored when `optimize_alpha` is set
    pub alpha: c_double,
    /// Estimate alpha by minimising in-sample SSE
    pub optimize_alpha: bool,
    /// Forecast horizon (must be >= 1)
    pub horizon: c_int,
    /// Prediction interval coverage (0-1)
    pub confidence_level: c_double,
    /// Return smoothed levels
    pub include_fitted: bool,
    /// Return one-step-ahead residuals
    pub include_residuals: bool,
}

impl Default for SesOptions {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            optimize_alpha: false,
            horizon: 1,
            confidence_level: 0.95,
            include_fitted: false,
            include_residuals: false,
        }
    }
}

impl From<&SesOptions> for ForecastOptions {
    fn from(opts: &SesOptions) -> Self {
        let alpha = if opts.optimize_alpha {
            AlphaSelection::Optimized(OptimizerOptions::default())
        } else {
            AlphaSelection::Fixed(opts.alpha)
        };

        Self {
            alpha,
            // Non-positive horizons become 0 and fail validation in the core
            horizon: to_option_usize(opts.horizon).unwrap_or(0),
            confidence_level: opts.confidence_level,
            include_fitted: opts.include_fitted,
            include_residuals: opts.include_residuals,
        }
    }
}

/// SES forecast result. Arrays are malloc'd; release with
/// `sales_fcst_free_result`.
#[repr(C)]
pub struct SesResult {
    /// Point forecasts
    pub point_forecasts: *mut c_double,
    /// Lower prediction bounds
    pub lower_bounds: *mut c_double,
    /// Upper prediction bounds
    pub upper_bounds: *mut c_double,
    /// Number of forecast steps
    pub n_forecasts: size_t,
    /// Smoothed levels (NULL unless requested)
    pub fitted_values: *mut c_double,
    /// One-step-ahead residuals (NULL unless requested)
    pub residuals: *mut c_double,
    /// Length of fitted_values and residuals
    pub n_fitted: size_t,
    /// Alpha used for the fit
    pub alpha: c_double,
    /// Final level
    pub level: c_double,
    /// In-sample one-step-ahead MSE
    pub mse: c_double,
}

impl Default for SesResult {
    fn default() -> Self {
        Self {
            point_forecasts: ptr::null_mut(),
            lower_bounds: ptr::null_mut(),
            upper_bounds: ptr::null_mut(),
            n_forecasts: 0,
            fitted_values: ptr::null_mut(),
            residuals: ptr::null_mut(),
            n_fitted: 0,
            alpha: f64::NAN,
            level: f64::NAN,
            mse: f64::NAN,
        }
    }
}
