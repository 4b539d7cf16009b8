//! FFI boundary layer for the sales forecasting core.
//!
//! This crate provides C-compatible functions so host applications can fit
//! simple exponential smoothing without linking Rust directly. Every entry
//! point reports failures through an `FcstError` out-parameter and returns
//! `false`; panics never cross the boundary.

pub mod allocation;
pub mod conversion;
pub mod error_handling;
pub mod types;

use libc::{c_double, c_int, size_t};
use sales_fcst_core::{forecast, require_complete, smooth, ForecastOptions, ForecastOutput};
use std::ptr;

use crate::allocation::{alloc_and_copy_array, free_array};
use crate::conversion::{build_series, to_option_usize};
use crate::error_handling::{check_null_pointers, ffi_try, init_error};
pub use types::*;

// ============================================================================
// Forecasting
// ============================================================================

/// Fit SES to a series and forecast `options.horizon` steps.
///
/// NULL entries (validity bit 0) are rejected: gaps must be filled before
/// calling. On success the arrays in `out_result` are owned by the caller
/// and must be released with `sales_fcst_free_result`.
///
/// # Safety
/// `values` must point to `length` doubles, `validity` must be null or
/// point to `ceil(length / 64)` words. `options` and `out_result` must be
/// valid, non-null pointers; `out_error` may be null.
#[no_mangle]
pub unsafe extern "C" fn sales_fcst_ses_forecast(
    values: *const c_double,
    validity: *const u64,
    length: size_t,
    options: *const SesOptions,
    out_result: *mut SesResult,
    out_error: *mut FcstError,
) -> bool {
    init_error(out_error);

    if check_null_pointers(
        out_error,
        &[
            values as *const core::ffi::c_void,
            options as *const core::ffi::c_void,
            out_result as *const core::ffi::c_void,
        ],
    ) {
        return false;
    }

    *out_result = SesResult::default();

    let output = ffi_try(out_error, || {
        let series = require_complete(&build_series(values, validity, length))?;
        forecast(&series, &ForecastOptions::from(&*options))
    });

    match output {
        Some(output) => write_result(&output, out_result, out_error),
        None => false,
    }
}

/// Smooth a series and write its levels and flat forecast into caller
/// buffers.
///
/// `out_fitted` receives `length` levels, `out_forecast` receives
/// `horizon` forecast values.
///
/// # Safety
/// `values` and `out_fitted` must point to `length` doubles, `out_forecast`
/// to at least `horizon` doubles. `out_error` may be null.
#[no_mangle]
pub unsafe extern "C" fn sales_fcst_ses_smooth(
    values: *const c_double,
    length: size_t,
    alpha: c_double,
    horizon: c_int,
    out_fitted: *mut c_double,
    out_forecast: *mut c_double,
    out_error: *mut FcstError,
) -> bool {
    init_error(out_error);

    if check_null_pointers(
        out_error,
        &[
            values as *const core::ffi::c_void,
            out_fitted as *const core::ffi::c_void,
            out_forecast as *const core::ffi::c_void,
        ],
    ) {
        return false;
    }

    let output = ffi_try(out_error, || {
        let series = if length == 0 {
            &[][..]
        } else {
            std::slice::from_raw_parts(values, length)
        };
        smooth(series, alpha, Some(to_option_usize(horizon).unwrap_or(0)))
    });

    match output {
        Some(output) => {
            ptr::copy_nonoverlapping(output.fitted.as_ptr(), out_fitted, output.fitted.len());
            ptr::copy_nonoverlapping(
                output.forecast.as_ptr(),
                out_forecast,
                output.forecast.len(),
            );
            true
        }
        None => false,
    }
}

/// Copy a core forecast into malloc'd arrays on `out_result`.
unsafe fn write_result(
    output: &ForecastOutput,
    out_result: *mut SesResult,
    out_error: *mut FcstError,
) -> bool {
    let r = &mut *out_result;
    r.n_forecasts = output.point.len();
    r.alpha = output.alpha;
    r.level = output.level;
    r.mse = output.mse;

    let fitted = output.fitted.as_deref().unwrap_or(&[]);
    let residuals = output.residuals.as_deref().unwrap_or(&[]);
    r.n_fitted = fitted.len().max(residuals.len());

    let ok = alloc_and_copy_array(&output.point, &mut r.point_forecasts, out_error)
        && alloc_and_copy_array(&output.lower, &mut r.lower_bounds, out_error)
        && alloc_and_copy_array(&output.upper, &mut r.upper_bounds, out_error)
        && alloc_and_copy_array(fitted, &mut r.fitted_values, out_error)
        && alloc_and_copy_array(residuals, &mut r.residuals, out_error);

    if !ok {
        sales_fcst_free_result(out_result);
    }
    ok
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free the arrays of a `SesResult`.
///
/// Safe to call more than once; freed pointers are reset to NULL.
///
/// # Safety
/// `result` must be null or point to a `SesResult` filled by
/// `sales_fcst_ses_forecast`.
#[no_mangle]
pub unsafe extern "C" fn sales_fcst_free_result(result: *mut SesResult) {
    if result.is_null() {
        return;
    }
    let r = &mut *result;

    free_array(&mut r.point_forecasts);
    free_array(&mut r.lower_bounds);
    free_array(&mut r.upper_bounds);
    free_array(&mut r.fitted_values);
    free_array(&mut r.residuals);
    r.n_forecasts = 0;
    r.n_fitted = 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALES: [f64; 5] = [10.0, 12.0, 11.0, 15.0, 14.0];

    #[test]
    fn test_forecast_success() {
        let opts = SesOptions {
            horizon: 3,
            include_fitted: true,
            ..Default::default()
        };
        let mut result = SesResult::default();
        let mut error = FcstError::default();

        let ok = unsafe {
            sales_fcst_ses_forecast(
                SALES.as_ptr(),
                ptr::null(),
                SALES.len(),
                &opts,
                &mut result,
                &mut error,
            )
        };

        assert!(ok, "{}", error.message());
        assert_eq!(error.code, ErrorCode::Success);
        assert_eq!(result.n_forecasts, 3);
        assert_eq!(result.n_fitted, 5);
        assert!(result.residuals.is_null());
        let point = unsafe { std::slice::from_raw_parts(result.point_forecasts, 3) };
        assert!((point[0] - 11.9328).abs() < 1e-12);

        unsafe { sales_fcst_free_result(&mut result) };
        assert!(result.point_forecasts.is_null());
        assert!(result.fitted_values.is_null());
    }

    #[test]
    fn test_forecast_rejects_nulls_in_series() {
        let validity = [0b11011u64];
        let mut result = SesResult::default();
        let mut error = FcstError::default();

        let ok = unsafe {
            sales_fcst_ses_forecast(
                SALES.as_ptr(),
                validity.as_ptr(),
                SALES.len(),
                &SesOptions::default(),
                &mut result,
                &mut error,
            )
        };

        assert!(!ok);
        assert_eq!(error.code, ErrorCode::InvalidData);
        assert!(result.point_forecasts.is_null());
    }

    #[test]
    fn test_forecast_error_codes() {
        let cases = [
            (
                SesOptions {
                    alpha: 0.0,
                    ..Default::default()
                },
                ErrorCode::InvalidParameter,
            ),
            (
                SesOptions {
                    horizon: 0,
                    ..Default::default()
                },
                ErrorCode::InvalidHorizon,
            ),
        ];

        for (opts, code) in cases {
            let mut result = SesResult::default();
            let mut error = FcstError::default();
            let ok = unsafe {
                sales_fcst_ses_forecast(
                    SALES.as_ptr(),
                    ptr::null(),
                    SALES.len(),
                    &opts,
                    &mut result,
                    &mut error,
                )
            };
            assert!(!ok);
            assert_eq!(error.code, code);
        }
    }

    #[test]
    fn test_null_pointers() {
        let mut result = SesResult::default();
        let mut error = FcstError::default();
        let ok = unsafe {
            sales_fcst_ses_forecast(
                ptr::null(),
                ptr::null(),
                0,
                &SesOptions::default(),
                &mut result,
                &mut error,
            )
        };
        assert!(!ok);
        assert_eq!(error.code, ErrorCode::NullPointer);
    }

    #[test]
    fn test_smooth_into_buffers() {
        let mut fitted = [0.0f64; 5];
        let mut fcst = [0.0f64; 2];
        let mut error = FcstError::default();

        let ok = unsafe {
            sales_fcst_ses_smooth(
                SALES.as_ptr(),
                SALES.len(),
                0.2,
                2,
                fitted.as_mut_ptr(),
                fcst.as_mut_ptr(),
                &mut error,
            )
        };

        assert!(ok);
        assert_eq!(fitted[0], 10.0);
        assert!((fitted[4] - 11.9328).abs() < 1e-12);
        assert_eq!(fcst[0], fcst[1]);
        assert_eq!(fcst[0], fitted[4]);
    }

    #[test]
    fn test_smooth_empty_series() {
        let mut fitted = [0.0f64; 1];
        let mut fcst = [0.0f64; 1];
        let mut error = FcstError::default();

        let ok = unsafe {
            sales_fcst_ses_smooth(
                SALES.as_ptr(),
                0,
                0.2,
                1,
                fitted.as_mut_ptr(),
                fcst.as_mut_ptr(),
                &mut error,
            )
        };

        assert!(!ok);
        assert_eq!(error.code, ErrorCode::EmptySeries);
    }

    #[test]
    fn test_free_null_result() {
        unsafe { sales_fcst_free_result(ptr::null_mut()) };
    }
}
