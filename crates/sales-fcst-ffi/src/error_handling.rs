//! Standardized error handling utilities for FFI functions.

use crate::types::{ErrorCode, FcstError};
use sales_fcst_core::ForecastError;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Initialize error output to success state.
///
/// # Safety
/// The error pointer must be valid if non-null.
#[inline]
pub unsafe fn init_error(out_error: *mut FcstError) {
    if !out_error.is_null() {
        *out_error = FcstError::success();
    }
}

/// Set an error on the output error pointer.
///
/// # Safety
/// The error pointer must be valid if non-null.
#[inline]
pub unsafe fn set_error(out_error: *mut FcstError, code: ErrorCode, message: &str) {
    if !out_error.is_null() {
        (*out_error).set_error(code, message);
    }
}

/// Check if any of the given pointers are null, and set an error if so.
///
/// # Safety
/// The error pointer must be valid if non-null.
#[inline]
pub unsafe fn check_null_pointers(
    out_error: *mut FcstError,
    ptrs: &[*const core::ffi::c_void],
) -> bool {
    if ptrs.iter().any(|p| p.is_null()) {
        set_error(out_error, ErrorCode::NullPointer, "Null pointer argument");
        return true;
    }
    false
}

/// Run `f`, translating core errors and panics into `out_error`.
///
/// # Safety
/// The error pointer must be valid if non-null.
///
/// # Returns
/// `Some(value)` on success, `None` on error
pub unsafe fn ffi_try<F, T>(out_error: *mut FcstError, f: F) -> Option<T>
where
    F: FnOnce() -> Result<T, ForecastError>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            set_error(out_error, ErrorCode::from(&e), &e.to_string());
            None
        }
        Err(_) => {
            set_error(out_error, ErrorCode::PanicCaught, "Panic in Rust code");
            None
        }
    }
}
