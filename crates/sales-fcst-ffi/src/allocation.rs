//! Memory allocation utilities for FFI functions.
//!
//! Arrays handed to C are allocated with `malloc` so the caller may release
//! them with `free` or through `sales_fcst_free_result`.

use crate::types::{ErrorCode, FcstError};
use libc::{free, malloc};
use std::ptr;

/// Allocate and copy an array, setting error on failure.
///
/// Empty input stores a null pointer and succeeds.
///
/// # Safety
/// out_ptr must be a valid pointer; out_error must be valid if non-null.
/// Returns true on success, false on allocation failure.
pub unsafe fn alloc_and_copy_array<T: Copy>(
    items: &[T],
    out_ptr: *mut *mut T,
    out_error: *mut FcstError,
) -> bool {
    if items.is_empty() {
        *out_ptr = ptr::null_mut();
        return true;
    }

    let p = malloc(std::mem::size_of_val(items)) as *mut T;
    if p.is_null() {
        if !out_error.is_null() {
            (*out_error).set_error(ErrorCode::AllocationError, "Memory allocation failed");
        }
        return false;
    }

    ptr::copy_nonoverlapping(items.as_ptr(), p, items.len());
    *out_ptr = p;
    true
}

/// Free a malloc'd array and null the pointer.
///
/// # Safety
/// `*slot` must be null or a pointer returned by `alloc_and_copy_array`.
pub unsafe fn free_array<T>(slot: &mut *mut T) {
    if !slot.is_null() {
        free(*slot as *mut core::ffi::c_void);
        *slot = ptr::null_mut();
    }
}
