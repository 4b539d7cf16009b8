//! Parameter conversion utilities for FFI functions.

use core::ffi::{c_double, c_int};

/// Convert a `c_int` to `Option<usize>`, where values <= 0 become None.
#[inline]
pub fn to_option_usize(value: c_int) -> Option<usize> {
    if value > 0 {
        Some(value as usize)
    } else {
        None
    }
}

/// Build a series with NULL handling from raw pointers.
///
/// Bit `i % 64` of `validity[i / 64]` marks element `i` as valid; a NULL
/// bitmask means every element is valid.
///
/// # Safety
/// `data` must point to `length` doubles. `validity` must be null or point
/// to `length.div_ceil(64)` words.
pub unsafe fn build_series(
    data: *const c_double,
    validity: *const u64,
    length: usize,
) -> Vec<Option<f64>> {
    if length == 0 {
        return Vec::new();
    }
    let data_slice = std::slice::from_raw_parts(data, length);

    if validity.is_null() {
        return data_slice.iter().map(|&v| Some(v)).collect();
    }

    let validity_slice = std::slice::from_raw_parts(validity, length.div_ceil(64));
    data_slice
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let valid = (validity_slice[i / 64] >> (i % 64)) & 1 == 1;
            valid.then_some(v)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_option_usize() {
        assert_eq!(to_option_usize(5), Some(5));
        assert_eq!(to_option_usize(0), None);
        assert_eq!(to_option_usize(-1), None);
    }

    #[test]
    fn test_build_series_all_valid() {
        let data = [1.0, 2.0, 3.0];
        let series = unsafe { build_series(data.as_ptr(), std::ptr::null(), data.len()) };
        assert_eq!(series, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_build_series_with_validity() {
        let data: Vec<f64> = (0..70).map(|i| i as f64).collect();
        // element 1 and element 65 are NULL
        let validity = [!(1u64 << 1), !(1u64 << 1)];
        let series = unsafe { build_series(data.as_ptr(), validity.as_ptr(), data.len()) };

        assert_eq!(series.len(), 70);
        assert_eq!(series[0], Some(0.0));
        assert_eq!(series[1], None);
        assert_eq!(series[64], Some(64.0));
        assert_eq!(series[65], None);
        assert_eq!(series[69], Some(69.0));
    }

    #[test]
    fn test_build_series_empty() {
        let series = unsafe { build_series(std::ptr::null(), std::ptr::null(), 0) };
        assert!(series.is_empty());
    }
}
