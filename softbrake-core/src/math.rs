//! Numeric helpers

/// Clamp `value` into `[low, high]`
///
/// Works for any partially ordered type, including floats. A NaN `value`
/// is returned unchanged, so float callers that can see NaN must handle
/// it themselves.
#[inline]
pub fn clamp<T: PartialOrd>(value: T, low: T, high: T) -> T {
    if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}
