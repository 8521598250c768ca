//! Integer bit-width arithmetic.
//!
//! Field widths are derived with integer bit-length math only. Floating-point
//! `log2` drifts at power-of-two boundaries for large sizes, so it is never used.

/// Returns the number of bits needed to index `n` distinct values.
///
/// This is `ceil(log2(n))`, with `ceil_log2(0) == ceil_log2(1) == 0`.
///
/// # Examples
///
/// ```
/// use cachesim_core::common::ceil_log2;
///
/// assert_eq!(ceil_log2(1), 0);
/// assert_eq!(ceil_log2(8), 3);
/// assert_eq!(ceil_log2(9), 4);
/// ```
#[inline]
pub const fn ceil_log2(n: u64) -> u32 {
    if n <= 1 {
        0
    } else {
        u64::BITS - (n - 1).leading_zeros()
    }
}

/// Renders `value` as a zero-padded binary string exactly `width` digits wide.
///
/// A width of zero yields an empty string. Bits above `width` are dropped.
pub fn to_fixed_binary(value: u64, width: u32) -> String {
    if width == 0 {
        return String::new();
    }
    let masked = if width >= u64::BITS {
        value
    } else {
        value & ((1u64 << width) - 1)
    };
    format!("{:0width$b}", masked, width = width as usize)
}
