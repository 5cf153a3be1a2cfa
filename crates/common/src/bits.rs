//! Branch-free integer bit math.

/// Number of set bits.
#[inline]
pub const fn popcount(x: u64) -> u32 {
    x.count_ones()
}

/// Bits needed to represent `x`; `0` for `0`.
#[inline]
pub const fn bit_width(x: u64) -> u32 {
    u64::BITS - x.leading_zeros()
}

#[inline]
pub const fn is_pow2(x: u64) -> bool {
    (x != 0) & (x & x.wrapping_sub(1) == 0)
}

/// Smallest power of two `>= x`. `0` and `1` map to `1`; values above `2^63` saturate
/// to `2^63`.
#[inline]
pub const fn next_pow2(x: u64) -> u64 {
    let width = bit_width(x.saturating_sub(1));
    let shift = if width > 63 { 63 } else { width };
    1u64 << shift
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popcount_and_width() {
        assert_eq!(popcount(0), 0);
        assert_eq!(popcount(0b1011), 3);
        assert_eq!(popcount(u64::MAX), 64);
        assert_eq!(bit_width(0), 0);
        assert_eq!(bit_width(1), 1);
        assert_eq!(bit_width(255), 8);
        assert_eq!(bit_width(256), 9);
        assert_eq!(bit_width(u64::MAX), 64);
    }

    #[test]
    fn powers_of_two() {
        assert!(!is_pow2(0));
        assert!(is_pow2(1));
        assert!(is_pow2(1 << 40));
        assert!(!is_pow2(6));

        assert_eq!(next_pow2(0), 1);
        assert_eq!(next_pow2(1), 1);
        assert_eq!(next_pow2(5), 8);
        assert_eq!(next_pow2(64), 64);
        assert_eq!(next_pow2((1 << 63) + 1), 1 << 63);
        assert_eq!(next_pow2(u64::MAX), 1 << 63);
    }
}
