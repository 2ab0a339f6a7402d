//! Small random helpers over the OS entropy source.
//!
//! Random outputs are flagged `Volatility::Random`; they must still be total,
//! so an unavailable entropy source degrades to zeros instead of failing.

use tracing::warn;

/// Next random 64-bit value
pub fn next_u64() -> u64 {
    let mut buf = [0u8; 8];
    if let Err(err) = getrandom::fill(&mut buf) {
        warn!(%err, "entropy source unavailable");
        return 0;
    }
    u64::from_le_bytes(buf)
}

/// Uniform value in `0..bound` without modulo bias. Returns 0 for a zero bound.
pub fn below(bound: u64) -> u64 {
    if bound == 0 {
        return 0;
    }
    let zone = u64::MAX - (u64::MAX % bound);
    loop {
        let r = next_u64();
        if r < zone {
            return r % bound;
        }
    }
}

/// Uniform integer in `low..=high`; the bounds may be given in either order.
pub fn between(low: i64, high: i64) -> i64 {
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    let span = high.abs_diff(low);
    if span == u64::MAX {
        return next_u64() as i64;
    }
    low.wrapping_add(below(span + 1) as i64)
}

/// Uniform float in `[0, 1)`
pub fn unit_f64() -> f64 {
    (next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_stays_in_range() {
        for _ in 0..200 {
            assert!(below(6) < 6);
        }
        assert_eq!(below(0), 0);
        assert_eq!(below(1), 0);
    }

    #[test]
    fn test_between_accepts_swapped_bounds() {
        for _ in 0..200 {
            let n = between(10, -5);
            assert!((-5..=10).contains(&n));
        }
        assert_eq!(between(3, 3), 3);
    }

    #[test]
    fn test_unit_f64() {
        for _ in 0..200 {
            let x = unit_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }
}
