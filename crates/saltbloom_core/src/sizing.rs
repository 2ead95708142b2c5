//! Parameter suggestions for an expected load.
use std::f64::consts::LN_2;

use crate::errors::{FilterError, Result};

/// `m = ceil(-n * ln(p) / ln(2)^2)`, at least 1.
pub fn optimal_bits(expected_items: u64, fpp: f64) -> Result<usize> {
    check_items(expected_items)?;
    if !(fpp > 0.0 && fpp < 1.0) {
        return Err(FilterError::InvalidConfig("fpp must be in (0, 1)"));
    }
    let bits = (-(expected_items as f64) * fpp.ln() / (LN_2 * LN_2)).ceil();
    Ok((bits as usize).max(1))
}

/// `k = ceil(m / n * ln(2))`, at least 1.
pub fn optimal_hash_count(expected_items: u64, bits: usize) -> Result<usize> {
    check_items(expected_items)?;
    // ceil so the suggestion never undershoots
    let k = (bits as f64 / expected_items as f64 * LN_2).ceil();
    Ok((k as usize).max(1))
}

fn check_items(n: u64) -> Result<()> {
    if n == 0 {
        return Err(FilterError::InvalidConfig("expected_items must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_percent_thousand_items() {
        let m = optimal_bits(1000, 0.01).unwrap();
        assert!(m > 9000 && m < 10000, "{m}");
        assert_eq!(optimal_hash_count(1000, m).unwrap(), 7);
    }

    #[test]
    fn tiny_inputs_clamp_to_one() {
        assert_eq!(optimal_hash_count(1_000_000, 1).unwrap(), 1);
        assert!(optimal_bits(1, 0.99).unwrap() >= 1);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(optimal_bits(0, 0.01).unwrap_err().is_config());
        assert!(optimal_bits(10, 0.0).is_err());
        assert!(optimal_bits(10, 1.0).is_err());
        assert!(optimal_bits(10, f64::NAN).is_err());
        assert!(optimal_hash_count(0, 100).is_err());
    }
}
