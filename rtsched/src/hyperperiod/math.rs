/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Integer helpers behind the hyperperiod: GCD and checked LCM.
//!
//! Free functions so the arithmetic can be tested without building tasks.

use super::HyperperiodError;

/// Euclidean GCD, iterative.  `gcd(0, n) == n`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `lcm(a, b) = a / gcd(a, b) * b`, dividing first and checking the
/// multiplication.
///
/// Both operands must be non-zero; a zero operand is reported as
/// [`HyperperiodError::ZeroPeriod`] with index `0` (callers that know the
/// real position use [`lcm_of_periods`]).
pub fn lcm(a: u64, b: u64) -> Result<u64, HyperperiodError> {
    if a == 0 || b == 0 {
        return Err(HyperperiodError::ZeroPeriod { index: 0 });
    }
    (a / gcd(a, b))
        .checked_mul(b)
        .ok_or(HyperperiodError::Overflow { a, b })
}

/// Fold `periods` left to right into their least common multiple.
///
/// # Errors
/// * [`HyperperiodError::NoPeriods`] for an empty slice.
/// * [`HyperperiodError::ZeroPeriod`] naming the first zero entry.
/// * [`HyperperiodError::Overflow`] on the first pair whose LCM exceeds `u64`.
pub fn lcm_of_periods(periods: &[u64]) -> Result<u64, HyperperiodError> {
    let (&first, rest) = periods.split_first().ok_or(HyperperiodError::NoPeriods)?;

    if let Some(index) = periods.iter().position(|&p| p == 0) {
        return Err(HyperperiodError::ZeroPeriod { index });
    }

    rest.iter().try_fold(first, |acc, &p| lcm(acc, p))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
