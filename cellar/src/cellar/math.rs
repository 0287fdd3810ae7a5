use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::{panic_with_error, Env};

use crate::errors::CellarError;

/// Computes `a * b / d` rounded toward zero
///
/// Intermediate products are widened to 256 bits, so only a result that
/// does not fit `i128` can fail.
///
/// ### Panics
/// If `d` is zero
pub fn mul_div_floor(e: &Env, a: i128, b: i128, d: i128) -> i128 {
    if d == 0 {
        panic_with_error!(e, CellarError::DivisionByZero);
    }
    a.fixed_mul_floor(e, &b, &d)
}

/// Computes `a * b / d` rounded away from zero
///
/// ### Panics
/// If `d` is zero
pub fn mul_div_ceil(e: &Env, a: i128, b: i128, d: i128) -> i128 {
    if d == 0 {
        panic_with_error!(e, CellarError::DivisionByZero);
    }
    a.fixed_mul_ceil(e, &b, &d)
}

fn pow10(e: &Env, exp: u32) -> i128 {
    10i128
        .checked_pow(exp)
        .unwrap_or_else(|| panic_with_error!(e, CellarError::MathOverflow))
}

/// Rescales `amount` from `from` decimals to `to` decimals, rounding down
/// when precision is dropped
pub fn change_decimals(e: &Env, amount: i128, from: u32, to: u32) -> i128 {
    if from == to {
        amount
    } else if from < to {
        amount
            .checked_mul(pow10(e, to - from))
            .unwrap_or_else(|| panic_with_error!(e, CellarError::MathOverflow))
    } else {
        amount / pow10(e, from - to)
    }
}

/// Rescales `amount` from `from` decimals to `to` decimals, rounding up
/// when precision is dropped
pub fn change_decimals_ceil(e: &Env, amount: i128, from: u32, to: u32) -> i128 {
    if from <= to {
        change_decimals(e, amount, from, to)
    } else {
        let unit = pow10(e, from - to);
        let floor = amount / unit;
        if amount % unit > 0 {
            floor + 1
        } else {
            floor
        }
    }
}
