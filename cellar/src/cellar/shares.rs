use soroban_sdk::{panic_with_error, Address, Env};

use crate::errors::CellarError;
use crate::events::CellarEvents;
use crate::storage;

/// Mint `shares` to `to` and grow the total supply
pub fn mint(e: &Env, to: &Address, shares: i128) {
    let balance = storage::get_balance(e, to);
    storage::set_balance(e, to, balance + shares);
    storage::set_total_shares(e, storage::get_total_shares(e) + shares);
}

/// Burn `shares` from `from` and shrink the total supply
///
/// ### Panics
/// If `from` holds fewer than `shares`
pub fn burn(e: &Env, from: &Address, shares: i128) {
    let balance = storage::get_balance(e, from);
    if balance < shares {
        panic_with_error!(e, CellarError::InsufficientShares);
    }
    storage::set_balance(e, from, balance - shares);
    storage::set_total_shares(e, storage::get_total_shares(e) - shares);
}

/// Move `shares` between two balances, total supply unchanged
pub fn move_balance(e: &Env, from: &Address, to: &Address, shares: i128) {
    let from_balance = storage::get_balance(e, from);
    if from_balance < shares {
        panic_with_error!(e, CellarError::InsufficientShares);
    }
    storage::set_balance(e, from, from_balance - shares);
    let to_balance = storage::get_balance(e, to);
    storage::set_balance(e, to, to_balance + shares);
}

/// Consume `amount` of the allowance `from` granted to `spender`
///
/// ### Panics
/// If the allowance is smaller than `amount`
pub fn spend_allowance(e: &Env, from: &Address, spender: &Address, amount: i128) {
    let allowance = storage::get_allowance(e, from, spender);
    if allowance < amount {
        panic_with_error!(e, CellarError::InsufficientAllowance);
    }
    storage::set_allowance(e, from, spender, allowance - amount);
}

pub fn execute_approve(e: &Env, from: &Address, spender: &Address, amount: i128) {
    if amount < 0 {
        panic_with_error!(e, CellarError::InvalidAmount);
    }
    storage::set_allowance(e, from, spender, amount);
    CellarEvents::approve(e, from.clone(), spender.clone(), amount);
}
