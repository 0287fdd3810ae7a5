use soroban_sdk::{log, panic_with_error, token, Address, Env, Vec};

use crate::cellar::conversion::{active_assets, inactive_assets};
use crate::cellar::fees::{accrue_platform_fees, settle_performance_fees, update_performance_baseline};
use crate::cellar::position::{deposit_to_lending, swap_exact_in, vault_balance, withdraw_from_lending};
use crate::errors::CellarError;
use crate::events::CellarEvents;
use crate::storage;

fn require_not_shutdown(e: &Env) {
    if storage::get_shutdown(e) {
        panic_with_error!(e, CellarError::Shutdown);
    }
}

/// Validate a swap path and return its `(first, last)` assets
fn path_ends(e: &Env, path: &Vec<Address>) -> (Address, Address) {
    if path.len() < 2 {
        panic_with_error!(e, CellarError::InvalidSwapPath);
    }
    (path.first_unchecked(), path.last_unchecked())
}

/// Move every idle asset into the lending position and make every existing
/// deposit record active
///
/// Returns the assets deposited into the lending position
pub fn execute_enter_strategy(e: &Env) -> i128 {
    require_not_shutdown(e);

    accrue_platform_fees(e);
    settle_performance_fees(e);

    let idle = inactive_assets(e);
    deposit_to_lending(e, idle);
    let now = e.ledger().timestamp();
    storage::set_last_time_entered_strategy(e, now);
    update_performance_baseline(e);

    CellarEvents::enter_strategy(e, storage::get_asset(e), idle, now);
    idle
}

/// Move the whole vault into the last asset of `path`
///
/// Fees are settled against the old asset's income index before the swap.
/// The performance baseline is only re-established once the proceeds are
/// back in the lending position.
///
/// Returns the amount of the new asset received
pub fn execute_rebalance(e: &Env, path: &Vec<Address>, min_amount_out: i128) -> i128 {
    require_not_shutdown(e);
    let old_asset = storage::get_asset(e);
    let (first, new_asset) = path_ends(e, path);
    if first != old_asset {
        panic_with_error!(e, CellarError::InvalidSwapPath);
    }
    if new_asset == old_asset {
        panic_with_error!(e, CellarError::SameAsset);
    }
    // deposits from this timestamp would stay inactive with principal in the old asset
    let now = e.ledger().timestamp();
    if storage::get_last_deposit_time(e).is_some_and(|last| last >= now) {
        panic_with_error!(e, CellarError::DepositsPending);
    }

    accrue_platform_fees(e);
    settle_performance_fees(e);

    withdraw_from_lending(e, active_assets(e));
    let amount_in = vault_balance(e, &old_asset);
    let amount_out = if amount_in > 0 {
        swap_exact_in(e, path, amount_in, min_amount_out)
    } else {
        0
    };

    let decimals = token::Client::new(e, &new_asset).decimals();
    storage::set_asset(e, &new_asset, decimals);
    deposit_to_lending(e, inactive_assets(e));
    storage::set_last_time_entered_strategy(e, now);
    update_performance_baseline(e);

    CellarEvents::rebalance(e, old_asset, new_asset, amount_in, amount_out);
    amount_out
}

/// Swap the vault's whole balance of `path[0]` into the current asset and
/// add it to the lending position. Deposit records keep their
/// classification.
///
/// Returns the amount of the current asset added
pub fn execute_reinvest(e: &Env, path: &Vec<Address>, min_amount_out: i128) -> i128 {
    require_not_shutdown(e);
    let asset = storage::get_asset(e);
    let (token_in, last) = path_ends(e, path);
    if token_in == asset {
        panic_with_error!(e, CellarError::SameAsset);
    }
    if last != asset {
        panic_with_error!(e, CellarError::InvalidSwapPath);
    }
    let amount_in = vault_balance(e, &token_in);
    if amount_in <= 0 {
        panic_with_error!(e, CellarError::ZeroAssets);
    }

    accrue_platform_fees(e);
    settle_performance_fees(e);

    let amount_out = swap_exact_in(e, path, amount_in, min_amount_out);
    deposit_to_lending(e, amount_out);
    update_performance_baseline(e);

    CellarEvents::reinvest(e, token_in, amount_in, amount_out);
    amount_out
}

pub fn execute_set_pause(e: &Env, paused: bool) {
    require_not_shutdown(e);
    storage::set_paused(e, paused);
    CellarEvents::set_pause(e, paused);
}

/// Permanently stop the vault and bring the whole lending position back
/// to idle
///
/// Returns the assets withdrawn from the lending position
pub fn execute_shutdown(e: &Env) -> i128 {
    if storage::get_shutdown(e) {
        panic_with_error!(e, CellarError::AlreadyShutdown);
    }

    accrue_platform_fees(e);
    settle_performance_fees(e);

    let withdrawn = withdraw_from_lending(e, active_assets(e));
    update_performance_baseline(e);
    storage::set_shutdown(e);
    storage::set_paused(e, false);
    log!(e, "cellar shut down", withdrawn);

    CellarEvents::shutdown(e, withdrawn);
    withdrawn
}

/// Send the vault's whole balance of a stray `token` to `to`
///
/// Returns the amount swept
pub fn execute_sweep(e: &Env, token: &Address, to: &Address) -> i128 {
    if *token == storage::get_asset(e) || *token == e.current_contract_address() {
        panic_with_error!(e, CellarError::ProtectedAsset);
    }
    let amount = vault_balance(e, token);
    if amount > 0 {
        token::Client::new(e, token).transfer(&e.current_contract_address(), to, &amount);
    }
    CellarEvents::sweep(e, token.clone(), to.clone(), amount);
    amount
}
