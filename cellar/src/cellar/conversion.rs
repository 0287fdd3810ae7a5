use soroban_sdk::{token, Address, Env};

use crate::cellar::math::{change_decimals, change_decimals_ceil, mul_div_ceil, mul_div_floor};
use crate::constants::{INTERNAL_DECIMALS, SCALAR_18, UNLIMITED};
use crate::dependencies::LendingPoolClient;
use crate::storage;

/// Assets held in the lending position, in the asset's native decimals
pub fn active_assets(e: &Env) -> i128 {
    let pool = storage::get_lending_pool(e);
    let asset = storage::get_asset(e);
    LendingPoolClient::new(e, &pool).receipt_balance(&e.current_contract_address(), &asset)
}

/// Idle assets held by the vault, in the asset's native decimals
pub fn inactive_assets(e: &Env) -> i128 {
    let asset = storage::get_asset(e);
    token::Client::new(e, &asset).balance(&e.current_contract_address())
}

/// Total managed assets in the asset's native decimals
pub fn total_assets(e: &Env) -> i128 {
    active_assets(e) + inactive_assets(e)
}

/// Total managed assets in 18 decimals
pub fn total_managed_assets(e: &Env) -> i128 {
    to_internal(e, total_assets(e))
}

/// Rescales a native asset amount to 18 decimals
pub fn to_internal(e: &Env, assets: i128) -> i128 {
    change_decimals(e, assets, storage::get_asset_decimals(e), INTERNAL_DECIMALS)
}

/// Rescales an 18 decimal asset amount to native decimals, rounding down
pub fn to_native(e: &Env, assets: i128) -> i128 {
    change_decimals(e, assets, INTERNAL_DECIMALS, storage::get_asset_decimals(e))
}

/// Converts normalized assets to shares, rounding down. An empty vault
/// converts 1:1.
pub fn assets_to_shares(e: &Env, assets: i128) -> i128 {
    let total_shares = storage::get_total_shares(e);
    if total_shares == 0 {
        return assets;
    }
    mul_div_floor(e, assets, total_shares, total_managed_assets(e))
}

/// Converts normalized assets to shares, rounding up
pub fn assets_to_shares_ceil(e: &Env, assets: i128) -> i128 {
    let total_shares = storage::get_total_shares(e);
    if total_shares == 0 {
        return assets;
    }
    mul_div_ceil(e, assets, total_shares, total_managed_assets(e))
}

/// Converts shares to normalized assets, rounding down
pub fn shares_to_assets(e: &Env, shares: i128) -> i128 {
    let total_shares = storage::get_total_shares(e);
    if total_shares == 0 {
        return shares;
    }
    mul_div_floor(e, shares, total_managed_assets(e), total_shares)
}

/// Converts shares to normalized assets, rounding up
pub fn shares_to_assets_ceil(e: &Env, shares: i128) -> i128 {
    let total_shares = storage::get_total_shares(e);
    if total_shares == 0 {
        return shares;
    }
    mul_div_ceil(e, shares, total_managed_assets(e), total_shares)
}

/// Normalized assets redeemable for one whole share
pub fn exchange_rate(e: &Env) -> i128 {
    shares_to_assets(e, SCALAR_18)
}

/// Shares minted for depositing `assets` native units
pub fn preview_deposit(e: &Env, assets: i128) -> i128 {
    assets_to_shares(e, to_internal(e, assets))
}

/// Native assets charged for minting `shares`
pub fn preview_mint(e: &Env, shares: i128) -> i128 {
    let assets = shares_to_assets_ceil(e, shares);
    change_decimals_ceil(e, assets, INTERNAL_DECIMALS, storage::get_asset_decimals(e))
}

/// Shares burned for withdrawing `assets` native units
pub fn preview_withdraw(e: &Env, assets: i128) -> i128 {
    assets_to_shares_ceil(e, to_internal(e, assets))
}

/// Native assets paid for redeeming `shares`
pub fn preview_redeem(e: &Env, shares: i128) -> i128 {
    to_native(e, shares_to_assets(e, shares))
}

/// Largest deposit `owner` can currently make, in native units
pub fn max_deposit(e: &Env, owner: &Address) -> i128 {
    if storage::get_paused(e) || storage::get_shutdown(e) {
        return 0;
    }
    let limits = storage::get_limits(e);
    if limits.deposit_limit == UNLIMITED {
        return UNLIMITED;
    }
    let owned = preview_redeem(e, storage::get_balance(e, owner));
    if limits.deposit_limit > owned {
        limits.deposit_limit - owned
    } else {
        0
    }
}
