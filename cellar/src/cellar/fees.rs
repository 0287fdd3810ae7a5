use soroban_sdk::{log, token, Env};

use crate::cellar::conversion::{active_assets, assets_to_shares, preview_redeem, to_internal};
use crate::cellar::math::{mul_div_ceil, mul_div_floor};
use crate::cellar::position::ensure_liquidity;
use crate::cellar::shares;
use crate::constants::{SCALAR_18, SCALAR_7, SECONDS_PER_YEAR};
use crate::dependencies::LendingPoolClient;
use crate::events::CellarEvents;
use crate::storage;

/// Mint the platform fee owed on active assets since the last accrual
///
/// Returns the fee shares minted to the vault
pub fn accrue_platform_fees(e: &Env) -> i128 {
    let mut fee_data = storage::get_fee_data(e);
    let now = e.ledger().timestamp();
    if now <= fee_data.last_platform_accrual_time {
        return 0;
    }
    let elapsed = now - fee_data.last_platform_accrual_time;
    fee_data.last_platform_accrual_time = now;

    let config = storage::get_fee_config(e);
    let active = to_internal(e, active_assets(e));
    let fee_assets = mul_div_floor(
        e,
        active,
        config.platform_fee * elapsed as i128,
        SCALAR_7 * SECONDS_PER_YEAR as i128,
    );
    let fee_shares = assets_to_shares(e, fee_assets);
    if fee_shares > 0 {
        shares::mint(e, &e.current_contract_address(), fee_shares);
        fee_data.accrued_platform_fees += fee_shares;
        CellarEvents::accrue_platform_fees(e, fee_shares, elapsed);
    }
    storage::set_fee_data(e, &fee_data);
    fee_shares
}

/// Settle the performance fee against the lending income index recorded at
/// the last baseline
///
/// Yield mints fee shares to the vault. A drop in the index burns accrued
/// performance fee shares to cover `performance_fee` of the loss, never more
/// than are held. Without a baseline nothing is settled. The baseline itself
/// is left untouched, see `update_performance_baseline`.
///
/// Returns the signed change in performance fee shares
pub fn settle_performance_fees(e: &Env) -> i128 {
    let mut fee_data = storage::get_fee_data(e);
    if fee_data.last_normalized_income == 0 || fee_data.last_active_assets == 0 {
        return 0;
    }
    let asset = storage::get_asset(e);
    let current_income =
        LendingPoolClient::new(e, &storage::get_lending_pool(e)).normalized_income(&asset);
    let performance_index = mul_div_floor(e, current_income, SCALAR_18, fee_data.last_normalized_income);
    let updated_active = mul_div_ceil(e, fee_data.last_active_assets, performance_index, SCALAR_18);
    let performance_fee = storage::get_fee_config(e).performance_fee;

    let delta = if updated_active >= fee_data.last_active_assets {
        let gain = updated_active - fee_data.last_active_assets;
        let fee_shares = assets_to_shares(e, mul_div_floor(e, gain, performance_fee, SCALAR_7));
        if fee_shares > 0 {
            shares::mint(e, &e.current_contract_address(), fee_shares);
            fee_data.accrued_performance_fees += fee_shares;
            CellarEvents::accrue_performance_fees(e, fee_shares, gain);
        }
        fee_shares
    } else {
        let loss = fee_data.last_active_assets - updated_active;
        let insurance = assets_to_shares(e, mul_div_floor(e, loss, performance_fee, SCALAR_7));
        let burned = insurance.min(fee_data.accrued_performance_fees);
        if burned > 0 {
            shares::burn(e, &e.current_contract_address(), burned);
            fee_data.accrued_performance_fees -= burned;
            CellarEvents::burn_performance_fees(e, burned, loss);
        }
        log!(e, "performance loss", loss, insurance, burned);
        -burned
    };
    storage::set_fee_data(e, &fee_data);
    delta
}

/// Record the current lending position and income index as the baseline
/// the next settlement is measured against
pub fn update_performance_baseline(e: &Env) {
    let mut fee_data = storage::get_fee_data(e);
    let asset = storage::get_asset(e);
    fee_data.last_normalized_income =
        LendingPoolClient::new(e, &storage::get_lending_pool(e)).normalized_income(&asset);
    fee_data.last_active_assets = to_internal(e, active_assets(e));
    storage::set_fee_data(e, &fee_data);
}

/// Settle the performance fee and move the baseline to the current
/// position. Run before assets leave the lending position so the yield they
/// carry is charged in full.
pub fn settle_and_rebase(e: &Env) {
    settle_performance_fees(e);
    update_performance_baseline(e);
}

pub fn execute_accrue_fees(e: &Env) {
    accrue_platform_fees(e);
    settle_performance_fees(e);
    update_performance_baseline(e);
}

/// Accrue, then pay every fee share held by the vault to the distributor
///
/// Returns the assets paid, in native decimals
pub fn execute_collect_fees(e: &Env) -> i128 {
    execute_accrue_fees(e);

    let mut fee_data = storage::get_fee_data(e);
    let fee_shares = fee_data.accrued_platform_fees + fee_data.accrued_performance_fees;
    if fee_shares == 0 {
        return 0;
    }
    let assets = preview_redeem(e, fee_shares);
    shares::burn(e, &e.current_contract_address(), fee_shares);

    let distributor = storage::get_fee_config(e).distributor;
    if assets > 0 {
        ensure_liquidity(e, assets);
        token::Client::new(e, &storage::get_asset(e)).transfer(
            &e.current_contract_address(),
            &distributor,
            &assets,
        );
    }

    // re-read, the liquidity pull may have moved the baseline
    let platform_fees = fee_data.accrued_platform_fees;
    let performance_fees = fee_data.accrued_performance_fees;
    fee_data = storage::get_fee_data(e);
    fee_data.accrued_platform_fees = 0;
    fee_data.accrued_performance_fees = 0;
    storage::set_fee_data(e, &fee_data);

    CellarEvents::collect_fees(e, distributor, platform_fees, performance_fees, assets);
    assets
}
