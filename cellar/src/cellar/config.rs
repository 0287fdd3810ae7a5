use soroban_sdk::{panic_with_error, token, Address, Env, String};

use crate::constants::{MAX_PERFORMANCE_FEE, MAX_PLATFORM_FEE};
use crate::errors::CellarError;
use crate::events::CellarEvents;
use crate::storage;
use crate::types::{DepositLimits, FeeConfig, FeeData};

/// Collaborators the vault is wired to at deployment
pub struct Collaborators {
    pub asset: Address,
    pub lending_pool: Address,
    pub swap_router: Address,
}

pub fn execute_initialize(
    e: &Env,
    admin: &Address,
    name: &String,
    symbol: &String,
    collaborators: &Collaborators,
    fee_config: &FeeConfig,
    limits: &DepositLimits,
) {
    require_valid_fee_config(e, fee_config);
    require_valid_limits(e, limits);

    storage::set_admin(e, admin);
    storage::set_name(e, name);
    storage::set_symbol(e, symbol);
    let decimals = token::Client::new(e, &collaborators.asset).decimals();
    storage::set_asset(e, &collaborators.asset, decimals);
    storage::set_lending_pool(e, &collaborators.lending_pool);
    storage::set_swap_router(e, &collaborators.swap_router);
    storage::set_fee_config(e, fee_config);
    storage::set_limits(e, limits);
    storage::set_total_shares(e, 0);
    storage::set_last_time_entered_strategy(e, 0);
    storage::set_paused(e, false);
    storage::set_locked(e, false);
    storage::set_fee_data(
        e,
        &FeeData {
            last_platform_accrual_time: e.ledger().timestamp(),
            ..FeeData::default()
        },
    );
}

pub fn execute_set_limits(e: &Env, limits: &DepositLimits) {
    require_valid_limits(e, limits);
    storage::set_limits(e, limits);
    CellarEvents::set_limits(e, limits.max_liquidity, limits.deposit_limit);
}

pub fn execute_set_fee_distributor(e: &Env, distributor: &Address) {
    let mut config = storage::get_fee_config(e);
    config.distributor = distributor.clone();
    storage::set_fee_config(e, &config);
    CellarEvents::set_fee_distributor(e, distributor.clone());
}

/// Require fee rates to be non-negative and within their caps
///
/// ### Panics
/// If a rate is out of range
pub fn require_valid_fee_config(e: &Env, config: &FeeConfig) {
    if config.platform_fee < 0
        || config.platform_fee > MAX_PLATFORM_FEE
        || config.performance_fee < 0
        || config.performance_fee > MAX_PERFORMANCE_FEE
    {
        panic_with_error!(e, CellarError::InvalidConfig);
    }
}

/// Require both caps to be positive. `UNLIMITED` disables a cap.
pub fn require_valid_limits(e: &Env, limits: &DepositLimits) {
    if limits.max_liquidity <= 0 || limits.deposit_limit <= 0 {
        panic_with_error!(e, CellarError::InvalidConfig);
    }
}
