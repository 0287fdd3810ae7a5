use soroban_sdk::{panic_with_error, token, Address, Env};

use crate::cellar::conversion::{max_deposit, preview_deposit, preview_mint, to_internal, total_assets};
use crate::cellar::{ledger, shares};
use crate::constants::UNLIMITED;
use crate::errors::CellarError;
use crate::events::CellarEvents;
use crate::storage;

fn require_accepting_deposits(e: &Env) {
    if storage::get_shutdown(e) {
        panic_with_error!(e, CellarError::Shutdown);
    }
    if storage::get_paused(e) {
        panic_with_error!(e, CellarError::Paused);
    }
}

/// Check the vault-wide and per-wallet caps for depositing `assets` native
/// units on behalf of `receiver`
fn require_within_limits(e: &Env, receiver: &Address, assets: i128) {
    let limits = storage::get_limits(e);
    if limits.max_liquidity != UNLIMITED
        && assets.saturating_add(total_assets(e)) > limits.max_liquidity
    {
        panic_with_error!(e, CellarError::LiquidityRestricted);
    }
    if assets > max_deposit(e, receiver) {
        panic_with_error!(e, CellarError::DepositRestricted);
    }
}

/// Pull `assets` from `from`, mint `shares` to `receiver` and record the
/// contribution as a new inactive deposit
fn record_deposit(e: &Env, from: &Address, receiver: &Address, assets: i128, shares: i128) {
    token::Client::new(e, &storage::get_asset(e)).transfer(
        from,
        &e.current_contract_address(),
        &assets,
    );
    shares::mint(e, receiver, shares);
    let now = e.ledger().timestamp();
    ledger::append(e, receiver, to_internal(e, assets), shares, now);
    storage::set_last_deposit_time(e, now);
    CellarEvents::deposit(e, from.clone(), receiver.clone(), assets, shares);
}

/// Deposit `assets` of the current asset from `from`, crediting `receiver`
///
/// A request above `from`'s balance deposits the whole balance instead.
///
/// Returns the shares minted
pub fn execute_deposit(e: &Env, from: &Address, assets: i128, receiver: &Address) -> i128 {
    require_accepting_deposits(e);
    if assets <= 0 {
        panic_with_error!(e, CellarError::ZeroAssets);
    }
    let balance = token::Client::new(e, &storage::get_asset(e)).balance(from);
    let assets = assets.min(balance);
    if assets <= 0 {
        panic_with_error!(e, CellarError::ZeroAssets);
    }

    let shares = preview_deposit(e, assets);
    if shares <= 0 {
        panic_with_error!(e, CellarError::ZeroShares);
    }
    require_within_limits(e, receiver, assets);

    record_deposit(e, from, receiver, assets, shares);
    shares
}

/// Mint exactly `shares` to `receiver`, paying with the current asset from
/// `from`
///
/// Returns the assets charged
pub fn execute_mint(e: &Env, from: &Address, shares: i128, receiver: &Address) -> i128 {
    require_accepting_deposits(e);
    if shares <= 0 {
        panic_with_error!(e, CellarError::ZeroShares);
    }
    let assets = preview_mint(e, shares);
    if assets <= 0 {
        panic_with_error!(e, CellarError::ZeroAssets);
    }
    require_within_limits(e, receiver, assets);

    record_deposit(e, from, receiver, assets, shares);
    assets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SCALAR_18;
    use crate::testutils::{create_cellar_with_pool, fund};
    use crate::types::DepositLimits;
    use soroban_sdk::testutils::{Address as _, Ledger};

    #[test]
    fn test_deposit_appends_record() {
        let e = Env::default();
        e.mock_all_auths();
        let (cellar, _) = create_cellar_with_pool(&e);
        let user = Address::generate(&e);
        fund(&e, &cellar, &user, 1000_0000000);
        e.ledger().set_timestamp(42);

        e.as_contract(&cellar, || {
            let shares = execute_deposit(&e, &user, 1000_0000000, &user);
            assert_eq!(shares, 1000 * SCALAR_18);
            assert_eq!(storage::get_balance(&e, &user), 1000 * SCALAR_18);
            let records = ledger::get_deposits(&e, &user);
            assert_eq!(records.len(), 1);
            let record = records.get_unchecked(0);
            assert_eq!(record.assets, 1000 * SCALAR_18);
            assert_eq!(record.time_deposited, 42);
        });
    }

    #[test]
    fn test_deposit_clamps_to_balance() {
        let e = Env::default();
        e.mock_all_auths();
        let (cellar, _) = create_cellar_with_pool(&e);
        let user = Address::generate(&e);
        fund(&e, &cellar, &user, 50_0000000);

        e.as_contract(&cellar, || {
            let shares = execute_deposit(&e, &user, 80_0000000, &user);
            assert_eq!(shares, 50 * SCALAR_18);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1040)")]
    fn test_deposit_while_paused() {
        let e = Env::default();
        e.mock_all_auths();
        let (cellar, _) = create_cellar_with_pool(&e);
        let user = Address::generate(&e);
        fund(&e, &cellar, &user, 50_0000000);

        e.as_contract(&cellar, || {
            storage::set_paused(&e, true);
            execute_deposit(&e, &user, 10_0000000, &user);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1020)")]
    fn test_deposit_above_wallet_limit() {
        let e = Env::default();
        e.mock_all_auths();
        let (cellar, _) = create_cellar_with_pool(&e);
        let user = Address::generate(&e);
        fund(&e, &cellar, &user, 500_0000000);

        e.as_contract(&cellar, || {
            storage::set_limits(
                &e,
                &DepositLimits {
                    max_liquidity: UNLIMITED,
                    deposit_limit: 100_0000000,
                },
            );
            execute_deposit(&e, &user, 60_0000000, &user);
            execute_deposit(&e, &user, 60_0000000, &user);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1021)")]
    fn test_deposit_above_liquidity_limit() {
        let e = Env::default();
        e.mock_all_auths();
        let (cellar, _) = create_cellar_with_pool(&e);
        let user = Address::generate(&e);
        fund(&e, &cellar, &user, 500_0000000);

        e.as_contract(&cellar, || {
            storage::set_limits(
                &e,
                &DepositLimits {
                    max_liquidity: 200_0000000,
                    deposit_limit: UNLIMITED,
                },
            );
            execute_deposit(&e, &user, 201_0000000, &user);
        });
    }

    #[test]
    fn test_mint_charges_rounded_up() {
        let e = Env::default();
        e.mock_all_auths();
        let (cellar, _) = create_cellar_with_pool(&e);
        let user = Address::generate(&e);
        fund(&e, &cellar, &user, 10_0000000);

        e.as_contract(&cellar, || {
            // a fraction of the smallest native unit still costs one unit
            let assets = execute_mint(&e, &user, 1, &user);
            assert_eq!(assets, 1);
            assert_eq!(storage::get_balance(&e, &user), 1);
        });
    }
}
