use soroban_sdk::{
    contract, contractclient, contractimpl, panic_with_error, Address, Env, String, Vec,
};

use crate::cellar::{self, conversion, ledger, Collaborators};
use crate::constants::INTERNAL_DECIMALS;
use crate::errors::CellarError;
use crate::events::CellarEvents;
use crate::storage;
use crate::types::{DepositLimits, DepositRecord, FeeConfig, FeeData};

#[contract]
pub struct CellarContract;

#[contractclient(name = "CellarClient")]
pub trait Cellar {
    /********** Share token **********/

    /// Fetch the share balance of `id`
    fn balance(e: Env, id: Address) -> i128;

    /// Fetch the shares `spender` may move or withdraw on behalf of `from`
    fn allowance(e: Env, from: Address, spender: Address) -> i128;

    /// Allow `spender` to move or withdraw up to `amount` of `from`'s shares
    ///
    /// ### Panics
    /// If `amount` is negative
    fn approve(e: Env, from: Address, spender: Address, amount: i128);

    /// Move up to `amount` shares from `from` to `to` together with the
    /// deposit records backing them
    ///
    /// ### Arguments
    /// * `from` - The owner of the shares
    /// * `to` - The receiver of the shares
    /// * `amount` - The shares to move
    /// * `only_active` - Only move shares backed by active deposits. Fewer
    ///   shares than requested can move, which is not an error.
    ///
    /// ### Panics
    /// If `amount` is not positive or above `from`'s balance
    fn transfer(e: Env, from: Address, to: Address, amount: i128, only_active: bool) -> bool;

    /// Like `transfer`, spending the allowance `from` granted `spender` by
    /// the shares actually moved
    fn transfer_from(
        e: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
        only_active: bool,
    ) -> bool;

    fn total_supply(e: Env) -> i128;

    fn decimals(e: Env) -> u32;

    fn name(e: Env) -> String;

    fn symbol(e: Env) -> String;

    /********** Deposits and withdrawals **********/

    /// Deposit the current asset and receive shares
    ///
    /// ### Arguments
    /// * `from` - The address paying the assets
    /// * `assets` - The amount to deposit, clamped to `from`'s balance
    /// * `receiver` - The address receiving the shares
    ///
    /// ### Returns
    /// The shares minted
    ///
    /// ### Panics
    /// If the vault is paused or shut down, nothing would be minted, or a
    /// deposit cap would be exceeded
    fn deposit(e: Env, from: Address, assets: i128, receiver: Address) -> i128;

    /// Mint exactly `shares`, paying the current asset rounded up
    ///
    /// ### Returns
    /// The assets charged
    fn mint(e: Env, from: Address, shares: i128, receiver: Address) -> i128;

    /// Withdraw `assets` of `owner`'s position to `receiver`
    ///
    /// ### Arguments
    /// * `spender` - The caller, `owner` or an approved spender
    /// * `assets` - The assets to withdraw, in native decimals
    /// * `receiver` - The address receiving the assets
    /// * `owner` - The address whose shares are burned
    ///
    /// ### Returns
    /// The shares burned
    fn withdraw(e: Env, spender: Address, assets: i128, receiver: Address, owner: Address) -> i128;

    /// Redeem `shares` of `owner`'s position to `receiver`
    ///
    /// ### Returns
    /// The assets paid, in native decimals
    fn redeem(e: Env, spender: Address, shares: i128, receiver: Address, owner: Address) -> i128;

    /********** Fees **********/

    /// Accrue the platform fee, settle the performance fee and rebase the
    /// performance baseline. Callable by anyone.
    fn accrue_fees(e: Env);

    /// (Admin only) Accrue fees, then pay every fee share held by the vault
    /// to the fee distributor
    ///
    /// ### Returns
    /// The assets paid
    fn collect_fees(e: Env) -> i128;

    /********** Strategy **********/

    /// (Admin only) Move all idle assets into the lending position
    ///
    /// ### Returns
    /// The assets deposited
    ///
    /// ### Panics
    /// If the vault is shut down
    fn enter_strategy(e: Env) -> i128;

    /// (Admin only) Move the whole vault into another asset
    ///
    /// ### Arguments
    /// * `path` - Swap route starting at the current asset and ending at the new one
    /// * `min_amount_out` - Minimum amount of the new asset to receive
    ///
    /// ### Returns
    /// The amount of the new asset received
    ///
    /// ### Panics
    /// If a deposit was made at the current ledger timestamp
    fn rebalance(e: Env, path: Vec<Address>, min_amount_out: i128) -> i128;

    /// (Admin only) Swap a reward token balance into the current asset and
    /// add it to the lending position
    ///
    /// ### Arguments
    /// * `path` - Swap route starting at the reward token and ending at the current asset
    /// * `min_amount_out` - Minimum amount of the current asset to receive
    fn reinvest(e: Env, path: Vec<Address>, min_amount_out: i128) -> i128;

    /// (Admin only) Pause or resume deposits and mints
    fn set_pause(e: Env, paused: bool);

    /// (Admin only) Permanently stop the vault and withdraw the lending position
    ///
    /// ### Returns
    /// The assets withdrawn from lending
    fn shutdown(e: Env) -> i128;

    /// (Admin only) Send the vault's balance of a stray `token` to `to`
    ///
    /// ### Panics
    /// If `token` is the current asset or the vault's own share
    fn sweep(e: Env, token: Address, to: Address) -> i128;

    /********** Admin **********/

    /// (Admin only) Set the vault-wide and per-wallet deposit caps
    fn set_limits(e: Env, limits: DepositLimits);

    /// (Admin only) Set the address collected fees are paid to
    fn set_fee_distributor(e: Env, distributor: Address);

    /// (Admin only) Set a new address to become the admin of the vault. This
    /// must be accepted by the new admin w/ `accept_admin` to take effect.
    fn propose_admin(e: Env, new_admin: Address);

    /// (Proposed admin only) Accept the admin role
    ///
    /// ### Panics
    /// If no admin was proposed
    fn accept_admin(e: Env);

    /********** Views **********/

    fn asset(e: Env) -> Address;

    fn lending_pool(e: Env) -> Address;

    /// Assets managed by the vault, in native decimals
    fn total_assets(e: Env) -> i128;

    fn active_assets(e: Env) -> i128;

    fn inactive_assets(e: Env) -> i128;

    /// Normalized assets (18 decimals) one whole share redeems for
    fn exchange_rate(e: Env) -> i128;

    fn convert_to_shares(e: Env, assets: i128) -> i128;

    fn convert_to_assets(e: Env, shares: i128) -> i128;

    fn preview_deposit(e: Env, assets: i128) -> i128;

    fn preview_mint(e: Env, shares: i128) -> i128;

    fn preview_withdraw(e: Env, assets: i128) -> i128;

    fn preview_redeem(e: Env, shares: i128) -> i128;

    /// The largest deposit `owner` can make, `i128::MAX` when uncapped
    fn max_deposit(e: Env, owner: Address) -> i128;

    /// Deposit records of `owner` from the cursor onwards
    fn deposits(e: Env, owner: Address) -> Vec<DepositRecord>;

    fn deposit_cursor(e: Env, owner: Address) -> u32;

    fn last_time_entered_strategy(e: Env) -> u64;

    fn fee_config(e: Env) -> FeeConfig;

    fn fee_data(e: Env) -> FeeData;

    fn limits(e: Env) -> DepositLimits;

    fn is_paused(e: Env) -> bool;

    fn is_shutdown(e: Env) -> bool;
}

/// Run a state-changing entry point under the vault's mutation lock
fn guarded<T>(e: &Env, f: impl FnOnce() -> T) -> T {
    if storage::is_locked(e) {
        panic_with_error!(e, CellarError::Reentrancy);
    }
    storage::set_locked(e, true);
    let result = f();
    storage::set_locked(e, false);
    result
}

#[contractimpl]
impl CellarContract {
    /// Constructor for initializing the contract when deployed
    ///
    /// ### Arguments
    /// * `admin` - The admin address
    /// * `name` - Name of the share token
    /// * `symbol` - Symbol of the share token
    /// * `asset` - The asset deposits are made in
    /// * `lending_pool` - The lending collaborator
    /// * `swap_router` - The swap collaborator
    /// * `fee_config` - Fee rates and distributor
    /// * `limits` - Deposit caps
    pub fn __constructor(
        e: Env,
        admin: Address,
        name: String,
        symbol: String,
        asset: Address,
        lending_pool: Address,
        swap_router: Address,
        fee_config: FeeConfig,
        limits: DepositLimits,
    ) {
        admin.require_auth();
        let collaborators = Collaborators {
            asset,
            lending_pool,
            swap_router,
        };
        cellar::execute_initialize(&e, &admin, &name, &symbol, &collaborators, &fee_config, &limits);
    }
}

#[contractimpl]
impl Cellar for CellarContract {
    fn balance(e: Env, id: Address) -> i128 {
        storage::extend_instance(&e);
        storage::get_balance(&e, &id)
    }

    fn allowance(e: Env, from: Address, spender: Address) -> i128 {
        storage::extend_instance(&e);
        storage::get_allowance(&e, &from, &spender)
    }

    fn approve(e: Env, from: Address, spender: Address, amount: i128) {
        storage::extend_instance(&e);
        from.require_auth();

        guarded(&e, || cellar::shares::execute_approve(&e, &from, &spender, amount));
    }

    fn transfer(e: Env, from: Address, to: Address, amount: i128, only_active: bool) -> bool {
        storage::extend_instance(&e);
        from.require_auth();

        guarded(&e, || {
            cellar::execute_transfer(&e, &from, &from, &to, amount, only_active);
        });
        true
    }

    fn transfer_from(
        e: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
        only_active: bool,
    ) -> bool {
        storage::extend_instance(&e);
        spender.require_auth();

        guarded(&e, || {
            cellar::execute_transfer(&e, &spender, &from, &to, amount, only_active);
        });
        true
    }

    fn total_supply(e: Env) -> i128 {
        storage::extend_instance(&e);
        storage::get_total_shares(&e)
    }

    fn decimals(_e: Env) -> u32 {
        INTERNAL_DECIMALS
    }

    fn name(e: Env) -> String {
        storage::extend_instance(&e);
        storage::get_name(&e)
    }

    fn symbol(e: Env) -> String {
        storage::extend_instance(&e);
        storage::get_symbol(&e)
    }

    fn deposit(e: Env, from: Address, assets: i128, receiver: Address) -> i128 {
        storage::extend_instance(&e);
        from.require_auth();

        guarded(&e, || cellar::execute_deposit(&e, &from, assets, &receiver))
    }

    fn mint(e: Env, from: Address, shares: i128, receiver: Address) -> i128 {
        storage::extend_instance(&e);
        from.require_auth();

        guarded(&e, || cellar::execute_mint(&e, &from, shares, &receiver))
    }

    fn withdraw(e: Env, spender: Address, assets: i128, receiver: Address, owner: Address) -> i128 {
        storage::extend_instance(&e);
        spender.require_auth();

        guarded(&e, || cellar::execute_withdraw(&e, &spender, assets, &receiver, &owner))
    }

    fn redeem(e: Env, spender: Address, shares: i128, receiver: Address, owner: Address) -> i128 {
        storage::extend_instance(&e);
        spender.require_auth();

        guarded(&e, || cellar::execute_redeem(&e, &spender, shares, &receiver, &owner))
    }

    fn accrue_fees(e: Env) {
        storage::extend_instance(&e);
        guarded(&e, || cellar::execute_accrue_fees(&e));
    }

    fn collect_fees(e: Env) -> i128 {
        storage::extend_instance(&e);
        storage::get_admin(&e).require_auth();

        guarded(&e, || cellar::execute_collect_fees(&e))
    }

    fn enter_strategy(e: Env) -> i128 {
        storage::extend_instance(&e);
        storage::get_admin(&e).require_auth();

        guarded(&e, || cellar::execute_enter_strategy(&e))
    }

    fn rebalance(e: Env, path: Vec<Address>, min_amount_out: i128) -> i128 {
        storage::extend_instance(&e);
        storage::get_admin(&e).require_auth();

        guarded(&e, || cellar::execute_rebalance(&e, &path, min_amount_out))
    }

    fn reinvest(e: Env, path: Vec<Address>, min_amount_out: i128) -> i128 {
        storage::extend_instance(&e);
        storage::get_admin(&e).require_auth();

        guarded(&e, || cellar::execute_reinvest(&e, &path, min_amount_out))
    }

    fn set_pause(e: Env, paused: bool) {
        storage::extend_instance(&e);
        storage::get_admin(&e).require_auth();

        guarded(&e, || cellar::execute_set_pause(&e, paused));
    }

    fn shutdown(e: Env) -> i128 {
        storage::extend_instance(&e);
        storage::get_admin(&e).require_auth();

        guarded(&e, || cellar::execute_shutdown(&e))
    }

    fn sweep(e: Env, token: Address, to: Address) -> i128 {
        storage::extend_instance(&e);
        storage::get_admin(&e).require_auth();

        guarded(&e, || cellar::execute_sweep(&e, &token, &to))
    }

    fn set_limits(e: Env, limits: DepositLimits) {
        storage::extend_instance(&e);
        storage::get_admin(&e).require_auth();

        cellar::execute_set_limits(&e, &limits);
    }

    fn set_fee_distributor(e: Env, distributor: Address) {
        storage::extend_instance(&e);
        storage::get_admin(&e).require_auth();

        cellar::execute_set_fee_distributor(&e, &distributor);
    }

    fn propose_admin(e: Env, new_admin: Address) {
        storage::extend_instance(&e);
        let admin = storage::get_admin(&e);
        admin.require_auth();

        storage::set_proposed_admin(&e, &new_admin);
        CellarEvents::propose_admin(&e, admin, new_admin);
    }

    fn accept_admin(e: Env) {
        storage::extend_instance(&e);
        let proposed_admin = storage::get_proposed_admin(&e)
            .unwrap_or_else(|| panic_with_error!(&e, CellarError::NoProposedAdmin));
        proposed_admin.require_auth();

        storage::set_admin(&e, &proposed_admin);
        storage::del_proposed_admin(&e);
        CellarEvents::accept_admin(&e, proposed_admin);
    }

    fn asset(e: Env) -> Address {
        storage::extend_instance(&e);
        storage::get_asset(&e)
    }

    fn lending_pool(e: Env) -> Address {
        storage::extend_instance(&e);
        storage::get_lending_pool(&e)
    }

    fn total_assets(e: Env) -> i128 {
        storage::extend_instance(&e);
        conversion::total_assets(&e)
    }

    fn active_assets(e: Env) -> i128 {
        storage::extend_instance(&e);
        conversion::active_assets(&e)
    }

    fn inactive_assets(e: Env) -> i128 {
        storage::extend_instance(&e);
        conversion::inactive_assets(&e)
    }

    fn exchange_rate(e: Env) -> i128 {
        storage::extend_instance(&e);
        conversion::exchange_rate(&e)
    }

    fn convert_to_shares(e: Env, assets: i128) -> i128 {
        storage::extend_instance(&e);
        conversion::preview_deposit(&e, assets)
    }

    fn convert_to_assets(e: Env, shares: i128) -> i128 {
        storage::extend_instance(&e);
        conversion::preview_redeem(&e, shares)
    }

    fn preview_deposit(e: Env, assets: i128) -> i128 {
        storage::extend_instance(&e);
        conversion::preview_deposit(&e, assets)
    }

    fn preview_mint(e: Env, shares: i128) -> i128 {
        storage::extend_instance(&e);
        conversion::preview_mint(&e, shares)
    }

    fn preview_withdraw(e: Env, assets: i128) -> i128 {
        storage::extend_instance(&e);
        conversion::preview_withdraw(&e, assets)
    }

    fn preview_redeem(e: Env, shares: i128) -> i128 {
        storage::extend_instance(&e);
        conversion::preview_redeem(&e, shares)
    }

    fn max_deposit(e: Env, owner: Address) -> i128 {
        storage::extend_instance(&e);
        conversion::max_deposit(&e, &owner)
    }

    fn deposits(e: Env, owner: Address) -> Vec<DepositRecord> {
        storage::extend_instance(&e);
        ledger::get_deposits(&e, &owner)
    }

    fn deposit_cursor(e: Env, owner: Address) -> u32 {
        storage::extend_instance(&e);
        storage::get_depositor_ledger(&e, &owner).cursor
    }

    fn last_time_entered_strategy(e: Env) -> u64 {
        storage::extend_instance(&e);
        storage::get_last_time_entered_strategy(&e)
    }

    fn fee_config(e: Env) -> FeeConfig {
        storage::extend_instance(&e);
        storage::get_fee_config(&e)
    }

    fn fee_data(e: Env) -> FeeData {
        storage::extend_instance(&e);
        storage::get_fee_data(&e)
    }

    fn limits(e: Env) -> DepositLimits {
        storage::extend_instance(&e);
        storage::get_limits(&e)
    }

    fn is_paused(e: Env) -> bool {
        storage::extend_instance(&e);
        storage::get_paused(&e)
    }

    fn is_shutdown(e: Env) -> bool {
        storage::extend_instance(&e);
        storage::get_shutdown(&e)
    }
}
