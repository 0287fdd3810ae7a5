use soroban_sdk::{Address, Env, Symbol};

pub struct CellarEvents {}

impl CellarEvents {
    /// Emitted when assets are deposited into the vault
    ///
    /// - topics - `["deposit", from: Address, receiver: Address]`
    /// - data - `[assets: i128, shares: i128]`
    ///
    /// ### Arguments
    /// * from - The address the assets were pulled from
    /// * receiver - The address receiving the minted shares
    /// * assets - The amount of assets deposited (native decimals)
    /// * shares - The amount of shares minted
    pub fn deposit(e: &Env, from: Address, receiver: Address, assets: i128, shares: i128) {
        let topics = (Symbol::new(e, "deposit"), from, receiver);
        e.events().publish(topics, (assets, shares));
    }

    /// Emitted when assets are withdrawn from the vault
    ///
    /// - topics - `["withdraw", owner: Address, receiver: Address]`
    /// - data - `[assets: i128, shares: i128]`
    ///
    /// ### Arguments
    /// * owner - The address whose shares were burned
    /// * receiver - The address receiving the assets
    /// * assets - The amount of assets sent (native decimals)
    /// * shares - The amount of shares burned
    pub fn withdraw(e: &Env, owner: Address, receiver: Address, assets: i128, shares: i128) {
        let topics = (Symbol::new(e, "withdraw"), owner, receiver);
        e.events().publish(topics, (assets, shares));
    }

    /// Emitted when shares move between depositors
    ///
    /// - topics - `["transfer", from: Address, to: Address]`
    /// - data - `[requested: i128, moved: i128]`
    pub fn transfer(e: &Env, from: Address, to: Address, requested: i128, moved: i128) {
        let topics = (Symbol::new(e, "transfer"), from, to);
        e.events().publish(topics, (requested, moved));
    }

    /// Emitted when an allowance is set
    ///
    /// - topics - `["approve", from: Address, spender: Address]`
    /// - data - `amount: i128`
    pub fn approve(e: &Env, from: Address, spender: Address, amount: i128) {
        let topics = (Symbol::new(e, "approve"), from, spender);
        e.events().publish(topics, amount);
    }

    /// Emitted when platform fees are accrued
    ///
    /// - topics - `["accrue_platform_fees"]`
    /// - data - `[shares: i128, elapsed: u64]`
    pub fn accrue_platform_fees(e: &Env, shares: i128, elapsed: u64) {
        let topics = (Symbol::new(e, "accrue_platform_fees"),);
        e.events().publish(topics, (shares, elapsed));
    }

    /// Emitted when performance fees are minted for lending yield
    ///
    /// - topics - `["accrue_performance_fees"]`
    /// - data - `[shares: i128, gain: i128]`
    ///
    /// ### Arguments
    /// * shares - The fee shares minted to the vault
    /// * gain - The yield the fee was taken on (18 decimals)
    pub fn accrue_performance_fees(e: &Env, shares: i128, gain: i128) {
        let topics = (Symbol::new(e, "accrue_performance_fees"),);
        e.events().publish(topics, (shares, gain));
    }

    /// Emitted when performance fee shares are burned to absorb a loss
    ///
    /// - topics - `["burn_performance_fees"]`
    /// - data - `[shares: i128, loss: i128]`
    ///
    /// ### Arguments
    /// * shares - The fee shares burned
    /// * loss - The measured loss of the lending position (18 decimals)
    pub fn burn_performance_fees(e: &Env, shares: i128, loss: i128) {
        let topics = (Symbol::new(e, "burn_performance_fees"),);
        e.events().publish(topics, (shares, loss));
    }

    /// Emitted when accrued fees are paid out
    ///
    /// - topics - `["collect_fees", distributor: Address]`
    /// - data - `[platform_fees: i128, performance_fees: i128, assets: i128]`
    pub fn collect_fees(
        e: &Env,
        distributor: Address,
        platform_fees: i128,
        performance_fees: i128,
        assets: i128,
    ) {
        let topics = (Symbol::new(e, "collect_fees"), distributor);
        e.events()
            .publish(topics, (platform_fees, performance_fees, assets));
    }

    /// Emitted when idle assets enter the lending position
    ///
    /// - topics - `["enter_strategy", asset: Address]`
    /// - data - `[assets: i128, timestamp: u64]`
    pub fn enter_strategy(e: &Env, asset: Address, assets: i128, timestamp: u64) {
        let topics = (Symbol::new(e, "enter_strategy"), asset);
        e.events().publish(topics, (assets, timestamp));
    }

    /// Emitted when the vault moves to a new asset
    ///
    /// - topics - `["rebalance", old_asset: Address, new_asset: Address]`
    /// - data - `[assets_in: i128, assets_out: i128]`
    pub fn rebalance(
        e: &Env,
        old_asset: Address,
        new_asset: Address,
        assets_in: i128,
        assets_out: i128,
    ) {
        let topics = (Symbol::new(e, "rebalance"), old_asset, new_asset);
        e.events().publish(topics, (assets_in, assets_out));
    }

    /// Emitted when a reward balance is swapped and added to the position
    ///
    /// - topics - `["reinvest", token: Address]`
    /// - data - `[amount_in: i128, assets_out: i128]`
    pub fn reinvest(e: &Env, token: Address, amount_in: i128, assets_out: i128) {
        let topics = (Symbol::new(e, "reinvest"), token);
        e.events().publish(topics, (amount_in, assets_out));
    }

    /// Emitted when the pause flag changes
    ///
    /// - topics - `["set_pause"]`
    /// - data - `paused: bool`
    pub fn set_pause(e: &Env, paused: bool) {
        let topics = (Symbol::new(e, "set_pause"),);
        e.events().publish(topics, paused);
    }

    /// Emitted when the vault is shut down
    ///
    /// - topics - `["shutdown"]`
    /// - data - `withdrawn: i128`
    pub fn shutdown(e: &Env, withdrawn: i128) {
        let topics = (Symbol::new(e, "shutdown"),);
        e.events().publish(topics, withdrawn);
    }

    /// Emitted when stray tokens are swept out of the vault
    ///
    /// - topics - `["sweep", token: Address, to: Address]`
    /// - data - `amount: i128`
    pub fn sweep(e: &Env, token: Address, to: Address, amount: i128) {
        let topics = (Symbol::new(e, "sweep"), token, to);
        e.events().publish(topics, amount);
    }

    /// Emitted when deposit caps change
    ///
    /// - topics - `["set_limits"]`
    /// - data - `[max_liquidity: i128, deposit_limit: i128]`
    pub fn set_limits(e: &Env, max_liquidity: i128, deposit_limit: i128) {
        let topics = (Symbol::new(e, "set_limits"),);
        e.events().publish(topics, (max_liquidity, deposit_limit));
    }

    /// Emitted when the fee distributor changes
    ///
    /// - topics - `["set_fee_distributor"]`
    /// - data - `distributor: Address`
    pub fn set_fee_distributor(e: &Env, distributor: Address) {
        let topics = (Symbol::new(e, "set_fee_distributor"),);
        e.events().publish(topics, distributor);
    }

    /// Emitted when a new admin is proposed
    ///
    /// - topics - `["propose_admin", admin: Address]`
    /// - data - `new_admin: Address`
    pub fn propose_admin(e: &Env, admin: Address, new_admin: Address) {
        let topics = (Symbol::new(e, "propose_admin"), admin);
        e.events().publish(topics, new_admin);
    }

    /// Emitted when the proposed admin takes over
    ///
    /// - topics - `["accept_admin"]`
    /// - data - `admin: Address`
    pub fn accept_admin(e: &Env, admin: Address) {
        let topics = (Symbol::new(e, "accept_admin"),);
        e.events().publish(topics, admin);
    }
}
