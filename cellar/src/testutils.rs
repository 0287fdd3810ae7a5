#![cfg(any(test, feature = "testutils"))]

use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{self, StellarAssetClient};
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String, Vec};

use crate::constants::{SCALAR_7, UNLIMITED};
use crate::{CellarClient, CellarContract, DepositLimits, FeeConfig};

/// Income index of a reserve that has not earned anything yet
pub const RAY: i128 = 1_000_000_000_000_000_000_000_000_000;

//***** Lending pool ******

#[derive(Clone)]
#[contracttype]
enum MockPoolKey {
    Index,
    Scaled(Address, Address),
}

/// Lending pool paying yield through a single income index shared by every
/// asset. Receipt balances are stored scaled by the index, like aTokens.
#[contract]
pub struct MockLendingPool;

#[contractimpl]
impl MockLendingPool {
    pub fn set_index(e: Env, index: i128) {
        e.storage().instance().set(&MockPoolKey::Index, &index);
    }

    pub fn deposit(e: Env, from: Address, asset: Address, amount: i128) {
        from.require_auth();
        token::Client::new(&e, &asset).transfer(&from, &e.current_contract_address(), &amount);

        let index = Self::normalized_income(e.clone(), asset.clone());
        let key = MockPoolKey::Scaled(from, asset);
        let scaled: i128 = e.storage().instance().get(&key).unwrap_or(0);
        let added = amount.fixed_mul_floor(&e, &RAY, &index);
        e.storage().instance().set(&key, &(scaled + added));
    }

    pub fn withdraw(e: Env, owner: Address, asset: Address, amount: i128, to: Address) -> i128 {
        owner.require_auth();
        let balance = Self::receipt_balance(e.clone(), owner.clone(), asset.clone());
        let amount = amount.min(balance);
        if amount <= 0 {
            return 0;
        }

        let index = Self::normalized_income(e.clone(), asset.clone());
        let key = MockPoolKey::Scaled(owner, asset.clone());
        let scaled: i128 = e.storage().instance().get(&key).unwrap_or(0);
        let removed = amount.fixed_mul_ceil(&e, &RAY, &index).min(scaled);
        e.storage().instance().set(&key, &(scaled - removed));

        token::Client::new(&e, &asset).transfer(&e.current_contract_address(), &to, &amount);
        amount
    }

    pub fn receipt_balance(e: Env, holder: Address, asset: Address) -> i128 {
        let index = Self::normalized_income(e.clone(), asset.clone());
        let scaled: i128 = e
            .storage()
            .instance()
            .get(&MockPoolKey::Scaled(holder, asset))
            .unwrap_or(0);
        scaled.fixed_mul_floor(&e, &index, &RAY)
    }

    pub fn normalized_income(e: Env, _asset: Address) -> i128 {
        e.storage().instance().get(&MockPoolKey::Index).unwrap_or(RAY)
    }
}

//***** Swap router ******

#[derive(Clone)]
#[contracttype]
enum MockSwapKey {
    Rate(Address, Address),
}

/// Router quoting a fixed rate between the two ends of a path and paying
/// out of its own balance
#[contract]
pub struct MockSwapRouter;

#[contractimpl]
impl MockSwapRouter {
    /// Set the output per input unit, in SCALAR_7, for `token_in` to `token_out`
    pub fn set_rate(e: Env, token_in: Address, token_out: Address, rate: i128) {
        e.storage()
            .instance()
            .set(&MockSwapKey::Rate(token_in, token_out), &rate);
    }

    pub fn swap_exact_in(
        e: Env,
        sender: Address,
        path: Vec<Address>,
        amount_in: i128,
        min_amount_out: i128,
        to: Address,
    ) -> i128 {
        sender.require_auth();
        let token_in = path.first_unchecked();
        let token_out = path.last_unchecked();
        token::Client::new(&e, &token_in).transfer(&sender, &e.current_contract_address(), &amount_in);

        let rate: i128 = e
            .storage()
            .instance()
            .get(&MockSwapKey::Rate(token_in, token_out.clone()))
            .unwrap_or(SCALAR_7);
        let amount_out = amount_in.fixed_mul_floor(&e, &rate, &SCALAR_7);
        if amount_out < min_amount_out {
            panic!("insufficient output amount");
        }
        token::Client::new(&e, &token_out).transfer(&e.current_contract_address(), &to, &amount_out);
        amount_out
    }
}

//***** Token ******

#[derive(Clone)]
#[contracttype]
enum MockTokenKey {
    Decimals,
    Balance(Address),
}

/// SEP-41 token with configurable decimals. `mint` takes the same arguments
/// as the Stellar asset admin interface, so `StellarAssetClient` can fund
/// accounts with it.
#[contract]
pub struct MockToken;

#[contractimpl]
impl MockToken {
    pub fn __constructor(e: Env, decimals: u32) {
        e.storage().instance().set(&MockTokenKey::Decimals, &decimals);
    }

    pub fn mint(e: Env, to: Address, amount: i128) {
        let balance = Self::balance(e.clone(), to.clone());
        e.storage()
            .instance()
            .set(&MockTokenKey::Balance(to), &(balance + amount));
    }

    pub fn balance(e: Env, id: Address) -> i128 {
        e.storage()
            .instance()
            .get(&MockTokenKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        let from_balance = Self::balance(e.clone(), from.clone());
        if amount < 0 || from_balance < amount {
            panic!("insufficient balance");
        }
        e.storage()
            .instance()
            .set(&MockTokenKey::Balance(from), &(from_balance - amount));
        let to_balance = Self::balance(e.clone(), to.clone());
        e.storage()
            .instance()
            .set(&MockTokenKey::Balance(to), &(to_balance + amount));
    }

    pub fn decimals(e: Env) -> u32 {
        e.storage()
            .instance()
            .get(&MockTokenKey::Decimals)
            .unwrap_or(7)
    }
}

//***** Deployment ******

/// 2% platform fee, 10% performance fee
pub fn default_fee_config(e: &Env) -> FeeConfig {
    FeeConfig {
        platform_fee: 0_0200000,
        performance_fee: 0_1000000,
        distributor: Address::generate(e),
    }
}

pub fn unlimited() -> DepositLimits {
    DepositLimits {
        max_liquidity: UNLIMITED,
        deposit_limit: UNLIMITED,
    }
}

/// Deploy a 7 decimal Stellar asset administered by `admin`
pub fn create_asset(e: &Env, admin: &Address) -> Address {
    e.register_stellar_asset_contract_v2(admin.clone()).address()
}

/// Deploy a token with `decimals` decimals
pub fn create_token(e: &Env, decimals: u32) -> Address {
    e.register(MockToken, (decimals,))
}

/// Deploy a cellar over a fresh asset, lending pool and swap router
///
/// Returns `(cellar, lending pool)`
pub fn create_cellar_with_pool(e: &Env) -> (Address, Address) {
    e.mock_all_auths_allowing_non_root_auth();
    e.cost_estimate().budget().reset_unlimited();
    let admin = Address::generate(e);
    let asset = create_asset(e, &admin);
    let pool = e.register(MockLendingPool, ());
    let router = e.register(MockSwapRouter, ());
    let cellar = e.register(
        CellarContract {},
        (
            admin,
            String::from_str(e, "Cellar Shares"),
            String::from_str(e, "CLR"),
            asset,
            pool.clone(),
            router,
            default_fee_config(e),
            unlimited(),
        ),
    );
    (cellar, pool)
}

/// Mint the cellar's current asset to `to`
pub fn fund(e: &Env, cellar: &Address, to: &Address, amount: i128) {
    let asset = CellarClient::new(e, cellar).asset();
    StellarAssetClient::new(e, &asset).mint(to, &amount);
}

/// Give the cellar a lending position of `amount` without going through a
/// deposit
pub fn seed_lending_position(e: &Env, cellar: &Address, pool: &Address, amount: i128) {
    let asset = CellarClient::new(e, cellar).asset();
    StellarAssetClient::new(e, &asset).mint(cellar, &amount);
    MockLendingPoolClient::new(e, pool).deposit(cellar, &asset, &amount);
}
