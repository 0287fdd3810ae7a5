use cellar::testutils::{
    create_asset, create_token, default_fee_config, unlimited, MockLendingPool,
    MockLendingPoolClient, MockSwapRouter, MockSwapRouterClient, RAY,
};
use cellar::{CellarClient, CellarContract, DepositRecord, FeeConfig};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env, String, Vec as SVec};

pub const SCALAR_7: i128 = 1_0000000;
pub const SCALAR_18: i128 = 1_000_000_000_000_000_000;

/// Whole tokens each collaborator holds so yield and swaps can be paid out
const COLLABORATOR_LIQUIDITY: i128 = 1_000_000_000;

pub struct TestFixture<'a> {
    pub env: Env,
    pub admin: Address,
    pub users: Vec<Address>,
    pub cellar: CellarClient<'a>,
    pub token: TokenClient<'a>,
    pub token_admin: StellarAssetClient<'a>,
    pub pool: MockLendingPoolClient<'a>,
    pub router: MockSwapRouterClient<'a>,
    pub fee_config: FeeConfig,
    pub decimals: u32,
}

impl TestFixture<'_> {
    /// A cellar over a 7 decimal Stellar asset
    pub fn create<'a>() -> TestFixture<'a> {
        let e = Env::default();
        let admin = Address::generate(&e);
        let asset = create_asset(&e, &admin);
        Self::create_with_asset(e, admin, asset, 7)
    }

    /// A cellar over a token with `decimals` decimals
    pub fn create_with_decimals<'a>(decimals: u32) -> TestFixture<'a> {
        let e = Env::default();
        let admin = Address::generate(&e);
        let asset = create_token(&e, decimals);
        Self::create_with_asset(e, admin, asset, decimals)
    }

    fn create_with_asset<'a>(e: Env, admin: Address, asset: Address, decimals: u32) -> TestFixture<'a> {
        e.mock_all_auths();
        e.cost_estimate().budget().reset_unlimited();
        e.ledger().set_timestamp(1_000);

        let token_admin = StellarAssetClient::new(&e, &asset);

        let pool_id = e.register(MockLendingPool, ());
        let router_id = e.register(MockSwapRouter, ());
        token_admin.mint(&pool_id, &(COLLABORATOR_LIQUIDITY * 10i128.pow(decimals)));

        let fee_config = default_fee_config(&e);
        let cellar_id = e.register(
            CellarContract {},
            (
                admin.clone(),
                String::from_str(&e, "Cellar Shares"),
                String::from_str(&e, "CLR"),
                asset.clone(),
                pool_id.clone(),
                router_id.clone(),
                fee_config.clone(),
                unlimited(),
            ),
        );

        TestFixture {
            token: TokenClient::new(&e, &asset),
            token_admin,
            cellar: CellarClient::new(&e, &cellar_id),
            pool: MockLendingPoolClient::new(&e, &pool_id),
            router: MockSwapRouterClient::new(&e, &router_id),
            env: e,
            admin,
            users: vec![],
            fee_config,
            decimals,
        }
    }

    /// Create a user holding `balance` of the cellar's asset
    pub fn create_user(&mut self, balance: i128) -> Address {
        let user = Address::generate(&self.env);
        if balance > 0 {
            self.token_admin.mint(&user, &balance);
        }
        self.users.push(user.clone());
        user
    }

    /// Deploy another 7 decimal asset with swap liquidity and a rate from the
    /// current asset
    pub fn create_swap_target(&self, rate: i128) -> Address {
        let asset = create_asset(&self.env, &self.admin);
        self.fund_swap_target(&asset, rate, 7);
        asset
    }

    /// Deploy another token with `decimals` decimals. `rate` is raw output
    /// units per raw input unit in SCALAR_7.
    pub fn create_swap_target_with_decimals(&self, rate: i128, decimals: u32) -> Address {
        let asset = create_token(&self.env, decimals);
        self.fund_swap_target(&asset, rate, decimals);
        asset
    }

    fn fund_swap_target(&self, asset: &Address, rate: i128, decimals: u32) {
        let liquidity = COLLABORATOR_LIQUIDITY * 10i128.pow(decimals);
        let admin = StellarAssetClient::new(&self.env, asset);
        admin.mint(&self.router.address, &liquidity);
        admin.mint(&self.pool.address, &liquidity);
        self.router.set_rate(&self.token.address, asset, &rate);
    }

    /// One whole unit of the cellar's starting asset
    pub fn unit(&self) -> i128 {
        10i128.pow(self.decimals)
    }

    /// Grow (or shrink) the lending income index by `rate` in SCALAR_7
    pub fn scale_lending_index(&self, rate: i128) {
        let index = self.pool.normalized_income(&self.cellar.asset());
        self.pool.set_index(&(index * rate / SCALAR_7));
    }

    pub fn reset_lending_index(&self) {
        self.pool.set_index(&RAY);
    }

    pub fn path(&self, assets: &[&Address]) -> SVec<Address> {
        let mut path = SVec::new(&self.env);
        for asset in assets {
            path.push_back((*asset).clone());
        }
        path
    }

    pub fn deposits(&self, owner: &Address) -> SVec<DepositRecord> {
        self.cellar.deposits(owner)
    }

    /// Sum of shares across `owner`'s live records
    pub fn ledger_shares(&self, owner: &Address) -> i128 {
        self.deposits(owner).iter().map(|record| record.shares).sum()
    }

    /********** Chain Helpers ***********/

    pub fn jump(&self, time: u64) {
        self.env.ledger().with_mut(|li| {
            li.timestamp = li.timestamp.saturating_add(time);
        });
    }
}
