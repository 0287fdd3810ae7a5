use cellar::storage;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::Address;
use test_suites::setup::create_fixture_with_data;
use test_suites::test_fixture::TestFixture;
use test_suites::{SCALAR_18, SCALAR_7};

fn setup_fixture() -> TestFixture<'static> {
    create_fixture_with_data()
}

#[test]
fn test_enter_strategy_reclassifies_by_timestamp() {
    let fixture = setup_fixture();
    let a = fixture.users[0].clone();
    let b = fixture.users[1].clone();

    fixture.cellar.deposit(&a, &(1000 * SCALAR_7), &a);
    fixture.jump(60);
    assert_eq!(fixture.cellar.enter_strategy(), 1000 * SCALAR_7);
    assert_eq!(
        fixture.cellar.last_time_entered_strategy(),
        fixture.env.ledger().timestamp()
    );
    fixture.scale_lending_index(1_1000000);

    // b buys in at 1.1, the record stays inactive and is worth its principal
    fixture.jump(60);
    let shares = fixture.cellar.deposit(&b, &(1100 * SCALAR_7), &b);
    assert_eq!(shares, 1000 * SCALAR_18);
    assert_eq!(fixture.cellar.inactive_assets(), 1100 * SCALAR_7);
    assert_eq!(fixture.cellar.active_assets(), 1100 * SCALAR_7);

    // yield accrues to the active position only
    fixture.scale_lending_index(1_1000000);
    let burned = fixture.cellar.withdraw(&b, &(1100 * SCALAR_7), &b, &b);
    assert_eq!(burned, 1000 * SCALAR_18);
    assert_eq!(fixture.token.balance(&b), 10_000 * SCALAR_7);
    assert_eq!(fixture.ledger_shares(&a), fixture.cellar.balance(&a));
}

#[test]
fn test_enter_strategy_activates_later_deposits() {
    let fixture = setup_fixture();
    let a = fixture.users[0].clone();

    fixture.cellar.deposit(&a, &(100 * SCALAR_7), &a);
    fixture.cellar.enter_strategy();
    fixture.jump(60);
    fixture.cellar.deposit(&a, &(100 * SCALAR_7), &a);
    assert_eq!(fixture.cellar.inactive_assets(), 100 * SCALAR_7);

    fixture.jump(60);
    assert_eq!(fixture.cellar.enter_strategy(), 100 * SCALAR_7);
    assert_eq!(fixture.cellar.inactive_assets(), 0);
    assert_eq!(fixture.cellar.active_assets(), 200 * SCALAR_7);
}

#[test]
fn test_rebalance_moves_vault_to_new_asset() {
    let fixture = setup_fixture();
    let a = fixture.users[0].clone();
    let old_asset = fixture.token.address.clone();
    let new_asset = fixture.create_swap_target(2_0000000);

    fixture.cellar.deposit(&a, &(1000 * SCALAR_7), &a);
    fixture.jump(60);
    fixture.cellar.enter_strategy();
    fixture.scale_lending_index(1_1000000);
    fixture.jump(60);

    let path = fixture.path(&[&old_asset, &new_asset]);
    let received = fixture.cellar.rebalance(&path, &(2000 * SCALAR_7));
    assert_eq!(received, 2200 * SCALAR_7);

    assert_eq!(fixture.cellar.asset(), new_asset);
    assert_eq!(fixture.token.balance(&fixture.cellar.address), 0);
    assert_eq!(fixture.cellar.inactive_assets(), 0);
    assert_eq!(fixture.cellar.active_assets(), 2200 * SCALAR_7);
    assert_eq!(
        fixture.cellar.last_time_entered_strategy(),
        fixture.env.ledger().timestamp()
    );

    // fees settled on the old asset's yield, baseline taken on the new position
    let fee_data = fixture.cellar.fee_data();
    assert!(fee_data.accrued_performance_fees > 0);
    assert_eq!(fee_data.last_active_assets, 2200 * SCALAR_18);

    // no fee on the swap itself
    fixture.cellar.accrue_fees();
    assert_eq!(
        fixture.cellar.fee_data().accrued_performance_fees,
        fee_data.accrued_performance_fees
    );

    let paid = fixture.cellar.redeem(&a, &fixture.cellar.balance(&a), &a, &a);
    assert!(paid > 2170 * SCALAR_7);
    assert_eq!(TokenClient::new(&fixture.env, &new_asset).balance(&a), paid);
}

#[test]
#[should_panic(expected = "Error(Contract, #1030)")]
fn test_rebalance_path_not_starting_at_asset() {
    let fixture = setup_fixture();
    let new_asset = fixture.create_swap_target(1_0000000);
    let path = fixture.path(&[&new_asset, &fixture.token.address]);
    fixture.cellar.rebalance(&path, &0);
}

#[test]
#[should_panic(expected = "Error(Contract, #1031)")]
fn test_rebalance_to_current_asset() {
    let fixture = setup_fixture();
    let hop = fixture.create_swap_target(1_0000000);
    let asset = fixture.token.address.clone();
    let path = fixture.path(&[&asset, &hop, &asset]);
    fixture.cellar.rebalance(&path, &0);
}

#[test]
fn test_rebalance_slippage_reverts_everything() {
    let fixture = setup_fixture();
    let a = fixture.users[0].clone();
    let new_asset = fixture.create_swap_target(1_0000000);

    fixture.cellar.deposit(&a, &(1000 * SCALAR_7), &a);
    fixture.cellar.enter_strategy();
    fixture.jump(60);

    let path = fixture.path(&[&fixture.token.address, &new_asset]);
    let result = fixture.cellar.try_rebalance(&path, &(1001 * SCALAR_7));
    assert!(result.is_err());
    assert_eq!(fixture.cellar.asset(), fixture.token.address);
    assert_eq!(fixture.cellar.active_assets(), 1000 * SCALAR_7);
}

#[test]
#[should_panic(expected = "Error(Contract, #1033)")]
fn test_rebalance_in_same_timestamp_as_deposit() {
    let fixture = setup_fixture();
    let a = fixture.users[0].clone();
    let b = fixture.users[1].clone();
    let new_asset = fixture.create_swap_target(2_0000000);

    fixture.cellar.deposit(&a, &(1000 * SCALAR_7), &a);
    fixture.jump(60);
    fixture.cellar.enter_strategy();
    fixture.jump(60);
    fixture.cellar.deposit(&b, &(100 * SCALAR_7), &b);

    let path = fixture.path(&[&fixture.token.address, &new_asset]);
    fixture.cellar.rebalance(&path, &0);
}

#[test]
fn test_rebalance_activates_earlier_deposits() {
    let fixture = setup_fixture();
    let a = fixture.users[0].clone();
    let b = fixture.users[1].clone();
    let new_asset = fixture.create_swap_target(2_0000000);

    fixture.cellar.deposit(&a, &(1000 * SCALAR_7), &a);
    fixture.jump(60);
    fixture.cellar.enter_strategy();
    fixture.jump(60);
    fixture.cellar.deposit(&b, &(100 * SCALAR_7), &b);
    fixture.jump(1);

    let path = fixture.path(&[&fixture.token.address, &new_asset]);
    assert_eq!(fixture.cellar.rebalance(&path, &0), 2200 * SCALAR_7);
    assert_eq!(fixture.cellar.inactive_assets(), 0);

    // b's principal was swapped too, so b is paid in the new asset at its value
    let record = fixture.deposits(&b).get_unchecked(0);
    assert!(record.time_deposited < fixture.cellar.last_time_entered_strategy());
    let paid = fixture.cellar.redeem(&b, &fixture.cellar.balance(&b), &b, &b);
    assert!(paid > 199 * SCALAR_7);
    assert!(paid <= 200 * SCALAR_7);
}

#[test]
fn test_reinvest_adds_rewards_to_position() {
    let fixture = setup_fixture();
    let a = fixture.users[0].clone();
    let asset = fixture.token.address.clone();
    let reward = fixture.create_swap_target(1_0000000);

    fixture.cellar.deposit(&a, &(1000 * SCALAR_7), &a);
    fixture.jump(60);
    fixture.cellar.enter_strategy();
    let entered = fixture.cellar.last_time_entered_strategy();

    // rewards trade at 0.5 of the asset
    fixture.router.set_rate(&reward, &asset, &0_5000000);
    fixture.token_admin.mint(&fixture.router.address, &(1000 * SCALAR_7));
    StellarAssetClient::new(&fixture.env, &reward).mint(&fixture.cellar.address, &(100 * SCALAR_7));

    fixture.jump(60);
    let path = fixture.path(&[&reward, &asset]);
    let added = fixture.cellar.reinvest(&path, &0);
    assert_eq!(added, 50 * SCALAR_7);
    assert_eq!(fixture.cellar.active_assets(), 1050 * SCALAR_7);
    assert_eq!(fixture.cellar.last_time_entered_strategy(), entered);
    assert_eq!(TokenClient::new(&fixture.env, &reward).balance(&fixture.cellar.address), 0);
}

#[test]
#[should_panic(expected = "Error(Contract, #1031)")]
fn test_reinvest_current_asset() {
    let fixture = setup_fixture();
    let asset = fixture.token.address.clone();
    let other = fixture.create_swap_target(1_0000000);
    let path = fixture.path(&[&asset, &other, &asset]);
    fixture.cellar.reinvest(&path, &0);
}

#[test]
fn test_pause_blocks_deposits_only() {
    let fixture = setup_fixture();
    let a = fixture.users[0].clone();
    fixture.cellar.deposit(&a, &(100 * SCALAR_7), &a);

    fixture.cellar.set_pause(&true);
    assert!(fixture.cellar.is_paused());
    assert_eq!(fixture.cellar.max_deposit(&a), 0);
    assert!(fixture.cellar.try_deposit(&a, &SCALAR_7, &a).is_err());
    assert!(fixture.cellar.try_mint(&a, &SCALAR_18, &a).is_err());

    // withdrawals and strategy still run
    fixture.cellar.withdraw(&a, &(10 * SCALAR_7), &a, &a);
    fixture.cellar.enter_strategy();

    fixture.cellar.set_pause(&false);
    fixture.cellar.deposit(&a, &SCALAR_7, &a);
}

#[test]
fn test_shutdown_withdraws_position_and_blocks_strategy() {
    let fixture = setup_fixture();
    let a = fixture.users[0].clone();
    let b = fixture.users[1].clone();

    fixture.cellar.deposit(&a, &(1000 * SCALAR_7), &a);
    fixture.cellar.enter_strategy();
    fixture.cellar.set_pause(&true);

    assert_eq!(fixture.cellar.shutdown(), 1000 * SCALAR_7);
    assert!(fixture.cellar.is_shutdown());
    assert!(!fixture.cellar.is_paused());
    assert_eq!(fixture.cellar.active_assets(), 0);
    assert_eq!(fixture.cellar.inactive_assets(), 1000 * SCALAR_7);

    assert!(fixture.cellar.try_deposit(&b, &SCALAR_7, &b).is_err());
    assert!(fixture.cellar.try_enter_strategy().is_err());
    assert!(fixture.cellar.try_set_pause(&true).is_err());
    let path = fixture.path(&[&fixture.token.address, &Address::generate(&fixture.env)]);
    assert!(fixture.cellar.try_rebalance(&path, &0).is_err());

    // depositors can still leave
    let paid = fixture.cellar.redeem(&a, &(1000 * SCALAR_18), &a, &a);
    assert_eq!(paid, 1000 * SCALAR_7);
}

#[test]
#[should_panic(expected = "Error(Contract, #1042)")]
fn test_shutdown_twice() {
    let fixture = setup_fixture();
    fixture.cellar.shutdown();
    fixture.cellar.shutdown();
}

#[test]
fn test_sweep_stray_token() {
    let fixture = setup_fixture();
    let stray = fixture.create_swap_target(1_0000000);
    let to = Address::generate(&fixture.env);
    StellarAssetClient::new(&fixture.env, &stray).mint(&fixture.cellar.address, &(5 * SCALAR_7));

    assert_eq!(fixture.cellar.sweep(&stray, &to), 5 * SCALAR_7);
    assert_eq!(TokenClient::new(&fixture.env, &stray).balance(&to), 5 * SCALAR_7);
}

#[test]
#[should_panic(expected = "Error(Contract, #1032)")]
fn test_sweep_current_asset() {
    let fixture = setup_fixture();
    let to = Address::generate(&fixture.env);
    fixture.cellar.sweep(&fixture.token.address, &to);
}

#[test]
#[should_panic(expected = "Error(Contract, #1032)")]
fn test_sweep_own_share() {
    let fixture = setup_fixture();
    let to = Address::generate(&fixture.env);
    fixture.cellar.sweep(&fixture.cellar.address, &to);
}

#[test]
#[should_panic(expected = "Error(Contract, #1043)")]
fn test_mutation_while_locked() {
    let fixture = setup_fixture();
    let a = fixture.users[0].clone();
    fixture.env.as_contract(&fixture.cellar.address, || {
        storage::set_locked(&fixture.env, true);
    });
    fixture.cellar.deposit(&a, &SCALAR_7, &a);
}

#[test]
fn test_admin_handover() {
    let fixture = setup_fixture();
    let new_admin = Address::generate(&fixture.env);

    fixture.cellar.propose_admin(&new_admin);
    fixture.cellar.accept_admin();
    fixture.env.as_contract(&fixture.cellar.address, || {
        assert_eq!(storage::get_admin(&fixture.env), new_admin);
    });
    assert!(fixture.cellar.try_accept_admin().is_err());
}
