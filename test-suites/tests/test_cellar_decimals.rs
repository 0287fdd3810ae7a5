use cellar::DepositRecord;
use test_suites::setup::create_fixture_with_decimals;
use test_suites::test_fixture::TestFixture;
use test_suites::{SCALAR_18, SCALAR_7};

fn setup_fixture(decimals: u32) -> TestFixture<'static> {
    create_fixture_with_decimals(decimals)
}

#[test]
fn test_six_decimal_asset_round_trip() {
    let fixture = setup_fixture(6);
    let a = fixture.users[0].clone();
    let b = fixture.users[1].clone();
    let unit = fixture.unit();

    // native amounts are normalized to 18 decimals
    let shares = fixture.cellar.deposit(&a, &(1000 * unit), &a);
    assert_eq!(shares, 1000 * SCALAR_18);
    assert_eq!(fixture.cellar.total_assets(), 1000 * unit);
    assert_eq!(fixture.cellar.convert_to_assets(&SCALAR_18), unit);

    fixture.jump(60);
    assert_eq!(fixture.cellar.enter_strategy(), 1000 * unit);
    fixture.scale_lending_index(1_0500000);
    fixture.cellar.accrue_fees();
    fixture.jump(1);

    let t_b = fixture.env.ledger().timestamp();
    let b_shares = fixture.cellar.deposit(&b, &(500 * unit), &b);
    assert!(b_shares < 500 * SCALAR_18);
    let burned = fixture.cellar.withdraw(&b, &(200 * unit), &b, &b);
    assert_eq!(
        fixture.deposits(&b).get_unchecked(0),
        DepositRecord {
            assets: 300 * SCALAR_18,
            shares: b_shares - burned,
            time_deposited: t_b,
        }
    );
    assert_eq!(fixture.token.balance(&b), 9_700 * unit);

    let expected = fixture.cellar.preview_redeem(&shares);
    assert!(expected > 1000 * unit);
    assert!(expected < 1050 * unit);
    let paid = fixture.cellar.redeem(&a, &shares, &a, &a);
    assert!(paid <= expected);
    assert!(expected - paid <= 1);
    assert_eq!(fixture.token.balance(&a), 9_000 * unit + paid);
    assert_eq!(fixture.cellar.balance(&a), 0);

    // b's principal is still whole
    let rest = fixture.cellar.redeem(&b, &(b_shares - burned), &b, &b);
    assert!(rest <= 300 * unit);
    assert!(300 * unit - rest <= 1);
    assert_eq!(fixture.token.balance(&b), 9_700 * unit + rest);
}

#[test]
fn test_eighteen_decimal_asset_smallest_withdraw() {
    let fixture = setup_fixture(18);
    let user = fixture.users[0].clone();
    let unit = fixture.unit();
    assert_eq!(unit, SCALAR_18);

    let shares = fixture.cellar.deposit(&user, &(1000 * unit), &user);
    assert_eq!(shares, 1000 * SCALAR_18);

    // one base unit of the asset is one normalized unit
    let burned = fixture.cellar.withdraw(&user, &1, &user, &user);
    assert_eq!(burned, 1);
    assert_eq!(fixture.token.balance(&user), 9_000 * unit + 1);
    assert_eq!(fixture.cellar.balance(&user), 1000 * SCALAR_18 - 1);
    assert_eq!(fixture.cellar.total_assets(), 1000 * unit - 1);

    fixture.jump(60);
    assert_eq!(fixture.cellar.enter_strategy(), 1000 * unit - 1);
    fixture.jump(1);
    fixture.cellar.accrue_fees();

    let remaining = fixture.cellar.balance(&user);
    let expected = fixture.cellar.preview_redeem(&remaining);
    let paid = fixture.cellar.redeem(&user, &remaining, &user, &user);
    assert!(paid <= expected);
    assert!(expected - paid <= 1);
    assert_eq!(fixture.token.balance(&user), 9_000 * unit + 1 + paid);
}

#[test]
fn test_rebalance_into_higher_decimal_asset() {
    let fixture = setup_fixture(7);
    let a = fixture.users[0].clone();
    let b = fixture.users[1].clone();

    fixture.cellar.deposit(&a, &(1000 * SCALAR_7), &a);
    fixture.jump(60);
    fixture.cellar.enter_strategy();
    fixture.jump(60);
    fixture.cellar.deposit(&b, &(500 * SCALAR_7), &b);
    fixture.jump(1);

    // two 18 decimal units per 7 decimal unit, per raw unit in SCALAR_7
    let rate = 2 * 10i128.pow(11) * SCALAR_7;
    let new_asset = fixture.create_swap_target_with_decimals(rate, 18);
    let path = fixture.path(&[&fixture.token.address, &new_asset]);
    let out = fixture.cellar.rebalance(&path, &(3000 * SCALAR_18));
    assert_eq!(out, 3000 * SCALAR_18);
    assert_eq!(fixture.cellar.asset(), new_asset);
    assert_eq!(fixture.cellar.active_assets(), 3000 * SCALAR_18);
    assert_eq!(fixture.cellar.inactive_assets(), 0);
    assert_eq!(fixture.token.balance(&fixture.cellar.address), 0);

    fixture.cellar.accrue_fees();
    let b_shares = fixture.cellar.balance(&b);
    let expected = fixture.cellar.preview_redeem(&b_shares);
    // b's 500 became 1000 of the new asset, less the platform fee dilution
    assert!(expected <= 1000 * SCALAR_18);
    assert!(expected > 999 * SCALAR_18);

    let paid = fixture.cellar.redeem(&b, &b_shares, &b, &b);
    assert!(paid <= expected);
    assert!(expected - paid <= 1);
    let new_token = soroban_sdk::token::TokenClient::new(&fixture.env, &new_asset);
    assert_eq!(new_token.balance(&b), paid);
    assert_eq!(fixture.token.balance(&b), 9_500 * SCALAR_7);
}
