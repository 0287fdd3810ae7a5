#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use test_suites::setup::create_fixture_with_data;
use test_suites::test_fixture::TestFixture;
use test_suites::{SCALAR_18, SCALAR_7};

#[derive(Arbitrary, Debug)]
enum Command {
    Deposit { user: u8, units: u16 },
    Withdraw { user: u8, units: u16 },
    Redeem { user: u8, units: u16 },
    Transfer { from: u8, to: u8, units: u16, only_active: bool },
    EnterStrategy,
    Yield { bps: u8 },
    Loss { bps: u8 },
    Jump { seconds: u32 },
    CollectFees,
}

#[derive(Arbitrary, Debug)]
struct Input {
    commands: Vec<Command>,
}

fn user(fixture: &TestFixture, index: u8) -> soroban_sdk::Address {
    fixture.users[index as usize % fixture.users.len()].clone()
}

fn run(fixture: &TestFixture, command: &Command) {
    match *command {
        Command::Deposit { user: u, units } => {
            let u = user(fixture, u);
            let _ = fixture.cellar.try_deposit(&u, &(units as i128 * SCALAR_7), &u);
        }
        Command::Withdraw { user: u, units } => {
            let u = user(fixture, u);
            let _ = fixture.cellar.try_withdraw(&u, &(units as i128 * SCALAR_7), &u, &u);
        }
        Command::Redeem { user: u, units } => {
            let u = user(fixture, u);
            let _ = fixture.cellar.try_redeem(&u, &(units as i128 * SCALAR_18), &u, &u);
        }
        Command::Transfer { from, to, units, only_active } => {
            let from = user(fixture, from);
            let to = user(fixture, to);
            let _ = fixture
                .cellar
                .try_transfer(&from, &to, &(units as i128 * SCALAR_18), &only_active);
        }
        Command::EnterStrategy => {
            let _ = fixture.cellar.try_enter_strategy();
        }
        Command::Yield { bps } => fixture.scale_lending_index(SCALAR_7 + bps as i128 * 1_000),
        Command::Loss { bps } => fixture.scale_lending_index(SCALAR_7 - bps as i128 * 1_000),
        Command::Jump { seconds } => fixture.jump(seconds as u64),
        Command::CollectFees => {
            let _ = fixture.cellar.try_collect_fees();
        }
    }
}

fuzz_target!(|input: Input| {
    let fixture = create_fixture_with_data();
    for command in input.commands.iter().take(32) {
        run(&fixture, command);

        let mut supply = fixture.cellar.balance(&fixture.cellar.address);
        for u in fixture.users.iter() {
            let balance = fixture.cellar.balance(u);
            assert_eq!(fixture.ledger_shares(u), balance);
            supply += balance;
        }
        assert_eq!(fixture.cellar.total_supply(), supply);
        assert!(fixture.cellar.total_assets() >= 0);
    }
});
