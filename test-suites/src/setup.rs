use crate::test_fixture::{TestFixture, SCALAR_7};

/// A fixture with three users holding 10,000 of the asset each. Nothing is
/// deposited yet.
pub fn create_fixture_with_data<'a>() -> TestFixture<'a> {
    let mut fixture = TestFixture::create();
    for _ in 0..3 {
        fixture.create_user(10_000 * SCALAR_7);
    }
    fixture
}

/// Same as [`create_fixture_with_data`] over a token with `decimals` decimals
pub fn create_fixture_with_decimals<'a>(decimals: u32) -> TestFixture<'a> {
    let mut fixture = TestFixture::create_with_decimals(decimals);
    let balance = 10_000 * fixture.unit();
    for _ in 0..3 {
        fixture.create_user(balance);
    }
    fixture
}
