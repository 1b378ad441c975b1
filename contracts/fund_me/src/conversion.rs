//! Fixed-point conversion from native-asset amounts to USD value.
//!
//! Amounts are in the asset's base units (7 decimals for Stellar assets);
//! the feed's price carries `decimals()` fractional digits. The USD result
//! keeps the amount's 7-decimal scale, so it compares directly against
//! [`MINIMUM_USD`].

/// Minimum accepted contribution: 50 USD at 7-decimal scale.
pub const MINIMUM_USD: i128 = 50 * 10_000_000;

/// Decimal places of asset base units (stroops).
pub const ASSET_DECIMALS: u32 = 7;

/// USD value of `amount` base units at `price` with `decimals` fractional
/// digits: `amount * price / 10^decimals`.
pub fn asset_to_usd(price: i128, decimals: u32, amount: i128) -> i128 {
    amount * price / 10i128.pow(decimals)
}

/// Whether `amount` clears the [`MINIMUM_USD`] floor at the given rate.
pub fn meets_minimum(price: i128, decimals: u32, amount: i128) -> bool {
    asset_to_usd(price, decimals, amount) >= MINIMUM_USD
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2000 USD per unit, 8 feed decimals — the mock feed's defaults.
    const PRICE: i128 = 2_000_0000_0000;
    const DECIMALS: u32 = 8;

    #[test]
    fn one_unit_converts_at_feed_rate() {
        // 1.0000000 units at 2000 USD/unit = 2000.0000000 USD.
        assert_eq!(asset_to_usd(PRICE, DECIMALS, 10_000_000), 2_000_0000000);
    }

    #[test]
    fn zero_amount_is_zero_usd() {
        assert_eq!(asset_to_usd(PRICE, DECIMALS, 0), 0);
        assert!(!meets_minimum(PRICE, DECIMALS, 0));
    }

    #[test]
    fn minimum_boundary() {
        // 50 USD / 2000 USD-per-unit = 0.025 units = 250_000 base units.
        assert!(meets_minimum(PRICE, DECIMALS, 250_000));
        assert!(!meets_minimum(PRICE, DECIMALS, 249_999));
    }

    #[test]
    fn rate_drop_raises_the_bar() {
        // At 100 USD/unit, 0.025 units is only 2.50 USD.
        let low_price: i128 = 100_0000_0000;
        assert!(!meets_minimum(low_price, DECIMALS, 250_000));
        // 0.5 units = 50 USD exactly.
        assert!(meets_minimum(low_price, DECIMALS, 5_000_000));
    }

    #[test]
    fn negative_amount_never_meets_minimum() {
        assert!(!meets_minimum(PRICE, DECIMALS, -10_000_000));
    }
}
