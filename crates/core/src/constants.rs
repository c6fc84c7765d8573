use rust_decimal::Decimal;

/// ISO code of the currency balances are reported in
pub const BASE_CURRENCY: &str = "GBP";

/// ISO code of the secondary currency that needs conversion
pub const FOREIGN_CURRENCY: &str = "CZK";

/// Decimal precision for reported totals
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Largest amount accepted on a single entry, in its own currency
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0); // 1_000_000_000_000

/// Maximum decimal places accepted on a transaction amount
pub const AMOUNT_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for stored exchange rates
pub const RATE_DECIMAL_PRECISION: u32 = 8;

/// Maximum length of a transaction description
pub const MAX_DESCRIPTION_LEN: usize = 256;
