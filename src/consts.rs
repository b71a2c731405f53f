use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Share of monthly CTC paid as Basic when nothing else is configured
pub const DEFAULT_BASIC_PERCENTAGE: Decimal = dec!(40);

// Fractions of Basic
pub const HRA_RATE: Decimal = dec!(0.5);
pub const LTA_RATE: Decimal = dec!(0.1);
pub const FIXED_ALLOWANCE_RATE: Decimal = dec!(0.4);

/// Flat monthly amount taken out of Fixed Allowance when the statutory benefit is enabled
pub const STATUTORY_BENEFIT_DEDUCTION: Decimal = dec!(1800);

pub const DEFAULT_GRATUITY_PERCENTAGE: Decimal = dec!(4.81);

/// Largest amount a `decimal(14, 2)` column holds
pub const MAX_AMOUNT: Decimal = dec!(999_999_999_999.99);

pub const MAX_PERCENTAGE: Decimal = dec!(100);

pub const MAX_PAY_DAYS: u8 = 31;
