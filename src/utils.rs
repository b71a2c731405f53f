use std::str::FromStr as _;

use chrono::{Datelike as _, Months, NaiveDate};
use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};
use serde_json::Value;

use crate::consts::{MAX_AMOUNT, MAX_PAY_DAYS, MAX_PERCENTAGE};

/// Rounds to cents, halves away from zero
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Parses a user-typed amount such as `"1,20,000.50"` or `"4.5e3"`
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let cleaned = text.trim().replace(',', "");

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Negative amounts become `0`, anything above what storage holds is capped
pub fn clamp_amount(amount: Decimal) -> Decimal {
    amount.clamp(Decimal::ZERO, MAX_AMOUNT)
}

pub fn clamp_percentage(percentage: Decimal) -> Decimal {
    percentage.clamp(Decimal::ZERO, MAX_PERCENTAGE)
}

pub fn clamp_days(days: u8) -> u8 {
    days.min(MAX_PAY_DAYS)
}

/// Form values never fail: anything that is not a non-negative number is `0`
pub fn coerce_amount(value: &Value) -> Decimal {
    let parsed = match value {
        Value::Number(number) => parse_amount(&number.to_string()),
        Value::String(text) => parse_amount(text),
        _ => None,
    };

    parsed
        .map(clamp_amount)
        .unwrap_or(Decimal::ZERO)
}

pub fn coerce_percentage(value: &Value) -> Decimal {
    clamp_percentage(coerce_amount(value))
}

pub fn coerce_days(value: &Value) -> u8 {
    coerce_amount(value)
        .min(Decimal::from(MAX_PAY_DAYS))
        .trunc()
        .to_u8()
        .unwrap_or_default()
}

/// First and last day of the month `date` falls in, i.e. one pay cycle
pub fn get_month_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start_of_month = date.with_day(1).unwrap_or(date);
    let end_of_month = start_of_month
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);

    (start_of_month, end_of_month)
}
