//! Expense coding and currency conversion.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{ExpenseEntry, ExpenseLine};

/// Converts an amount to CHF, rounded to cents with banker's rounding.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] for a negative amount, a
/// non-positive exchange rate, or a product too large to represent.
///
/// # Example
///
/// ```
/// use dsa_engine::calculation::convert_to_chf;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let chf = convert_to_chf(Decimal::from_str("100")?, Decimal::from_str("0.9425")?)?;
/// assert_eq!(chf, Decimal::from_str("94.25")?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn convert_to_chf(amount: Decimal, exchange_rate: Decimal) -> EngineResult<Decimal> {
    if amount < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "amount".to_string(),
            message: format!("amount must not be negative, got {}", amount),
        });
    }
    if exchange_rate <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "exchange_rate".to_string(),
            message: format!("exchange rate must be positive, got {}", exchange_rate),
        });
    }

    let converted = checked_product(amount, exchange_rate, "amount")?;
    Ok(converted.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
}

/// Multiplies two amounts, failing instead of overflowing.
pub(crate) fn checked_product(
    amount: Decimal,
    factor: Decimal,
    field: &str,
) -> EngineResult<Decimal> {
    amount
        .checked_mul(factor)
        .ok_or_else(|| EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("{} x {} is too large", amount, factor),
        })
}

/// Codes an expense entry to its account and converts it to CHF.
pub fn prepare_expense_line(entry: ExpenseEntry) -> EngineResult<ExpenseLine> {
    let amount_chf = convert_to_chf(entry.amount, entry.exchange_rate)?;
    let account_code = entry.category.account_code().to_string();

    Ok(ExpenseLine {
        entry,
        account_code,
        amount_chf,
    })
}
