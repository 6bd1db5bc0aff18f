//! Expense models.
//!
//! Other expenses claimed against a travel authorization, coded to an
//! accounting category and converted to CHF.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currencies accepted on expense and meeting forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Swiss franc, the reporting currency.
    Chf,
    /// Euro.
    Eur,
    /// US dollar.
    Usd,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Chf => write!(f, "CHF"),
            Currency::Eur => write!(f, "EUR"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

/// Expense category with its fixed account code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Consultancy fee.
    ConsultancyFee,
    /// Taxi fare.
    TaxiFare,
    /// Room fees.
    RoomFees,
    /// Anything else.
    Other,
}

impl ExpenseCategory {
    /// Returns the account code booked for this category.
    ///
    /// # Example
    ///
    /// ```
    /// use dsa_engine::models::ExpenseCategory;
    ///
    /// assert_eq!(ExpenseCategory::TaxiFare.account_code(), "62000");
    /// ```
    pub fn account_code(&self) -> &'static str {
        match self {
            ExpenseCategory::ConsultancyFee => "60100",
            ExpenseCategory::TaxiFare => "62000",
            ExpenseCategory::RoomFees => "63000",
            ExpenseCategory::Other => "60990",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseCategory::ConsultancyFee => write!(f, "Consultancy fee"),
            ExpenseCategory::TaxiFare => write!(f, "Taxi Fare"),
            ExpenseCategory::RoomFees => write!(f, "Room fees"),
            ExpenseCategory::Other => write!(f, "Other"),
        }
    }
}

pub(crate) fn default_exchange_rate() -> Decimal {
    Decimal::ONE
}

/// An expense as entered on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    /// The traveler's name.
    pub traveler: String,
    /// The travel authorization number.
    pub ta_number: String,
    /// When the claim was submitted.
    pub submission_date: NaiveDate,
    /// The office the claim is filed with.
    pub office: String,
    /// The expense category.
    pub category: ExpenseCategory,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Project code.
    #[serde(default)]
    pub project: String,
    /// Fund code.
    #[serde(default)]
    pub fund: String,
    /// Activity code.
    #[serde(default)]
    pub activity: String,
    /// Budget line.
    #[serde(default)]
    pub budget_line: String,
    /// The currency of `amount`.
    pub currency: Currency,
    /// The amount in `currency`.
    pub amount: Decimal,
    /// Units of CHF per unit of `currency`.
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: Decimal,
}

/// A coded and converted expense line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseLine {
    /// The entry as submitted.
    #[serde(flatten)]
    pub entry: ExpenseEntry,
    /// The account code for the category.
    pub account_code: String,
    /// The amount converted to CHF, rounded to cents.
    pub amount_chf: Decimal,
}
