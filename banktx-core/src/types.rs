//! Normalized statement data model, shared by every institution profile.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The date range one statement covers. May straddle a calendar-year
/// boundary (Dec -> Jan).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StatementPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidPeriodFormat(format!(
                "period start {start} after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// True when the period spans a year boundary.
    pub fn crosses_year(&self) -> bool {
        use chrono::Datelike;
        self.start.year() != self.end.year()
    }
}

/// One ledger entry parsed from a statement line.
///
/// Sign convention is fixed per institution profile: credit-card formats
/// carry the printed sign (payments/credits negative), the checking format
/// prints unsigned amounts and the profile applies the category sign at
/// parse time (deposits positive, payments negative).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Date the transaction occurred. Absent in formats that only print a
    /// posting date.
    pub transaction_date: Option<NaiveDate>,
    pub posting_date: NaiveDate,
    pub description: String,
    pub reference_number: Option<String>,
    /// Last digits of the card/account the transaction was made with.
    pub account_suffix: Option<String>,
    pub amount: Decimal,
    /// Section the transaction was listed under, e.g. "Purchases and
    /// Adjustments" or "Electronic Deposits".
    pub category: String,
}

/// A fully parsed, reconciled statement. Constructed once per parse call;
/// a statement that fails reconciliation yields no `Statement` at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub account_number: String,
    pub period: StatementPeriod,
    pub beginning_balance: Decimal,
    pub ending_balance: Decimal,
    pub transactions: Vec<Transaction>,
}
