//! Transaction record shapes.
//!
//! Each institution lists an ordered set of shapes; the first one whose
//! regex matches a classified line wins. A line matching no shape is not
//! an error: the scanner applies its discard policy instead.

use regex::Regex;

use crate::amount;
use crate::dates::{self, DateMode};
use crate::error::{Error, Result};
use crate::types::{StatementPeriod, Transaction};

/// Field layout of one record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxShape {
    /// `transDate postDate description ref suffix amount` with a signed
    /// currency amount.
    Full,
    /// `transDate postDate description amount`, no reference or account
    /// fields. Interest and fee lines on current credit-card layouts.
    InterestFee,
    /// `postDate description amount`, single date, unsigned amount.
    Checking,
}

/// One compiled record shape.
#[derive(Debug, Clone)]
pub struct TxPattern {
    pub shape: TxShape,
    re: Regex,
}

impl TxPattern {
    pub fn full() -> Result<Self> {
        Ok(Self {
            shape: TxShape::Full,
            re: Regex::new(concat!(
                r"^(?P<trans>\d{2}/\d{2})\s+",
                r"(?P<post>\d{2}/\d{2})\s+",
                r"(?P<desc>.+?)\s+",
                r"(?P<ref>\d{4})\s+",
                r"(?P<suffix>\d{4})\s+",
                r"(?P<amount>-?\$?[\d,]+\.\d{2})$"
            ))?,
        })
    }

    pub fn interest_fee() -> Result<Self> {
        Ok(Self {
            shape: TxShape::InterestFee,
            re: Regex::new(concat!(
                r"^(?P<trans>\d{1,2}/\d{1,2})\s+",
                r"(?P<post>\d{1,2}/\d{1,2})\s+",
                r"(?P<desc>.+?)\s+",
                r"(?P<amount>\d+\.\d{2})$"
            ))?,
        })
    }

    pub fn checking() -> Result<Self> {
        Ok(Self {
            shape: TxShape::Checking,
            re: Regex::new(concat!(
                r"^(?P<post>\d{2}/\d{2})\s+",
                r"(?P<desc>.+?)\s+",
                r"(?P<amount>[\d,]+\.\d{2})$"
            ))?,
        })
    }
}

/// Try each shape in order against a line the classifier could not place
/// elsewhere. `Ok(None)` means no shape matched; the category and the
/// institution sign convention are applied by the caller.
pub fn match_transaction(
    line: &str,
    patterns: &[TxPattern],
    period: Option<&StatementPeriod>,
    mode: DateMode,
) -> Result<Option<Transaction>> {
    for pattern in patterns {
        let Some(caps) = pattern.re.captures(line) else {
            continue;
        };

        // A transaction-shaped line before the period header would have
        // no year to resolve against.
        let period = period.ok_or_else(|| {
            Error::InvalidPeriodFormat("statement period not found before transactions".into())
        })?;

        let tx = match pattern.shape {
            TxShape::Full => Transaction {
                transaction_date: Some(dates::resolve_month_day(&caps["trans"], period, mode)?),
                posting_date: dates::resolve_month_day(&caps["post"], period, mode)?,
                description: caps["desc"].trim().to_string(),
                reference_number: Some(caps["ref"].to_string()),
                account_suffix: Some(caps["suffix"].to_string()),
                amount: amount::normalize(&caps["amount"])?,
                category: String::new(),
            },
            TxShape::InterestFee => Transaction {
                transaction_date: Some(dates::resolve_month_day(&caps["trans"], period, mode)?),
                posting_date: dates::resolve_month_day(&caps["post"], period, mode)?,
                description: caps["desc"].trim().to_string(),
                reference_number: None,
                account_suffix: None,
                amount: amount::normalize(&caps["amount"])?,
                category: String::new(),
            },
            TxShape::Checking => Transaction {
                transaction_date: None,
                posting_date: dates::resolve_month_day(&caps["post"], period, mode)?,
                description: caps["desc"].trim().to_string(),
                reference_number: None,
                account_suffix: None,
                amount: amount::normalize(&caps["amount"])?,
                category: String::new(),
            },
        };
        return Ok(Some(tx));
    }

    Ok(None)
}
