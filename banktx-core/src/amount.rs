//! Currency token normalization.
//!
//! Statements print amounts as "$1,905.57", "-$1,977.21" or "0.00". Strip
//! the currency symbol and grouping separators, keep the sign, and parse
//! the rest as an exact decimal. Only `.` decimal / `,` grouping locales
//! are supported.

use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// Parse a locale-formatted currency token into an exact decimal.
pub fn normalize(token: &str) -> Result<Decimal> {
    let cleaned = token.trim().replace(['$', ','], "");
    cleaned
        .parse::<Decimal>()
        .map_err(|_| Error::MalformedAmount(token.to_string()))
}
