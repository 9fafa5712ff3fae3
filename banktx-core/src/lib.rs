//! banktx-core: parse plain-text bank statement dumps into validated
//! transaction ledgers.
//!
//! Supported institution formats:
//! - `bofa` - Bank of America credit card, legacy layout
//! - `bofa-cc` - Bank of America credit card, current layout
//! - `td` - TD Bank checking
//!
//! One scanning engine handles all three; per-institution differences
//! (line recognizers, transaction shapes, sign conventions, period
//! grammar) live in [`profile::Profile`]. A parse either produces a fully
//! reconciled [`Statement`] or fails with a single descriptive error;
//! there is no partial output.
//!
//! ```rust,ignore
//! use banktx_core::{parse_statement, Institution};
//!
//! let text = std::fs::read_to_string("statements/td-2023-04.txt")?;
//! let statement = parse_statement(&text, Institution::Td)?;
//! ```

pub mod amount;
pub mod dates;
pub mod error;
pub mod export;
pub mod patterns;
pub mod profile;
pub mod reconcile;
pub mod scanner;
pub mod types;

pub use error::{BalanceCheck, Error, Result};
pub use profile::{Institution, Profile};
pub use types::{Statement, StatementPeriod, Transaction};

/// Parse one statement dump with the given institution's profile.
pub fn parse_statement(text: &str, institution: Institution) -> Result<Statement> {
    let profile = institution.profile()?;
    scanner::parse(text, &profile)
}
