//! Engine error type. Any of these aborts the whole parse: a statement
//! either fully reconciles or produces no output.

use rust_decimal::Decimal;

/// Which reconciliation check rejected the statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceCheck {
    /// Beginning balance plus declared category subtotals vs. declared ending balance.
    Summary,
    /// Beginning balance plus the sum of parsed transactions vs. declared ending balance.
    Transactions,
    /// A per-category subtotal printed at the end of a section.
    Subtotal(String),
}

impl std::fmt::Display for BalanceCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceCheck::Summary => write!(f, "summary"),
            BalanceCheck::Transactions => write!(f, "transaction"),
            BalanceCheck::Subtotal(category) => write!(f, "{category} subtotal"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Token that survives symbol stripping but is not a decimal literal.
    #[error("malformed amount: {0:?}")]
    MalformedAmount(String),

    /// Unparseable or out-of-range month/day token.
    #[error("invalid date token: {0:?}")]
    InvalidDate(String),

    /// Statement period header absent or not matching the institution grammar.
    #[error("invalid statement period: {0}")]
    InvalidPeriodFormat(String),

    /// Reconciliation failure, carrying both sides of the failed check.
    #[error("{check} balance check failed: expected {expected}, computed {computed}")]
    BalanceMismatch {
        check: BalanceCheck,
        expected: Decimal,
        computed: Decimal,
    },

    /// Account-number line absent or malformed.
    #[error("account number line missing or malformed")]
    UnrecognizedAccountFormat,

    /// A line recognizer failed to compile.
    #[error("line recognizer: {0}")]
    Pattern(#[from] regex::Error),

    /// CSV serialization failure (export module only).
    #[error("csv write: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
