//! Per-institution statement formats.
//!
//! The institutions share one scanning engine; everything that differs
//! between them lives in a `Profile`: line recognizers, transaction
//! shapes, category sign convention and the period grammar.

use regex::Regex;
use rust_decimal::Decimal;

use crate::dates::{DateMode, PeriodGrammar};
use crate::error::Result;
use crate::patterns::TxPattern;

/// Supported institution statement formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Institution {
    /// Bank of America credit card, legacy layout. Its pattern set does
    /// not cover interest-charge lines; they are discarded as
    /// unprocessed. Known gap, kept as-is.
    Bofa,
    /// Bank of America credit card, current layout.
    BofaCc,
    /// TD Bank checking.
    Td,
}

impl std::str::FromStr for Institution {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bofa" => Ok(Institution::Bofa),
            "bofa-cc" | "bofa_cc" | "bofacc" => Ok(Institution::BofaCc),
            "td" => Ok(Institution::Td),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Institution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Institution::Bofa => write!(f, "bofa"),
            Institution::BofaCc => write!(f, "bofa-cc"),
            Institution::Td => write!(f, "td"),
        }
    }
}

impl Institution {
    /// Parse an institution name as passed on the command line.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Guess the institution from a statement file name, e.g.
    /// `plain_bofa-cc-1810-2023-08-11`.
    pub fn sniff(file_name: &str) -> Option<Self> {
        let lower = file_name.to_lowercase();
        if lower.contains("bofa-cc") || lower.contains("bofa_cc") {
            Some(Institution::BofaCc)
        } else if lower.contains("bofa") {
            Some(Institution::Bofa)
        } else if lower.contains("td") {
            Some(Institution::Td)
        } else {
            None
        }
    }

    /// Build this institution's scanning configuration.
    pub fn profile(self) -> Result<Profile> {
        match self {
            Institution::Bofa => bofa(),
            Institution::BofaCc => bofa_cc(),
            Institution::Td => td(),
        }
    }
}

/// What a declared summary figure feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryRole {
    Beginning,
    Ending,
    /// A per-category total; `sign` is applied when the figure enters the
    /// summary reconciliation (credit-card figures carry their own sign,
    /// checking figures print unsigned).
    Category { sign: i64 },
}

/// A summary line: label prefix plus the role of its trailing amount.
/// A line carrying the label with nothing after it is a section header,
/// not a summary field.
#[derive(Debug, Clone, Copy)]
pub struct SummaryField {
    pub label: &'static str,
    pub role: SummaryRole,
}

/// Sign applied to parsed transaction amounts.
#[derive(Debug, Clone, Copy)]
pub enum SignConvention {
    /// Amounts carry their own sign on the page (credit cards: payments
    /// and credits are printed negative).
    AsPrinted,
    /// Amounts print unsigned and the category decides (checking:
    /// deposits positive, payments negative).
    ByCategory(&'static [(&'static str, i64)]),
}

impl SignConvention {
    pub fn apply(&self, category: &str, amount: Decimal) -> Decimal {
        match self {
            SignConvention::AsPrinted => amount,
            SignConvention::ByCategory(signs) => {
                match signs.iter().find(|(c, _)| *c == category) {
                    Some((_, sign)) if *sign < 0 => -amount,
                    _ => amount,
                }
            }
        }
    }
}

/// Everything institution-specific the scanner needs for one format.
#[derive(Debug, Clone)]
pub struct Profile {
    pub institution: Institution,
    /// Account-number line; first capture group is the identifier.
    pub account_re: Regex,
    /// Statement-period header line, compiled from the grammar's recognizer.
    pub period_re: Regex,
    pub period_grammar: PeriodGrammar,
    /// Line opening the account-summary section.
    pub summary_header: Option<&'static str>,
    pub summary_fields: &'static [SummaryField],
    /// Bare labels opening a transaction section.
    pub category_headers: &'static [&'static str],
    /// Line prefixes discarded without a state change (column headers,
    /// section titles, per-category TOTAL lines).
    pub boilerplate: &'static [&'static str],
    /// Per-category subtotal line, where the institution prints one;
    /// first capture group is the declared amount.
    pub subtotal_re: Option<Regex>,
    /// Ordered transaction shapes, tried top to bottom.
    pub patterns: Vec<TxPattern>,
    pub date_mode: DateMode,
    pub sign: SignConvention,
}

impl Profile {
    pub fn is_boilerplate(&self, line: &str) -> bool {
        self.boilerplate.iter().any(|prefix| line.starts_with(prefix))
    }
}

fn bofa() -> Result<Profile> {
    Ok(Profile {
        institution: Institution::Bofa,
        account_re: Regex::new(r"^Account#\s*(.+)$")?,
        period_re: Regex::new(PeriodGrammar::MonthDayRange.recognizer())?,
        period_grammar: PeriodGrammar::MonthDayRange,
        summary_header: Some("Account Summary/Payment Information"),
        summary_fields: &[
            SummaryField { label: "Previous Balance", role: SummaryRole::Beginning },
            SummaryField { label: "New Balance Total", role: SummaryRole::Ending },
            SummaryField {
                label: "Payments and Other Credits",
                role: SummaryRole::Category { sign: 1 },
            },
            SummaryField {
                label: "Purchases and Adjustments",
                role: SummaryRole::Category { sign: 1 },
            },
            SummaryField { label: "Interest Charged", role: SummaryRole::Category { sign: 1 } },
        ],
        category_headers: &[
            "Payments and Other Credits",
            "Purchases and Adjustments",
            "Interest Charged",
        ],
        boilerplate: &[
            "TransactionDate PostingDate Description ReferenceNumber AccountNumber Amount Total",
            "Transactions",
            "TOTAL PAYMENTS AND OTHER CREDITS FOR THIS PERIOD",
            "TOTAL PURCHASES AND ADJUSTMENTS FOR THIS PERIOD",
            "TOTAL INTEREST CHARGED FOR THIS PERIOD",
        ],
        subtotal_re: None,
        patterns: vec![TxPattern::full()?],
        date_mode: DateMode::CrossYear,
        sign: SignConvention::AsPrinted,
    })
}

fn bofa_cc() -> Result<Profile> {
    Ok(Profile {
        institution: Institution::BofaCc,
        account_re: Regex::new(r"^Account#\s*(.+)$")?,
        period_re: Regex::new(PeriodGrammar::MonthDayRange.recognizer())?,
        period_grammar: PeriodGrammar::MonthDayRange,
        summary_header: Some("Account Summary/Payment Information"),
        summary_fields: &[
            SummaryField { label: "Previous Balance", role: SummaryRole::Beginning },
            SummaryField { label: "New Balance Total", role: SummaryRole::Ending },
            SummaryField {
                label: "Payments and Other Credits",
                role: SummaryRole::Category { sign: 1 },
            },
            SummaryField {
                label: "Purchases and Adjustments",
                role: SummaryRole::Category { sign: 1 },
            },
            SummaryField { label: "Fees Charged", role: SummaryRole::Category { sign: 1 } },
            SummaryField { label: "Interest Charged", role: SummaryRole::Category { sign: 1 } },
        ],
        category_headers: &[
            "Payments and Other Credits",
            "Purchases and Adjustments",
            "Interest Charged",
            "Fees",
        ],
        boilerplate: &[
            "TransactionDate PostingDate Description ReferenceNumber AccountNumber Amount Total",
            "Transactions",
            "TOTAL PAYMENTS AND OTHER CREDITS FOR THIS PERIOD",
            "TOTAL PURCHASES AND ADJUSTMENTS FOR THIS PERIOD",
            "TOTAL INTEREST CHARGED FOR THIS PERIOD",
            "TOTAL FEES FOR THIS PERIOD",
        ],
        subtotal_re: None,
        patterns: vec![TxPattern::full()?, TxPattern::interest_fee()?],
        date_mode: DateMode::CrossYear,
        sign: SignConvention::AsPrinted,
    })
}

fn td() -> Result<Profile> {
    Ok(Profile {
        institution: Institution::Td,
        account_re: Regex::new(r"^Account # (\d{14}|\d{3}-\d{7})")?,
        period_re: Regex::new(PeriodGrammar::LabeledRange.recognizer())?,
        period_grammar: PeriodGrammar::LabeledRange,
        summary_header: Some("ACCOUNT SUMMARY"),
        summary_fields: &[
            SummaryField { label: "Beginning Balance", role: SummaryRole::Beginning },
            SummaryField { label: "Ending Balance", role: SummaryRole::Ending },
            SummaryField {
                label: "Electronic Deposits",
                role: SummaryRole::Category { sign: 1 },
            },
            SummaryField {
                label: "Electronic Payments",
                role: SummaryRole::Category { sign: -1 },
            },
        ],
        category_headers: &["Electronic Deposits", "Electronic Payments"],
        boilerplate: &["DAILY ACCOUNT ACTIVITY", "POSTING DATE DESCRIPTION AMOUNT"],
        subtotal_re: Some(Regex::new(r"^Subtotal: ([\d,]+\.\d{2})$")?),
        patterns: vec![TxPattern::checking()?],
        date_mode: DateMode::StatementYear,
        sign: SignConvention::ByCategory(&[
            ("Electronic Deposits", 1),
            ("Electronic Payments", -1),
        ]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_names() {
        assert_eq!(Institution::parse("bofa"), Some(Institution::Bofa));
        assert_eq!(Institution::parse("BOFA-CC"), Some(Institution::BofaCc));
        assert_eq!(Institution::parse("td"), Some(Institution::Td));
        assert_eq!(Institution::parse("chase"), None);
    }

    #[test]
    fn test_sniff_file_names() {
        assert_eq!(
            Institution::sniff("plain_bofa-cc-1810-2023-08-11"),
            Some(Institution::BofaCc)
        );
        assert_eq!(Institution::sniff("bofa-2024-09.txt"), Some(Institution::Bofa));
        assert_eq!(Institution::sniff("td-2023-04.txt"), Some(Institution::Td));
        assert_eq!(Institution::sniff("statement.txt"), None);
    }

    #[test]
    fn test_profiles_compile() {
        for institution in [Institution::Bofa, Institution::BofaCc, Institution::Td] {
            institution.profile().unwrap();
        }
    }

    #[test]
    fn test_sign_by_category() {
        let sign = SignConvention::ByCategory(&[
            ("Electronic Deposits", 1),
            ("Electronic Payments", -1),
        ]);
        assert_eq!(sign.apply("Electronic Deposits", dec!(418.00)), dec!(418.00));
        assert_eq!(sign.apply("Electronic Payments", dec!(1000.00)), dec!(-1000.00));
        assert_eq!(sign.apply("", dec!(5.00)), dec!(5.00));
    }
}
