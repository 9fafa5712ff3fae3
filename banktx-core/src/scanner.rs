//! Stateful line scanner shared by every institution profile.
//!
//! One pass over the statement text. Each trimmed line is tested against
//! the profile's recognizers in a fixed order: account number, statement
//! period, summary fields, summary/section headers, category headers,
//! subtotals, boilerplate, and finally the transaction pattern set. Lines
//! matching nothing are logged and discarded; statement vintages vary too
//! much to enumerate every piece of boilerplate, so leniency beats
//! strictness here. Scan state lives in an accumulator local to the call,
//! so parses of distinct files are independent.

use rust_decimal::Decimal;

use crate::amount;
use crate::error::{Error, Result};
use crate::patterns;
use crate::profile::{Profile, SummaryField, SummaryRole};
use crate::reconcile;
use crate::types::{Statement, StatementPeriod, Transaction};

/// Where the scan currently is in the statement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Preamble,
    InSummary,
    /// Inside a transaction section; subsequent transaction lines are
    /// tagged with this category until the next header.
    InCategory(String),
    Done,
}

/// Accumulator threaded through one scan.
#[derive(Debug, Default)]
struct Scan {
    state: ScanState,
    account_number: Option<String>,
    period: Option<StatementPeriod>,
    beginning_balance: Option<Decimal>,
    ending_balance: Option<Decimal>,
    /// Declared category totals from the summary section, sign already
    /// applied per the profile's field roles.
    declared: Vec<(String, Decimal)>,
    transactions: Vec<Transaction>,
}

impl Scan {
    fn current_category(&self) -> &str {
        match &self.state {
            ScanState::InCategory(category) => category,
            _ => "",
        }
    }
}

/// Parse one statement dump against an institution profile, returning the
/// reconciled statement or the first error encountered.
pub fn parse(text: &str, profile: &Profile) -> Result<Statement> {
    let mut scan = Scan::default();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if scan.account_number.is_none() {
            if let Some(caps) = profile.account_re.captures(line) {
                scan.account_number = Some(caps[1].trim().to_string());
                continue;
            }
        }

        if let Some(caps) = profile.period_re.captures(line) {
            scan.period = Some(profile.period_grammar.parse(&caps)?);
            continue;
        }

        if let Some((field, value)) = summary_field(line, profile)? {
            match field.role {
                SummaryRole::Beginning => scan.beginning_balance = Some(value),
                SummaryRole::Ending => scan.ending_balance = Some(value),
                SummaryRole::Category { sign } => {
                    scan.declared
                        .push((field.label.to_string(), value * Decimal::from(sign)));
                }
            }
            continue;
        }

        if profile.summary_header == Some(line) {
            scan.state = ScanState::InSummary;
            continue;
        }

        if profile.category_headers.contains(&line) {
            scan.state = ScanState::InCategory(line.to_string());
            continue;
        }

        if let Some(re) = &profile.subtotal_re {
            if let Some(caps) = re.captures(line) {
                let declared = amount::normalize(&caps[1])?;
                let category = scan.current_category().to_string();
                let declared_signed = profile.sign.apply(&category, declared);
                reconcile::check_subtotal(&category, declared_signed, &scan.transactions)?;
                continue;
            }
        }

        if profile.is_boilerplate(line) {
            continue;
        }

        match patterns::match_transaction(
            line,
            &profile.patterns,
            scan.period.as_ref(),
            profile.date_mode,
        )? {
            Some(mut tx) => {
                tx.category = scan.current_category().to_string();
                tx.amount = profile.sign.apply(&tx.category, tx.amount);
                scan.transactions.push(tx);
            }
            None => tracing::warn!("unprocessed line: {line}"),
        }
    }
    scan.state = ScanState::Done;

    let account_number = scan.account_number.ok_or(Error::UnrecognizedAccountFormat)?;
    let period = scan
        .period
        .ok_or_else(|| Error::InvalidPeriodFormat("statement period line not found".into()))?;

    // Statements without an explicit balance line reconcile against zero;
    // a genuinely missing figure surfaces as a BalanceMismatch below.
    let beginning_balance = scan.beginning_balance.unwrap_or_default();
    let ending_balance = scan.ending_balance.unwrap_or_default();

    reconcile::check_summary(beginning_balance, ending_balance, &scan.declared)?;
    reconcile::check_transactions(beginning_balance, ending_balance, &scan.transactions)?;

    Ok(Statement {
        account_number,
        period,
        beginning_balance,
        ending_balance,
        transactions: scan.transactions,
    })
}

/// Recognize a summary line: a known label followed by an amount-looking
/// suffix. The suffix requirement is what separates a summary line from a
/// bare section header carrying the same label.
fn summary_field<'p>(
    line: &str,
    profile: &'p Profile,
) -> Result<Option<(&'p SummaryField, Decimal)>> {
    for field in profile.summary_fields {
        let Some(rest) = line.strip_prefix(field.label) else {
            continue;
        };
        let rest = rest.trim();
        if rest.is_empty() {
            // Bare label: a category header, handled by the caller.
            return Ok(None);
        }
        if !looks_like_amount(rest) {
            continue;
        }
        return Ok(Some((field, amount::normalize(rest)?)));
    }
    Ok(None)
}

fn looks_like_amount(s: &str) -> bool {
    s.starts_with('-')
        || s.starts_with('$')
        || s.chars().next().is_some_and(|c| c.is_ascii_digit())
}
