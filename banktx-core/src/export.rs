//! CSV serialization of validated statements.
//!
//! Column layout is fixed across institutions; fields a format does not
//! carry are left empty. Dates are MM/DD/YYYY, amounts fixed two-decimal.

use std::io::Write;

use crate::error::Result;
use crate::types::{Statement, Transaction};

pub const CSV_HEADER: [&str; 7] = [
    "TransactionDate",
    "PostingDate",
    "Description",
    "ReferenceNumber",
    "AccountNumber",
    "Amount",
    "Category",
];

/// Output filename convention: `{account}|{start}_to_{end}.csv`.
pub fn csv_file_name(statement: &Statement) -> String {
    format!(
        "{}|{}_to_{}.csv",
        statement.account_number,
        statement.period.start.format("%b_%d_%Y"),
        statement.period.end.format("%b_%d_%Y")
    )
}

/// Write one statement's transactions, header included.
pub fn write_csv<W: Write>(statement: &Statement, out: W) -> Result<()> {
    write_all_csv(std::slice::from_ref(statement), out)
}

/// Write several statements into one CSV with a single header row.
pub fn write_all_csv<W: Write>(statements: &[Statement], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for statement in statements {
        for tx in &statement.transactions {
            writer.write_record(row(tx))?;
        }
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

fn row(tx: &Transaction) -> [String; 7] {
    [
        tx.transaction_date
            .map(|d| d.format("%m/%d/%Y").to_string())
            .unwrap_or_default(),
        tx.posting_date.format("%m/%d/%Y").to_string(),
        tx.description.clone(),
        tx.reference_number.clone().unwrap_or_default(),
        tx.account_suffix.clone().unwrap_or_default(),
        format!("{:.2}", tx.amount),
        tx.category.clone(),
    ]
}
