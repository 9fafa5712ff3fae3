//! End-to-end parses of full statement dumps, one per institution format,
//! plus the rejection paths a doctored statement must hit.

use banktx_core::{
    export, parse_statement, BalanceCheck, Error, Institution,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const BOFA_CC_STATEMENT: &str = r#"
Account# 4400 1234 5678 1234
September 12 - October 11, 2024

Account Summary/Payment Information
Previous Balance $1,905.57
Payments and Other Credits -$1,977.21
Purchases and Adjustments $1,121.54
Fees Charged $0.00
Interest Charged $0.00
New Balance Total $1,049.90

Transactions

TransactionDate PostingDate Description ReferenceNumber AccountNumber Amount Total

Payments and Other Credits
09/28 09/30 PAYMENT - THANK YOU 0027 1234 -1,905.57
09/30 10/02 THE HOME DEPOT #1111 TOWN STATE 1579 1234 -55.42
10/08 10/09 COSTCO WHSE #1111 TOWN STATE 6307 1234 -16.22
TOTAL PAYMENTS AND OTHER CREDITS FOR THIS PERIOD -$1,977.21


Purchases and Adjustments
09/13 09/16 ERERE RERE COUNTY SCHOOL FDFDDF-DDFDFD DF 0881 1234 42.75
09/14 09/16 MY HEALTH RERERTDFDF 4912 1234 34.18
09/15 09/16 Subway 12345 SDRE ER 0067 1234 25.48
09/15 09/16 B'S PRODUCE TOWN CITY STATE 9139 1234 4.00
09/19 09/20 WAL-MART #1111, TOWN, STATE 5210 1234 0.98
09/19 09/20 COSTCO WHSE #1111 TOWN STATE 6299 1234 274.90
09/20 09/23 TST*WATERPARK - KIOSK 1 TOWN STATE 3524 1234 14.90
09/20 09/23 TST*WATERPARK - KIOSK 1 TOWN STATE 3557 1234 6.40
09/21 09/23 METRO 111-TOWN N TOWN STATE 5679 1234 46.54
09/22 09/23 Google 122X232 111-2222222 BC 7059 1234 94.23
09/25 09/26 COSTCO WHSE #1111 TOWN STATE 8119 1234 93.49
09/27 09/30 HOMEDEPOT.COM 111-111-1111 BC 8383 1234 54.92
09/30 10/01 LOWES #01878* TOWN STATE 8740 1234 14.73
09/30 10/02 THE HOME DEPOT #3644 TOWN STATE 2309 1234 64.70
10/01 10/02 WHOLEFDS CAR 1111 TOWN STATE 5423 1234 60.10
10/02 10/03 COSTCO WHSE #1206 TOWN STATE 2910 1234 142.13
10/03 10/04 HELLOMONKEY STUDIOS HTTPSWWW.CODECA 6774 1234 27.04
10/05 10/07 MY CHURCH EWWEW WEWEWE 5336 1234 10.00
10/06 10/07 DUNKIN #111111 TOWN STATE 3379 1234 3.64
10/11 10/11 SP HAIR HTTPSWWW.HAIR 0637 1234 106.43
TOTAL PURCHASES AND ADJUSTMENTS FOR THIS PERIOD $1,121.54


Interest Charged
10/11 10/11 INTEREST CHARGED ON PURCHASES 0.00
10/11 10/11 INTEREST CHARGED ON BALANCE TRANSFERS 0.00
10/11 10/11 INTEREST CHARGED ON DIR DEP&CHK CASHADV 0.00
10/11 10/11 INTEREST CHARGED ON BANK CASH ADVANCES 0.00
TOTAL INTEREST CHARGED FOR THIS PERIOD $0.00
"#;

const TD_STATEMENT: &str = r#"
Statement Period: Mar 21 2023-Apr 20 2023
TD Convenience Checking
Some Name
Account # 123-4567890

ACCOUNT SUMMARY
Beginning Balance 10,750.35
Electronic Deposits 16,918.44
Electronic Payments 17,537.72
Ending Balance 10,131.07

DAILY ACCOUNT ACTIVITY
Electronic Deposits
POSTING DATE DESCRIPTION AMOUNT
03/22 TD ZELLE RECEIVED, erer434ree r34rere re5rerer4344re 418.00
04/02 ACH DEPOSIT, rere erer ererereL 6,377.30
04/08 ACH DEPOSIT, fererer  erereer dfdferr 6,377.30
04/18 ACH DEPOSIT, rere rer4tr rtrtrrtr 3,745.84
Subtotal: 16,918.44
Electronic Payments
POSTING DATE DESCRIPTION AMOUNT
03/28 ELECTRONIC PMT-WEB, BKOFAM CK WEBXFR TRANSFER ****234533 1,000.00
03/28 TD BILL PAY SERV, BANK OF AMERICA ONLINE PMT TDB****34454454 4,223.27
04/11 TD BILL PAY SERV, BANK OF AMERICA ONLINE PMT TDB****34454454 500.00
04/11 TD BILL PAY SERV, BANK OF AMERICA ONLINE PMT TDB****34454454 4,313.34
04/11 ELECTRONIC PMT-WEB, EEERERERERE MTG PAYMENTS ****311244 6,208.46
04/12 ELECTRONIC PMT-WEB, ERERERE CARD RER PAYMNT ****63101563793 292.65
04/12 ELECTRONIC PMT-WEB, REREREER CK WEBXFR TRANSFER ****062167 1,000.00
Subtotal: 17,537.72
"#;

// Minimal checking statement: one deposit, one payment.
const TD_MINIMAL: &str = r#"
Statement Period: Mar 21 2023-Apr 20 2023
Account # 123-4567890

ACCOUNT SUMMARY
Beginning Balance 10,750.35
Electronic Deposits 418.00
Electronic Payments 1,000.00
Ending Balance 10,168.35

DAILY ACCOUNT ACTIVITY
Electronic Deposits
POSTING DATE DESCRIPTION AMOUNT
03/22 TD ZELLE RECEIVED, test sender 418.00
Subtotal: 418.00
Electronic Payments
POSTING DATE DESCRIPTION AMOUNT
03/28 ELECTRONIC PMT-WEB, CK WEBXFR TRANSFER ****234533 1,000.00
Subtotal: 1,000.00
"#;

const BOFA_CC_CROSS_YEAR: &str = r#"
Account# 4400 1234 5678 9999
December 12 - January 11, 2024

Account Summary/Payment Information
Previous Balance $100.00
Payments and Other Credits -$50.00
Purchases and Adjustments $75.00
Fees Charged $0.00
Interest Charged $0.00
New Balance Total $125.00

Payments and Other Credits
12/20 12/21 PAYMENT - THANK YOU 0001 9999 -50.00

Purchases and Adjustments
01/10 01/10 COFFEE SHOP TOWN ST 0002 9999 75.00
"#;

#[test]
fn test_bofa_cc_full_statement() {
    let s = parse_statement(BOFA_CC_STATEMENT, Institution::BofaCc).unwrap();

    assert_eq!(s.account_number, "4400 1234 5678 1234");
    assert_eq!(s.period.start, date(2024, 9, 12));
    assert_eq!(s.period.end, date(2024, 10, 11));
    assert_eq!(s.beginning_balance, dec!(1905.57));
    assert_eq!(s.ending_balance, dec!(1049.90));

    // 3 payments + 20 purchases + 4 zero-amount interest lines.
    assert_eq!(s.transactions.len(), 27);

    let first = &s.transactions[0];
    assert_eq!(first.transaction_date, Some(date(2024, 9, 28)));
    assert_eq!(first.posting_date, date(2024, 9, 30));
    assert_eq!(first.description, "PAYMENT - THANK YOU");
    assert_eq!(first.reference_number.as_deref(), Some("0027"));
    assert_eq!(first.account_suffix.as_deref(), Some("1234"));
    assert_eq!(first.amount, dec!(-1905.57));
    assert_eq!(first.category, "Payments and Other Credits");

    let interest: Vec<_> = s
        .transactions
        .iter()
        .filter(|tx| tx.category == "Interest Charged")
        .collect();
    assert_eq!(interest.len(), 4);
    assert!(interest.iter().all(|tx| tx.amount == Decimal::ZERO));
    assert!(interest.iter().all(|tx| tx.reference_number.is_none()));
}

#[test]
fn test_bofa_legacy_discards_interest_lines() {
    // Same dump, legacy profile: its pattern set has no interest shape,
    // so those lines are dropped rather than failing the parse.
    let s = parse_statement(BOFA_CC_STATEMENT, Institution::Bofa).unwrap();

    assert_eq!(s.transactions.len(), 23);
    assert!(s.transactions.iter().all(|tx| !tx.description.contains("INTEREST CHARGED")));
    assert_eq!(s.ending_balance, dec!(1049.90));
}

#[test]
fn test_td_full_statement() {
    let s = parse_statement(TD_STATEMENT, Institution::Td).unwrap();

    assert_eq!(s.account_number, "123-4567890");
    assert_eq!(s.period.start, date(2023, 3, 21));
    assert_eq!(s.period.end, date(2023, 4, 20));
    assert_eq!(s.beginning_balance, dec!(10750.35));
    assert_eq!(s.ending_balance, dec!(10131.07));
    assert_eq!(s.transactions.len(), 11);

    let deposits: Decimal = s
        .transactions
        .iter()
        .filter(|tx| tx.category == "Electronic Deposits")
        .map(|tx| tx.amount)
        .sum();
    let payments: Decimal = s
        .transactions
        .iter()
        .filter(|tx| tx.category == "Electronic Payments")
        .map(|tx| tx.amount)
        .sum();
    assert_eq!(deposits, dec!(16918.44));
    assert_eq!(payments, dec!(-17537.72));
}

#[test]
fn test_td_minimal_scenario() {
    let s = parse_statement(TD_MINIMAL, Institution::Td).unwrap();

    assert_eq!(s.transactions.len(), 2);

    let deposit = &s.transactions[0];
    assert_eq!(deposit.posting_date, date(2023, 3, 22));
    assert_eq!(deposit.transaction_date, None);
    assert_eq!(deposit.amount, dec!(418.00));
    assert_eq!(deposit.category, "Electronic Deposits");

    let payment = &s.transactions[1];
    assert_eq!(payment.posting_date, date(2023, 3, 28));
    assert_eq!(payment.amount, dec!(-1000.00));
    assert_eq!(payment.category, "Electronic Payments");
}

#[test]
fn test_cross_year_credit_card_statement() {
    let s = parse_statement(BOFA_CC_CROSS_YEAR, Institution::BofaCc).unwrap();

    assert_eq!(s.period.start, date(2023, 12, 12));
    assert_eq!(s.period.end, date(2024, 1, 11));

    // Month greater than the end month lands in the start year.
    assert_eq!(s.transactions[0].transaction_date, Some(date(2023, 12, 20)));
    assert_eq!(s.transactions[1].transaction_date, Some(date(2024, 1, 10)));
}

#[test]
fn test_doctored_ending_balance_fails_summary_check() {
    let doctored = TD_MINIMAL.replace("Ending Balance 10,168.35", "Ending Balance 10,999.99");
    let err = parse_statement(&doctored, Institution::Td).unwrap_err();
    match err {
        Error::BalanceMismatch { check, expected, computed } => {
            assert_eq!(check, BalanceCheck::Summary);
            assert_eq!(expected, dec!(10999.99));
            assert_eq!(computed, dec!(10168.35));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_doctored_transaction_fails_transaction_check() {
    // Summary figures stay consistent; one parsed amount changes, so only
    // the transaction-sum check can catch it.
    let doctored = BOFA_CC_CROSS_YEAR.replace(
        "01/10 01/10 COFFEE SHOP TOWN ST 0002 9999 75.00",
        "01/10 01/10 COFFEE SHOP TOWN ST 0002 9999 80.00",
    );
    let err = parse_statement(&doctored, Institution::BofaCc).unwrap_err();
    assert!(matches!(
        err,
        Error::BalanceMismatch { check: BalanceCheck::Transactions, .. }
    ));
}

#[test]
fn test_td_subtotal_mismatch() {
    let doctored = TD_MINIMAL.replace("Subtotal: 418.00", "Subtotal: 500.00");
    let err = parse_statement(&doctored, Institution::Td).unwrap_err();
    match err {
        Error::BalanceMismatch { check: BalanceCheck::Subtotal(category), .. } => {
            assert_eq!(category, "Electronic Deposits");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_csv_round_trip_reproduces_totals() {
    let s = parse_statement(TD_STATEMENT, Institution::Td).unwrap();

    let mut buf = Vec::new();
    export::write_csv(&s, &mut buf).unwrap();

    let mut reader = csv::Reader::from_reader(buf.as_slice());
    let mut total = Decimal::ZERO;
    for record in reader.records() {
        let record = record.unwrap();
        total += record[5].parse::<Decimal>().unwrap();
    }

    assert_eq!(s.beginning_balance + total, s.ending_balance);
}
