mod common;

use anyhow::Result;
use chrono::NaiveDate;
use supportbank::application::{AppError, LedgerService};
use supportbank::domain::{
    format_cents, Cents, Ledger, LedgerError, ParseError, RecordError, Transaction,
};

use common::{batch, write_transactions, DODGY_2015, TRANSACTIONS_2014};

#[test]
fn test_lunch_example() {
    let mut ledger = Ledger::new();
    let report = ledger.ingest_batch(batch(&["01/02/2015,Alice,Bob,Lunch,10.00"]));
    assert_eq!(report.accepted, 1);

    let balances: Vec<(String, String)> = ledger
        .balances()
        .map(|(name, balance)| (name.to_string(), format_cents(balance)))
        .collect();
    assert!(balances.contains(&("Bob".to_string(), "10.00".to_string())));
    assert!(balances.contains(&("Alice".to_string(), "-10.00".to_string())));

    let history = ledger.history("Bob").unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2015, 2, 1).unwrap());
    assert_eq!(history[0].amount, 1000);
    assert_eq!(history[0].counterparty, "Alice");
    assert_eq!(history[0].description, "Lunch");
}

#[test]
fn test_dodgy_records_are_skipped() -> Result<()> {
    let file = write_transactions(DODGY_2015)?;
    let (service, summaries) = LedgerService::from_files(&[file.path()])?;

    let report = &summaries[0].report;
    assert_eq!(report.accepted, 2);
    let errors: Vec<_> = report
        .rejected
        .iter()
        .map(|r| (r.line, r.error.clone()))
        .collect();
    assert_eq!(
        errors,
        vec![
            (3, RecordError::Parse(ParseError::InvalidDate("not a date".into()))),
            (4, RecordError::Parse(ParseError::InvalidAmount("xx".into()))),
            (5, RecordError::Parse(ParseError::MalformedRecord { fields: 2 })),
        ]
    );

    assert_eq!(
        service.ledger().balances().collect::<Vec<_>>(),
        vec![("Jon A", -453), ("Stephen S", 150), ("Tim L", 303)]
    );
    Ok(())
}

#[test]
fn test_multiple_files_accumulate() -> Result<()> {
    let first = write_transactions(TRANSACTIONS_2014)?;
    let second = write_transactions(DODGY_2015)?;
    let (service, _) = LedgerService::from_files(&[first.path(), second.path()])?;

    let balances: Vec<_> = service.ledger().balances().collect();
    assert_eq!(
        balances,
        vec![
            ("Jon A", -563),
            ("Sarah T", 330),
            ("Stephen S", -730),
            ("Tim L", 963),
        ]
    );

    let total: Cents = balances.iter().map(|(_, b)| b).sum();
    assert_eq!(total, 0);

    let history: Vec<(String, String, &str)> = service
        .account_history("Jon A")?
        .iter()
        .map(|row| (row.date.to_string(), format_cents(row.amount), row.counterparty))
        .collect();
    assert_eq!(
        history,
        vec![
            ("2014-01-01".to_string(), "-7.80".to_string(), "Sarah T"),
            ("2014-01-02".to_string(), "4.50".to_string(), "Sarah T"),
            ("2014-01-03".to_string(), "2.20".to_string(), "Tim L"),
            ("2015-01-18".to_string(), "-3.03".to_string(), "Tim L"),
            ("2015-01-21".to_string(), "-1.50".to_string(), "Stephen S"),
        ]
    );
    Ok(())
}

#[test]
fn test_loading_same_file_twice_doubles_balances() -> Result<()> {
    let file = write_transactions(TRANSACTIONS_2014)?;
    let (service, _) = LedgerService::from_files(&[file.path(), file.path()])?;

    assert_eq!(service.ledger().len(), 8);
    assert_eq!(service.ledger().balance("Tim L"), Some(1320));

    let total: Cents = service.ledger().balances().map(|(_, b)| b).sum();
    assert_eq!(total, 0);
    Ok(())
}

#[test]
fn test_balances_near_the_limit_still_sum_to_zero() -> Result<()> {
    let file = write_transactions(
        "Date,From,To,Narrative,Amount\n\
         01/01/2015,A,B,big,90000000000000000\n\
         02/01/2015,A,B,big,90000000000000000\n\
         03/01/2015,C,A,after,1.00\n",
    )?;
    let (service, summaries) = LedgerService::from_files(&[file.path()])?;

    let report = &summaries[0].report;
    assert_eq!(report.accepted, 2);
    assert_eq!(report.rejected[0].line, 3);
    assert!(matches!(report.rejected[0].error, RecordError::BalanceOverflow(_)));

    let total: i128 = service
        .ledger()
        .balances()
        .map(|(_, balance)| i128::from(balance))
        .sum();
    assert_eq!(total, 0);
    assert_eq!(service.ledger().balance("A"), Some(-8_999_999_999_999_999_900));
    Ok(())
}

#[test]
fn test_history_rows_only_for_involved_transactions() {
    let mut ledger = Ledger::new();
    ledger.ingest_str(TRANSACTIONS_2014);

    for (account, _) in ledger.balances() {
        let rows = ledger.history(account).unwrap();
        let involved: Vec<&Transaction> = ledger
            .transactions()
            .iter()
            .filter(|tx| tx.involves(account))
            .collect();
        assert_eq!(rows.len(), involved.len(), "{account}");

        for (row, tx) in rows.iter().zip(involved) {
            if tx.from == account {
                assert_eq!(row.amount, -tx.amount);
                assert_eq!(row.counterparty, tx.to);
            } else {
                assert_eq!(row.amount, tx.amount);
                assert_eq!(row.counterparty, tx.from);
            }
        }
    }
}

#[test]
fn test_history_not_found() {
    let mut ledger = Ledger::new();
    ledger.ingest_str(TRANSACTIONS_2014);

    assert_eq!(
        ledger.history("Nobody"),
        Err(LedgerError::AccountNotFound("Nobody".into()))
    );
    assert_eq!(
        ledger.history("jon a"),
        Err(LedgerError::AccountNotFound("jon a".into()))
    );
}

#[test]
fn test_parsed_records_roundtrip() {
    let mut ledger = Ledger::new();
    ledger.ingest_str(TRANSACTIONS_2014);

    for tx in ledger.transactions() {
        assert_eq!(&Transaction::parse(&tx.to_record()).unwrap(), tx);
    }
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("Transactions2014.csv");

    let err = LedgerService::from_files(&[&missing]).unwrap_err();
    assert!(matches!(err, AppError::Io { .. }));
    assert!(err.to_string().contains("Transactions2014.csv"));
}
