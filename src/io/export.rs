use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::application::AppError;
use crate::domain::{format_cents, HistoryRow, Ledger};

/// Balance of one account as written by the exporters
#[derive(Debug, Clone, Serialize)]
pub struct BalanceRecord<'a> {
    pub account: &'a str,
    pub balance: String,
}

/// One history row as written by the exporters
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord<'a> {
    pub date: NaiveDate,
    pub amount: String,
    pub counterparty: &'a str,
    pub description: &'a str,
}

impl<'a> From<&HistoryRow<'a>> for HistoryRecord<'a> {
    fn from(row: &HistoryRow<'a>) -> Self {
        Self {
            date: row.date,
            amount: format_cents(row.amount),
            counterparty: row.counterparty,
            description: row.description,
        }
    }
}

fn balance_records(ledger: &Ledger) -> Vec<BalanceRecord<'_>> {
    ledger
        .balances()
        .map(|(account, balance)| BalanceRecord {
            account,
            balance: format_cents(balance),
        })
        .collect()
}

/// Export all balances to CSV format
pub fn export_balances_csv<W: Write>(ledger: &Ledger, writer: W) -> Result<usize, AppError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut count = 0;
    for record in balance_records(ledger) {
        csv_writer.serialize(record)?;
        count += 1;
    }

    // serialize() only emits the header alongside the first row
    if count == 0 {
        csv_writer.write_record(["account", "balance"])?;
    }

    csv_writer.flush()?;
    Ok(count)
}

/// Export one account's history to CSV format
pub fn export_history_csv<W: Write>(rows: &[HistoryRow<'_>], writer: W) -> Result<usize, AppError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["date", "amount", "counterparty", "description"])?;

    for row in rows {
        csv_writer.write_record([
            row.date.to_string(),
            format_cents(row.amount),
            row.counterparty.to_string(),
            row.description.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(rows.len())
}

/// Export all balances as a pretty-printed JSON array
pub fn export_balances_json<W: Write>(ledger: &Ledger, mut writer: W) -> Result<usize, AppError> {
    let records = balance_records(ledger);
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(records.len())
}

/// Export one account's history as a pretty-printed JSON array
pub fn export_history_json<W: Write>(
    rows: &[HistoryRow<'_>],
    mut writer: W,
) -> Result<usize, AppError> {
    let records: Vec<HistoryRecord<'_>> = rows.iter().map(HistoryRecord::from).collect();
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(records.len())
}
