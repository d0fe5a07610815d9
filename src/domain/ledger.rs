use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, warn};
use thiserror::Error;

use super::{Cents, ParseError, Transaction};

/// In-memory ledger: the accepted transactions in input order, plus the net
/// balance of every account they touch.
///
/// An account exists only once a transaction names it; there is no implicit
/// zero balance for unknown names.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    balances: BTreeMap<String, Cents>,
}

/// Outcome of ingesting one batch of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
    pub rejected: Vec<RejectedRecord>,
}

/// A record that was skipped, either unparseable or unbookable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// 1-based line number within the batch (the header is line 1)
    pub line: usize,
    pub raw: String,
    pub error: RecordError,
}

/// Why a record was left out of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("balance of {0:?} would leave the representable range")]
    BalanceOverflow(String),
}

/// One line of an account's history, seen from that account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow<'a> {
    pub date: NaiveDate,
    /// Negative when the account paid, positive when it received
    pub amount: Cents,
    pub counterparty: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("no account named {0:?}")]
    AccountNotFound(String),
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    pub fn merge(&mut self, other: IngestReport) {
        self.accepted += other.accepted;
        self.rejected.extend(other.rejected);
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a batch of raw record lines. The first line is a header and is
    /// discarded unread. Records that fail to parse, or whose amount would
    /// push a balance out of range, are skipped, logged and listed in the
    /// returned report; the batch never stops early.
    ///
    /// Ingesting the same batch twice records every transaction twice.
    pub fn ingest_batch<I, S>(&mut self, lines: I) -> IngestReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = IngestReport::default();

        for (index, raw) in lines.into_iter().enumerate().skip(1) {
            let raw = raw.as_ref();
            let line = index + 1;

            let outcome = Transaction::parse(raw)
                .map_err(RecordError::from)
                .and_then(|transaction| self.record(transaction));

            match outcome {
                Ok(()) => report.accepted += 1,
                Err(error) => {
                    warn!("line {}: could not record transaction, skipping: {}", line, error);
                    report.rejected.push(RejectedRecord {
                        line,
                        raw: raw.to_string(),
                        error,
                    });
                }
            }
        }

        report
    }

    /// Ingest the full text of one input file. Trailing blank lines are
    /// dropped; blank lines in the middle are still treated as records.
    pub fn ingest_str(&mut self, input: &str) -> IngestReport {
        let mut lines: Vec<&str> = input.lines().collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        self.ingest_batch(lines)
    }

    // Both new balances are computed before either is stored, so a rejected
    // record leaves the ledger untouched.
    fn record(&mut self, transaction: Transaction) -> Result<(), RecordError> {
        let overflow = |account: &str| RecordError::BalanceOverflow(account.to_string());
        let to_balance = self.balance(&transaction.to).unwrap_or(0);
        let from_balance = self.balance(&transaction.from).unwrap_or(0);

        let (new_to, new_from) = if transaction.from == transaction.to {
            (to_balance, from_balance)
        } else {
            (
                to_balance
                    .checked_add(transaction.amount)
                    .ok_or_else(|| overflow(&transaction.to))?,
                from_balance
                    .checked_sub(transaction.amount)
                    .ok_or_else(|| overflow(&transaction.from))?,
            )
        };

        debug!(
            "{} -> {} ({} cents)",
            transaction.from, transaction.to, transaction.amount
        );
        self.balances.insert(transaction.to.clone(), new_to);
        self.balances.insert(transaction.from.clone(), new_from);
        self.transactions.push(transaction);
        Ok(())
    }

    /// Net balance of every account touched so far, ordered by name.
    pub fn balances(&self) -> impl Iterator<Item = (&str, Cents)> {
        self.balances
            .iter()
            .map(|(name, balance)| (name.as_str(), *balance))
    }

    pub fn balance(&self, account: &str) -> Option<Cents> {
        self.balances.get(account).copied()
    }

    pub fn contains_account(&self, account: &str) -> bool {
        self.balances.contains_key(account)
    }

    /// Every transaction naming `account`, in input order, signed from the
    /// account's point of view. A transaction paying the account from itself
    /// yields a paying row followed by a receiving row.
    pub fn history(&self, account: &str) -> Result<Vec<HistoryRow<'_>>, LedgerError> {
        if !self.contains_account(account) {
            return Err(LedgerError::AccountNotFound(account.to_string()));
        }

        let mut rows = Vec::new();
        for tx in self.transactions.iter().filter(|tx| tx.involves(account)) {
            if tx.from == account {
                rows.push(HistoryRow {
                    date: tx.date,
                    amount: -tx.amount,
                    counterparty: &tx.to,
                    description: &tx.description,
                });
            }
            if tx.to == account {
                rows.push(HistoryRow {
                    date: tx.date,
                    amount: tx.amount,
                    counterparty: &tx.from,
                    description: &tx.description,
                });
            }
        }
        Ok(rows)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
