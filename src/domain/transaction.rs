use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use super::{format_cents, parse_cents, Cents};

/// Layout of the date field in a record: two-digit day, two-digit month,
/// four-digit year.
pub const RECORD_DATE_FORMAT: &str = "%d/%m/%Y";

const FIELD_SEPARATOR: char = ',';
const RECORD_FIELDS: usize = 5;

/// A transaction moves money from one account to another.
/// Transactions are immutable once parsed; the ledger only ever appends them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Payer (balance decreases)
    pub from: String,
    /// Payee (balance increases)
    pub to: String,
    pub description: String,
    /// Amount in cents, signed as written in the record
    pub amount: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed record: expected 5 fields, found {fields}")]
    MalformedRecord { fields: usize },

    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        from: impl Into<String>,
        to: impl Into<String>,
        description: impl Into<String>,
        amount: Cents,
    ) -> Self {
        Self {
            date,
            from: from.into(),
            to: to.into(),
            description: description.into(),
            amount,
        }
    }

    /// Parse one raw record line: `DD/MM/YYYY,From,To,Description,Amount`.
    ///
    /// Fields are split on every comma with no quoting. Names and description
    /// are kept verbatim; fields after the fifth are ignored.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() < RECORD_FIELDS {
            return Err(ParseError::MalformedRecord {
                fields: fields.len(),
            });
        }

        let date = parse_record_date(fields[0])?;
        let amount =
            parse_cents(fields[4]).map_err(|_| ParseError::InvalidAmount(fields[4].to_string()))?;

        Ok(Self::new(date, fields[1], fields[2], fields[3], amount))
    }

    /// Serialize back into the record layout accepted by [`Transaction::parse`].
    pub fn to_record(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.date.format(RECORD_DATE_FORMAT),
            self.from,
            self.to,
            self.description,
            format_cents(self.amount)
        )
    }

    /// Returns true if `account` is the payer or the payee
    pub fn involves(&self, account: &str) -> bool {
        self.from == account || self.to == account
    }
}

impl FromStr for Transaction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// chrono accepts unpadded and signed numbers for %d/%m/%Y, so the shape is
// checked before handing the field over.
fn parse_record_date(field: &str) -> Result<NaiveDate, ParseError> {
    let invalid = || ParseError::InvalidDate(field.to_string());

    let bytes = field.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(field, RECORD_DATE_FORMAT).map_err(|_| invalid())
}
