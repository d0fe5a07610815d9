// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::io::Write;

use anyhow::Result;
use tempfile::NamedTempFile;

pub const HEADER: &str = "Date,From,To,Narrative,Amount";

/// A small, clean batch in the layout of the yearly exports
pub const TRANSACTIONS_2014: &str = "\
Date,From,To,Narrative,Amount
01/01/2014,Jon A,Sarah T,Pokemon Training,7.8
01/01/2014,Stephen S,Tim L,Pokemon Training,8.8
02/01/2014,Sarah T,Jon A,Lunch,4.5
03/01/2014,Tim L,Jon A,Coffee,2.2
";

/// A batch mixing good records with every kind of bad one
pub const DODGY_2015: &str = "\
Date,From,To,Narrative,Amount
18/01/2015,Jon A,Tim L,Lunch,3.03
not a date,Jon A,Tim L,Dinner,12.00
19/01/2015,Tim L,Stephen S,Lunch,xx
20/01/2015,Stephen S
21/01/2015,Stephen S,Jon A,Cinema,-1.50
";

/// Helper to write `contents` into a temporary transaction file
pub fn write_transactions(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Header plus the given body lines, newline separated
pub fn batch(body: &[&str]) -> Vec<String> {
    std::iter::once(HEADER)
        .chain(body.iter().copied())
        .map(str::to_string)
        .collect()
}
