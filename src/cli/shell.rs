use std::io::{self, BufRead, Write};

use log::{trace, warn};

use crate::domain::{format_cents, HistoryRow, Ledger};

const PROMPT: &str = "\nWhat would you like to do?";
const UNRECOGNISED: &str =
    "I don't recognise that command, please either type 'List All' or 'List [Account]'";
const NO_SUCH_ACCOUNT: &str = "Sorry, there is no account with that name";

/// One line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    ListAll,
    ListAccount(String),
    Unrecognized(String),
}

impl Command {
    /// Keywords match case-insensitively; account names are taken exactly
    /// as typed.
    pub fn parse(input: &str) -> Self {
        if input.eq_ignore_ascii_case("exit") {
            return Command::Exit;
        }

        match input.get(..5) {
            Some(verb) if verb.eq_ignore_ascii_case("list ") => {
                let target = &input[5..];
                if target.eq_ignore_ascii_case("all") {
                    Command::ListAll
                } else {
                    Command::ListAccount(target.to_string())
                }
            }
            _ => Command::Unrecognized(input.to_string()),
        }
    }
}

/// Read-eval-print loop over a loaded ledger.
pub struct Shell<'a> {
    ledger: &'a Ledger,
}

impl<'a> Shell<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Prompt, read and answer commands until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> io::Result<()> {
        let mut line = String::new();
        loop {
            writeln!(output, "{}", PROMPT)?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let command = Command::parse(line.trim_end_matches(['\n', '\r']));
            trace!("shell command: {:?}", command);

            if command == Command::Exit {
                return Ok(());
            }
            self.execute(&command, &mut output)?;
        }
    }

    pub fn execute<W: Write>(&self, command: &Command, output: &mut W) -> io::Result<()> {
        match command {
            Command::Exit => Ok(()),
            Command::ListAll => write_balances(self.ledger, output),
            Command::ListAccount(name) => match self.ledger.history(name) {
                Ok(rows) => write_history(name, &rows, output),
                Err(_) => writeln!(output, "{}", NO_SUCH_ACCOUNT),
            },
            Command::Unrecognized(input) => {
                warn!("unrecognised command: {}", input);
                writeln!(output, "{}", UNRECOGNISED)
            }
        }
    }
}

/// One `name: balance` line per account.
pub fn write_balances<W: Write>(ledger: &Ledger, output: &mut W) -> io::Result<()> {
    for (name, balance) in ledger.balances() {
        writeln!(output, "{}: {}", name, format_cents(balance))?;
    }
    Ok(())
}

/// Header block followed by one tab-separated row per transaction.
pub fn write_history<W: Write>(
    account: &str,
    rows: &[HistoryRow<'_>],
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "Transactions for account {}: ", account)?;
    writeln!(output, "Date\t\t| Value\t| Who\t\t| Description")?;
    writeln!(output, "{}", "-".repeat(65))?;
    for row in rows {
        writeln!(
            output,
            "{}\t| {}\t| {}\t| {}",
            row.date,
            format_cents(row.amount),
            row.counterparty,
            row.description
        )?;
    }
    Ok(())
}
