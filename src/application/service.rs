use std::path::{Path, PathBuf};

use log::info;

use crate::domain::{HistoryRow, IngestReport, Ledger};

use super::AppError;

/// Application service that owns the ledger and knows how to fill it from
/// files. This is the primary interface for the CLI and the shell.
#[derive(Debug, Default)]
pub struct LedgerService {
    ledger: Ledger,
}

/// Result of loading one input file
#[derive(Debug, Clone)]
pub struct LoadSummary {
    pub path: PathBuf,
    pub report: IngestReport,
}

impl LedgerService {
    /// Load every file in order into a fresh ledger.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<(Self, Vec<LoadSummary>), AppError> {
        let mut service = Self::default();
        let summaries = service.load_files(paths)?;
        Ok((service, summaries))
    }

    /// Read one UTF-8 file and ingest its records. The file's first line is
    /// its header. Only the read itself can fail; bad records are reported in
    /// the summary.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<LoadSummary, AppError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let report = self.ledger.ingest_str(&input);
        info!(
            "{}: {} transaction(s) loaded, {} skipped",
            path.display(),
            report.accepted,
            report.rejected.len()
        );

        Ok(LoadSummary {
            path: path.to_path_buf(),
            report,
        })
    }

    pub fn load_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<Vec<LoadSummary>, AppError> {
        paths.iter().map(|path| self.load_file(path)).collect()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn account_history(&self, name: &str) -> Result<Vec<HistoryRow<'_>>, AppError> {
        Ok(self.ledger.history(name)?)
    }
}
