//! Warehouse stock files: retrieval from the FTP server and parsing.

mod ftp;
mod parse;

pub use ftp::FtpStockSource;
pub use parse::parse_stock_csv;

use crate::reconciliation::JoinKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("FTP error: {0}")]
    Ftp(#[from] suppaftp::FtpError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Stock file is missing column '{0}'")]
    MissingColumn(String),
}

/// One stock line of a warehouse file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRecord {
    pub article: String,
    pub brand: String,
    /// Remaining columns, aligned with [`StockTable::columns`]
    pub fields: Vec<String>,
}

impl StockRecord {
    pub fn key(&self) -> JoinKey {
        JoinKey::new(&self.article, &self.brand)
    }
}

/// Parsed stock file with price and currency already removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockTable {
    /// Names of the pass-through columns, in file order
    pub columns: Vec<String>,
    pub rows: Vec<StockRecord>,
}

impl StockTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Where warehouse stock files come from
pub trait StockSource {
    /// Retrieve the named file as raw bytes
    fn fetch(&mut self, file_name: &str) -> Result<Vec<u8>, StockError>;
}

/// Fetch one stock file and parse it
pub fn get_stock<S: StockSource + ?Sized>(
    source: &mut S,
    file_name: &str,
) -> Result<StockTable, StockError> {
    let bytes = source.fetch(file_name)?;
    let table = parse_stock_csv(&bytes)?;
    tracing::debug!("Stock file '{}' has {} rows", file_name, table.len());
    Ok(table)
}
