//! Price lists: workbooks on the network share, merged into one table.

mod parse;
mod share;

pub use parse::parse_price_workbook;
pub use share::{select_price_files, DirectoryShare};

use crate::config::ShareConfig;
use crate::reconciliation::JoinKey;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Workbook '{file}' could not be read: {source}")]
    Workbook {
        file: String,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("Workbook '{0}' has no worksheet")]
    NoWorksheet(String),

    #[error("Workbook '{file}' is missing column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("Workbook '{file}' row {row}: invalid price '{value}'")]
    InvalidPrice {
        file: String,
        row: usize,
        value: String,
    },
}

/// One line of a price workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRecord {
    pub article: String,
    pub brand: String,
    /// `None` when the price cell is empty
    pub price: Option<Decimal>,
}

impl PriceRecord {
    pub fn key(&self) -> JoinKey {
        JoinKey::new(&self.article, &self.brand)
    }
}

/// Union of every qualifying workbook, in listing order. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    pub rows: Vec<PriceRecord>,
}

impl PriceTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn extend(&mut self, other: PriceTable) {
        self.rows.extend(other.rows);
    }
}

/// Directory holding the price workbooks
pub trait PriceShare {
    /// Names of the entries in the directory
    fn list(&self) -> Result<Vec<String>, PriceError>;

    /// Contents of one entry
    fn read(&self, name: &str) -> Result<Vec<u8>, PriceError>;
}

/// Read every qualifying workbook on the share into one table
pub fn get_price<S: PriceShare + ?Sized>(
    share: &S,
    config: &ShareConfig,
) -> Result<PriceTable, PriceError> {
    let entries = share.list()?;
    let selected = select_price_files(&entries, &config.name_patterns, &config.extension);

    let mut table = PriceTable::default();
    for name in selected {
        info!("Reading price workbook '{}'", name);
        let bytes = share.read(name)?;
        table.extend(parse_price_workbook(name, bytes)?);
    }

    tracing::debug!("Price table has {} rows", table.len());
    Ok(table)
}
