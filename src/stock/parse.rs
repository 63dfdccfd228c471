use super::{StockError, StockRecord, StockTable};
use crate::utils::{ARTICLE_COLUMN, BRAND_COLUMN, CURRENCY_COLUMN, PRICE_COLUMN};
use csv::ReaderBuilder;

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, StockError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| StockError::MissingColumn(name.to_string()))
}

/// Parse a `;`-separated stock file.
///
/// The header row must name the article, brand, price and currency columns.
/// Price and currency are dropped: the authoritative price comes from the
/// price share. Every other column is carried through untouched.
pub fn parse_stock_csv(bytes: &[u8]) -> Result<StockTable, StockError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let article_idx = column_index(&headers, ARTICLE_COLUMN)?;
    let brand_idx = column_index(&headers, BRAND_COLUMN)?;
    let price_idx = column_index(&headers, PRICE_COLUMN)?;
    let currency_idx = column_index(&headers, CURRENCY_COLUMN)?;

    let keep = |i: &usize| ![article_idx, brand_idx, price_idx, currency_idx].contains(i);
    let kept: Vec<usize> = (0..headers.len()).filter(keep).collect();

    let mut table = StockTable {
        columns: kept.iter().map(|&i| headers[i].to_string()).collect(),
        rows: Vec::new(),
    };

    // Rows whose field count differs from the header are rejected by the reader
    for record in reader.records() {
        let record = record?;
        table.rows.push(StockRecord {
            article: record[article_idx].to_string(),
            brand: record[brand_idx].to_string(),
            fields: kept.iter().map(|&i| record[i].to_string()).collect(),
        });
    }

    Ok(table)
}
