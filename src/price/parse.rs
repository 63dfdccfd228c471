use super::{PriceError, PriceRecord, PriceTable};
use crate::utils::{ARTICLE_COLUMN, BRAND_COLUMN, PRICE_COLUMN};
use calamine::{Data, Reader, Xlsx};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::io::Cursor;

static EMPTY_CELL: Data = Data::Empty;

/// Render a key cell the way it reads in the sheet: whole floats lose
/// their fraction so `101.0` joins with the `101` of a stock file
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_price(cell: &Data) -> Result<Option<Decimal>, ()> {
    match cell {
        Data::Empty => Ok(None),
        Data::Int(i) => Ok(Some(Decimal::from(*i))),
        Data::Float(f) => Decimal::from_f64(*f).map(Some).ok_or(()),
        Data::String(s) if s.trim().is_empty() => Ok(None),
        Data::String(s) => s.trim().replace(',', ".").parse().map(Some).map_err(|_| ()),
        _ => Err(()),
    }
}

fn column_index(header: &[Data], name: &str, file: &str) -> Result<usize, PriceError> {
    header
        .iter()
        .position(|cell| cell_text(cell).trim() == name)
        .ok_or_else(|| PriceError::MissingColumn {
            file: file.to_string(),
            column: name.to_string(),
        })
}

/// Parse the first worksheet of a price workbook.
///
/// The first row is the header and must name the article, brand and price
/// columns; other columns are ignored. Rows with both key cells blank are
/// skipped.
pub fn parse_price_workbook(file: &str, bytes: Vec<u8>) -> Result<PriceTable, PriceError> {
    let workbook_error = |source| PriceError::Workbook {
        file: file.to_string(),
        source,
    };

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PriceError::NoWorksheet(file.to_string()))?
        .map_err(workbook_error)?;

    let mut rows = range.rows();
    let header = match rows.next() {
        Some(header) => header,
        None => {
            return Err(PriceError::MissingColumn {
                file: file.to_string(),
                column: ARTICLE_COLUMN.to_string(),
            })
        }
    };

    let article_idx = column_index(header, ARTICLE_COLUMN, file)?;
    let brand_idx = column_index(header, BRAND_COLUMN, file)?;
    let price_idx = column_index(header, PRICE_COLUMN, file)?;

    let mut table = PriceTable::default();
    for (idx, row) in rows.enumerate() {
        let cell = |i: usize| row.get(i).unwrap_or(&EMPTY_CELL);

        let article = cell_text(cell(article_idx));
        let brand = cell_text(cell(brand_idx));
        if article.is_empty() && brand.is_empty() {
            continue;
        }

        let price = cell_price(cell(price_idx)).map_err(|_| PriceError::InvalidPrice {
            file: file.to_string(),
            // sheet row number: one for the header, one for 1-based counting
            row: idx + 2,
            value: cell(price_idx).to_string(),
        })?;

        table.rows.push(PriceRecord {
            article,
            brand,
            price,
        });
    }

    Ok(table)
}
