use crate::reconciliation::{JoinKey, MergedTable};
use crate::utils::{ARTICLE_COLUMN, BRAND_COLUMN, PRICE_COLUMN};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::path::Path;

/// Pass-through values are written as numbers only when the number prints
/// back to the exact same text, so codes like `007` stay strings
fn write_value(sheet: &mut Worksheet, row: u32, col: u16, value: &str) -> Result<(), XlsxError> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() && number.to_string() == value => {
            sheet.write_number(row, col, number)?;
        }
        _ => {
            sheet.write_string(row, col, value)?;
        }
    }
    Ok(())
}

fn write_header(sheet: &mut Worksheet, names: &[&str]) -> Result<(), XlsxError> {
    for (col, name) in names.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    Ok(())
}

/// Write priced rows: article, brand, the pass-through columns, price
pub fn write_matched_report(table: &MergedTable, path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let mut header = vec![ARTICLE_COLUMN, BRAND_COLUMN];
    header.extend(table.columns.iter().map(String::as_str));
    header.push(PRICE_COLUMN);
    write_header(sheet, &header)?;

    let price_col = (header.len() - 1) as u16;
    for (idx, row) in table.rows.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, &row.stock.article)?;
        sheet.write_string(r, 1, &row.stock.brand)?;
        for (offset, value) in row.stock.fields.iter().enumerate() {
            write_value(sheet, r, 2 + offset as u16, value)?;
        }
        if let Some(price) = row.price {
            match price.to_f64() {
                Some(number) => sheet.write_number(r, price_col, number)?,
                None => sheet.write_string(r, price_col, price.to_string())?,
            };
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Write the unpriced (article, brand) pairs
pub fn write_unmatched_report(keys: &[JoinKey], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    write_header(sheet, &[ARTICLE_COLUMN, BRAND_COLUMN])?;

    for (idx, key) in keys.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, &key.article)?;
        sheet.write_string(r, 1, &key.brand)?;
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciliation::MergedRow;
    use crate::stock::StockRecord;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn read_rows(path: &Path) -> Vec<Vec<Data>> {
        let mut workbook: Xlsx<_> = open_workbook(path).expect("Should open");
        let range = workbook
            .worksheet_range_at(0)
            .expect("Should have sheet")
            .expect("Should read sheet");
        range.rows().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn test_matched_report_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("temp.xlsx");
        let table = MergedTable {
            columns: vec!["qty".to_string(), "code".to_string()],
            rows: vec![MergedRow {
                stock: StockRecord {
                    article: "101".to_string(),
                    brand: "X".to_string(),
                    fields: vec!["5".to_string(), "007".to_string()],
                },
                price: Some(Decimal::from_str("9.99").unwrap()),
            }],
        };

        write_matched_report(&table, &path).expect("Should write");
        let rows = read_rows(&path);

        assert_eq!(
            rows[0],
            vec![
                Data::String("articul".to_string()),
                Data::String("brand".to_string()),
                Data::String("qty".to_string()),
                Data::String("code".to_string()),
                Data::String("price".to_string()),
            ]
        );
        assert_eq!(
            rows[1],
            vec![
                Data::String("101".to_string()),
                Data::String("X".to_string()),
                Data::Float(5.0),
                Data::String("007".to_string()),
                Data::Float(9.99),
            ]
        );
    }

    #[test]
    fn test_unmatched_report_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("temp1.xlsx");
        let keys = vec![JoinKey::new("1", "A"), JoinKey::new("2", "B")];

        write_unmatched_report(&keys, &path).expect("Should write");
        let rows = read_rows(&path);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2][0], Data::String("2".to_string()));
        assert_eq!(rows[2][1], Data::String("B".to_string()));
    }

    #[test]
    fn test_empty_unmatched_report_has_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("temp1.xlsx");

        write_unmatched_report(&[], &path).expect("Should write");
        assert_eq!(read_rows(&path).len(), 1);
    }
}
