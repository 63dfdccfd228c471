use super::JoinKey;
use crate::config::ReconcileOptions;
use crate::price::PriceTable;
use crate::stock::{StockRecord, StockTable};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// A stock row with the price found for it, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRow {
    pub stock: StockRecord,
    pub price: Option<Decimal>,
}

impl MergedRow {
    pub fn is_matched(&self) -> bool {
        self.price.is_some()
    }

    pub fn key(&self) -> JoinKey {
        self.stock.key()
    }
}

/// Result of joining one warehouse file against the price table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedTable {
    /// Pass-through stock columns, aligned with [`StockRecord::fields`]
    pub columns: Vec<String>,
    pub rows: Vec<MergedRow>,
}

impl MergedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub matched: MergedTable,
    pub unmatched: MergedTable,
}

/// Left join of a stock table against the price table on (article, brand).
///
/// Every stock row is emitted once per price row carrying its key, in price
/// table order, or once with no price when the key is absent. Duplicate price
/// keys therefore fan out unless `dedupe_prices` keeps the first one only.
/// A price row with an empty price cell joins but leaves the row unpriced.
pub fn reconcile(stock: &StockTable, prices: &PriceTable, options: ReconcileOptions) -> MergedTable {
    let key_of = |key: JoinKey| {
        if options.normalize_keys {
            key.normalized()
        } else {
            key
        }
    };

    let mut index: HashMap<JoinKey, Vec<Option<Decimal>>> = HashMap::new();
    for record in &prices.rows {
        let found = index.entry(key_of(record.key())).or_default();
        if options.dedupe_prices && !found.is_empty() {
            continue;
        }
        found.push(record.price);
    }

    let mut merged = MergedTable {
        columns: stock.columns.clone(),
        rows: Vec::with_capacity(stock.len()),
    };

    for row in &stock.rows {
        match index.get(&key_of(row.key())) {
            Some(found) => {
                for price in found {
                    merged.rows.push(MergedRow {
                        stock: row.clone(),
                        price: *price,
                    });
                }
            }
            None => merged.rows.push(MergedRow {
                stock: row.clone(),
                price: None,
            }),
        }
    }

    merged
}

/// Split merged rows into priced and unpriced, keeping row order
pub fn partition(merged: MergedTable) -> Partition {
    let (matched, unmatched): (Vec<_>, Vec<_>) =
        merged.rows.into_iter().partition(MergedRow::is_matched);

    Partition {
        matched: MergedTable {
            columns: merged.columns.clone(),
            rows: matched,
        },
        unmatched: MergedTable {
            columns: merged.columns,
            rows: unmatched,
        },
    }
}
