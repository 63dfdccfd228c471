//! One batch run: price table once, then every warehouse file in
//! configuration order, then the weekly unmatched report.

use crate::config::{AppConfig, OnStockError};
use crate::price::{get_price, PriceError, PriceShare};
use crate::reconciliation::{partition, reconcile, UnmatchedAccumulator};
use crate::report::{Emission, Mailer, ReportEmitter, ReportError};
use crate::schedule::ScheduleSlot;
use crate::stock::{get_stock, StockError, StockSource};
use crate::template::{TemplateEngine, TemplateError};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Price error: {0}")]
    Price(#[from] PriceError),

    #[error("Stock file '{file}': {source}")]
    Stock {
        file: String,
        #[source]
        source: StockError,
    },

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Outcome of one warehouse file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub file: String,
    pub stock_rows: usize,
    pub matched_rows: usize,
    pub unmatched_rows: usize,
    pub matched_report: Emission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedOutcome {
    /// Outside every configured slot: no file, no mail
    GateClosed,
    Emitted(Emission),
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub files: Vec<FileOutcome>,
    /// Files dropped under [`OnStockError::Skip`]
    pub failed_files: Vec<String>,
    pub unmatched_report: UnmatchedOutcome,
    /// Distinct unpriced pairs seen across all files, whether mailed or not
    pub unmatched_keys: usize,
}

/// Execute one run against the given collaborators.
///
/// `now` decides the weekly gate. Price faults always abort; stock faults
/// abort or skip the file according to `on_stock_error`.
pub fn run<S, P, M>(
    config: &AppConfig,
    stock_source: &mut S,
    share: &P,
    mailer: &mut M,
    now: DateTime<Utc>,
) -> Result<RunSummary, RunError>
where
    S: StockSource + ?Sized,
    P: PriceShare + ?Sized,
    M: Mailer + ?Sized,
{
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("run", %run_id);
    let _enter = span.enter();

    let templates = TemplateEngine::new(&config.templates)?;
    let mut emitter = ReportEmitter::new(mailer, &templates, &config.recipients, &config.work_dir);

    let prices = get_price(share, &config.share)?;

    let mut unmatched = UnmatchedAccumulator::new();
    let mut files = Vec::new();
    let mut failed_files = Vec::new();

    for file in &config.stock_files {
        let stock = match get_stock(stock_source, file) {
            Ok(stock) => stock,
            Err(source) => match config.on_stock_error {
                OnStockError::Abort => {
                    return Err(RunError::Stock {
                        file: file.clone(),
                        source,
                    })
                }
                OnStockError::Skip => {
                    warn!("Skipping stock file '{}': {}", file, source);
                    failed_files.push(file.clone());
                    continue;
                }
            },
        };

        let merged = reconcile(&stock, &prices, config.reconcile);
        let split = partition(merged);

        let matched_report = emitter.emit_matched(file, &split.matched)?;
        unmatched.extend_from(&split.unmatched);

        files.push(FileOutcome {
            file: file.clone(),
            stock_rows: stock.len(),
            matched_rows: split.matched.len(),
            unmatched_rows: split.unmatched.len(),
            matched_report,
        });
    }

    let slot = ScheduleSlot::of(now);
    let unmatched_report = if config.schedule.unmatched_gate().is_open(now) {
        info!("Slot '{}' is scheduled, emitting unmatched report", slot);
        UnmatchedOutcome::Emitted(emitter.emit_unmatched(&unmatched)?)
    } else {
        info!("Slot '{}' is not scheduled, skipping unmatched report", slot);
        UnmatchedOutcome::GateClosed
    };

    let summary = RunSummary {
        run_id,
        files,
        failed_files,
        unmatched_report,
        unmatched_keys: unmatched.len(),
    };
    info!(
        "Run finished: {} files processed, {} failed, {} unpriced items",
        summary.files.len(),
        summary.failed_files.len(),
        summary.unmatched_keys
    );
    Ok(summary)
}
