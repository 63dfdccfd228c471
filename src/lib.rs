pub mod config;
pub mod price;
pub mod reconciliation;
pub mod report;
pub mod run;
pub mod schedule;
pub mod stock;
pub mod template;
pub mod utils;

// Re-export commonly used types
pub use config::{read_config, AppConfig, ConfigError, OnStockError, ReconcileOptions};
pub use price::{get_price, DirectoryShare, PriceError, PriceRecord, PriceShare, PriceTable};
pub use reconciliation::{
    partition, reconcile, JoinKey, MergedRow, MergedTable, Partition, UnmatchedAccumulator,
};
pub use report::{
    Emission, LogMailer, MailError, MailMessage, Mailer, ReportEmitter, ReportError, SmtpMailer,
};
pub use run::{run, FileOutcome, RunError, RunSummary, UnmatchedOutcome};
pub use schedule::{ScheduleSlot, WeeklyGate};
pub use stock::{get_stock, FtpStockSource, StockError, StockRecord, StockSource, StockTable};
pub use template::{MailKind, TemplateEngine, TemplateError};
