use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use stock_price_mailer::{
    read_config, run, DirectoryShare, FtpStockSource, LogMailer, Mailer, SmtpMailer,
};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_CONFIG: &str = "config.json";

/// Stock Price Mailer - prices warehouse stock files and mails the price lists
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "STOCK_PRICE_CONFIG", default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Log the mails instead of sending them
    #[arg(long)]
    dry_run: bool,

    /// Evaluate the weekly schedule at this RFC 3339 time instead of now.
    /// Example: --now=2024-01-01T01:30:00Z
    #[arg(long, value_parser = parse_utc)]
    now: Option<DateTime<Utc>>,

    /// Also append log output to this file
    #[arg(long, env = "STOCK_PRICE_LOG_FILE")]
    log_file: Option<PathBuf>,
}

fn parse_utc(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|t| t.with_timezone(&Utc))
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = read_config(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;

    let mut stock_source = FtpStockSource::new(config.ftp.clone());
    let share = DirectoryShare::new(&config.share.path);
    let mut mailer: Box<dyn Mailer> = if args.dry_run {
        Box::new(LogMailer)
    } else {
        Box::new(SmtpMailer::new(&config.smtp).context("Failed to set up SMTP")?)
    };

    let now = args.now.unwrap_or_else(Utc::now);
    info!(
        "Processing {} stock files, schedule clock {}",
        config.stock_files.len(),
        now.to_rfc3339()
    );

    let summary = run(&config, &mut stock_source, &share, mailer.as_mut(), now)?;
    for outcome in &summary.files {
        info!(
            "{}: {} stock rows, {} priced, {} unpriced, report {:?}",
            outcome.file,
            outcome.stock_rows,
            outcome.matched_rows,
            outcome.unmatched_rows,
            outcome.matched_report
        );
    }

    if !summary.failed_files.is_empty() {
        anyhow::bail!("Failed stock files: {}", summary.failed_files.join(", "));
    }
    Ok(())
}
