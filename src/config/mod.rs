use crate::schedule::{ScheduleSlot, WeeklyGate};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// FTP server holding one stock file per warehouse
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FtpConfig {
    /// Host name, optionally with `:port` (21 when omitted)
    pub host: String,
    pub user: String,
    pub password: String,
}

fn default_name_patterns() -> Vec<String> {
    vec!["Цены KYB".to_string(), "Цены CTR".to_string()]
}

fn default_extension() -> String {
    "xlsx".to_string()
}

/// Network share holding the price workbooks.
/// The share is expected to be reachable as a directory (UNC path or a CIFS
/// mount); credentials belong to the mount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareConfig {
    pub path: PathBuf,
    /// A workbook is read when its name contains any of these
    #[serde(default = "default_name_patterns")]
    pub name_patterns: Vec<String>,
    #[serde(default = "default_extension")]
    pub extension: String,
}

/// Recipient lists, one per report type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipients {
    /// Receives every priced warehouse report
    pub correct: Vec<String>,
    /// Receives the weekly report of items without a price
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// Implicit TLS (SMTPS)
    Tls,
    StartTls,
    /// Plain text, for local relays only
    None,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_security() -> SmtpSecurity {
    SmtpSecurity::StartTls
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    pub from: String,
    #[serde(default = "default_smtp_security")]
    pub security: SmtpSecurity,
}

fn default_unmatched_slots() -> Vec<ScheduleSlot> {
    vec![ScheduleSlot {
        weekday: Weekday::Mon,
        hour: 1,
    }]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    /// UTC (weekday, hour) slots in which the unmatched report goes out
    #[serde(default = "default_unmatched_slots")]
    pub unmatched_slots: Vec<ScheduleSlot>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            unmatched_slots: default_unmatched_slots(),
        }
    }
}

impl ScheduleConfig {
    pub fn unmatched_gate(&self) -> WeeklyGate {
        WeeklyGate::new(self.unmatched_slots.iter().copied())
    }
}

/// Join behaviour toggles. Both default to strict compatibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileOptions {
    /// Trim and upper-case article and brand before joining
    #[serde(default)]
    pub normalize_keys: bool,
    /// Keep only the first price row per key instead of fanning out
    #[serde(default)]
    pub dedupe_prices: bool,
}

/// What to do when a single stock file cannot be fetched or parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnStockError {
    /// Stop the whole run
    #[default]
    Abort,
    /// Log, record the file as failed and go on with the next one
    Skip,
}

fn default_correct_subject() -> String {
    "Price list {{file_name}}".to_string()
}

fn default_correct_body() -> String {
    "Generated price list: {{file_name}}".to_string()
}

fn default_missing_subject() -> String {
    "Price list without prices {{file_name}}".to_string()
}

fn default_missing_body() -> String {
    "No prices were found for warehouse items: {{file_name}}".to_string()
}

/// Handlebars templates for mail subjects and bodies.
/// Placeholders: {{file_name}}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailTemplates {
    #[serde(default = "default_correct_subject")]
    pub correct_subject: String,
    #[serde(default = "default_correct_body")]
    pub correct_body: String,
    #[serde(default = "default_missing_subject")]
    pub missing_subject: String,
    #[serde(default = "default_missing_body")]
    pub missing_body: String,
}

impl Default for MailTemplates {
    fn default() -> Self {
        Self {
            correct_subject: default_correct_subject(),
            correct_body: default_correct_body(),
            missing_subject: default_missing_subject(),
            missing_body: default_missing_body(),
        }
    }
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Job configuration, loaded once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub ftp: FtpConfig,
    pub share: ShareConfig,
    /// Stock files on the FTP server, processed in this order
    pub stock_files: Vec<String>,
    pub recipients: Recipients,
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub reconcile: ReconcileOptions,
    /// Directory receiving the work artifacts. Two runs must not share it.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
    #[serde(default)]
    pub on_stock_error: OnStockError,
    #[serde(default)]
    pub templates: MailTemplates,
}

impl AppConfig {
    /// Check the invariants serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stock_files.is_empty() {
            return Err(ConfigError::Invalid("stockFiles is empty".to_string()));
        }
        if self.share.name_patterns.is_empty() {
            return Err(ConfigError::Invalid(
                "share.namePatterns is empty".to_string(),
            ));
        }
        if self.recipients.correct.is_empty() {
            return Err(ConfigError::Invalid(
                "recipients.correct is empty".to_string(),
            ));
        }
        if self.recipients.missing.is_empty() {
            return Err(ConfigError::Invalid(
                "recipients.missing is empty".to_string(),
            ));
        }
        if let Some(slot) = self.schedule.unmatched_slots.iter().find(|s| s.hour > 23) {
            return Err(ConfigError::Invalid(format!(
                "schedule hour {} is out of range",
                slot.hour
            )));
        }
        Ok(())
    }
}

/// Read and validate the configuration file
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration JSON
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}
