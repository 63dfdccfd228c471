#![allow(dead_code)]

use calamine::{Data, Reader, Xlsx};
use chrono::{DateTime, TimeZone, Utc};
use rust_xlsxwriter::Workbook;
use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, ErrorKind};
use std::path::Path;
use stock_price_mailer::config::{
    FtpConfig, MailTemplates, Recipients, ScheduleConfig, ShareConfig, SmtpConfig, SmtpSecurity,
};
use stock_price_mailer::{
    AppConfig, MailError, MailMessage, Mailer, OnStockError, PriceError, PriceShare,
    ReconcileOptions, StockError, StockSource,
};
use tempfile::TempDir;

pub const CORRECT_TO: &str = "sales@example.com";
pub const MISSING_TO: &str = "buyers@example.com";

pub fn create_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Monday 2024-01-01 01:30 UTC, inside the default slot
pub fn monday_slot() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 1, 30, 0).unwrap()
}

/// Tuesday 2024-01-02 01:30 UTC, outside the default slot
pub fn off_slot() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 1, 30, 0).unwrap()
}

pub fn test_config(work_dir: &Path, stock_files: &[&str]) -> AppConfig {
    AppConfig {
        ftp: FtpConfig {
            host: "ftp.example.com".to_string(),
            user: "stock".to_string(),
            password: "secret".to_string(),
        },
        share: ShareConfig {
            path: work_dir.join("share"),
            name_patterns: vec!["Цены KYB".to_string(), "Цены CTR".to_string()],
            extension: "xlsx".to_string(),
        },
        stock_files: stock_files.iter().map(|f| f.to_string()).collect(),
        recipients: Recipients {
            correct: vec![CORRECT_TO.to_string()],
            missing: vec![MISSING_TO.to_string()],
        },
        smtp: SmtpConfig {
            host: "localhost".to_string(),
            port: 25,
            user: None,
            password: None,
            from: "robot@example.com".to_string(),
            security: SmtpSecurity::None,
        },
        schedule: ScheduleConfig::default(),
        reconcile: ReconcileOptions::default(),
        work_dir: work_dir.to_path_buf(),
        on_stock_error: OnStockError::Abort,
        templates: MailTemplates::default(),
    }
}

/// Stock file with a `qty` pass-through column
pub fn stock_csv(rows: &[(&str, &str, &str)]) -> Vec<u8> {
    let mut content = String::from("articul;brand;qty;price;currency\n");
    for (article, brand, qty) in rows {
        content.push_str(&format!("{};{};{};0;RUB\n", article, brand, qty));
    }
    content.into_bytes()
}

pub fn price_workbook(rows: &[(&str, &str, f64)]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "articul").unwrap();
    sheet.write_string(0, 1, "brand").unwrap();
    sheet.write_string(0, 2, "price").unwrap();
    for (idx, (article, brand, price)) in rows.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, *article).unwrap();
        sheet.write_string(r, 1, *brand).unwrap();
        sheet.write_number(r, 2, *price).unwrap();
    }
    workbook.save_to_buffer().expect("Should save workbook")
}

/// All rows of the first sheet, header included
pub fn xlsx_rows(bytes: &[u8]) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec())).expect("Should open");
    let range = workbook
        .worksheet_range_at(0)
        .expect("Should have sheet")
        .expect("Should read sheet");
    range.rows().map(|r| r.to_vec()).collect()
}

/// Data rows as (article, brand) text pairs
pub fn key_pairs(bytes: &[u8]) -> Vec<(String, String)> {
    xlsx_rows(bytes)
        .into_iter()
        .skip(1)
        .map(|row| (row[0].to_string(), row[1].to_string()))
        .collect()
}

#[derive(Default)]
pub struct MemoryStock {
    pub files: HashMap<String, Vec<u8>>,
    pub fetched: Vec<String>,
}

impl MemoryStock {
    pub fn with(mut self, name: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(name.to_string(), bytes);
        self
    }
}

impl StockSource for MemoryStock {
    fn fetch(&mut self, file_name: &str) -> Result<Vec<u8>, StockError> {
        self.fetched.push(file_name.to_string());
        self.files
            .get(file_name)
            .cloned()
            .ok_or_else(|| std::io::Error::new(ErrorKind::NotFound, file_name.to_string()).into())
    }
}

#[derive(Default)]
pub struct MemoryShare {
    pub entries: Vec<(String, Vec<u8>)>,
}

impl MemoryShare {
    pub fn with(mut self, name: &str, bytes: Vec<u8>) -> Self {
        self.entries.push((name.to_string(), bytes));
        self
    }
}

impl PriceShare for MemoryShare {
    fn list(&self) -> Result<Vec<String>, PriceError> {
        Ok(self.entries.iter().map(|(name, _)| name.clone()).collect())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, PriceError> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| std::io::Error::new(ErrorKind::NotFound, name.to_string()).into())
    }
}

/// A sent mail with the attachment as it was at send time
pub struct SentMail {
    pub message: MailMessage,
    pub attachment: Vec<u8>,
}

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Vec<SentMail>,
}

impl Mailer for RecordingMailer {
    fn send(&mut self, message: &MailMessage) -> Result<(), MailError> {
        let attachment = fs::read(&message.attachment_path)?;
        self.sent.push(SentMail {
            message: message.clone(),
            attachment,
        });
        Ok(())
    }
}
