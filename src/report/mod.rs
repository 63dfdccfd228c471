//! Report emission: spreadsheets in the work directory, mailed per audience.

mod mail;
mod writer;

pub use mail::{build_message, LogMailer, MailError, MailMessage, Mailer, SmtpMailer};
pub use writer::{write_matched_report, write_unmatched_report};

use crate::config::Recipients;
use crate::reconciliation::{MergedTable, UnmatchedAccumulator};
use crate::template::{MailKind, MailTemplateContext, TemplateEngine, TemplateError};
use crate::utils::{
    artifact_path, report_file_name, MATCHED_ARTIFACT, UNMATCHED_ARTIFACT, UNMATCHED_SOURCE_NAME,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),
}

/// What happened to a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Written and mailed with this many rows
    Sent(usize),
    /// Nothing to report, no mail
    Empty,
}

/// Writes report artifacts and routes them to the right audience
pub struct ReportEmitter<'a, M: Mailer + ?Sized> {
    mailer: &'a mut M,
    templates: &'a TemplateEngine,
    recipients: &'a Recipients,
    work_dir: PathBuf,
}

impl<'a, M: Mailer + ?Sized> ReportEmitter<'a, M> {
    pub fn new(
        mailer: &'a mut M,
        templates: &'a TemplateEngine,
        recipients: &'a Recipients,
        work_dir: &Path,
    ) -> Self {
        Self {
            mailer,
            templates,
            recipients,
            work_dir: work_dir.to_path_buf(),
        }
    }

    fn dispatch(
        &mut self,
        kind: MailKind,
        source_name: &str,
        artifact: PathBuf,
    ) -> Result<(), ReportError> {
        let file_name = report_file_name(source_name);
        info!("Mailing '{}' as '{}'", artifact.display(), file_name);

        let rendered = self.templates.render(
            kind,
            &MailTemplateContext {
                file_name: file_name.clone(),
            },
        )?;
        let recipients = match kind {
            MailKind::Correct => self.recipients.correct.clone(),
            MailKind::Missing => self.recipients.missing.clone(),
        };

        self.mailer.send(&MailMessage {
            subject: rendered.subject,
            body: rendered.body,
            recipients,
            attachment_name: file_name,
            attachment_path: artifact,
        })?;
        Ok(())
    }

    /// Write and mail the priced rows of one warehouse file.
    /// An empty table produces neither a file nor a mail.
    pub fn emit_matched(
        &mut self,
        source_name: &str,
        matched: &MergedTable,
    ) -> Result<Emission, ReportError> {
        if matched.is_empty() {
            return Ok(Emission::Empty);
        }

        let artifact = artifact_path(&self.work_dir, MATCHED_ARTIFACT);
        write_matched_report(matched, &artifact)?;
        self.dispatch(MailKind::Correct, source_name, artifact)?;
        Ok(Emission::Sent(matched.len()))
    }

    /// Write the unpriced pairs of the whole run and mail them when any exist.
    /// The artifact is written even when empty; only the mail is skipped.
    pub fn emit_unmatched(
        &mut self,
        unmatched: &UnmatchedAccumulator,
    ) -> Result<Emission, ReportError> {
        let artifact = artifact_path(&self.work_dir, UNMATCHED_ARTIFACT);
        write_unmatched_report(unmatched.keys(), &artifact)?;

        if unmatched.is_empty() {
            return Ok(Emission::Empty);
        }

        self.dispatch(MailKind::Missing, UNMATCHED_SOURCE_NAME, artifact)?;
        Ok(Emission::Sent(unmatched.len()))
    }
}
