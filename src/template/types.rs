use serde::Serialize;

/// Which audience a mail goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailKind {
    /// Priced warehouse report
    Correct,
    /// Weekly report of items without a price
    Missing,
}

impl MailKind {
    pub fn subject_template(&self) -> &'static str {
        match self {
            MailKind::Correct => "correct_subject",
            MailKind::Missing => "missing_subject",
        }
    }

    pub fn body_template(&self) -> &'static str {
        match self {
            MailKind::Correct => "correct_body",
            MailKind::Missing => "missing_body",
        }
    }
}

/// Context for mail templates
/// Placeholders: {{file_name}}
#[derive(Debug, Clone, Serialize)]
pub struct MailTemplateContext {
    /// Name the report is attached under, e.g. `Moscow.xlsx`
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMail {
    pub subject: String,
    pub body: String,
}
