use handlebars::Handlebars;
use thiserror::Error;

use super::types::{MailKind, MailTemplateContext, RenderedMail};
use crate::config::MailTemplates;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    RenderError(#[from] handlebars::RenderError),
}

/// Renders mail subjects and bodies from the configured templates.
/// Output is plain text, so nothing is HTML-escaped.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Compile every template up front so a typo fails the run before any
    /// file is fetched
    pub fn new(templates: &MailTemplates) -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        let sources = [
            (MailKind::Correct.subject_template(), &templates.correct_subject),
            (MailKind::Correct.body_template(), &templates.correct_body),
            (MailKind::Missing.subject_template(), &templates.missing_subject),
            (MailKind::Missing.body_template(), &templates.missing_body),
        ];
        for (name, source) in sources {
            handlebars.register_template_string(name, source)?;
        }

        Ok(Self { handlebars })
    }

    pub fn render(
        &self,
        kind: MailKind,
        context: &MailTemplateContext,
    ) -> Result<RenderedMail, TemplateError> {
        Ok(RenderedMail {
            subject: self.handlebars.render(kind.subject_template(), context)?,
            body: self.handlebars.render(kind.body_template(), context)?,
        })
    }
}
