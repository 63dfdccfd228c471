mod engine;
mod types;

pub use engine::{TemplateEngine, TemplateError};
pub use types::{MailKind, MailTemplateContext, RenderedMail};
