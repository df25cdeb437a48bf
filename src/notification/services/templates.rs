//! E-mail template rendering.

use minijinja::Environment;
use thiserror::Error;

/// Name the body template is registered under.
const BODY_TEMPLATE_NAME: &str = "email_body";

/// Body template applied when none is configured.
const DEFAULT_BODY_TEMPLATE: &str = "\
<p>Dear user,</p>
<p>{{ message }}</p>
<p>Regards,<br/>{{ sender_name }}</p>
<p><small>This is an automated notification from {{ sender_name }}. \
Please do not reply to this e-mail.</small></p>
";

/// Error returned when an e-mail template fails to parse or render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("e-mail template rendering failed: {reason}")]
pub struct TemplateRenderError {
    /// Renderer-supplied failure description.
    pub reason: String,
}

impl From<minijinja::Error> for TemplateRenderError {
    fn from(error: minijinja::Error) -> Self {
        Self {
            reason: error.to_string(),
        }
    }
}

/// Renders notification e-mail bodies from a configurable template.
///
/// The template is parsed once at construction and the compiled
/// environment is reused for every render. Templates receive `title`,
/// `message`, and `sender_name` as context variables. The subject line is
/// always the notification title.
#[derive(Debug, Clone)]
pub struct EmailTemplates {
    environment: Environment<'static>,
}

impl EmailTemplates {
    /// Creates templates using the default body layout.
    #[must_use]
    pub fn new() -> Self {
        let mut environment = Environment::new();
        if let Err(error) = environment.add_template(BODY_TEMPLATE_NAME, DEFAULT_BODY_TEMPLATE) {
            debug_assert!(false, "default body template failed to parse: {error}");
        }
        Self { environment }
    }

    /// Replaces the body template source.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateRenderError`] when the template source fails to
    /// parse.
    pub fn with_body_template(
        mut self,
        template: impl Into<String>,
    ) -> Result<Self, TemplateRenderError> {
        self.environment
            .add_template_owned(BODY_TEMPLATE_NAME, template.into())?;
        Ok(self)
    }

    /// Renders the e-mail body for a notification.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateRenderError`] when rendering fails.
    pub fn render_body(
        &self,
        title: &str,
        message: &str,
        sender_name: &str,
    ) -> Result<String, TemplateRenderError> {
        let context = serde_json::json!({
            "title": title,
            "message": message,
            "sender_name": sender_name,
        });
        let body = self
            .environment
            .get_template(BODY_TEMPLATE_NAME)?
            .render(context)?;
        Ok(body)
    }
}

impl Default for EmailTemplates {
    fn default() -> Self {
        Self::new()
    }
}
