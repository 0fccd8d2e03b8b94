//! User interaction capability supplied by the host.

use async_trait::async_trait;

/// Inline validator: an error message, or `None` when the value is valid.
pub type Validator = fn(&str) -> Option<String>;

/// A single-line text prompt.
#[derive(Debug, Clone)]
pub struct InputRequest {
    /// Prompt text.
    pub prompt: String,

    /// Hint shown when the input is empty.
    pub placeholder: Option<String>,

    /// Pre-filled value.
    pub value: Option<String>,

    /// Checked on every edit; the prompt cannot be accepted while invalid.
    pub validate: Option<Validator>,
}

impl InputRequest {
    /// Create a prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            placeholder: None,
            value: None,
            validate: None,
        }
    }

    /// Set the placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the validator.
    pub fn with_validator(mut self, validate: Validator) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Run the validator against `value`.
    pub fn check(&self, value: &str) -> Option<String> {
        self.validate.and_then(|validate| validate(value))
    }
}

/// Prompts and notices shown to the user.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Ask for a line of text. `None` when cancelled.
    async fn input(&self, request: InputRequest) -> Option<String>;

    /// Ask for confirmation. True only if `action` was chosen.
    async fn confirm(&self, message: &str, action: &str) -> bool;

    /// Show an error notice.
    async fn show_error(&self, message: &str);
}
