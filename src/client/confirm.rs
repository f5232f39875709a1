//! Explicit confirmation before destructive or overwriting actions.

/// Text of a confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub text: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl Default for ConfirmPrompt {
    fn default() -> Self {
        Self {
            title: "Are you sure?".to_string(),
            text: "This action cannot be undone.".to_string(),
            confirm_text: "Yes, do it".to_string(),
            cancel_text: "Cancel".to_string(),
        }
    }
}

impl ConfirmPrompt {
    pub fn new(title: impl Into<String>, text: impl Into<String>, confirm_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            confirm_text: confirm_text.into(),
            ..Self::default()
        }
    }
}

/// Asks the visitor; `true` means go ahead
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// Fixed answer, for non-interactive callers (`--yes`) and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl Confirmer for AutoConfirm {
    fn confirm(&self, _prompt: &ConfirmPrompt) -> bool {
        self.0
    }
}
