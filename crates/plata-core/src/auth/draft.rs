use serde::{Deserialize, Serialize};

/// Transient form state owned by the auth modal.
///
/// Discarded wholesale when the modal closes; reopening resets the
/// transient flags but keeps any typed fields for the current cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDraft {
    pub email: String,
    pub password: String,
    pub username: String,
    pub show_password: bool,
    pub captcha_passed: bool,
    /// A provider call is in flight; the submit control is disabled.
    pub busy: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl FormDraft {
    /// Reset applied when the modal opens: messages, busy flag, captcha
    /// attestation and password visibility go back to defaults; typed
    /// fields survive within one open/close cycle.
    pub fn reset_transient(&mut self) {
        self.show_password = false;
        self.captcha_passed = false;
        self.busy = false;
        self.error = None;
        self.success = None;
    }

    /// The email as sent to the provider: surrounding whitespace is
    /// trimmed, nothing else is normalized.
    pub fn clean_email(&self) -> String {
        self.email.trim().to_string()
    }
}
