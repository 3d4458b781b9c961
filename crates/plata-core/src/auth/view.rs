use serde::{Deserialize, Serialize};

/// Auth modal view state machine
///
/// Design principle: this is a pure type state machine with only state
/// definitions and transition validation logic. Network calls, timers
/// and the transitions they trigger are handled by the application
/// layer (`plata-app`).
///
/// State transitions:
/// ```text
///   Login
///    ├── submit, captcha ok, credentials ok, verified ──► (modal closes, session updated)
///    ├── submit, credentials ok, email NOT verified ────► VerifyEmail (inline error)
///    ├── submit, credentials bad ───────────────────────► Login (inline error)
///    └── "forgot password" ─────────────────────────────► ForgotPassword
///
///   Register
///    ├── submit, captcha ok, strength >= 50 ─► provider ─► VerifyEmail
///    └── submit, strength < 50 ──────────────► Register (rejected locally)
///
///   VerifyEmail
///    ├── "I verified", provider says verified ──► (modal closes, session updated)
///    ├── "I verified", not yet ─────────────────► VerifyEmail (inline message)
///    ├── "resend" ──────────────────────────────► VerifyEmail (success or rate limit)
///    └── "back to login" ───────────────────────► Login
///
///   ForgotPassword
///    ├── submit valid email ─► success message, auto-return to Login after 3 s
///    └── "cancel" ───────────► Login
///
///   any view ── modal closed ──► draft reset; next open always starts at Login
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AuthView {
    #[default]
    Login,
    Register,
    VerifyEmail,
    ForgotPassword,
}

impl AuthView {
    /// Views whose submission requires a captcha attestation. The
    /// verify and reset actions go through without one.
    pub fn requires_captcha(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// Tab switch between the login and register forms; the secondary
    /// views are not reachable this way.
    pub fn select_tab(self, target: AuthView) -> AuthView {
        match target {
            Self::Login | Self::Register => target,
            _ => self,
        }
    }

    /// Valid credentials with an unverified email force the verify step.
    pub fn on_unverified_login(self) -> Option<AuthView> {
        match self {
            Self::Login => Some(Self::VerifyEmail),
            _ => None,
        }
    }

    /// Successful registration always lands on the verify step.
    pub fn on_registered(self) -> Option<AuthView> {
        match self {
            Self::Register => Some(Self::VerifyEmail),
            _ => None,
        }
    }

    /// "Back to login" from the verify step, "cancel" from the reset
    /// form, and the auto-return after a reset email goes out.
    pub fn back_to_login(self) -> AuthView {
        Self::Login
    }
}
