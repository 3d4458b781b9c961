//! Auth modal controller.
//!
//! Drives the login / register / verify / reset flow on top of the
//! pure `AuthView` state machine: form draft ownership, local
//! validation, provider calls, error translation and the timed
//! transitions. Session updates land through the provider's event
//! subscription, never directly from here.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use plata_core::auth::password::{self, MIN_REGISTER_STRENGTH};
use plata_core::ports::IdentityProviderPort;
use plata_core::{AuthView, FormDraft, ProviderError};

/// After a reset email goes out the form returns to login on its own.
pub const RESET_RETURN_DELAY: Duration = Duration::from_secs(3);

const MSG_CAPTCHA_REQUIRED: &str = "Completa la verificación de seguridad antes de continuar.";
const MSG_WEAK_PASSWORD: &str = "La contraseña es demasiado débil.";
const MSG_UNVERIFIED: &str = "Tu cuenta no está verificada.";
const MSG_STILL_UNVERIFIED: &str =
    "Aún no has verificado el correo. Revisa tu bandeja de entrada o spam.";
const MSG_CHECK_FAILED: &str = "Error verificando el estado. Intenta de nuevo.";
const MSG_RESET_SENT: &str = "Enlace de recuperación enviado a tu correo.";
const MSG_RESEND_OK: &str = "Correo reenviado. Revisa también la carpeta de spam.";
const MSG_RESEND_RATE_LIMITED: &str = "Espera unos minutos antes de reenviar.";
const MSG_RESEND_FAILED: &str = "Error al reenviar el correo.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ModalState {
    open: bool,
    view: AuthView,
    draft: FormDraft,
    /// Bumped on every open/close so an in-flight call that resolves
    /// against a torn-down modal discards its result instead of
    /// touching the new draft.
    epoch: u64,
}

impl ModalState {
    fn close(&mut self) {
        self.open = false;
        self.view = AuthView::Login;
        self.draft = FormDraft::default();
        self.epoch += 1;
    }
}

/// Read-only view of the modal for rendering and tests.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AuthSnapshot {
    pub open: bool,
    pub view: AuthView,
    pub draft: FormDraft,
}

pub struct AuthFlow {
    provider: Arc<dyn IdentityProviderPort>,
    state: Arc<Mutex<ModalState>>,
}

impl AuthFlow {
    pub fn new(provider: Arc<dyn IdentityProviderPort>) -> Self {
        Self {
            provider,
            state: Arc::new(Mutex::new(ModalState::default())),
        }
    }

    pub async fn snapshot(&self) -> AuthSnapshot {
        let state = self.state.lock().await;
        AuthSnapshot {
            open: state.open,
            view: state.view,
            draft: state.draft.clone(),
        }
    }

    /// Open the modal. Always lands on the login view with the
    /// transient flags cleared.
    pub async fn open(&self) {
        let mut state = self.state.lock().await;
        state.open = true;
        state.view = AuthView::Login;
        state.draft.reset_transient();
        state.epoch += 1;
    }

    /// Close the modal and discard the draft. An in-flight provider
    /// call is not aborted; its session event still lands in the
    /// store, but its result no longer touches this state.
    pub async fn close(&self) {
        self.state.lock().await.close();
    }

    pub async fn show_login(&self) {
        self.select_tab(AuthView::Login).await;
    }

    pub async fn show_register(&self) {
        self.select_tab(AuthView::Register).await;
    }

    async fn select_tab(&self, target: AuthView) {
        let mut state = self.state.lock().await;
        state.view = state.view.select_tab(target);
        state.draft.error = None;
    }

    pub async fn show_forgot_password(&self) {
        let mut state = self.state.lock().await;
        if state.view == AuthView::Login {
            state.view = AuthView::ForgotPassword;
        }
    }

    pub async fn back_to_login(&self) {
        let mut state = self.state.lock().await;
        state.view = state.view.back_to_login();
        state.draft.error = None;
        state.draft.success = None;
    }

    pub async fn set_email(&self, email: &str) {
        self.state.lock().await.draft.email = email.to_string();
    }

    pub async fn set_password(&self, password: &str) {
        self.state.lock().await.draft.password = password.to_string();
    }

    pub async fn set_username(&self, username: &str) {
        self.state.lock().await.draft.username = username.to_string();
    }

    pub async fn toggle_show_password(&self) {
        let mut state = self.state.lock().await;
        state.draft.show_password = !state.draft.show_password;
    }

    /// Record a passed human-verification check. Valid until the draft
    /// resets.
    pub async fn pass_captcha(&self) {
        self.state.lock().await.draft.captcha_passed = true;
    }

    /// Submit the active form. Local validation rejects before any
    /// network call; provider failures surface inline and leave the
    /// form resubmittable.
    pub async fn submit(&self) {
        let (view, epoch, email, password, username) = {
            let mut state = self.state.lock().await;
            if !state.open || state.draft.busy {
                return;
            }
            state.draft.error = None;

            if state.view.requires_captcha() && !state.draft.captcha_passed {
                state.draft.error = Some(MSG_CAPTCHA_REQUIRED.to_string());
                return;
            }
            if state.view == AuthView::Register
                && password::strength(&state.draft.password) < MIN_REGISTER_STRENGTH
            {
                state.draft.error = Some(MSG_WEAK_PASSWORD.to_string());
                return;
            }

            state.draft.busy = true;
            (
                state.view,
                state.epoch,
                state.draft.clean_email(),
                state.draft.password.clone(),
                state.draft.username.clone(),
            )
        };

        match view {
            AuthView::Login => self.submit_login(epoch, &email, &password).await,
            AuthView::Register => self.submit_register(epoch, &email, &password, &username).await,
            AuthView::ForgotPassword => self.submit_password_reset(epoch, &email).await,
            // The verify view has no submit; its actions are explicit.
            AuthView::VerifyEmail => {
                let mut state = self.state.lock().await;
                if state.epoch == epoch {
                    state.draft.busy = false;
                }
            }
        }
    }

    async fn submit_login(&self, epoch: u64, email: &str, password: &str) {
        let result = self.provider.sign_in(email, password).await;

        let mut state = self.state.lock().await;
        if state.epoch != epoch {
            return;
        }
        state.draft.busy = false;

        match result {
            Ok(identity) if identity.verified => {
                // The session store was updated through the provider
                // subscription; the modal's job is done.
                state.close();
            }
            Ok(_) => {
                state.draft.error = Some(MSG_UNVERIFIED.to_string());
                if let Some(next) = AuthView::Login.on_unverified_login() {
                    state.view = next;
                }
            }
            Err(err) => Self::surface(&mut state.draft, &err),
        }
    }

    async fn submit_register(&self, epoch: u64, email: &str, password: &str, username: &str) {
        let result = self.provider.register(email, password, username).await;

        let mut state = self.state.lock().await;
        if state.epoch != epoch {
            return;
        }
        state.draft.busy = false;

        match result {
            Ok(_) => {
                if let Some(next) = AuthView::Register.on_registered() {
                    state.view = next;
                }
            }
            Err(err) => Self::surface(&mut state.draft, &err),
        }
    }

    async fn submit_password_reset(&self, epoch: u64, email: &str) {
        let result = self.provider.send_password_reset(email).await;

        let mut state = self.state.lock().await;
        if state.epoch != epoch {
            return;
        }
        state.draft.busy = false;

        match result {
            Ok(()) => {
                state.draft.success = Some(MSG_RESET_SENT.to_string());
                state.draft.error = None;
                self.schedule_return_to_login(epoch);
            }
            Err(err) => Self::surface(&mut state.draft, &err),
        }
    }

    /// Auto-return to login a fixed delay after the reset email went
    /// out, unless the modal was closed or the user already navigated.
    fn schedule_return_to_login(&self, epoch: u64) {
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep(RESET_RETURN_DELAY).await;
            let mut state = state.lock().await;
            if state.epoch == epoch && state.open && state.view == AuthView::ForgotPassword {
                state.view = AuthView::Login;
            }
        });
    }

    /// "I verified my account": user-triggered check, no polling.
    pub async fn check_verification(&self) {
        let epoch = {
            let mut state = self.state.lock().await;
            if !state.open || state.draft.busy {
                return;
            }
            state.draft.busy = true;
            state.draft.error = None;
            state.epoch
        };

        let result = self.provider.reload_verified().await;

        let mut state = self.state.lock().await;
        if state.epoch != epoch {
            return;
        }
        state.draft.busy = false;

        match result {
            Ok(true) => state.close(),
            Ok(false) => state.draft.error = Some(MSG_STILL_UNVERIFIED.to_string()),
            Err(ProviderError::NoCurrentUser) => {
                state.draft.error = Some(ProviderError::NoCurrentUser.user_message());
                state.view = AuthView::Login;
            }
            Err(err) => {
                if !err.is_expected() {
                    tracing::error!(code = err.code(), "verification check failed");
                }
                state.draft.error = Some(MSG_CHECK_FAILED.to_string());
            }
        }
    }

    /// Resend the verification email; stays on the verify view.
    pub async fn resend_verification(&self) {
        let epoch = {
            let state = self.state.lock().await;
            if !state.open {
                return;
            }
            state.epoch
        };

        let result = self.provider.resend_verification().await;

        let mut state = self.state.lock().await;
        if state.epoch != epoch {
            return;
        }

        match result {
            Ok(()) => state.draft.success = Some(MSG_RESEND_OK.to_string()),
            Err(ProviderError::TooManyRequests) => {
                state.draft.error = Some(MSG_RESEND_RATE_LIMITED.to_string());
            }
            Err(err) => {
                if !err.is_expected() {
                    tracing::error!(code = err.code(), "resend verification failed");
                }
                state.draft.error = Some(MSG_RESEND_FAILED.to_string());
            }
        }
    }

    /// Sign the principal out; the store clears through the provider
    /// subscription.
    pub async fn sign_out(&self) {
        self.provider.sign_out().await;
    }

    /// Translate a provider failure into the inline message and apply
    /// the logging policy: expected credential-family failures stay out
    /// of the diagnostic log.
    fn surface(draft: &mut FormDraft, err: &ProviderError) {
        if !err.is_expected() {
            tracing::error!(code = err.code(), "auth provider error");
        }
        draft.error = Some(err.user_message());
    }
}
