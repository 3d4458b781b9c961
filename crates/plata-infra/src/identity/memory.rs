//! In-memory identity provider.
//!
//! Backs offline/dev runs and tests: the full port contract, including
//! session event publication, without network I/O. Accounts are seeded
//! up front; the verification "link click" is simulated out of band.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use plata_core::ports::IdentityProviderPort;
use plata_core::session::events::{SessionEvent, SessionEventHub};
use plata_core::{ProviderError, ProviderIdentity};

#[derive(Debug, Clone)]
struct AccountRecord {
    password: String,
    display_name: String,
    verified: bool,
}

#[derive(Debug, Clone)]
struct CurrentUser {
    email: String,
    token: String,
    verified: bool,
}

#[derive(Default)]
pub struct InMemoryIdentityProvider {
    hub: SessionEventHub,
    accounts: Mutex<HashMap<String, AccountRecord>>,
    current: Mutex<Option<CurrentUser>>,
    fail_next: Mutex<Option<ProviderError>>,
    verification_emails: AtomicU64,
    sign_in_calls: AtomicU64,
    latency: Mutex<Duration>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account as if it had registered earlier.
    pub fn seed_account(&self, email: &str, password: &str, display_name: &str, verified: bool) {
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            AccountRecord {
                password: password.to_string(),
                display_name: display_name.to_string(),
                verified,
            },
        );
    }

    /// Fail the next operation with the given error, once.
    pub fn fail_next_with(&self, err: ProviderError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    /// Simulate the user clicking the verification link.
    pub fn verify_email_out_of_band(&self, email: &str) {
        if let Some(account) = self.accounts.lock().unwrap().get_mut(email) {
            account.verified = true;
        }
    }

    /// Simulate a provider-side token refresh: republishes the current
    /// principal with a fresh token.
    pub fn emit_token_refresh(&self) {
        let refreshed = {
            let mut current = self.current.lock().unwrap();
            match current.as_mut() {
                Some(user) => {
                    user.token = mint_token();
                    Some(user.clone())
                }
                None => None,
            }
        };
        if let Some(user) = refreshed {
            let identity = self.identity_for(&user);
            self.hub.publish(SessionEvent::Changed(Some(identity)));
        }
    }

    /// How many verification emails went out (register + resend).
    pub fn verification_emails_sent(&self) -> u64 {
        self.verification_emails.load(Ordering::SeqCst)
    }

    /// How many sign-in attempts reached the provider.
    pub fn sign_in_calls(&self) -> u64 {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    /// Simulated network latency applied to every operation. Zero by
    /// default; tests pair it with a paused clock.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn take_failure(&self) -> Result<(), ProviderError> {
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn identity_for(&self, user: &CurrentUser) -> ProviderIdentity {
        let accounts = self.accounts.lock().unwrap();
        let display_name = accounts
            .get(&user.email)
            .map(|a| a.display_name.clone())
            .unwrap_or_default();
        ProviderIdentity {
            display_name,
            email: user.email.clone(),
            token: user.token.clone(),
            verified: user.verified,
        }
    }

    fn set_current(&self, email: &str, verified: bool) -> ProviderIdentity {
        let user = CurrentUser {
            email: email.to_string(),
            token: mint_token(),
            verified,
        };
        *self.current.lock().unwrap() = Some(user.clone());
        let identity = self.identity_for(&user);
        self.hub.publish(SessionEvent::Changed(Some(identity.clone())));
        identity
    }
}

fn mint_token() -> String {
    format!("tok-{}", Uuid::new_v4())
}

#[async_trait]
impl IdentityProviderPort for InMemoryIdentityProvider {
    fn events(&self) -> &SessionEventHub {
        &self.hub
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderIdentity, ProviderError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        self.take_failure()?;
        if !email.contains('@') {
            return Err(ProviderError::InvalidEmail);
        }
        let verified = {
            let accounts = self.accounts.lock().unwrap();
            let account = accounts.get(email).ok_or(ProviderError::UserNotFound)?;
            if account.password != password {
                return Err(ProviderError::WrongPassword);
            }
            account.verified
        };
        Ok(self.set_current(email, verified))
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<ProviderIdentity, ProviderError> {
        self.simulate_latency().await;
        self.take_failure()?;
        if !email.contains('@') {
            return Err(ProviderError::InvalidEmail);
        }
        if password.len() < 6 {
            return Err(ProviderError::WeakPassword);
        }
        {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(ProviderError::EmailAlreadyInUse);
            }
            accounts.insert(
                email.to_string(),
                AccountRecord {
                    password: password.to_string(),
                    display_name: display_name.to_string(),
                    verified: false,
                },
            );
        }
        self.verification_emails.fetch_add(1, Ordering::SeqCst);
        Ok(self.set_current(email, false))
    }

    async fn resend_verification(&self) -> Result<(), ProviderError> {
        self.simulate_latency().await;
        self.take_failure()?;
        let current = self.current.lock().unwrap().clone();
        match current {
            None => Err(ProviderError::NoCurrentUser),
            Some(user) if user.verified => Ok(()),
            Some(_) => {
                self.verification_emails.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }
    }

    async fn reload_verified(&self) -> Result<bool, ProviderError> {
        self.simulate_latency().await;
        self.take_failure()?;
        let email = match self.current.lock().unwrap().clone() {
            Some(user) => user.email,
            None => return Err(ProviderError::NoCurrentUser),
        };
        let verified = self
            .accounts
            .lock()
            .unwrap()
            .get(&email)
            .map(|a| a.verified)
            .unwrap_or(false);

        let flipped = {
            let mut current = self.current.lock().unwrap();
            match current.as_mut() {
                Some(user) if verified && !user.verified => {
                    user.verified = true;
                    Some(user.clone())
                }
                _ => None,
            }
        };
        if let Some(user) = flipped {
            let identity = self.identity_for(&user);
            self.hub.publish(SessionEvent::Changed(Some(identity)));
        }
        Ok(verified)
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        self.simulate_latency().await;
        self.take_failure()?;
        if !email.contains('@') {
            return Err(ProviderError::InvalidEmail);
        }
        if !self.accounts.lock().unwrap().contains_key(email) {
            return Err(ProviderError::UserNotFound);
        }
        Ok(())
    }

    async fn sign_out(&self) {
        *self.current.lock().unwrap() = None;
        self.hub.publish(SessionEvent::Changed(None));
    }
}
