//! REST identity provider client.
//!
//! Talks to an identity-toolkit style HTTP API: password sign-in,
//! sign-up, out-of-band verification / reset emails and account
//! lookup. Wire error codes are mapped onto the closed
//! `ProviderError` vocabulary at this boundary; session changes are
//! published on the adapter's event hub.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use plata_core::ports::IdentityProviderPort;
use plata_core::session::events::{SessionEvent, SessionEventHub};
use plata_core::{ProviderError, ProviderIdentity};

#[derive(Debug, Clone)]
struct CurrentUser {
    id_token: String,
    email: String,
    display_name: String,
    verified: bool,
}

impl CurrentUser {
    fn identity(&self) -> ProviderIdentity {
        ProviderIdentity {
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            token: self.id_token.clone(),
            verified: self.verified,
        }
    }
}

pub struct RestIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    hub: SessionEventHub,
    current: Mutex<Option<CurrentUser>>,
}

impl RestIdentityProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            hub: SessionEventHub::new(),
            current: Mutex::new(None),
        }
    }

    async fn post<T: DeserializeOwned>(
        &self,
        action: &str,
        body: serde_json::Value,
    ) -> Result<T, ProviderError> {
        let url = format!(
            "{}/v1/accounts:{}?key={}",
            self.base_url, action, self.api_key
        );
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ProviderError::Transport(e.to_string()))
        } else {
            let wire: WireError = response
                .json()
                .await
                .map_err(|e| ProviderError::Transport(e.to_string()))?;
            tracing::debug!(action, wire_code = %wire.error.message, "provider rejected request");
            Err(map_wire_code(&wire.error.message))
        }
    }

    /// Fetch the account record behind an id token.
    async fn lookup(&self, id_token: &str) -> Result<LookupUser, ProviderError> {
        let response: LookupResponse = self
            .post("lookup", serde_json::json!({ "idToken": id_token }))
            .await?;
        response
            .users
            .into_iter()
            .next()
            .ok_or(ProviderError::NoCurrentUser)
    }

    fn publish_current(&self, user: &CurrentUser) {
        self.hub
            .publish(SessionEvent::Changed(Some(user.identity())));
    }

    fn store_current(&self, user: CurrentUser) -> ProviderIdentity {
        let identity = user.identity();
        *self.current.lock().unwrap() = Some(user.clone());
        self.publish_current(&user);
        identity
    }
}

/// Normalize a wire code (`EMAIL_NOT_FOUND`, sometimes suffixed with a
/// human-readable remainder) onto the closed vocabulary.
fn map_wire_code(message: &str) -> ProviderError {
    let code = message.split(':').next().unwrap_or(message).trim();
    match code {
        "EMAIL_EXISTS" => ProviderError::EmailAlreadyInUse,
        "INVALID_EMAIL" | "MISSING_EMAIL" => ProviderError::InvalidEmail,
        "WEAK_PASSWORD" => ProviderError::WeakPassword,
        "EMAIL_NOT_FOUND" => ProviderError::UserNotFound,
        "INVALID_PASSWORD" => ProviderError::WrongPassword,
        "INVALID_LOGIN_CREDENTIALS" => ProviderError::InvalidCredential,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => ProviderError::TooManyRequests,
        "OPERATION_NOT_ALLOWED" => ProviderError::OperationNotAllowed,
        other => ProviderError::Unknown {
            code: other.to_ascii_lowercase().replace('_', "-"),
        },
    }
}

#[derive(Deserialize)]
struct WireError {
    error: WireErrorBody,
}

#[derive(Deserialize)]
struct WireErrorBody {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    email: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    id_token: String,
    email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    email_verified: bool,
}

#[derive(Deserialize)]
struct IgnoredResponse {}

#[async_trait]
impl IdentityProviderPort for RestIdentityProvider {
    fn events(&self) -> &SessionEventHub {
        &self.hub
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderIdentity, ProviderError> {
        let signed_in: SignInResponse = self
            .post(
                "signInWithPassword",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        // The sign-in response does not carry the verification flag;
        // one lookup round-trip completes the principal.
        let looked_up = self.lookup(&signed_in.id_token).await?;

        let user = CurrentUser {
            id_token: signed_in.id_token,
            email: if looked_up.email.is_empty() {
                signed_in.email
            } else {
                looked_up.email
            },
            display_name: looked_up
                .display_name
                .or(signed_in.display_name)
                .unwrap_or_default(),
            verified: looked_up.email_verified,
        };
        Ok(self.store_current(user))
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<ProviderIdentity, ProviderError> {
        let signed_up: SignUpResponse = self
            .post(
                "signUp",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        let _: IgnoredResponse = self
            .post(
                "update",
                serde_json::json!({
                    "idToken": signed_up.id_token,
                    "displayName": display_name,
                    "returnSecureToken": false,
                }),
            )
            .await?;

        let _: IgnoredResponse = self
            .post(
                "sendOobCode",
                serde_json::json!({
                    "requestType": "VERIFY_EMAIL",
                    "idToken": signed_up.id_token,
                }),
            )
            .await?;

        let user = CurrentUser {
            id_token: signed_up.id_token,
            email: signed_up.email,
            display_name: display_name.to_string(),
            verified: false,
        };
        Ok(self.store_current(user))
    }

    async fn resend_verification(&self) -> Result<(), ProviderError> {
        let id_token = match &*self.current.lock().unwrap() {
            Some(user) => user.id_token.clone(),
            None => return Err(ProviderError::NoCurrentUser),
        };
        let _: IgnoredResponse = self
            .post(
                "sendOobCode",
                serde_json::json!({
                    "requestType": "VERIFY_EMAIL",
                    "idToken": id_token,
                }),
            )
            .await?;
        Ok(())
    }

    async fn reload_verified(&self) -> Result<bool, ProviderError> {
        let id_token = match &*self.current.lock().unwrap() {
            Some(user) => user.id_token.clone(),
            None => return Err(ProviderError::NoCurrentUser),
        };
        let looked_up = self.lookup(&id_token).await?;

        let flipped = {
            let mut current = self.current.lock().unwrap();
            match current.as_mut() {
                Some(user) if looked_up.email_verified && !user.verified => {
                    user.verified = true;
                    Some(user.clone())
                }
                _ => None,
            }
        };
        if let Some(user) = flipped {
            self.publish_current(&user);
        }
        Ok(looked_up.email_verified)
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        let _: IgnoredResponse = self
            .post(
                "sendOobCode",
                serde_json::json!({
                    "requestType": "PASSWORD_RESET",
                    "email": email,
                }),
            )
            .await?;
        Ok(())
    }

    async fn sign_out(&self) {
        *self.current.lock().unwrap() = None;
        self.hub.publish(SessionEvent::Changed(None));
    }
}
