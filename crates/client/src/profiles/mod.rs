//! Profile service client.
//!
//! Thin typed wrappers over the service's five REST endpoints. Each
//! call is a single request - no retries, no de-duplication - and any
//! failure is terminal to that call only.
//!
//! Successful register/login/update calls overwrite the local session
//! cache as a side effect; [`ProfileClient::logout`] clears it.
//!
//! # Example
//!
//! ```rust,ignore
//! use userhub_client::{ClientConfig, ProfileClient};
//!
//! let config = ClientConfig::from_env()?;
//! let client = ProfileClient::new(&config)?;
//!
//! let login = client.login("a@b.com", "hunter22").await?;
//! let profile = client.profile(client.session().unwrap().profile_id).await?;
//! ```

mod types;

pub use types::{LoginResponse, NewProfile, ProfileRecord, ProfileUpdate};

use std::sync::Arc;

use reqwest::Response;
use serde::de::DeserializeOwned;

use userhub_core::ProfileId;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::{FileSessionStore, SessionInfo, SessionStore};
use types::{
    LoginRequest, RawProfile, VerifyPasswordRequest, VerifyPasswordResponse, build_payload,
};

/// Client for the profile service REST API.
///
/// Cheap to clone; all clones share one connection pool and one session
/// store.
#[derive(Clone)]
pub struct ProfileClient {
    inner: Arc<ProfileClientInner>,
}

struct ProfileClientInner {
    http: reqwest::Client,
    api_base: String,
    store: Arc<dyn SessionStore>,
}

impl ProfileClient {
    /// Create a client with the file-backed session store from the
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let store = Arc::new(FileSessionStore::new(config.session_file.clone()));
        Self::with_store(config, store)
    }

    /// Create a client with an injected session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_store(
        config: &ClientConfig,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ProfileClientInner {
                http,
                api_base: config.api_base.as_str().trim_end_matches('/').to_string(),
                store,
            }),
        })
    }

    /// Read the cached session, if any.
    #[must_use]
    pub fn session(&self) -> Option<SessionInfo> {
        self.inner.store.get()
    }

    /// Clear the cached session. Clearing an empty session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.inner.store.clear()?;
        tracing::debug!("session cleared");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Endpoint Wrappers
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a new profile. `POST /api/profiles`.
    ///
    /// Address rows are validated and encoded locally before any network
    /// call. On success the local session is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` on bad local input,
    /// `ClientError::Api` on a non-2xx response.
    pub async fn register(&self, profile: &NewProfile) -> Result<ProfileRecord, ClientError> {
        let payload = build_payload(
            &profile.email,
            &profile.password,
            profile.name.as_deref(),
            profile.dob.as_deref(),
            profile.sex.as_deref(),
            &profile.phones,
            &profile.addresses,
        )?;

        let response = self
            .inner
            .http
            .post(format!("{}/api/profiles", self.inner.api_base))
            .json(&payload)
            .send()
            .await?;

        let raw: RawProfile = read_json(response, "Register").await?;
        let record = raw.normalize();
        self.remember(&record)?;
        tracing::debug!(profile_id = %record.id, "profile registered");
        Ok(record)
    }

    /// Log in with email and password. `POST /api/profiles/login`.
    ///
    /// On success the local session is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` on a non-2xx response (surfacing the
    /// server's `message` when the body parses) and
    /// `ClientError::Rejected` when a 2xx response carries
    /// `success: false` or lacks the profile id/email.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            email: email.trim(),
            password,
        };

        let response = self
            .inner
            .http
            .post(format!("{}/api/profiles/login", self.inner.api_base))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            // Prefer the structured message; malformed JSON is swallowed
            // and falls back to the generic text.
            let message = response
                .json::<LoginResponse>()
                .await
                .ok()
                .map(|r| r.message);
            return Err(ClientError::api("Login", status, message));
        }

        let text = response.text().await?;
        let data: LoginResponse = serde_json::from_str(&text)?;

        let (Some(profile_id), Some(login_email)) = (data.profile_id, data.email.clone()) else {
            return Err(ClientError::Rejected(reject_message(&data.message)));
        };
        if !data.success {
            return Err(ClientError::Rejected(reject_message(&data.message)));
        }

        self.inner.store.set(&SessionInfo {
            profile_id: ProfileId::new(profile_id),
            email: login_email,
            name: data.name.clone().filter(|n| !n.is_empty()),
        })?;
        tracing::debug!(profile_id, "logged in");
        Ok(data)
    }

    /// Fetch a profile by id. `GET /api/profiles/{id}`.
    ///
    /// Read-only: the session is not touched.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` on 404 or any other non-2xx response.
    pub async fn profile(&self, id: ProfileId) -> Result<ProfileRecord, ClientError> {
        let response = self
            .inner
            .http
            .get(format!("{}/api/profiles/{id}", self.inner.api_base))
            .send()
            .await?;

        let raw: RawProfile = read_json(response, "Fetch profile").await?;
        Ok(raw.normalize())
    }

    /// Update a profile. `PUT /api/profiles/{id}`.
    ///
    /// The service demands password re-entry to authorize any update;
    /// a blank password fails locally before any network call. On
    /// success the local session is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` on bad local input,
    /// `ClientError::Api` on a non-2xx response.
    pub async fn update(
        &self,
        id: ProfileId,
        update: &ProfileUpdate,
    ) -> Result<ProfileRecord, ClientError> {
        if update.password.trim().is_empty() {
            return Err(ClientError::Validation(
                "password is required to save changes".to_string(),
            ));
        }

        let payload = build_payload(
            &update.email,
            &update.password,
            update.name.as_deref(),
            update.dob.as_deref(),
            update.sex.as_deref(),
            &update.phones,
            &update.addresses,
        )?;

        let response = self
            .inner
            .http
            .put(format!("{}/api/profiles/{id}", self.inner.api_base))
            .json(&payload)
            .send()
            .await?;

        let raw: RawProfile = read_json(response, "Update").await?;
        let record = raw.normalize();
        self.remember(&record)?;
        tracing::debug!(profile_id = %record.id, "profile updated");
        Ok(record)
    }

    /// Check a password against a profile.
    /// `POST /api/profiles/{id}/verify-password`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` on a non-2xx response.
    pub async fn verify_password(
        &self,
        id: ProfileId,
        password: &str,
    ) -> Result<bool, ClientError> {
        let response = self
            .inner
            .http
            .post(format!(
                "{}/api/profiles/{id}/verify-password",
                self.inner.api_base
            ))
            .json(&VerifyPasswordRequest { password })
            .send()
            .await?;

        let result: VerifyPasswordResponse = read_json(response, "Verify password").await?;
        Ok(result.matches)
    }

    /// Overwrite the session from a freshly returned profile.
    fn remember(&self, record: &ProfileRecord) -> Result<(), ClientError> {
        self.inner.store.set(&SessionInfo {
            profile_id: record.id,
            email: record.email.clone(),
            name: Some(record.name.clone()).filter(|n| !n.is_empty()),
        })?;
        Ok(())
    }
}

/// Turn a response into `T`, or into the taxonomy's error for `action`:
/// non-2xx becomes `Api` with the body text (unreadable bodies fall
/// back to the generic message), a 2xx body that does not match the
/// contract becomes `Parse`.
async fn read_json<T: DeserializeOwned>(
    response: Response,
    action: &str,
) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.ok();
        return Err(ClientError::api(action, status.as_u16(), body));
    }

    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Message for a 2xx login response that still isn't a usable login.
fn reject_message(server_message: &str) -> String {
    if server_message.trim().is_empty() {
        "Invalid login response".to_string()
    } else {
        server_message.to_string()
    }
}
