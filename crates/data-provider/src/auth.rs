//! Session retrieval, sign-in and sign-out against the auth server.

use crate::{
    error::{GENERIC_HTTP_ERROR, ProviderError},
    response::read_body,
    session::{LocalStore, SIGN_IN_KEY, TOKEN_KEY, clear_session, disable_guest_mode},
};
use log::{debug, warn};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Mount point of the auth routes on the auth server
pub const AUTH_BASE_PATH: &str = "api/auth/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub email_verified: bool,
    pub image: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub expires_at: Option<String>,
    pub token: Option<String>,
}

/// What the session endpoints return for a signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub session: Option<SessionInfo>,
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: Url,
}

impl AuthClient {
    pub fn new(auth_base_url: Url) -> Self {
        Self::with_client(Client::new(), auth_base_url)
    }

    pub fn with_client(client: Client, auth_base_url: Url) -> Self {
        Self {
            client,
            base_url: auth_base_url,
        }
    }

    fn url(&self, route: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(AUTH_BASE_PATH)
            .and_then(|base| base.join(route))
            .map_err(|e| ProviderError::InvalidInput(format!("Bad auth route '{route}': {e}")))
    }

    /// Looks up the current session
    ///
    /// The plain session endpoint is tried first; when it has no user and a
    /// token is stored, the token endpoint is tried with that token. If
    /// neither yields a user, the stored session is cleared.
    pub async fn get_session(
        &self,
        store: &mut LocalStore,
    ) -> Result<Option<Session>, ProviderError> {
        let request = self.client.get(self.url("get-session")?);
        if let Some(session) = Self::fetch_session(request).await? {
            if let Some(token) = session.session.as_ref().and_then(|s| s.token.as_deref()) {
                store.set_item(TOKEN_KEY, token)?;
            }
            return Ok(Some(session));
        }

        if let Some(token) = store.get_item(TOKEN_KEY).map(str::to_string) {
            let request = self
                .client
                .get(self.url("get-session-with-token")?)
                .bearer_auth(token);
            if let Some(session) = Self::fetch_session(request).await? {
                return Ok(Some(session));
            }
        }

        debug!("No valid session found, clearing stored session");
        clear_session(store)?;
        Ok(None)
    }

    /// A session from `request`, or `None` when the response is not a
    /// successful body carrying a user
    async fn fetch_session(
        request: reqwest::RequestBuilder,
    ) -> Result<Option<Session>, ProviderError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Ok(None);
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice::<Session>(&body).ok())
    }

    /// Signs in with email and password. On success the result and its token
    /// are stored and guest mode is switched off.
    pub async fn sign_in_email(
        &self,
        store: &mut LocalStore,
        email: &str,
        password: &str,
    ) -> Result<Value, ProviderError> {
        let response = self
            .client
            .post(self.url("sign-in/email")?)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body = read_body(response).await?;
        let result: Value = serde_json::from_slice(&body)?;

        if let Some(error) = result.get("error").filter(|e| !e.is_null()) {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(GENERIC_HTTP_ERROR)
                .to_string();
            return Err(ProviderError::Http {
                status_code: 401,
                message,
            });
        }

        store.set_item(SIGN_IN_KEY, &result.to_string())?;
        if let Some(token) = result.get("token").and_then(Value::as_str) {
            store.set_item(TOKEN_KEY, token)?;
        }
        disable_guest_mode(store)?;

        Ok(result)
    }

    /// Clears the stored session, then tells the server
    pub async fn sign_out(&self, store: &mut LocalStore) -> Result<(), ProviderError> {
        let token = store.get_item(TOKEN_KEY).map(str::to_string);
        clear_session(store)?;

        let mut request = self.client.post(self.url("sign-out")?).json(&json!({}));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        if let Err(e) = read_body(request.send().await?).await {
            warn!("Sign-out was not acknowledged by the server: {e}");
        }

        Ok(())
    }
}
