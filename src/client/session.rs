//! Session tracking and authenticated dispatch.
//!
//! API-key clients attach the key to every request and never hold a
//! session. Password clients exchange their credentials for a session
//! token on first use and reuse it until logout. The token is only
//! written after the transport call has returned, so a cancelled (dropped)
//! login or logout leaves the session state untouched.

use crate::error::{DmapiError, Result};
use crate::response::DmapiResponse;

use super::{Credentials, DmapiClient};

impl DmapiClient {
    /// Logs in with the configured credentials.
    ///
    /// On a successful reply carrying a session token the token is stored
    /// for subsequent requests. The raw response is returned either way;
    /// a server-side rejection shows up as `is_success() == false`, not
    /// as an error.
    pub async fn login(&self) -> Result<DmapiResponse> {
        let params = match &self.credentials {
            Credentials::ApiKey { api_key } => vec![("api-key", api_key.clone())],
            Credentials::Password { username, password } => vec![
                ("username", username.clone()),
                ("password", password.clone()),
            ],
        };

        let response = self.execute("login", &params).await?;

        if let Some(session_id) = usable_session_token(&response) {
            *self.session_slot() = Some(session_id.to_string());
            log::debug!("[dmapi] session established");
        }

        Ok(response)
    }

    /// Logs out, invalidating the held session token.
    ///
    /// Sends the held token (or the API key, for key-based clients). The
    /// token is cleared only when the server confirms the logout.
    pub async fn logout(&self) -> Result<DmapiResponse> {
        let params = match &self.credentials {
            Credentials::ApiKey { api_key } => vec![("api-key", api_key.clone())],
            Credentials::Password { .. } => match self.session_id() {
                Some(session_id) => vec![("auth-sid", session_id)],
                None => Vec::new(),
            },
        };

        let response = self.execute("logout", &params).await?;

        if response.is_success() {
            *self.session_slot() = None;
            log::debug!("[dmapi] session cleared");
        }

        Ok(response)
    }

    /// Makes sure an authenticated request can be issued.
    ///
    /// No-op for API-key clients and for password clients that already
    /// hold a session. Otherwise performs a login and fails with
    /// [`DmapiError::AuthenticationFailed`] if it does not yield a usable
    /// token.
    pub(crate) async fn ensure_session(&self) -> Result<()> {
        if matches!(self.credentials, Credentials::ApiKey { .. }) {
            return Ok(());
        }
        if self.session_slot().is_some() {
            return Ok(());
        }

        let response = self.login().await?;
        if self.session_slot().is_none() {
            let detail = response
                .errors
                .first()
                .cloned()
                .or_else(|| response.status_text.clone())
                .unwrap_or_else(|| "login did not return a session token".to_string());
            log::error!("[dmapi] login failed: {detail}");
            return Err(DmapiError::AuthenticationFailed { detail });
        }

        Ok(())
    }

    /// Executes an operation with authentication attached: the API key
    /// when one is configured, otherwise the held session token.
    pub(crate) async fn execute_authenticated(
        &self,
        operation: &str,
        mut params: Vec<(&str, String)>,
    ) -> Result<DmapiResponse> {
        self.ensure_session().await?;

        match &self.credentials {
            Credentials::ApiKey { api_key } => params.push(("api-key", api_key.clone())),
            Credentials::Password { .. } => {
                let session_id =
                    self.session_id()
                        .ok_or_else(|| DmapiError::AuthenticationFailed {
                            detail: "no session token held".to_string(),
                        })?;
                params.push(("auth-sid", session_id));
            }
        }

        self.execute(operation, &params).await
    }
}

/// The session token from a login reply, when the reply is successful and
/// the token is non-empty. Anything else leaves the session untouched.
fn usable_session_token(response: &DmapiResponse) -> Option<&str> {
    if !response.is_success() {
        return None;
    }
    response.session_id.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_key_client() -> DmapiClient {
        DmapiClient::new(Credentials::ApiKey {
            api_key: "key".to_string(),
        })
        .unwrap()
    }

    fn password_client() -> DmapiClient {
        DmapiClient::new(Credentials::Password {
            username: "user".to_string(),
            password: "secret".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn api_key_client_is_always_ready() {
        let client = api_key_client();
        assert!(client.ensure_session().await.is_ok());
        assert!(client.session_id().is_none());
    }

    #[tokio::test]
    async fn password_client_with_held_token_skips_login() {
        let client = password_client();
        *client.session_slot() = Some("held-token".to_string());
        // Would hit the network if it tried to log in; the held token
        // short-circuits that.
        assert!(client.ensure_session().await.is_ok());
        assert_eq!(client.session_id().as_deref(), Some("held-token"));
    }

    #[test]
    fn token_accepted_from_successful_login() {
        let response = DmapiResponse::parse("Status-Code: 0\nResult: ACK\nAuth-Sid: tok-1\n");
        assert_eq!(usable_session_token(&response), Some("tok-1"));
    }

    #[test]
    fn token_rejected_from_failed_login() {
        let response =
            DmapiResponse::parse("Status-Code: 2200\nResult: NACK\nAuth-Sid: tok-1\nError: bad login\n");
        assert_eq!(usable_session_token(&response), None);
    }

    #[test]
    fn empty_token_rejected() {
        let response = DmapiResponse::parse("Status-Code: 0\nResult: ACK\nAuth-Sid:\n");
        assert_eq!(usable_session_token(&response), None);
    }

    #[test]
    fn missing_token_rejected() {
        let response = DmapiResponse::parse("Status-Code: 0\nResult: ACK\n");
        assert_eq!(usable_session_token(&response), None);
    }
}
