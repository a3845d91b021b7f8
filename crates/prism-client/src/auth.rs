//! Authentication endpoints.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use prism_session::TokenPair;

use crate::client::ApiClient;
use crate::error::{ClientError, Result};

/// Profile of the logged-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
}

impl ApiClient {
    /// Logs in with username and password and stores the issued token pair
    /// in the session context.
    ///
    /// The login endpoint takes a form-encoded body, unlike the rest of the
    /// API.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let url = self.endpoint("/api/auth/login")?;
        let form = [("username", username), ("password", password)];
        let response = self.send(self.http().post(url).form(&form)).await?;
        let tokens: TokenResponse = self.decode(response).await?;

        if let Err(e) = self.session().set_tokens(TokenPair {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }) {
            warn!(error = %e, "failed to persist session");
        }
        debug!(username, "logged in");
        Ok(())
    }

    /// Fetches the logged-in user's profile.
    pub async fn me(&self) -> Result<UserProfile> {
        self.get_json("/api/auth/me").await
    }

    /// Exchanges the refresh token for a new token pair and stores it.
    pub async fn refresh(&self) -> Result<()> {
        let Some(refresh_token) = self.session().refresh_token() else {
            return Err(ClientError::Unauthorized);
        };

        let tokens: TokenResponse = self
            .post_json(
                "/api/auth/refresh",
                &RefreshBody {
                    refresh_token: &refresh_token,
                },
            )
            .await?;

        if let Err(e) = self.session().set_tokens(TokenPair {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }) {
            warn!(error = %e, "failed to persist session");
        }
        Ok(())
    }

    /// Revokes the refresh token server-side and clears the local session.
    ///
    /// The local session is cleared even if revocation fails, so a dead
    /// backend cannot pin a user to a logged-in state.
    pub async fn logout(&self) -> Result<()> {
        let revocation = match self.session().refresh_token() {
            Some(refresh_token) => {
                self.post_json_no_content(
                    "/api/auth/logout",
                    &RefreshBody {
                        refresh_token: &refresh_token,
                    },
                )
                .await
            }
            None => Ok(()),
        };

        if let Err(e) = self.session().clear_tokens() {
            warn!(error = %e, "failed to clear persisted session");
        }
        debug!("logged out");
        revocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_deserialization() {
        let json = r#"{"access_token": "aaa", "refresh_token": "rrr", "token_type": "bearer"}"#;
        let tokens: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.access_token, "aaa");
        assert_eq!(tokens.refresh_token, "rrr");
    }

    #[test]
    fn test_profile_deserialization() {
        let json = r#"{"username": "ada"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.username, "ada");
        assert!(profile.email.is_none());
    }
}
