//! Login and session lifecycle.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::{KastError, Result};
use crate::session::core::{AuthStatus, Config, Session};

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CheckAuthResponse {
    #[serde(default)]
    authenticated: bool,
    #[serde(default, rename = "isAdmin")]
    is_admin: bool,
}

impl Session {
    /// Connect to a backend without credentials.
    ///
    /// The session starts unauthenticated; [`check_auth`](Self::check_auth)
    /// picks up whatever the cookie store already carries (nothing, for a
    /// fresh client).
    pub fn connect(config: &Config) -> Result<Self> {
        Ok(Self::new(config.build_api()?))
    }

    /// Login with username and password.
    ///
    /// On success the backend sets the session cookie on the underlying
    /// client and the account flags are populated from `/check-auth`.
    ///
    /// # Example
    /// ```no_run
    /// use kastlib::{Config, Session};
    ///
    /// # async fn example() -> kastlib::Result<()> {
    /// let config = Config::new("https://files.example.com");
    /// let session = Session::login(&config, "jan", "password").await?;
    /// println!("admin: {}", session.is_admin());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn login(config: &Config, username: &str, password: &str) -> Result<Self> {
        let mut session = Self::connect(config)?;
        session.submit_login(username, password).await?;
        session.check_auth().await;
        Ok(session)
    }

    async fn submit_login(&mut self, username: &str, password: &str) -> Result<()> {
        let url = self.api.login_url();
        let body = json!({ "username": username, "password": password });
        let response = self.api.post_json_raw(&url, &body).await?;
        let status = response.status().as_u16();

        // The login endpoint carries its message in the body on both the
        // success and the error status path.
        match response.json::<LoginResponse>().await {
            Ok(login) if login.success => {
                debug!(username, "login accepted");
                Ok(())
            }
            Ok(login) => Err(KastError::LoginRejected(
                login
                    .error
                    .unwrap_or_else(|| "Invalid username or password".to_string()),
            )),
            Err(_) if !(200..300).contains(&status) => Err(KastError::Api {
                status,
                message: crate::api::ApiFailure::from_status(status)
                    .description()
                    .to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Refresh the account flags from `/check-auth`.
    ///
    /// Any rejection, transport-level or status-level, downgrades the
    /// session to unauthenticated instead of failing.
    pub async fn check_auth(&mut self) -> AuthStatus {
        let url = self.api.check_auth_url();
        match self.api.get_json::<CheckAuthResponse>(&url).await {
            Ok(auth) => {
                self.status = AuthStatus {
                    authenticated: auth.authenticated,
                    is_admin: auth.is_admin,
                };
            }
            Err(e) => {
                warn!(error = %e, "check-auth failed; treating session as unauthenticated");
                self.status = AuthStatus::default();
            }
        }
        self.status
    }

    /// Tear the session down.
    ///
    /// The wire contract exposes no logout endpoint; teardown is
    /// client-side and consists of dropping the cookie store with the
    /// session.
    pub fn logout(self) {
        debug!("session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_shapes() {
        let ok: LoginResponse = serde_json::from_str(r#"{"success":true}"#).expect("ok");
        assert!(ok.success);
        assert!(ok.error.is_none());

        let rejected: LoginResponse =
            serde_json::from_str(r#"{"success":false,"error":"Account locked"}"#).expect("rejected");
        assert!(!rejected.success);
        assert_eq!(rejected.error.as_deref(), Some("Account locked"));
    }

    #[test]
    fn test_check_auth_response_shape() {
        let auth: CheckAuthResponse =
            serde_json::from_str(r#"{"authenticated":true,"isAdmin":true}"#).expect("auth");
        assert!(auth.authenticated);
        assert!(auth.is_admin);

        // Missing fields default to false
        let auth: CheckAuthResponse = serde_json::from_str("{}").expect("auth");
        assert!(!auth.authenticated);
        assert!(!auth.is_admin);
    }
}
