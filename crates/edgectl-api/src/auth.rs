use std::sync::Arc;

use secrecy::SecretString;
use tracing::{info, warn};

use crate::client::ApiClient;

/// Shown when the backend gives no reason for a failed login.
pub const LOGIN_FAILED_MESSAGE: &str = "Login Failed Try again Later";

/// Result of a login attempt.
///
/// Login never returns `Err`: every failure is folded into
/// [`Failure`](Self::Failure) with text suitable for a form helper line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failure { error_text: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Login/logout façade over an [`ApiClient`] and its session store.
///
/// There is no refresh and no expiry tracking; a 401 from any call is
/// the only signal that a session is over.
#[derive(Clone)]
pub struct Auth {
    client: Arc<ApiClient>,
}

impl Auth {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// `POST /auth`, then store the returned token and rotate the transport.
    pub async fn login(&self, username: &str, password: &SecretString) -> LoginOutcome {
        match self.client.request_token(username, password).await {
            Ok(Some(token)) => match self.client.set_jwt(&token) {
                Ok(()) => {
                    info!(username, "logged in");
                    LoginOutcome::Success
                }
                Err(e) => LoginOutcome::Failure {
                    error_text: e.to_string(),
                },
            },
            Ok(None) => {
                warn!(username, "login response carried no token");
                LoginOutcome::Failure {
                    error_text: LOGIN_FAILED_MESSAGE.to_owned(),
                }
            }
            Err(e) => {
                warn!(username, error = %e, "login failed");
                LoginOutcome::Failure {
                    error_text: e
                        .server_message()
                        .map_or_else(|| LOGIN_FAILED_MESSAGE.to_owned(), str::to_owned),
                }
            }
        }
    }

    /// Clear the stored token, then invoke `callback` exactly once.
    pub fn logout<F: FnOnce()>(&self, callback: F) {
        if let Err(e) = self.client.clear_jwt() {
            warn!(error = %e, "failed to clear session on logout");
        }
        info!("logged out");
        callback();
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.is_authenticated()
    }
}
