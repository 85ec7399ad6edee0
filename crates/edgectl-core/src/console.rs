// ── Console façade ──
//
// Owns one `ApiClient` per configured backend. All clients share a
// single session store, so a login on the controller is visible to the
// CUPS and CNCA clients once they reload.

use std::sync::Arc;

use edgectl_api::{
    ApiClient, Auth, LoginOutcome, OrchestrationMode, SessionStore, UnauthorizedHook,
};
use secrecy::SecretString;
use tracing::{debug, warn};

use crate::config::ConsoleConfig;
use crate::error::CoreError;

/// Entry point for both front ends.
pub struct Console {
    config: ConsoleConfig,
    controller: Arc<ApiClient>,
    cups: Option<Arc<ApiClient>>,
    cnca: Option<Arc<ApiClient>>,
    auth: Auth,
}

impl Console {
    /// Build clients for every configured backend.
    ///
    /// `on_unauthorized` is installed on each client and fires after
    /// any 401 has cleared the shared session.
    pub fn new(
        config: ConsoleConfig,
        session: Arc<dyn SessionStore>,
        on_unauthorized: Option<UnauthorizedHook>,
    ) -> Result<Self, CoreError> {
        let build = |url: &url::Url| -> Result<Arc<ApiClient>, CoreError> {
            let mut client = ApiClient::new(url.as_str(), config.transport(), Arc::clone(&session))?;
            if let Some(hook) = &on_unauthorized {
                client = client.with_unauthorized_hook(Arc::clone(hook));
            }
            Ok(Arc::new(client))
        };

        let controller = build(&config.controller_url)?;
        let cups = config.cups_url.as_ref().map(&build).transpose()?;
        let cnca = config.cnca_url.as_ref().map(&build).transpose()?;
        let auth = Auth::new(Arc::clone(&controller));

        debug!(
            controller = %config.controller_url,
            cups = cups.is_some(),
            cnca = cnca.is_some(),
            mode = %config.orchestration,
            "console clients ready"
        );

        Ok(Self {
            config,
            controller,
            cups,
            cnca,
            auth,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn orchestration(&self) -> OrchestrationMode {
        self.config.orchestration
    }

    pub fn controller(&self) -> Arc<ApiClient> {
        Arc::clone(&self.controller)
    }

    pub fn cups(&self) -> Result<Arc<ApiClient>, CoreError> {
        self.cups.clone().ok_or_else(|| CoreError::Config {
            message: "no CUPS endpoint configured for this profile (set cups_url)".into(),
        })
    }

    pub fn cnca(&self) -> Result<Arc<ApiClient>, CoreError> {
        self.cnca.clone().ok_or_else(|| CoreError::Config {
            message: "no CNCA endpoint configured for this profile (set cnca_url)".into(),
        })
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Log in against the controller, then rotate the sibling clients.
    pub async fn login(&self, username: &str, password: &SecretString) -> LoginOutcome {
        let outcome = self.auth.login(username, password).await;
        if outcome.is_success() {
            self.reload_siblings();
        }
        outcome
    }

    /// Clear the session everywhere, then run `callback` once.
    pub fn logout<F: FnOnce()>(&self, callback: F) {
        self.auth.logout(|| {
            self.reload_siblings();
            callback();
        });
    }

    fn reload_siblings(&self) {
        for client in self.cups.iter().chain(self.cnca.iter()) {
            if let Err(e) = client.reload_session() {
                warn!(error = %e, url = %client.base_url(), "failed to rotate client session");
            }
        }
    }
}
