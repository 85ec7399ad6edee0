// ── Runtime console configuration ──
//
// Built by the front ends from a resolved profile. Never touches disk.

use std::path::PathBuf;
use std::time::Duration;

use edgectl_api::{DEFAULT_TIMEOUT, OrchestrationMode, TlsMode, TransportConfig};
use url::Url;

/// How to verify the backends' TLS certificates.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// Use the system certificate store.
    #[default]
    SystemDefaults,
    /// Trust an additional CA from a PEM file.
    CustomCa(PathBuf),
    /// Skip verification entirely (lab deployments with self-signed certs).
    DangerAcceptInvalid,
}

/// Everything needed to talk to one deployment's consoles.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Controller API base (nodes, apps, policies, auth).
    pub controller_url: Url,
    /// CUPS userplane API base, if this deployment has one.
    pub cups_url: Option<Url>,
    /// CNCA AF server base, if this deployment has one.
    pub cnca_url: Option<Url>,
    pub orchestration: OrchestrationMode,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl ConsoleConfig {
    pub fn new(controller_url: Url) -> Self {
        Self {
            controller_url,
            cups_url: None,
            cnca_url: None,
            orchestration: OrchestrationMode::default(),
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig::default()
            .with_timeout(self.timeout)
            .with_tls(tls)
    }
}
