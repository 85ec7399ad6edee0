//! CLI configuration: thin wrapper around `edgectl_config` shared types.
//!
//! Adds the resolution step that layers `GlobalOpts` flag overrides
//! (--controller, --insecure, --timeout, --orchestration) over a profile.

use std::time::Duration;

use edgectl_core::{ConsoleConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use edgectl_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config, session_path,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Translate the active profile plus global flags into a `ConsoleConfig`.
///
/// CLI flag overrides take priority over profile values. Without a
/// matching profile, `--controller` alone is enough.
pub fn resolve_console_config(
    config: &Config,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<ConsoleConfig, CliError> {
    let mut console = match config.profiles.get(profile_name) {
        Some(profile) => profile.to_console_config(&config.defaults)?,
        None => {
            if global.profile.is_some() && global.controller.is_none() {
                config.profile(profile_name)?;
            }
            let url = global.controller.as_deref().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            ConsoleConfig::new(edgectl_config::parse_url("controller", url)?)
        }
    };

    if let Some(ref url) = global.controller {
        console.controller_url = edgectl_config::parse_url("controller", url)?;
    }
    if global.insecure {
        console.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        console.timeout = Duration::from_secs(secs);
    }
    if let Some(mode) = global.orchestration {
        console.orchestration = mode;
    }
    Ok(console)
}
