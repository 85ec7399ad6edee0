//! Shared configuration for the edgectl CLI and TUI.
//!
//! TOML profiles, on-disk locations (config, session token, logs),
//! password resolution (env + keyring + plaintext), and translation to
//! `edgectl_core::ConsoleConfig`. The CLI layers its flag overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use edgectl_core::{ConsoleConfig, OrchestrationMode, TlsVerification};

/// Environment variable consulted first for the login password.
pub const PASSWORD_ENV: &str = "EDGECTL_PASSWORD";

/// Overrides the config file location (tests, scripted setups).
pub const CONFIG_PATH_ENV: &str = "EDGECTL_CONFIG";

const KEYRING_SERVICE: &str = "edgectl";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named deployments.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Explicit name if given, else `default_profile`, else `"default"`.
    pub fn active_profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.into(),
                available: self.profile_names(),
            })
    }

    fn profile_names(&self) -> String {
        if self.profiles.is_empty() {
            "none".into()
        } else {
            self.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    10
}

/// One edge deployment: a controller plus optional CUPS and CNCA consoles.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Controller API base URL (e.g. "https://controller.lab:8080").
    pub controller_url: String,

    /// CUPS userplane API base URL.
    pub cups_url: Option<String>,

    /// CNCA AF server base URL.
    pub cnca_url: Option<String>,

    pub username: Option<String>,

    /// Password (plaintext, prefer keyring or `EDGECTL_PASSWORD`).
    pub password: Option<String>,

    #[serde(default)]
    pub orchestration: OrchestrationMode,

    /// Path to a PEM CA bundle for self-signed controllers.
    pub ca_cert: Option<PathBuf>,

    pub insecure: Option<bool>,

    pub timeout: Option<u64>,
}

impl Profile {
    /// Runtime console settings for this profile, with `defaults` filling
    /// the gaps. Never touches disk.
    pub fn to_console_config(&self, defaults: &Defaults) -> Result<ConsoleConfig, ConfigError> {
        let mut config = ConsoleConfig::new(parse_url("controller_url", &self.controller_url)?);
        config.cups_url = self
            .cups_url
            .as_deref()
            .map(|u| parse_url("cups_url", u))
            .transpose()?;
        config.cnca_url = self
            .cnca_url
            .as_deref()
            .map(|u| parse_url("cnca_url", u))
            .transpose()?;
        config.orchestration = self.orchestration;
        config.tls = if self.insecure.unwrap_or(defaults.insecure) {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca) = self.ca_cert {
            TlsVerification::CustomCa(ca.clone())
        } else {
            TlsVerification::SystemDefaults
        };
        config.timeout = Duration::from_secs(self.timeout.unwrap_or(defaults.timeout));
        Ok(config)
    }
}

/// Parse a base URL, rejecting anything that is not http(s).
pub fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    let url: Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected an http(s) URL, got {raw}"),
        });
    }
    Ok(url)
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "edgectl", "edgectl")
}

fn home_fallback(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    for part in parts {
        p.push(part);
    }
    p
}

/// Resolve the config file path: `EDGECTL_CONFIG`, else XDG / platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    project_dirs().map_or_else(
        || home_fallback(&[".config", "edgectl", "config.toml"]),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Directory for runtime state: session tokens and TUI logs.
pub fn state_dir() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".local", "state", "edgectl"]),
        |dirs| {
            dirs.state_dir()
                .map_or_else(|| dirs.data_local_dir().to_path_buf(), Path::to_path_buf)
        },
    )
}

/// Where the CLI persists the session token for `profile`.
pub fn session_path(profile: &str) -> PathBuf {
    state_dir().join(format!("session-{profile}.toml"))
}

pub fn log_dir() -> PathBuf {
    state_dir().join("logs")
}

// ── Loading / saving ────────────────────────────────────────────────

/// Load the config from the canonical path plus `EDGECTL_*` env vars.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Defaults, then the TOML file (if present), then env. Nested keys use
/// a double underscore: `EDGECTL_DEFAULTS__TIMEOUT=30`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("EDGECTL_").split("__"))
        .extract()?;
    Ok(config)
}

/// Load config, falling back to defaults if it is missing or invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Passwords ───────────────────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

/// Resolve the login password without prompting: `EDGECTL_PASSWORD`,
/// then the keyring entry `edgectl/<profile>/password`, then plaintext
/// in the profile. `None` means the caller has to ask.
pub fn resolve_password(profile: Option<&Profile>, profile_name: &str) -> Option<SecretString> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Some(SecretString::from(pw));
        }
    }

    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(pw) = entry.get_password() {
            return Some(SecretString::from(pw));
        }
    }

    profile
        .and_then(|p| p.password.clone())
        .map(SecretString::from)
}

/// Store a password in the system keyring for `profile_name`.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?
        .set_password(password)
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lab_profile() -> Profile {
        Profile {
            controller_url: "https://controller.lab:8080".into(),
            cups_url: Some("https://cups.lab:8081".into()),
            username: Some("admin".into()),
            orchestration: OrchestrationMode::KubernetesOvn,
            ..Profile::default()
        }
    }

    #[test]
    fn save_then_load_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert("lab".into(), lab_profile());
        cfg.default_profile = Some("lab".into());
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.default_profile.as_deref(), Some("lab"));
        let lab = loaded.profile("lab").unwrap();
        assert_eq!(lab.controller_url, "https://controller.lab:8080");
        assert_eq!(lab.orchestration, OrchestrationMode::KubernetesOvn);
        assert_eq!(loaded.defaults.timeout, 10);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.profiles.is_empty());
        assert_eq!(loaded.defaults.output, "table");
        assert_eq!(loaded.active_profile_name(None), "default");
        assert_eq!(loaded.active_profile_name(Some("x")), "x");
    }

    #[test]
    fn env_overrides_file_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [defaults]
                timeout = 5

                [profiles.lab]
                controller_url = "http://c:8080"
                "#,
            )?;
            jail.set_env("EDGECTL_DEFAULTS__TIMEOUT", "30");

            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.defaults.timeout, 30);
            assert_eq!(cfg.profiles["lab"].controller_url, "http://c:8080");
            Ok(())
        });
    }

    #[test]
    fn unknown_profile_lists_available() {
        let mut cfg = Config::default();
        cfg.profiles.insert("lab".into(), lab_profile());
        let err = cfg.profile("prod").unwrap_err();
        assert_eq!(
            err.to_string(),
            "profile 'prod' not found (available: lab)"
        );
    }

    #[test]
    fn profile_translates_to_console_config() {
        let defaults = Defaults {
            timeout: 25,
            ..Defaults::default()
        };
        let console = lab_profile().to_console_config(&defaults).unwrap();

        assert_eq!(console.controller_url.as_str(), "https://controller.lab:8080/");
        assert_eq!(
            console.cups_url.as_ref().map(Url::as_str),
            Some("https://cups.lab:8081/")
        );
        assert!(console.cnca_url.is_none());
        assert_eq!(console.orchestration, OrchestrationMode::KubernetesOvn);
        assert_eq!(console.timeout, Duration::from_secs(25));
        assert!(matches!(console.tls, TlsVerification::SystemDefaults));
    }

    #[test]
    fn insecure_and_bad_urls() {
        let insecure = Profile {
            insecure: Some(true),
            ..lab_profile()
        };
        let console = insecure.to_console_config(&Defaults::default()).unwrap();
        assert!(matches!(console.tls, TlsVerification::DangerAcceptInvalid));

        let bad = Profile {
            controller_url: "ftp://controller".into(),
            ..Profile::default()
        };
        let err = bad.to_console_config(&Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "controller_url"));
    }

    #[test]
    fn session_file_is_per_profile() {
        let path = session_path("lab");
        assert_eq!(path.file_name().unwrap(), "session-lab.toml");
        assert!(log_dir().ends_with("logs"));
    }
}
