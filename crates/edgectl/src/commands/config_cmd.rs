//! Config subcommand handlers.

use std::collections::BTreeMap;

use dialoguer::{Input, Select};

use edgectl_core::OrchestrationMode;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Defaults, Profile};
use crate::error::CliError;
use crate::output;

const SETTABLE_KEYS: &str =
    "controller_url, cups_url, cnca_url, username, orchestration, insecure, timeout, ca_cert";

const ORCHESTRATION_CHOICES: [&str; 3] = ["native", "kubernetes", "kubernetes-ovn"];

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the password.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "controller_url = \"{}\"", p.controller_url);
        if let Some(ref url) = p.cups_url {
            let _ = writeln!(out, "cups_url = \"{url}\"");
        }
        if let Some(ref url) = p.cnca_url {
            let _ = writeln!(out, "cnca_url = \"{url}\"");
        }
        let _ = writeln!(out, "orchestration = \"{}\"", p.orchestration);
        if let Some(ref u) = p.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

/// Copy of `cfg` safe to serialize for `--output json|yaml`.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("****".into());
        }
    }
    cfg
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn profile_not_found(cfg: &Config, name: String) -> CliError {
    let available: Vec<_> = cfg.profiles.keys().cloned().collect();
    CliError::ProfileNotFound {
        name,
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

/// Validate an http(s) URL without keeping the parsed form; profiles
/// store the string as typed.
fn checked_url(field: &str, raw: String) -> Result<String, CliError> {
    edgectl_config::parse_url(field, &raw)?;
    Ok(raw)
}

fn optional_url(field: &str, prompt: &str) -> Result<Option<String>, CliError> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    if raw.trim().is_empty() {
        return Ok(None);
    }
    checked_url(field, raw.trim().to_owned()).map(Some)
}

/// Offer to store the password in the system keyring or return it for
/// plaintext config. `None` means it went to the keyring.
fn prompt_password_storage(profile_name: &str, password: String) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        edgectl_config::store_password(profile_name, &password)?;
        eprintln!("   ✓ Password stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(password))
    }
}

fn parse_orchestration(value: &str) -> Result<OrchestrationMode, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: "orchestration".into(),
        reason: format!("must be one of {}", ORCHESTRATION_CHOICES.join(", ")),
    })
}

/// Apply one `config set` key to a profile.
fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "controller_url" | "controller-url" | "controller" => {
            profile.controller_url = checked_url("controller", value)?;
        }
        "cups_url" | "cups-url" => profile.cups_url = Some(checked_url("cups", value)?),
        "cnca_url" | "cnca-url" => profile.cnca_url = Some(checked_url("cnca", value)?),
        "username" => profile.username = Some(value),
        "orchestration" => profile.orchestration = parse_orchestration(&value)?,
        "insecure" => {
            profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                field: "insecure".into(),
                reason: "must be 'true' or 'false'".into(),
            })?);
        }
        "timeout" => {
            profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: "must be a number (seconds)".into(),
            })?);
        }
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!("unknown config key '{other}'. Valid keys: {SETTABLE_KEYS}"),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("edgectl configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let controller: String = Input::new()
                .with_prompt("Controller URL")
                .default("http://localhost:8080".into())
                .interact_text()
                .map_err(prompt_err)?;
            let controller_url = checked_url("controller", controller)?;

            let cups_url = optional_url("cups", "CUPS URL (blank to skip)")?;
            let cnca_url = optional_url("cnca", "CNCA URL (blank to skip)")?;

            let mode = Select::new()
                .with_prompt("Orchestration mode")
                .items(&ORCHESTRATION_CHOICES)
                .default(0)
                .interact()
                .map_err(prompt_err)?;
            let orchestration =
                parse_orchestration(ORCHESTRATION_CHOICES.get(mode).copied().unwrap_or("native"))?;

            let username: String = Input::new()
                .with_prompt("Username")
                .default("admin".into())
                .interact_text()
                .map_err(prompt_err)?;

            let password = rpassword::prompt_password("Password (blank to skip): ")
                .map_err(prompt_err)?;
            let password = if password.is_empty() {
                None
            } else {
                prompt_password_storage(&profile_name, password)?
            };

            let profile = Profile {
                controller_url,
                cups_url,
                cnca_url,
                username: Some(username),
                password,
                orchestration,
                ..Profile::default()
            };

            let mut profiles = BTreeMap::new();
            profiles.insert(profile_name.clone(), profile);

            let cfg = Config {
                default_profile: Some(profile_name.clone()),
                defaults: Defaults::default(),
                profiles,
            };

            save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Next: edgectl login");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_key(profile, &key, value)?;

            save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: edgectl config init");
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(&cfg, name));
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(profile_not_found(&cfg, profile_name));
            }

            let password = rpassword::prompt_password(format!("Password for '{profile_name}': "))
                .map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }

            edgectl_config::store_password(&profile_name, &password)?;
            eprintln!("✓ Password stored in system keyring for '{profile_name}'");
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_key_updates_profile_fields() {
        let mut profile = Profile::default();
        set_key(&mut profile, "controller_url", "https://ctl.lab:8080".into()).unwrap();
        set_key(&mut profile, "cnca-url", "http://af.lab:8050".into()).unwrap();
        set_key(&mut profile, "orchestration", "kubernetes-ovn".into()).unwrap();
        set_key(&mut profile, "timeout", "30".into()).unwrap();

        assert_eq!(profile.controller_url, "https://ctl.lab:8080");
        assert_eq!(profile.cnca_url.as_deref(), Some("http://af.lab:8050"));
        assert_eq!(profile.orchestration, OrchestrationMode::KubernetesOvn);
        assert_eq!(profile.timeout, Some(30));
    }

    #[test]
    fn set_key_rejects_unknown_keys_and_bad_values() {
        let mut profile = Profile::default();
        let err = set_key(&mut profile, "site", "x".into()).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "site"));

        assert!(set_key(&mut profile, "orchestration", "swarm".into()).is_err());
        assert!(set_key(&mut profile, "controller_url", "ftp://nope".into()).is_err());
        assert!(set_key(&mut profile, "insecure", "maybe".into()).is_err());
    }

    #[test]
    fn show_masks_passwords() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                controller_url: "http://ctl:8080".into(),
                password: Some("hunter2".into()),
                ..Profile::default()
            },
        );

        let text = format_config_redacted(&cfg);
        assert!(text.contains("[profiles.lab]"));
        assert!(text.contains("password = \"****\""));
        assert!(!text.contains("hunter2"));

        let json = serde_json::to_string(&redacted(&cfg)).unwrap();
        assert!(!json.contains("hunter2"));
    }
}
