//! Login, logout, and status: the commands that manage the stored session.

use secrecy::SecretString;

use edgectl_core::{Console, LoginOutcome};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::{Config, session_path};
use crate::error::CliError;
use crate::output;

/// Authenticate against the controller and persist the token for later runs.
///
/// The username comes from `--username`, then the profile. The password
/// comes from `EDGECTL_PASSWORD`, the keyring, or the profile, and is
/// prompted for as a last resort.
pub async fn login(
    console: &Console,
    config: &Config,
    profile_name: &str,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let profile = config.profiles.get(profile_name);

    let username = args
        .username
        .or_else(|| profile.and_then(|p| p.username.clone()))
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.to_owned(),
        })?;

    let password = match edgectl_config::resolve_password(profile, profile_name) {
        Some(password) => password,
        None => prompt_password(&username, profile_name)?,
    };

    let pb = output::spinner("Logging in", global);
    let outcome = console.login(&username, &password).await;
    pb.finish_and_clear();

    match outcome {
        LoginOutcome::Success => {
            if !global.quiet {
                eprintln!(
                    "✓ Logged in to {} as {username}",
                    console.config().controller_url
                );
            }
            Ok(())
        }
        LoginOutcome::Failure { error_text } => Err(CliError::AuthFailed {
            profile: profile_name.to_owned(),
            message: error_text,
        }),
    }
}

fn prompt_password(username: &str, profile_name: &str) -> Result<SecretString, CliError> {
    let password = rpassword::prompt_password(format!("Password for {username}: "))
        .map_err(|_| CliError::NoCredentials {
            profile: profile_name.to_owned(),
        })?;
    if password.is_empty() {
        return Err(CliError::NoCredentials {
            profile: profile_name.to_owned(),
        });
    }
    Ok(SecretString::from(password))
}

pub fn logout(console: &Console, global: &GlobalOpts) {
    let was_authenticated = console.is_authenticated();
    console.logout(|| {
        if global.quiet {
            return;
        }
        if was_authenticated {
            eprintln!("✓ Logged out");
        } else {
            eprintln!("Not logged in");
        }
    });
}

pub fn status(console: &Console, profile_name: &str, global: &GlobalOpts) {
    let cfg = console.config();
    let optional = |url: Option<&url::Url>| url.map_or_else(|| "-".into(), ToString::to_string);
    let session = if console.is_authenticated() {
        "logged in"
    } else {
        "not logged in"
    };

    let out = output::detail(&[
        ("Profile", profile_name.to_owned()),
        ("Controller", cfg.controller_url.to_string()),
        ("CUPS", optional(cfg.cups_url.as_ref())),
        ("CNCA", optional(cfg.cnca_url.as_ref())),
        ("Orchestration", cfg.orchestration.to_string()),
        ("Session", session.to_owned()),
        ("Session file", session_path(profile_name).display().to_string()),
    ]);
    output::print_output(&out, global.quiet);
}
