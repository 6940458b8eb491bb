//! CLI-side configuration resolution: config file + profile + flag overrides.

use std::time::Duration;

use secrecy::SecretString;

use paydeck_config::{Config, Profile};
use paydeck_core::{ClientConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The profile name to use: `--profile` flag, then the config default.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ClientConfig` from the config file, active profile, and CLI
/// flag overrides. Flags win over profile values.
pub fn resolve_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = paydeck_config::load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_from_profile(profile, &profile_name, global);
    }

    // No profile — build entirely from flags / env vars.
    let url_str = global.api_url.as_deref().ok_or_else(|| {
        if global.profile.is_some() {
            CliError::ProfileNotFound {
                name: profile_name.clone(),
                available: available_profiles(&cfg),
            }
        } else {
            CliError::NoConfig {
                path: paydeck_config::config_path().display().to_string(),
            }
        }
    })?;

    let base_url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "api-url".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let token = global
        .token
        .clone()
        .map(SecretString::from)
        .ok_or(CliError::NoToken {
            profile: profile_name,
        })?;

    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(ClientConfig {
        base_url,
        token,
        tls,
        timeout: Duration::from_secs(global.timeout),
    })
}

fn resolve_from_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<ClientConfig, CliError> {
    let mut config = paydeck_config::profile_to_client_config(profile, profile_name)?;

    if let Some(ref url_str) = global.api_url {
        config.base_url = url_str.parse().map_err(|_| CliError::Validation {
            field: "api-url".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
    }
    if let Some(ref token) = global.token {
        config.token = SecretString::from(token.clone());
    }
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    config.timeout = Duration::from_secs(global.timeout);

    Ok(config)
}

fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    names.sort_unstable();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}
