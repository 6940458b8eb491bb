//! Configuration command handlers (no API connection required).

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", paydeck_config::config_path().display());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = paydeck_config::load_config_or_default();
            let active = crate::config::active_profile_name(global, &cfg);

            println!("config file:     {}", paydeck_config::config_path().display());
            println!("active profile:  {active}");
            println!("output:          {}", cfg.defaults.output);
            println!("timeout:         {}s", cfg.defaults.timeout);
            println!();

            let mut names: Vec<_> = cfg.profiles.keys().collect();
            names.sort();
            if names.is_empty() {
                println!("profiles:        (none)");
            } else {
                println!("profiles:");
                for name in names {
                    if let Some(profile) = cfg.profiles.get(name) {
                        let marker = if *name == active { "*" } else { " " };
                        let token = if profile.token.is_some() {
                            "token: (plaintext)"
                        } else if profile.token_env.is_some() {
                            "token: (env)"
                        } else {
                            "token: (keyring or unset)"
                        };
                        println!("  {marker} {name}: {} [{token}]", profile.api_url);
                    }
                }
            }
            Ok(())
        }

        ConfigCommand::SetToken { profile } => {
            let cfg = paydeck_config::load_config_or_default();
            let profile_name =
                profile.unwrap_or_else(|| crate::config::active_profile_name(global, &cfg));

            let token = dialoguer::Password::new()
                .with_prompt(format!("API token for profile '{profile_name}'"))
                .interact()
                .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

            paydeck_config::store_token(&profile_name, &token)?;
            if !global.quiet {
                eprintln!("Token stored in the OS keyring for profile '{profile_name}'");
            }
            Ok(())
        }
    }
}
