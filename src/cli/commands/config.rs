//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, mut settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Path => {
            println!("{}", Settings::default_config_path().display());
        }

        ConfigAction::SetKey { api_key } => {
            settings.remote.api_key = Some(api_key.clone());
            settings.save()?;
            Output::success("Remote API key saved.");
            Output::kv("Config", &Settings::default_config_path().display().to_string());
        }
    }

    Ok(())
}
