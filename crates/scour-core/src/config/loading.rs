//! Configuration loading and environment merging.
//!
//! Values are resolved in order (later wins):
//! 1. Built-in defaults
//! 2. `~/.config/scour/config.toml`
//! 3. `OS_*` environment variables

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::config::types::ScourConfig;
use crate::errors::ConfigError;

/// Load configuration from the config file and environment.
///
/// A missing config file is not an error; the environment alone is a valid
/// configuration source. Credential validation is left to the caller since
/// it depends on the selected purge mode.
pub fn load() -> Result<ScourConfig, ConfigError> {
    let mut config = match config_path() {
        Some(path) if path.exists() => parse_file(&path)?,
        _ => ScourConfig::default(),
    };

    apply_env(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Check that every credential needed to open a session is present.
pub fn validate_credentials(config: &ScourConfig) -> Result<(), ConfigError> {
    let auth = &config.auth;
    for (field, value) in [
        ("auth_url", &auth.auth_url),
        ("username", &auth.username),
        ("password", &auth.password),
        ("project_name", &auth.project_name),
    ] {
        if value.is_empty() {
            return Err(ConfigError::MissingCredential { field });
        }
    }

    if config.poll.interval_secs == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "poll.interval_secs must be at least 1".to_string(),
        });
    }

    Ok(())
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scour").join("config.toml"))
}

fn parse_file(path: &PathBuf) -> Result<ScourConfig, ConfigError> {
    debug!(event = "core.config.file_loaded", path = %path.display());
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Overlay `OS_*` environment variables onto a loaded configuration.
fn apply_env(config: &mut ScourConfig, get: impl Fn(&str) -> Option<String>) {
    let auth = &mut config.auth;
    for (name, slot) in [
        ("OS_AUTH_URL", &mut auth.auth_url),
        ("OS_USERNAME", &mut auth.username),
        ("OS_PASSWORD", &mut auth.password),
        ("OS_PROJECT_NAME", &mut auth.project_name),
        ("OS_USER_DOMAIN_NAME", &mut auth.user_domain),
        ("OS_PROJECT_DOMAIN_NAME", &mut auth.project_domain),
    ] {
        if let Some(value) = get(name) {
            *slot = value;
        }
    }

    if let Some(region) = get("OS_REGION_NAME") {
        auth.region = Some(region);
    }
}
