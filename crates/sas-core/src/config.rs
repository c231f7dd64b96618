use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development configuration.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SAS_ENV", "development"))?;

    let bind_addr = or_default("SAS_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("SAS_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("SAS_LOG_LEVEL", "info");
    let policy_path = PathBuf::from(or_default(
        "SAS_POLICY_PATH",
        "./config/campaign_policy.yaml",
    ));
    let mining_ledger_path = PathBuf::from(or_default(
        "SAS_MINING_LEDGER_PATH",
        "./data/mining_last_run.json",
    ));

    let mining_interval_hours = parse_u64("SAS_MINING_INTERVAL_HOURS", "24")?;
    if mining_interval_hours == 0 {
        return Err(invalid(
            "SAS_MINING_INTERVAL_HOURS",
            "must be at least 1".to_string(),
        ));
    }

    let rate_limit_per_minute = parse_usize("SAS_RATE_LIMIT_PER_MINUTE", "120")?;
    if rate_limit_per_minute == 0 {
        return Err(invalid(
            "SAS_RATE_LIMIT_PER_MINUTE",
            "must be at least 1".to_string(),
        ));
    }

    let api_keys = lookup("SAS_API_KEYS").ok().filter(|s| !s.trim().is_empty());

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        policy_path,
        mining_ledger_path,
        mining_interval_hours,
        rate_limit_per_minute,
        api_keys,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SAS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
