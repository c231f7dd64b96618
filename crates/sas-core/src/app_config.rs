use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Whether error responses may carry diagnostic details.
    #[must_use]
    pub fn exposes_error_details(&self) -> bool {
        !matches!(self, Environment::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub policy_path: PathBuf,
    pub mining_ledger_path: PathBuf,
    pub mining_interval_hours: u64,
    pub rate_limit_per_minute: usize,
    pub api_keys: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("policy_path", &self.policy_path)
            .field("mining_ledger_path", &self.mining_ledger_path)
            .field("mining_interval_hours", &self.mining_interval_hours)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("api_keys", &self.api_keys.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}
