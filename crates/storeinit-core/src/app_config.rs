use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Whether the fixed test logins and promo codes may be written.
    ///
    /// Their passwords are public, so production databases are refused.
    #[must_use]
    pub fn allows_test_data(&self) -> bool {
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
    pub database_url: String,
    pub env: Environment,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Built-in demo catalog used when the product table is empty.
    pub demo_catalog_path: PathBuf,
    /// External populator command line. Takes precedence over the built-in
    /// catalog when set.
    pub populate_command: Option<String>,
    pub bcrypt_cost: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("demo_catalog_path", &self.demo_catalog_path)
            .field("populate_command", &self.populate_command)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}
