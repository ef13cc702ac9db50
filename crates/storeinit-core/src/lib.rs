pub mod app_config;
pub mod catalog;
pub mod config;
pub mod fixtures;
pub mod password;
pub mod variant_names;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_demo_catalog, DemoCatalog};
pub use config::{load_app_config, load_app_config_from_env};
pub use fixtures::{
    voucher_definitions, AccountRole, DiscountKind, TestAccount, VoucherDefinition,
    ADMIN_ACCOUNT, DEFAULT_CHANNEL_SLUG, REGULAR_ACCOUNT, STOCK_QUANTITY, TEST_ACCOUNTS,
};
pub use variant_names::{plan_variant_name, NamePlan};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read demo catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse demo catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),
    #[error("invalid demo catalog: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
    #[error("stored password hash has an unsupported format")]
    UnsupportedHashFormat,
}
