//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!(
                "LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the HR REST API (domain data fetchers live behind it)
    pub api_base_url: String,

    /// Login entry point unauthenticated navigation is redirected to
    pub login_path: String,

    /// Role that sees every record
    pub admin_role: String,
    /// Role that sees only records it owns
    pub owner_role: String,

    /// Runtime configuration
    pub log_format: LogFormat,
    pub rust_log: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            api_base_url: env::var("HRDESK_API_BASE_URL")
                .map_err(|_| anyhow::anyhow!("HRDESK_API_BASE_URL is required"))?,

            login_path: env::var("HRDESK_LOGIN_PATH").unwrap_or_else(|_| "/login".to_string()),

            admin_role: env::var("HRDESK_ADMIN_ROLE").unwrap_or_else(|_| "ADMIN".to_string()),
            owner_role: env::var("HRDESK_OWNER_ROLE")
                .unwrap_or_else(|_| "EMPLOYEE".to_string()),

            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse()?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "hrdesk=debug".to_string()),
        };

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.login_path.starts_with('/') {
            anyhow::bail!("HRDESK_LOGIN_PATH must be an absolute path");
        }
        if self.admin_role.trim().is_empty() || self.owner_role.trim().is_empty() {
            anyhow::bail!("HRDESK_ADMIN_ROLE and HRDESK_OWNER_ROLE must not be empty");
        }
        Ok(())
    }
}
