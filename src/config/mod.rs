#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::adapters::smtp::SmtpSettings;
use crate::core::MailSettings;
use crate::utils::error::{RelayError, Result};
use crate::utils::validation::{
    validate_email_address, validate_non_empty_string, validate_path, validate_range, Validate,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// 伺服器與寄信所需的完整設定，由 TOML 或環境變數產生
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub bind: SocketAddr,
    pub static_dir: Option<PathBuf>,
    pub smtp: SmtpSettings,
    pub inbox: String,
    pub default_subject: String,
}

impl MailSettings for RelaySettings {
    fn inbox(&self) -> &str {
        &self.inbox
    }

    fn default_subject(&self) -> &str {
        &self.default_subject
    }

    fn delivery_timeout(&self) -> Duration {
        self.smtp.timeout
    }
}

impl Validate for RelaySettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("smtp.host", &self.smtp.host)?;
        validate_range("smtp.port", self.smtp.port, 1, u16::MAX)?;
        validate_range(
            "smtp.timeout_seconds",
            self.smtp.timeout.as_secs(),
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validate_email_address("mail.inbox", &self.inbox)?;
        validate_non_empty_string("mail.default_subject", &self.default_subject)?;

        if let Some(dir) = &self.static_dir {
            validate_path("server.static_dir", &dir.to_string_lossy())?;
        }

        if self.smtp.username.is_some() != self.smtp.password.is_some() {
            return Err(RelayError::ConfigError {
                message: "smtp.username and smtp.password must be set together".to_string(),
            });
        }

        tracing::debug!("✅ Relay configuration validation passed");
        Ok(())
    }
}
