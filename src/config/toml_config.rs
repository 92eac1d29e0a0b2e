use crate::adapters::smtp::{SmtpSecurity, SmtpSettings};
use crate::config::{RelaySettings, DEFAULT_BIND, DEFAULT_SMTP_HOST, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::model::DEFAULT_SUBJECT;
use crate::utils::error::{RelayError, Result};
use crate::utils::validation::{validate_required_field, validate_socket_addr, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub security: Option<SmtpSecurity>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailConfig {
    pub inbox: Option<String>,
    pub default_subject: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RelayError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RelayError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EMAIL_PASS})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_RE: OnceLock<Regex> = OnceLock::new();
        let re = ENV_RE.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env placeholder pattern is a valid regex")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn security(&self) -> SmtpSecurity {
        self.smtp.security.unwrap_or_default()
    }

    pub fn smtp_port(&self) -> u16 {
        self.smtp.port.unwrap_or_else(|| self.security().default_port())
    }

    /// 收件信箱，未設定時寄給 SMTP 帳號本身
    pub fn inbox(&self) -> Result<&str> {
        match &self.mail.inbox {
            Some(inbox) => Ok(inbox.as_str()),
            None => validate_required_field("mail.inbox", &self.smtp.username).map(String::as_str),
        }
    }

    pub fn to_settings(&self) -> Result<RelaySettings> {
        let bind = validate_socket_addr(
            "server.bind",
            self.server.bind.as_deref().unwrap_or(DEFAULT_BIND),
        )?;

        Ok(RelaySettings {
            bind,
            static_dir: self.server.static_dir.as_ref().map(PathBuf::from),
            smtp: SmtpSettings {
                host: self
                    .smtp
                    .host
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                port: self.smtp_port(),
                security: self.security(),
                username: self.smtp.username.clone(),
                password: self.smtp.password.clone(),
                timeout: Duration::from_secs(
                    self.smtp.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
                ),
            },
            inbox: self.inbox()?.to_string(),
            default_subject: self
                .mail
                .default_subject
                .clone()
                .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.to_settings()?.validate()
    }
}
