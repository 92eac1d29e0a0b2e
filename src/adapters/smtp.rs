use crate::core::{MailTransport, OutboundEmail};
use crate::domain::model::Sender;
use crate::utils::error::{RelayError, Result};
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// 隱式 TLS (smtps, 465)
    #[default]
    Tls,
    /// STARTTLS 升級 (587)
    Starttls,
    /// 無加密，只適合本機測試用的收信伺服器
    Plain,
}

impl SmtpSecurity {
    pub fn default_port(self) -> u16 {
        match self {
            SmtpSecurity::Tls => 465,
            SmtpSecurity::Starttls => 587,
            SmtpSecurity::Plain => 25,
        }
    }
}

impl FromStr for SmtpSecurity {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tls" | "smtps" => Ok(SmtpSecurity::Tls),
            "starttls" => Ok(SmtpSecurity::Starttls),
            "plain" | "none" => Ok(SmtpSecurity::Plain),
            other => Err(RelayError::InvalidConfigValueError {
                field: "smtp.security".to_string(),
                value: other.to_string(),
                reason: "Valid modes: tls, starttls, plain".to_string(),
            }),
        }
    }
}

impl fmt::Display for SmtpSecurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SmtpSecurity::Tls => "tls",
            SmtpSecurity::Starttls => "starttls",
            SmtpSecurity::Plain => "plain",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub security: SmtpSecurity,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

// 密碼不可出現在日誌中
impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("security", &self.security)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// 以 lettre 實作的 SMTP 傳輸，整個程序共用一個實例
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self> {
        let builder = match settings.security {
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?,
            SmtpSecurity::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            }
            SmtpSecurity::Plain => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            }
        };

        let mut builder = builder
            .port(settings.port)
            .timeout(Some(settings.timeout));

        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        tracing::info!(
            "📮 SMTP transport ready: {}:{} ({})",
            settings.host,
            settings.port,
            settings.security
        );

        Ok(Self {
            transport: builder.build(),
        })
    }

    /// 檢查能否連上 SMTP 伺服器
    pub async fn test_connection(&self) -> Result<bool> {
        Ok(self.transport.test_connection().await?)
    }
}

/// 顯示名稱中的控制字元 (CR/LF 等) 換成空白，lettre 遇到會 panic
fn display_name(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    Some(cleaned).filter(|n| !n.is_empty())
}

fn mailbox(sender: &Sender) -> Result<Mailbox> {
    let address: Address = sender.address.trim().parse()?;
    Ok(Mailbox::new(display_name(&sender.name), address))
}

pub fn build_message(email: &OutboundEmail) -> Result<Message> {
    let to: Address = email.to.parse()?;

    let message = Message::builder()
        .from(mailbox(&email.from)?)
        .reply_to(mailbox(&email.reply_to)?)
        .to(Mailbox::new(None, to))
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())?;

    Ok(message)
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn deliver(&self, email: OutboundEmail) -> Result<()> {
        let message = build_message(&email)?;
        let response = self.transport.send(message).await?;
        tracing::debug!("SMTP server replied: {:?}", response.code());
        Ok(())
    }
}
