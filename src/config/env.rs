use crate::adapters::smtp::{SmtpSecurity, SmtpSettings};
use crate::config::{RelaySettings, DEFAULT_BIND, DEFAULT_SMTP_HOST, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::model::DEFAULT_SUBJECT;
use crate::utils::error::{RelayError, Result};
use crate::utils::validation::validate_socket_addr;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// 只靠環境變數的設定來源 (Lambda 或沒有設定檔時)
pub struct EnvConfig;

impl EnvConfig {
    pub fn from_env() -> Result<RelaySettings> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<RelaySettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| RelayError::MissingConfigError {
                    field: key.to_string(),
                })
        };

        let username = required("EMAIL_USER")?;
        let password = required("EMAIL_PASS")?;

        let security = match lookup("SMTP_SECURITY") {
            Some(raw) => raw.parse::<SmtpSecurity>()?,
            None => SmtpSecurity::default(),
        };

        let port = match lookup("SMTP_PORT") {
            Some(raw) => parse_number::<u16>("SMTP_PORT", &raw)?,
            None => security.default_port(),
        };

        let timeout_seconds = match lookup("SMTP_TIMEOUT_SECONDS") {
            Some(raw) => parse_number::<u64>("SMTP_TIMEOUT_SECONDS", &raw)?,
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        let bind = validate_socket_addr(
            "BIND_ADDR",
            &lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND.to_string()),
        )?;

        Ok(RelaySettings {
            bind,
            static_dir: lookup("STATIC_DIR").map(PathBuf::from),
            inbox: lookup("CONTACT_INBOX").unwrap_or_else(|| username.clone()),
            default_subject: lookup("CONTACT_DEFAULT_SUBJECT")
                .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            smtp: SmtpSettings {
                host: lookup("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                port,
                security,
                username: Some(username),
                password: Some(password),
                timeout: Duration::from_secs(timeout_seconds),
            },
        })
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| RelayError::InvalidConfigValueError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: "Expected a number".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_credentials_only() {
        let settings = EnvConfig::from_lookup(lookup_from(&[
            ("EMAIL_USER", "owner@gmail.com"),
            ("EMAIL_PASS", "app-password"),
        ]))
        .unwrap();

        assert_eq!(settings.inbox, "owner@gmail.com");
        assert_eq!(settings.smtp.host, "smtp.gmail.com");
        assert_eq!(settings.smtp.port, 465);
        assert_eq!(settings.smtp.security, SmtpSecurity::Tls);
        assert_eq!(settings.default_subject, "Portfolio Contact Form");
    }

    #[test]
    fn test_missing_password() {
        let result = EnvConfig::from_lookup(lookup_from(&[("EMAIL_USER", "owner@gmail.com")]));
        match result {
            Err(RelayError::MissingConfigError { field }) => assert_eq!(field, "EMAIL_PASS"),
            other => panic!("expected missing EMAIL_PASS, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides() {
        let settings = EnvConfig::from_lookup(lookup_from(&[
            ("EMAIL_USER", "relay@example.com"),
            ("EMAIL_PASS", "pw"),
            ("SMTP_HOST", "localhost"),
            ("SMTP_SECURITY", "plain"),
            ("SMTP_PORT", "1025"),
            ("SMTP_TIMEOUT_SECONDS", "5"),
            ("CONTACT_INBOX", "me@example.com"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("STATIC_DIR", "./public"),
        ]))
        .unwrap();

        assert_eq!(settings.smtp.port, 1025);
        assert_eq!(settings.smtp.security, SmtpSecurity::Plain);
        assert_eq!(settings.smtp.timeout, Duration::from_secs(5));
        assert_eq!(settings.inbox, "me@example.com");
        assert_eq!(settings.bind.port(), 8080);
        assert_eq!(settings.static_dir, Some(PathBuf::from("./public")));
    }

    #[test]
    fn test_bad_port() {
        let result = EnvConfig::from_lookup(lookup_from(&[
            ("EMAIL_USER", "relay@example.com"),
            ("EMAIL_PASS", "pw"),
            ("SMTP_PORT", "smtp"),
        ]));
        assert!(matches!(
            result,
            Err(RelayError::InvalidConfigValueError { .. })
        ));
    }
}
