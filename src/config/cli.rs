use crate::config::env::EnvConfig;
use crate::config::toml_config::TomlConfig;
use crate::config::RelaySettings;
use crate::utils::error::Result;
use crate::utils::validation::validate_socket_addr;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "portfolio-relay")]
#[command(about = "Contact form relay: forwards portfolio contact submissions to an inbox over SMTP")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP relay server
    Serve(SettingsArgs),
    /// Validate configuration and test the SMTP connection without serving
    Check(SettingsArgs),
    /// Submit a contact message to a running relay
    Send(SendArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SettingsArgs {
    /// Path to TOML configuration file (falls back to environment variables)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the listen address
    #[arg(long)]
    pub bind: Option<String>,

    /// Override the static asset directory
    #[arg(long)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct SendArgs {
    #[arg(long, default_value = "http://127.0.0.1:3000/api/contact")]
    pub endpoint: String,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub subject: String,

    #[arg(long, default_value = "")]
    pub message: String,
}

impl SettingsArgs {
    pub fn load_settings(&self) -> Result<RelaySettings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)?.to_settings()?
            }
            None => {
                tracing::info!("📁 No config file given, reading environment variables");
                EnvConfig::from_env()?
            }
        };

        // 命令列參數覆蓋設定檔
        if let Some(bind) = &self.bind {
            settings.bind = validate_socket_addr("--bind", bind)?;
            tracing::info!("🔧 Listen address overridden to: {}", settings.bind);
        }
        if let Some(dir) = &self.static_dir {
            settings.static_dir = Some(PathBuf::from(dir));
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_send_command() {
        let cli = CliConfig::parse_from([
            "portfolio-relay",
            "send",
            "--name",
            "A",
            "--email",
            "a@x.com",
            "--message",
            "hi",
        ]);

        match cli.command {
            Command::Send(args) => {
                assert_eq!(args.name, "A");
                assert_eq!(args.subject, "");
                assert_eq!(args.endpoint, "http://127.0.0.1:3000/api/contact");
            }
            other => panic!("expected send, got {:?}", other),
        }
    }

    #[test]
    fn test_bind_override() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[smtp]\nusername = \"owner@example.com\"\npassword = \"pw\"\n")
            .unwrap();

        let args = SettingsArgs {
            config: Some(file.path().to_string_lossy().into_owned()),
            bind: Some("127.0.0.1:9000".to_string()),
            static_dir: Some("./public".to_string()),
        };

        let settings = args.load_settings().unwrap();
        assert_eq!(settings.bind.port(), 9000);
        assert_eq!(settings.static_dir, Some(PathBuf::from("./public")));
    }
}
