pub mod adapters;
pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::smtp::{SmtpMailer, SmtpSecurity, SmtpSettings};
pub use client::{ContactClient, ContactForm, SubmitOutcome};
pub use config::{env::EnvConfig, toml_config::TomlConfig, RelaySettings};
pub use core::relay::ContactRelay;
pub use domain::model::{ContactSubmission, OutboundEmail, RelayResponse};
pub use domain::ports::{MailSettings, MailTransport};
pub use server::build_router;
pub use utils::error::{RelayError, Result};
