// Adapters layer: concrete implementations for external systems.

pub mod smtp;

pub use smtp::{SmtpMailer, SmtpSecurity, SmtpSettings};
