pub mod relay;

pub use crate::domain::model::{ContactSubmission, OutboundEmail, RelayResponse};
pub use crate::domain::ports::{MailSettings, MailTransport};
pub use crate::utils::error::Result;
