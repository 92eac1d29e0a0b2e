use crate::domain::model::OutboundEmail;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, email: OutboundEmail) -> Result<()>;
}

#[async_trait]
impl<T: MailTransport + ?Sized> MailTransport for Arc<T> {
    async fn deliver(&self, email: OutboundEmail) -> Result<()> {
        (**self).deliver(email).await
    }
}

pub trait MailSettings: Send + Sync {
    fn inbox(&self) -> &str;
    fn default_subject(&self) -> &str;
    fn delivery_timeout(&self) -> Duration;
}
