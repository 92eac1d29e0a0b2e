use crate::core::{ContactSubmission, MailSettings, MailTransport, OutboundEmail, RelayResponse};
use crate::domain::model::Sender;
use crate::utils::error::{RelayError, Result};
use std::time::Duration;

/// 將聯絡表單轉寄到站長信箱
pub struct ContactRelay<T: MailTransport> {
    transport: T,
    inbox: String,
    default_subject: String,
    timeout: Duration,
}

impl<T: MailTransport> ContactRelay<T> {
    pub fn new<S: MailSettings + ?Sized>(transport: T, settings: &S) -> Self {
        Self {
            transport,
            inbox: settings.inbox().to_string(),
            default_subject: settings.default_subject().to_string(),
            timeout: settings.delivery_timeout(),
        }
    }

    pub fn inbox(&self) -> &str {
        &self.inbox
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn compose(&self, submission: &ContactSubmission) -> OutboundEmail {
        let sender = Sender {
            name: submission.name.clone(),
            address: submission.email.clone(),
        };

        // 空字串與缺少欄位一樣使用預設主旨
        let subject = submission
            .subject
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.default_subject)
            .to_string();

        OutboundEmail {
            from: sender.clone(),
            reply_to: sender,
            to: self.inbox.clone(),
            subject,
            body: format!(
                "Name: {}\nEmail: {}\n\n{}",
                submission.name, submission.email, submission.message
            ),
        }
    }

    /// 寄送並回報結果；失敗細節只寫入日誌，不回傳給呼叫端
    pub async fn relay(&self, submission: &ContactSubmission) -> RelayResponse {
        match self.try_relay(submission).await {
            Ok(()) => {
                tracing::info!("📨 Contact message from <{}> delivered", submission.email);
                RelayResponse::sent()
            }
            Err(e) => {
                tracing::error!(
                    "❌ Contact message delivery failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                RelayResponse::failed()
            }
        }
    }

    pub async fn try_relay(&self, submission: &ContactSubmission) -> Result<()> {
        let email = self.compose(submission);
        tracing::debug!(
            "Relaying contact message to {} (subject: {:?})",
            email.to,
            email.subject
        );

        match tokio::time::timeout(self.timeout, self.transport.deliver(email)).await {
            Ok(result) => result,
            Err(_) => Err(RelayError::DeliveryTimeout(self.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Settings;

    impl MailSettings for Settings {
        fn inbox(&self) -> &str {
            "owner@example.com"
        }

        fn default_subject(&self) -> &str {
            crate::domain::model::DEFAULT_SUBJECT
        }

        fn delivery_timeout(&self) -> Duration {
            Duration::from_millis(200)
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<OutboundEmail>>,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn deliver(&self, email: OutboundEmail) -> Result<()> {
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    struct RejectingTransport;

    #[async_trait]
    impl MailTransport for RejectingTransport {
        async fn deliver(&self, _email: OutboundEmail) -> Result<()> {
            Err(RelayError::DeliveryError {
                message: "535 5.7.8 Username and Password not accepted".to_string(),
            })
        }
    }

    struct StalledTransport;

    #[async_trait]
    impl MailTransport for StalledTransport {
        async fn deliver(&self, _email: OutboundEmail) -> Result<()> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }
    }

    fn submission(subject: Option<&str>) -> ContactSubmission {
        ContactSubmission {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            subject: subject.map(str::to_string),
            message: "hi".to_string(),
        }
    }

    #[test]
    fn test_compose_with_empty_subject_uses_default() {
        let relay = ContactRelay::new(RecordingTransport::default(), &Settings);
        let email = relay.compose(&submission(Some("")));

        assert_eq!(email.subject, "Portfolio Contact Form");
        assert_eq!(email.body, "Name: A\nEmail: a@x.com\n\nhi");
        assert_eq!(email.to, "owner@example.com");
        assert_eq!(email.from.name, "A");
        assert_eq!(email.from.address, "a@x.com");
        assert_eq!(email.reply_to, email.from);
    }

    #[test]
    fn test_compose_without_subject_uses_default() {
        let relay = ContactRelay::new(RecordingTransport::default(), &Settings);
        assert_eq!(
            relay.compose(&submission(None)).subject,
            "Portfolio Contact Form"
        );
    }

    #[test]
    fn test_compose_keeps_submitted_subject_and_text_verbatim() {
        let relay = ContactRelay::new(RecordingTransport::default(), &Settings);
        let submission = ContactSubmission {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.org".to_string(),
            subject: Some("Job offer".to_string()),
            message: "Line one\n  line two <b>not html</b>".to_string(),
        };

        let email = relay.compose(&submission);
        assert_eq!(email.subject, "Job offer");
        assert!(email.body.contains("Ada Lovelace"));
        assert!(email.body.contains("ada@example.org"));
        assert!(email.body.ends_with("Line one\n  line two <b>not html</b>"));
    }

    #[tokio::test]
    async fn test_relay_success() {
        let relay = ContactRelay::new(RecordingTransport::default(), &Settings);
        let response = relay.relay(&submission(Some("Hello"))).await;

        assert_eq!(response, RelayResponse::sent());
        let sent = relay.transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Hello");
    }

    #[tokio::test]
    async fn test_relay_failure_is_opaque() {
        let relay = ContactRelay::new(RejectingTransport, &Settings);
        let response = relay.relay(&submission(None)).await;

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Failed to send email"));
    }

    #[tokio::test]
    async fn test_relay_times_out_stalled_transport() {
        let relay = ContactRelay::new(StalledTransport, &Settings);

        let err = relay.try_relay(&submission(None)).await.unwrap_err();
        assert!(matches!(err, RelayError::DeliveryTimeout(_)));

        let response = relay.relay(&submission(None)).await;
        assert_eq!(response, RelayResponse::failed());
    }
}
