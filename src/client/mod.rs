use crate::core::ContactSubmission;
use crate::utils::error::{RelayError, Result};
use crate::utils::validation::{looks_like_email, validate_url};
use reqwest::Client;

pub const SENT_NOTIFICATION: &str = "Message sent successfully ✅";
pub const REJECTED_NOTIFICATION: &str = "Failed to send message ❌";
pub const ERRORED_NOTIFICATION: &str = "An error occurred ❌";

/// 聯絡表單的四個欄位，依序為 name、email、subject、message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn from_fields(fields: [&str; 4]) -> Self {
        let [name, email, subject, message] = fields;
        Self {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    /// 必填欄位：name、email (需像信箱格式)、message；subject 可留空
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if !looks_like_email(self.email.trim()) {
            missing.push("email");
        }
        if self.message.trim().is_empty() {
            missing.push("message");
        }
        missing
    }

    pub fn to_submission(&self) -> ContactSubmission {
        ContactSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: Some(self.subject.clone()),
            message: self.message.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Rejected { status: u16 },
    Errored { reason: String },
}

impl SubmitOutcome {
    pub fn notification(&self) -> &'static str {
        match self {
            SubmitOutcome::Sent => SENT_NOTIFICATION,
            SubmitOutcome::Rejected { .. } => REJECTED_NOTIFICATION,
            SubmitOutcome::Errored { .. } => ERRORED_NOTIFICATION,
        }
    }

    pub fn should_reset_form(&self) -> bool {
        matches!(self, SubmitOutcome::Sent)
    }
}

pub struct ContactClient {
    client: Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        validate_url("endpoint", &endpoint)?;
        Ok(Self {
            client: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 送出表單；成功時清空表單。必填欄位缺漏時不會發出請求
    pub async fn submit(&self, form: &mut ContactForm) -> Result<SubmitOutcome> {
        let missing = form.missing_required();
        if !missing.is_empty() {
            return Err(RelayError::ValidationError {
                message: format!("Missing or invalid fields: {}", missing.join(", ")),
            });
        }

        tracing::debug!("Posting contact form to: {}", self.endpoint());
        let result = self
            .client
            .post(&self.endpoint)
            .json(&form.to_submission())
            .send()
            .await;

        let outcome = match result {
            Ok(response) if response.status().is_success() => SubmitOutcome::Sent,
            Ok(response) => {
                tracing::warn!("Relay responded with status {}", response.status());
                SubmitOutcome::Rejected {
                    status: response.status().as_u16(),
                }
            }
            Err(e) => {
                let e = RelayError::from(e);
                tracing::error!("❌ Contact request failed: {}", e);
                tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                SubmitOutcome::Errored {
                    reason: e.to_string(),
                }
            }
        };

        if outcome.should_reset_form() {
            form.reset();
        }

        Ok(outcome)
    }
}
