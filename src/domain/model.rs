use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_SUBJECT: &str = "Portfolio Contact Form";
pub const DELIVERY_FAILED_MESSAGE: &str = "Failed to send email";

/// 聯絡表單送出的內容，只存在於單次請求中
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

// 缺少欄位與 null 一樣視為空字串
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            error: Some(DELIVERY_FAILED_MESSAGE.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub name: String,
    pub address: String,
}

/// 與傳輸層無關的外寄郵件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: Sender,
    pub reply_to: Sender,
    pub to: String,
    pub subject: String,
    pub body: String,
}
