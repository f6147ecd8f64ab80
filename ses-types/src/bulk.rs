use serde::{Deserialize, Serialize};

use crate::de::null_as_default;
use crate::email::{Destination, MessageTags, ResponseMetadata, Template};

/// Per-entry template data overriding the default template data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementEmailContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement_template: Option<ReplacementTemplate>,
}

impl ReplacementEmailContent {
    /// The replacement template data, when there is any to send.
    pub fn template_data(&self) -> Option<&str> {
        self.replacement_template
            .as_ref()
            .and_then(|template| template.data.as_deref())
            .filter(|data| !data.is_empty())
    }
}

/// One recipient group of a bulk send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkEmailEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ReplacementEmailContent>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "MessageTags::is_empty"
    )]
    pub tags: MessageTags,
}

/// Default content of a bulk send. Only templates are supported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkEmailContent {
    // Older callers send the misspelled key.
    #[serde(default, alias = "temaplte", skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
}

/// A templated send to many destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendBulkEmailInput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub entries: Vec<BulkEmailEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_content: Option<BulkEmailContent>,
    #[serde(
        default,
        rename = "configSetName",
        skip_serializing_if = "Option::is_none"
    )]
    pub configuration_set_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "MessageTags::is_empty"
    )]
    pub default_tags: MessageTags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_forwarding_email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_forwarding_email_address_identity_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, alias = "fromarn", skip_serializing_if = "Option::is_none")]
    pub from_arn: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub reply_to: Vec<String>,
}

/// Outcome of one bulk entry as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BulkEmailStatus {
    Success,
    MessageRejected,
    MailFromDomainNotVerified,
    ConfigurationSetNotFound,
    TemplateNotFound,
    AccountSuspended,
    AccountThrottled,
    AccountDailyQuotaExceeded,
    InvalidSendingPoolName,
    AccountSendingPaused,
    ConfigurationSetSendingPaused,
    InvalidParameter,
    TransientFailure,
    Failed,
    #[serde(other)]
    Unknown,
}

impl BulkEmailStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEmailEntryResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub status: BulkEmailStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendBulkEmailOutput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: Vec<BulkEmailEntryResult>,
    #[serde(default, rename = "metaData")]
    pub metadata: ResponseMetadata,
}
