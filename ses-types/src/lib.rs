//! JSON schema exchanged with the `lambda-ses` function.
//!
//! Field names follow the payloads existing callers already send, so they are
//! spelled out with serde attributes rather than derived from the Rust names.

mod bulk;
mod de;
mod email;

use serde::{Deserialize, Serialize};

pub use bulk::{
    BulkEmailContent, BulkEmailEntry, BulkEmailEntryResult, BulkEmailStatus,
    ReplacementEmailContent, ReplacementTemplate, SendBulkEmailInput, SendBulkEmailOutput,
};
pub use email::{
    Body, Content, Destination, EmailContent, ListManagementOptions, Message, MessageDialect,
    MessageTags, RawMessage, ResponseMetadata, SendEmailInput, SendEmailOutput, Template,
};

/// Request envelope. At most one field is expected to be set; when several
/// are, `email` wins over `emails`, which wins over `bulkEmail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<SendEmailInput>,
    #[serde(
        default,
        deserialize_with = "de::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub emails: Vec<SendEmailInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_email: Option<SendBulkEmailInput>,
}

impl Input {
    pub fn email(email: SendEmailInput) -> Self {
        Self {
            email: Some(email),
            ..Default::default()
        }
    }

    pub fn emails(emails: Vec<SendEmailInput>) -> Self {
        Self {
            emails,
            ..Default::default()
        }
    }

    pub fn bulk_email(bulk_email: SendBulkEmailInput) -> Self {
        Self {
            bulk_email: Some(bulk_email),
            ..Default::default()
        }
    }
}

/// Response envelope. Only the fields of the dispatched operation are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<SendEmailOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<SendEmailOutput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Request positions of the failed batch entries, parallel to `errors`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_indices: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_email: Option<SendBulkEmailOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_email_error: Option<String>,
}
