use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// Name/value pairs attached to a message for event publishing.
pub type MessageTags = BTreeMap<String, String>;

/// A piece of text plus an optional character set.
///
/// `data` is required by the provider but optional here, so a batch entry
/// that leaves it out fails on its own instead of failing the whole request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
}

impl Content {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            charset: None,
        }
    }
}

/// HTML and/or plain-text renditions of a message body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Content>,
}

/// A subject line and body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Content>,
}

/// A complete MIME message. Travels as base64 on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// A stored template reference plus the JSON document used to fill it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// The content of a single email.
///
/// Two dialects are accepted for simple messages: the legacy flat shape with
/// `body`/`subject` directly on the content, and the nested `simple` shape.
/// [`EmailContent::message`] resolves which one applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
}

/// Where a simple message was found in an [`EmailContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageDialect<'a> {
    /// `content.body` / `content.subject`.
    Flat {
        body: Option<&'a Body>,
        subject: Option<&'a Content>,
    },
    /// `content.simple`.
    Simple(&'a Message),
}

impl<'a> MessageDialect<'a> {
    pub fn body(&self) -> Option<&'a Body> {
        match self {
            Self::Flat { body, .. } => *body,
            Self::Simple(message) => message.body.as_ref(),
        }
    }

    pub fn subject(&self) -> Option<&'a Content> {
        match self {
            Self::Flat { subject, .. } => *subject,
            Self::Simple(message) => message.subject.as_ref(),
        }
    }
}

impl EmailContent {
    /// Resolves the simple message, if any.
    ///
    /// Flat fields win when both `body` and `subject` are set. Otherwise the
    /// nested `simple` message is used, and a half-populated flat shape is
    /// only returned when there is nothing else to fall back on.
    pub fn message(&self) -> Option<MessageDialect<'_>> {
        let flat = MessageDialect::Flat {
            body: self.body.as_ref(),
            subject: self.subject.as_ref(),
        };

        match (&self.body, &self.subject, &self.simple) {
            (Some(_), Some(_), _) => Some(flat),
            (_, _, Some(simple)) => Some(MessageDialect::Simple(simple)),
            (None, None, None) => None,
            _ => Some(flat),
        }
    }
}

/// Recipients of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<String>,
}

impl Destination {
    pub fn to<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            to: addresses.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// Contact list and topic used for unsubscribe handling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListManagementOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_list_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<String>,
}

/// A request to send one email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<EmailContent>,
    #[serde(
        default,
        rename = "configSetName",
        skip_serializing_if = "Option::is_none"
    )]
    pub configuration_set_name: Option<String>,
    #[serde(default, rename = "dest", skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "MessageTags::is_empty"
    )]
    pub tags: MessageTags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_forwarding_email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_forwarding_email_address_identity_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_management_options: Option<ListManagementOptions>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub reply_to: Vec<String>,
}

/// Metadata the provider attached to a response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// The provider's acknowledgement of a single email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, rename = "metaData")]
    pub metadata: ResponseMetadata,
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn flat_fields_win_over_simple() {
        let content: EmailContent = serde_json::from_value(json!({
            "subject": { "data": "flat" },
            "body": { "text": { "data": "flat body" } },
            "simple": { "subject": { "data": "nested" } }
        }))
        .unwrap();

        let message = content.message().unwrap();
        assert!(matches!(message, MessageDialect::Flat { .. }));
        assert_eq!(message.subject().unwrap().data.as_deref(), Some("flat"));
    }

    #[test]
    fn falls_back_to_simple_when_flat_is_partial() {
        let content: EmailContent = serde_json::from_value(json!({
            "subject": { "data": "flat" },
            "simple": {
                "subject": { "data": "nested" },
                "body": { "html": { "data": "<p>nested</p>" } }
            }
        }))
        .unwrap();

        let message = content.message().unwrap();
        assert_eq!(message.subject().unwrap().data.as_deref(), Some("nested"));
        assert_eq!(
            message.body().unwrap().html.as_ref().unwrap().data.as_deref(),
            Some("<p>nested</p>")
        );
    }

    #[test]
    fn template_only_content_has_no_message() {
        let content = EmailContent {
            template: Some(Template {
                name: Some("welcome".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(content.message(), None);
    }

    #[test]
    fn raw_data_is_base64_on_the_wire() {
        let raw = RawMessage {
            data: b"Subject: hi\r\n\r\nbody".to_vec(),
        };

        let value = serde_json::to_value(&raw).unwrap();
        assert_eq!(value, json!({ "data": "U3ViamVjdDogaGkNCg0KYm9keQ==" }));
        assert_eq!(serde_json::from_value::<RawMessage>(value).unwrap(), raw);
    }

    #[test]
    fn send_email_input_uses_wire_names() {
        let input: SendEmailInput = serde_json::from_value(json!({
            "from": "a@x.com",
            "fromArn": "arn:aws:ses:us-east-1:1:identity/x.com",
            "dest": { "to": ["b@x.com"], "cc": ["c@x.com"] },
            "configSetName": "tracking",
            "replyTo": ["r@x.com"],
            "tags": { "campaign": "launch" },
            "listManagementOptions": { "contactListName": "news" },
            "content": { "template": { "name": "welcome", "data": "{}" } }
        }))
        .unwrap();

        assert_eq!(input.from.as_deref(), Some("a@x.com"));
        assert_eq!(input.configuration_set_name.as_deref(), Some("tracking"));
        assert_eq!(input.destination.as_ref().unwrap().cc, vec!["c@x.com"]);
        assert_eq!(input.tags.get("campaign").map(String::as_str), Some("launch"));
        assert_eq!(
            input.list_management_options.unwrap().contact_list_name.as_deref(),
            Some("news")
        );
    }

    #[test]
    fn null_lists_and_maps_read_as_empty() {
        let input: SendEmailInput = serde_json::from_value(json!({
            "dest": { "to": ["b@x.com"], "cc": null, "bcc": null },
            "tags": null,
            "replyTo": null
        }))
        .unwrap();

        assert_eq!(input.destination, Some(Destination::to(["b@x.com"])));
        assert!(input.tags.is_empty());
        assert!(input.reply_to.is_empty());

        let destination: Destination = serde_json::from_value(json!({ "to": null })).unwrap();
        assert_eq!(destination, Destination::default());
    }

    #[test]
    fn incomplete_nested_objects_still_decode() {
        let input: SendEmailInput = serde_json::from_value(json!({
            "content": { "simple": { "subject": { "charset": "UTF-8" } } },
            "listManagementOptions": { "topicName": "weekly" }
        }))
        .unwrap();

        let message = input.content.as_ref().unwrap().message().unwrap();
        let subject = message.subject().unwrap();
        assert_eq!(subject.data, None);
        assert_eq!(subject.charset.as_deref(), Some("UTF-8"));
        let options = input.list_management_options.unwrap();
        assert_eq!(options.contact_list_name, None);
        assert_eq!(options.topic_name.as_deref(), Some("weekly"));
    }
}
