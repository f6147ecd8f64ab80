//! Conversion between the wire schema and SES v2 SDK structures.

use aws_sdk_sesv2::error::BuildError;
use aws_sdk_sesv2::operation::send_bulk_email::{
    SendBulkEmailInput as SdkSendBulkEmailInput, SendBulkEmailOutput as SdkSendBulkEmailOutput,
};
use aws_sdk_sesv2::operation::send_email::{
    SendEmailInput as SdkSendEmailInput, SendEmailOutput as SdkSendEmailOutput,
};
use aws_sdk_sesv2::operation::RequestId;
use aws_sdk_sesv2::primitives::Blob;
use aws_sdk_sesv2::types as sdk;
use lambda_ses_types::{
    Body, BulkEmailEntry, BulkEmailEntryResult, BulkEmailStatus, Content, Destination,
    EmailContent, ListManagementOptions, MessageDialect, MessageTags, ResponseMetadata,
    SendBulkEmailInput, SendBulkEmailOutput, SendEmailInput, SendEmailOutput, Template,
};

use crate::error::SendError;

/// Builds the SES request for one email.
///
/// `configuration_set` is the resolved configuration set, which may come from
/// the request or from the function's defaults.
pub fn email_input(
    input: &SendEmailInput,
    configuration_set: Option<&str>,
) -> Result<SdkSendEmailInput, SendError> {
    let content = input.content.as_ref().ok_or(SendError::MissingContent)?;
    let destination = input
        .destination
        .as_ref()
        .ok_or(SendError::MissingDestination)?;

    let list_management = input
        .list_management_options
        .as_ref()
        .map(list_management_options)
        .transpose()?;

    let request = SdkSendEmailInput::builder()
        .set_from_email_address(input.from.clone())
        .set_from_email_address_identity_arn(input.from_arn.clone())
        .destination(self::destination(destination))
        .set_reply_to_addresses(non_empty(&input.reply_to))
        .set_feedback_forwarding_email_address(input.feedback_forwarding_email_address.clone())
        .set_feedback_forwarding_email_address_identity_arn(
            input.feedback_forwarding_email_address_identity_arn.clone(),
        )
        .content(email_content(content)?)
        .set_email_tags(message_tags(&input.tags)?)
        .set_configuration_set_name(configuration_set.map(str::to_string))
        .set_list_management_options(list_management)
        .build()?;

    Ok(request)
}

/// Builds the SES request for a bulk send. Every entry must carry a
/// destination; the first one without fails the whole request.
pub fn bulk_email_input(
    input: &SendBulkEmailInput,
    configuration_set: Option<&str>,
) -> Result<SdkSendBulkEmailInput, SendError> {
    let entries = input
        .entries
        .iter()
        .map(bulk_email_entry)
        .collect::<Result<Vec<_>, _>>()?;

    let default_content = sdk::BulkEmailContent::builder()
        .set_template(
            input
                .default_content
                .as_ref()
                .and_then(|content| content.template.as_ref())
                .map(template),
        )
        .build();

    let request = SdkSendBulkEmailInput::builder()
        .set_from_email_address(input.from.clone())
        .set_from_email_address_identity_arn(input.from_arn.clone())
        .set_reply_to_addresses(non_empty(&input.reply_to))
        .set_feedback_forwarding_email_address(input.feedback_forwarding_email_address.clone())
        .set_feedback_forwarding_email_address_identity_arn(
            input.feedback_forwarding_email_address_identity_arn.clone(),
        )
        .set_default_email_tags(message_tags(&input.default_tags)?)
        .default_content(default_content)
        .set_bulk_email_entries(Some(entries))
        .set_configuration_set_name(configuration_set.map(str::to_string))
        .build()?;

    Ok(request)
}

fn bulk_email_entry(entry: &BulkEmailEntry) -> Result<sdk::BulkEmailEntry, SendError> {
    let destination = entry
        .destination
        .as_ref()
        .ok_or(SendError::MissingDestination)?;

    let replacement = entry
        .content
        .as_ref()
        .and_then(|content| content.template_data())
        .map(|data| {
            sdk::ReplacementEmailContent::builder()
                .replacement_template(
                    sdk::ReplacementTemplate::builder()
                        .replacement_template_data(data)
                        .build(),
                )
                .build()
        });

    Ok(sdk::BulkEmailEntry::builder()
        .destination(self::destination(destination))
        .set_replacement_tags(message_tags(&entry.tags)?)
        .set_replacement_email_content(replacement)
        .build())
}

fn email_content(content: &EmailContent) -> Result<sdk::EmailContent, BuildError> {
    let simple = content.message().map(simple_message).transpose()?;
    let raw = content
        .raw
        .as_ref()
        .map(|raw| {
            sdk::RawMessage::builder()
                .data(Blob::new(raw.data.clone()))
                .build()
        })
        .transpose()?;

    Ok(sdk::EmailContent::builder()
        .set_simple(simple)
        .set_raw(raw)
        .set_template(content.template.as_ref().map(template))
        .build())
}

fn simple_message(message: MessageDialect<'_>) -> Result<sdk::Message, BuildError> {
    let subject = message.subject().map(self::content).transpose()?;
    let body = message.body().map(self::body).transpose()?;

    Ok(sdk::Message::builder()
        .set_subject(subject)
        .set_body(body)
        .build())
}

// Both renditions are forwarded when present.
fn body(body: &Body) -> Result<sdk::Body, BuildError> {
    Ok(sdk::Body::builder()
        .set_html(body.html.as_ref().map(content).transpose()?)
        .set_text(body.text.as_ref().map(content).transpose()?)
        .build())
}

// A missing `data` fails this email only, as a build error.
fn content(content: &Content) -> Result<sdk::Content, BuildError> {
    sdk::Content::builder()
        .set_data(content.data.clone())
        .set_charset(content.charset.clone())
        .build()
}

fn template(template: &Template) -> sdk::Template {
    sdk::Template::builder()
        .set_template_arn(template.arn.clone())
        .set_template_name(template.name.clone())
        .set_template_data(template.data.clone())
        .build()
}

fn destination(destination: &Destination) -> sdk::Destination {
    sdk::Destination::builder()
        .set_to_addresses(non_empty(&destination.to))
        .set_cc_addresses(non_empty(&destination.cc))
        .set_bcc_addresses(non_empty(&destination.bcc))
        .build()
}

fn list_management_options(
    options: &ListManagementOptions,
) -> Result<sdk::ListManagementOptions, BuildError> {
    sdk::ListManagementOptions::builder()
        .set_contact_list_name(options.contact_list_name.clone())
        .set_topic_name(options.topic_name.clone())
        .build()
}

/// Tag map to the provider's tag list. `None` when there are no tags.
fn message_tags(tags: &MessageTags) -> Result<Option<Vec<sdk::MessageTag>>, BuildError> {
    if tags.is_empty() {
        return Ok(None);
    }

    tags.iter()
        .map(|(name, value)| sdk::MessageTag::builder().name(name).value(value).build())
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

pub fn email_output(output: &SdkSendEmailOutput) -> SendEmailOutput {
    SendEmailOutput {
        message_id: output.message_id().map(str::to_string),
        metadata: ResponseMetadata {
            request_id: output.request_id().map(str::to_string),
        },
    }
}

pub fn bulk_email_output(output: &SdkSendBulkEmailOutput) -> SendBulkEmailOutput {
    let result = output
        .bulk_email_entry_results()
        .iter()
        .map(|entry| BulkEmailEntryResult {
            error: entry.error().map(str::to_string),
            message_id: entry.message_id().map(str::to_string),
            status: entry
                .status()
                .map(bulk_email_status)
                .unwrap_or(BulkEmailStatus::Unknown),
        })
        .collect();

    SendBulkEmailOutput {
        result,
        metadata: ResponseMetadata {
            request_id: output.request_id().map(str::to_string),
        },
    }
}

fn bulk_email_status(status: &sdk::BulkEmailStatus) -> BulkEmailStatus {
    match status {
        sdk::BulkEmailStatus::Success => BulkEmailStatus::Success,
        sdk::BulkEmailStatus::MessageRejected => BulkEmailStatus::MessageRejected,
        sdk::BulkEmailStatus::MailFromDomainNotVerified => {
            BulkEmailStatus::MailFromDomainNotVerified
        }
        sdk::BulkEmailStatus::ConfigurationSetNotFound => BulkEmailStatus::ConfigurationSetNotFound,
        sdk::BulkEmailStatus::TemplateNotFound => BulkEmailStatus::TemplateNotFound,
        sdk::BulkEmailStatus::AccountSuspended => BulkEmailStatus::AccountSuspended,
        sdk::BulkEmailStatus::AccountThrottled => BulkEmailStatus::AccountThrottled,
        sdk::BulkEmailStatus::AccountDailyQuotaExceeded => {
            BulkEmailStatus::AccountDailyQuotaExceeded
        }
        sdk::BulkEmailStatus::InvalidSendingPoolName => BulkEmailStatus::InvalidSendingPoolName,
        sdk::BulkEmailStatus::AccountSendingPaused => BulkEmailStatus::AccountSendingPaused,
        sdk::BulkEmailStatus::ConfigurationSetSendingPaused => {
            BulkEmailStatus::ConfigurationSetSendingPaused
        }
        sdk::BulkEmailStatus::InvalidParameter => BulkEmailStatus::InvalidParameter,
        sdk::BulkEmailStatus::TransientFailure => BulkEmailStatus::TransientFailure,
        sdk::BulkEmailStatus::Failed => BulkEmailStatus::Failed,
        _ => BulkEmailStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_ses_types::{
        BulkEmailContent, Message, RawMessage, ReplacementEmailContent, ReplacementTemplate,
    };
    use pretty_assertions::assert_eq;

    fn simple_email() -> SendEmailInput {
        SendEmailInput {
            from: Some("a@x.com".to_string()),
            destination: Some(Destination::to(["b@x.com"])),
            content: Some(EmailContent {
                simple: Some(Message {
                    subject: Some(Content::new("Hi")),
                    body: Some(Body {
                        html: Some(Content::new("<p>hi</p>")),
                        text: None,
                    }),
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn missing_content_is_rejected() {
        let input = SendEmailInput {
            content: None,
            ..simple_email()
        };
        assert!(matches!(
            email_input(&input, None),
            Err(SendError::MissingContent)
        ));
    }

    #[test]
    fn missing_destination_is_rejected() {
        let input = SendEmailInput {
            destination: None,
            ..simple_email()
        };
        assert!(matches!(
            email_input(&input, None),
            Err(SendError::MissingDestination)
        ));
    }

    #[test]
    fn simple_message_is_translated() {
        let request = email_input(&simple_email(), None).unwrap();

        assert_eq!(request.from_email_address.as_deref(), Some("a@x.com"));
        let to = request.destination.unwrap().to_addresses.unwrap();
        assert_eq!(to, vec!["b@x.com".to_string()]);

        let message = request.content.unwrap().simple.unwrap();
        assert_eq!(message.subject.unwrap().data, "Hi");
        let body = message.body.unwrap();
        assert_eq!(body.html.unwrap().data, "<p>hi</p>");
        assert!(body.text.is_none());
        assert!(request.email_tags.is_none());
        assert!(request.reply_to_addresses.is_none());
    }

    #[test]
    fn legacy_flat_body_keeps_html_and_text() {
        let mut input = simple_email();
        input.content = Some(EmailContent {
            subject: Some(Content {
                data: Some("Flat".to_string()),
                charset: Some("UTF-8".to_string()),
            }),
            body: Some(Body {
                html: Some(Content::new("<b>flat</b>")),
                text: Some(Content::new("flat")),
            }),
            simple: Some(Message {
                subject: Some(Content::new("ignored")),
                body: None,
            }),
            ..Default::default()
        });

        let request = email_input(&input, None).unwrap();
        let message = request.content.unwrap().simple.unwrap();

        let subject = message.subject.unwrap();
        assert_eq!(subject.data, "Flat");
        assert_eq!(subject.charset.as_deref(), Some("UTF-8"));
        let body = message.body.unwrap();
        assert_eq!(body.html.unwrap().data, "<b>flat</b>");
        assert_eq!(body.text.unwrap().data, "flat");
    }

    #[test]
    fn raw_and_template_pass_through() {
        let mut input = simple_email();
        input.content = Some(EmailContent {
            raw: Some(RawMessage {
                data: b"Subject: raw\r\n\r\nhello".to_vec(),
            }),
            template: Some(Template {
                name: Some("welcome".to_string()),
                data: Some(r#"{"name":"Ada"}"#.to_string()),
                arn: None,
            }),
            ..Default::default()
        });

        let request = email_input(&input, None).unwrap();
        let content = request.content.unwrap();

        assert!(content.simple.is_none());
        assert_eq!(
            content.raw.unwrap().data.into_inner(),
            b"Subject: raw\r\n\r\nhello".to_vec()
        );
        let template = content.template.unwrap();
        assert_eq!(template.template_name.as_deref(), Some("welcome"));
        assert_eq!(template.template_data.as_deref(), Some(r#"{"name":"Ada"}"#));
    }

    #[test]
    fn tags_and_sender_options_are_translated() {
        let mut input = simple_email();
        input.tags.insert("campaign".to_string(), "launch".to_string());
        input.tags.insert("tier".to_string(), "gold".to_string());
        input.reply_to = vec!["r@x.com".to_string()];
        input.from_arn = Some("arn:aws:ses:us-east-1:1:identity/x.com".to_string());
        input.list_management_options = Some(ListManagementOptions {
            contact_list_name: Some("news".to_string()),
            topic_name: Some("weekly".to_string()),
        });

        let request = email_input(&input, Some("tracking")).unwrap();

        let tags: Vec<(String, String)> = request
            .email_tags
            .unwrap()
            .into_iter()
            .map(|tag| (tag.name, tag.value))
            .collect();
        assert_eq!(
            tags,
            vec![
                ("campaign".to_string(), "launch".to_string()),
                ("tier".to_string(), "gold".to_string()),
            ]
        );
        assert_eq!(request.configuration_set_name.as_deref(), Some("tracking"));
        assert_eq!(
            request.reply_to_addresses,
            Some(vec!["r@x.com".to_string()])
        );
        assert_eq!(
            request.from_email_address_identity_arn.as_deref(),
            Some("arn:aws:ses:us-east-1:1:identity/x.com")
        );
        let options = request.list_management_options.unwrap();
        assert_eq!(options.contact_list_name, "news");
        assert_eq!(options.topic_name.as_deref(), Some("weekly"));
    }

    #[test]
    fn content_without_data_is_a_build_error() {
        let mut input = simple_email();
        input.content = Some(EmailContent {
            simple: Some(Message {
                subject: Some(Content {
                    data: None,
                    charset: Some("UTF-8".to_string()),
                }),
                body: None,
            }),
            ..Default::default()
        });
        assert!(matches!(
            email_input(&input, None),
            Err(SendError::Build(_))
        ));

        let mut input = simple_email();
        input.list_management_options = Some(ListManagementOptions {
            topic_name: Some("weekly".to_string()),
            ..Default::default()
        });
        assert!(matches!(
            email_input(&input, None),
            Err(SendError::Build(_))
        ));
    }

    fn bulk_email() -> SendBulkEmailInput {
        SendBulkEmailInput {
            from: Some("a@x.com".to_string()),
            default_content: Some(BulkEmailContent {
                template: Some(Template {
                    name: Some("digest".to_string()),
                    data: Some("{}".to_string()),
                    arn: None,
                }),
            }),
            entries: vec![
                BulkEmailEntry {
                    destination: Some(Destination::to(["b@x.com"])),
                    ..Default::default()
                },
                BulkEmailEntry {
                    destination: Some(Destination::to(["c@x.com"])),
                    content: Some(ReplacementEmailContent {
                        replacement_template: Some(ReplacementTemplate {
                            data: Some(r#"{"name":"Cy"}"#.to_string()),
                        }),
                    }),
                    tags: MessageTags::from([("segment".to_string(), "beta".to_string())]),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn bulk_entries_are_translated() {
        let request = bulk_email_input(&bulk_email(), None).unwrap();

        let template = request.default_content.unwrap().template.unwrap();
        assert_eq!(template.template_name.as_deref(), Some("digest"));

        let entries = request.bulk_email_entries.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].replacement_email_content.is_none());
        assert!(entries[0].replacement_tags.is_none());

        let replacement = entries[1]
            .replacement_email_content
            .clone()
            .unwrap()
            .replacement_template
            .unwrap();
        assert_eq!(
            replacement.replacement_template_data.as_deref(),
            Some(r#"{"name":"Cy"}"#)
        );
        let tags = entries[1].replacement_tags.clone().unwrap();
        assert_eq!(tags[0].name, "segment");
        assert_eq!(tags[0].value, "beta");
    }

    #[test]
    fn bulk_defaults_and_sender_fields_are_translated() {
        let mut input = bulk_email();
        input.from_arn = Some("arn:aws:ses:us-east-1:1:identity/x.com".to_string());
        input.reply_to = vec!["r@x.com".to_string()];
        input.feedback_forwarding_email_address = Some("bounce@x.com".to_string());
        input.feedback_forwarding_email_address_identity_arn =
            Some("arn:aws:ses:us-east-1:1:identity/bounce.x.com".to_string());
        input.default_tags = MessageTags::from([("kind".to_string(), "digest".to_string())]);

        let request = bulk_email_input(&input, Some("tracking")).unwrap();

        assert_eq!(request.from_email_address.as_deref(), Some("a@x.com"));
        assert_eq!(
            request.from_email_address_identity_arn.as_deref(),
            Some("arn:aws:ses:us-east-1:1:identity/x.com")
        );
        assert_eq!(
            request.reply_to_addresses,
            Some(vec!["r@x.com".to_string()])
        );
        assert_eq!(
            request.feedback_forwarding_email_address.as_deref(),
            Some("bounce@x.com")
        );
        assert_eq!(
            request
                .feedback_forwarding_email_address_identity_arn
                .as_deref(),
            Some("arn:aws:ses:us-east-1:1:identity/bounce.x.com")
        );
        assert_eq!(request.configuration_set_name.as_deref(), Some("tracking"));
        let tags = request.default_email_tags.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "kind");
        assert_eq!(tags[0].value, "digest");
    }

    #[test]
    fn bulk_without_defaults_sends_none() {
        let request = bulk_email_input(&bulk_email(), None).unwrap();

        assert!(request.default_email_tags.is_none());
        assert!(request.reply_to_addresses.is_none());
        assert!(request.configuration_set_name.is_none());
    }

    #[test]
    fn bulk_entry_without_destination_fails_the_request() {
        let mut input = bulk_email();
        input.entries[1].destination = None;

        assert!(matches!(
            bulk_email_input(&input, None),
            Err(SendError::MissingDestination)
        ));
    }

    #[test]
    fn email_output_carries_message_id() {
        let output = SdkSendEmailOutput::builder().message_id("m-1").build();
        assert_eq!(email_output(&output).message_id.as_deref(), Some("m-1"));
    }

    #[test]
    fn sdk_statuses_map_to_wire_statuses() {
        assert_eq!(
            bulk_email_status(&sdk::BulkEmailStatus::AccountDailyQuotaExceeded),
            BulkEmailStatus::AccountDailyQuotaExceeded
        );
        assert_eq!(
            bulk_email_status(&sdk::BulkEmailStatus::from("SOMETHING_NEW")),
            BulkEmailStatus::Unknown
        );
    }
}
