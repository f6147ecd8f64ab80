use async_trait::async_trait;
use aws_sdk_sesv2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_sesv2::operation::send_bulk_email::SendBulkEmailInput;
use aws_sdk_sesv2::operation::send_email::SendEmailInput;
use aws_sdk_sesv2::Client;
use lambda_ses_types::{SendBulkEmailOutput, SendEmailOutput};
use tracing::error;

use crate::error::SendError;
use crate::translate;

/// The email service the router sends through.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send_email(&self, input: SendEmailInput) -> Result<SendEmailOutput, SendError>;

    async fn send_bulk_email(
        &self,
        input: SendBulkEmailInput,
    ) -> Result<SendBulkEmailOutput, SendError>;
}

/// Amazon SES v2.
#[derive(Clone, Debug)]
pub struct SesProvider {
    client: Client,
}

impl SesProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EmailProvider for SesProvider {
    async fn send_email(&self, input: SendEmailInput) -> Result<SendEmailOutput, SendError> {
        let output = self
            .client
            .send_email()
            .set_from_email_address(input.from_email_address)
            .set_from_email_address_identity_arn(input.from_email_address_identity_arn)
            .set_destination(input.destination)
            .set_reply_to_addresses(input.reply_to_addresses)
            .set_feedback_forwarding_email_address(input.feedback_forwarding_email_address)
            .set_feedback_forwarding_email_address_identity_arn(
                input.feedback_forwarding_email_address_identity_arn,
            )
            .set_content(input.content)
            .set_email_tags(input.email_tags)
            .set_configuration_set_name(input.configuration_set_name)
            .set_list_management_options(input.list_management_options)
            .send()
            .await
            .map_err(provider_error)?;

        Ok(translate::email_output(&output))
    }

    async fn send_bulk_email(
        &self,
        input: SendBulkEmailInput,
    ) -> Result<SendBulkEmailOutput, SendError> {
        let output = self
            .client
            .send_bulk_email()
            .set_from_email_address(input.from_email_address)
            .set_from_email_address_identity_arn(input.from_email_address_identity_arn)
            .set_reply_to_addresses(input.reply_to_addresses)
            .set_feedback_forwarding_email_address(input.feedback_forwarding_email_address)
            .set_feedback_forwarding_email_address_identity_arn(
                input.feedback_forwarding_email_address_identity_arn,
            )
            .set_default_email_tags(input.default_email_tags)
            .set_default_content(input.default_content)
            .set_bulk_email_entries(input.bulk_email_entries)
            .set_configuration_set_name(input.configuration_set_name)
            .send()
            .await
            .map_err(provider_error)?;

        Ok(translate::bulk_email_output(&output))
    }
}

fn provider_error<E, R>(err: SdkError<E, R>) -> SendError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let code = err.code().map(str::to_string);
    let message = DisplayErrorContext(&err).to_string();
    error!(code = ?code, error = %message, "SES request failed");

    SendError::Provider { code, message }
}
