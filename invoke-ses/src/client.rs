use lambda_ses_types::{Input, Output, SendBulkEmailInput, SendEmailInput};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::invoker::{InvokeRequest, Invoker, TransportOptions};
use crate::response::{BulkEmailReply, EmailReply, EmailsReply, InvocationResponse};

pub const DEFAULT_FUNCTION_NAME: &str = "lambda-ses";

/// Calls the `lambda-ses` function through an [`Invoker`].
///
/// Every operation comes in two flavours: the plain one returns the
/// [`InvocationResponse`] even when the function failed to run, leaving
/// `response.error` for the caller to inspect; the `_or_throw` one turns
/// that case into [`ClientError::Function`]. Emails rejected by the provider
/// are reported inside the payload by both.
#[derive(Debug, Clone)]
pub struct LambdaSesClient<I> {
    invoker: I,
    function_name: String,
}

impl<I: Invoker> LambdaSesClient<I> {
    pub fn new(invoker: I) -> Self {
        Self {
            invoker,
            function_name: DEFAULT_FUNCTION_NAME.to_string(),
        }
    }

    pub fn with_function_name(mut self, function_name: impl Into<String>) -> Self {
        self.function_name = function_name.into();
        self
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub async fn send_or_return(
        &self,
        input: &Input,
        options: &TransportOptions,
    ) -> Result<InvocationResponse<Output>, ClientError> {
        self.invoke(input, options).await
    }

    pub async fn send_or_throw(
        &self,
        input: &Input,
        options: &TransportOptions,
    ) -> Result<InvocationResponse<Output>, ClientError> {
        self.invoke(input, options).await?.into_result()
    }

    pub async fn send_email(
        &self,
        email: SendEmailInput,
        options: &TransportOptions,
    ) -> Result<InvocationResponse<EmailReply>, ClientError> {
        self.invoke(&Input::email(email), options).await
    }

    pub async fn send_email_or_throw(
        &self,
        email: SendEmailInput,
        options: &TransportOptions,
    ) -> Result<InvocationResponse<EmailReply>, ClientError> {
        self.send_email(email, options).await?.into_result()
    }

    pub async fn send_emails(
        &self,
        emails: Vec<SendEmailInput>,
        options: &TransportOptions,
    ) -> Result<InvocationResponse<EmailsReply>, ClientError> {
        self.invoke(&Input::emails(emails), options).await
    }

    pub async fn send_emails_or_throw(
        &self,
        emails: Vec<SendEmailInput>,
        options: &TransportOptions,
    ) -> Result<InvocationResponse<EmailsReply>, ClientError> {
        self.send_emails(emails, options).await?.into_result()
    }

    pub async fn send_bulk_email(
        &self,
        bulk_email: SendBulkEmailInput,
        options: &TransportOptions,
    ) -> Result<InvocationResponse<BulkEmailReply>, ClientError> {
        self.invoke(&Input::bulk_email(bulk_email), options).await
    }

    pub async fn send_bulk_email_or_throw(
        &self,
        bulk_email: SendBulkEmailInput,
        options: &TransportOptions,
    ) -> Result<InvocationResponse<BulkEmailReply>, ClientError> {
        self.send_bulk_email(bulk_email, options).await?.into_result()
    }

    async fn invoke<T: DeserializeOwned>(
        &self,
        input: &Input,
        options: &TransportOptions,
    ) -> Result<InvocationResponse<T>, ClientError> {
        let payload = serde_json::to_vec(input).map_err(ClientError::Encode)?;

        let reply = self
            .invoker
            .invoke(InvokeRequest {
                function_name: self.function_name.clone(),
                payload,
                options: options.clone(),
            })
            .await?;
        debug!(status = reply.status_code, "function returned");

        let response = InvocationResponse::from_reply(reply)?;
        if let Some(error) = &response.error {
            warn!(function = %self.function_name, error = %error, "function error");
        }

        Ok(response)
    }
}
