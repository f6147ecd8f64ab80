use lambda_ses_types::{
    Input, Output, SendBulkEmailInput, SendBulkEmailOutput, SendEmailInput, SendEmailOutput,
};
use tracing::{info, instrument, warn};

use crate::error::{DispatchError, SendError};
use crate::provider::EmailProvider;
use crate::translate;

/// Picks the operation an [`Input`] asks for and runs it against a provider.
pub struct Router<P> {
    provider: P,
    default_configuration_set: Option<String>,
}

impl<P: EmailProvider> Router<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            default_configuration_set: None,
        }
    }

    /// Configuration set used when a request does not name one.
    pub fn with_default_configuration_set(mut self, name: Option<String>) -> Self {
        self.default_configuration_set = name;
        self
    }

    /// Runs the first populated operation, in the order `email`, `emails`,
    /// `bulkEmail`. An empty input is a no-op.
    pub async fn dispatch(&self, input: Input) -> Result<Output, DispatchError> {
        if let Some(email) = input.email {
            match self.send_email(&email).await {
                Ok(output) => Ok(Output {
                    email: Some(output),
                    ..Default::default()
                }),
                Err(source) => Err(DispatchError {
                    output: Box::new(Output {
                        error: Some(source.to_string()),
                        ..Default::default()
                    }),
                    source,
                }),
            }
        } else if !input.emails.is_empty() {
            Ok(self.send_emails(&input.emails).await)
        } else if let Some(bulk_email) = input.bulk_email {
            match self.send_bulk_email(&bulk_email).await {
                Ok(output) => Ok(Output {
                    bulk_email: Some(output),
                    ..Default::default()
                }),
                Err(source) => Err(DispatchError {
                    output: Box::new(Output {
                        bulk_email_error: Some(source.to_string()),
                        ..Default::default()
                    }),
                    source,
                }),
            }
        } else {
            info!("input names no operation");
            Ok(Output::default())
        }
    }

    #[instrument(skip_all, fields(from = ?email.from))]
    pub async fn send_email(&self, email: &SendEmailInput) -> Result<SendEmailOutput, SendError> {
        let configuration_set = email
            .configuration_set_name
            .as_deref()
            .or(self.default_configuration_set.as_deref());
        let request = translate::email_input(email, configuration_set)?;

        let output = self.provider.send_email(request).await?;
        info!(message_id = ?output.message_id, "email accepted");

        Ok(output)
    }

    /// Sends each email in order. A failed entry is recorded and the rest are
    /// still sent.
    #[instrument(skip_all, fields(count = emails.len()))]
    pub async fn send_emails(&self, emails: &[SendEmailInput]) -> Output {
        let mut outputs = Vec::with_capacity(emails.len());
        let mut errors = Vec::new();
        let mut error_indices = Vec::new();

        for (index, email) in emails.iter().enumerate() {
            match self.send_email(email).await {
                Ok(output) => outputs.push(output),
                Err(err) => {
                    warn!(index, error = %err, "batch entry failed");
                    errors.push(err.to_string());
                    error_indices.push(index);
                }
            }
        }

        info!(sent = outputs.len(), failed = errors.len(), "batch finished");

        if errors.is_empty() {
            Output {
                emails: Some(outputs),
                ..Default::default()
            }
        } else {
            Output {
                emails: Some(outputs),
                errors: Some(errors),
                error_indices: Some(error_indices),
                ..Default::default()
            }
        }
    }

    #[instrument(skip_all, fields(entries = bulk_email.entries.len()))]
    pub async fn send_bulk_email(
        &self,
        bulk_email: &SendBulkEmailInput,
    ) -> Result<SendBulkEmailOutput, SendError> {
        if let Some(index) = bulk_email
            .entries
            .iter()
            .position(|entry| entry.destination.is_none())
        {
            warn!(index, "bulk entry has no destination");
            return Err(SendError::MissingDestination);
        }

        let configuration_set = bulk_email
            .configuration_set_name
            .as_deref()
            .or(self.default_configuration_set.as_deref());
        let request = translate::bulk_email_input(bulk_email, configuration_set)?;

        let output = self.provider.send_bulk_email(request).await?;
        let rejected = output
            .result
            .iter()
            .filter(|entry| !entry.status.is_success())
            .count();
        info!(results = output.result.len(), rejected, "bulk email submitted");

        Ok(output)
    }
}
