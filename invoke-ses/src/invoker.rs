use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::operation::RequestId;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::Client;

use crate::error::ClientError;

/// How the function should be run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InvocationType {
    /// Wait for the function and return its result (status 200).
    #[default]
    RequestResponse,
    /// Queue the event and return immediately (status 202).
    Event,
    /// Only check parameters and permissions (status 204).
    DryRun,
}

impl From<InvocationType> for aws_sdk_lambda::types::InvocationType {
    fn from(value: InvocationType) -> Self {
        match value {
            InvocationType::RequestResponse => Self::RequestResponse,
            InvocationType::Event => Self::Event,
            InvocationType::DryRun => Self::DryRun,
        }
    }
}

/// Whether to return the tail of the execution log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogType {
    None,
    #[default]
    Tail,
}

impl From<LogType> for aws_sdk_lambda::types::LogType {
    fn from(value: LogType) -> Self {
        match value {
            LogType::None => Self::None,
            LogType::Tail => Self::Tail,
        }
    }
}

/// Per-call transport settings. `Default` gives a synchronous call that
/// returns the log tail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    pub invocation_type: InvocationType,
    pub log_type: LogType,
    /// Version or alias to invoke.
    pub qualifier: Option<String>,
    /// Base64-encoded client context passed to the function.
    pub client_context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeRequest {
    pub function_name: String,
    pub payload: Vec<u8>,
    pub options: TransportOptions,
}

/// What the transport returned, before any decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokeReply {
    pub status_code: i32,
    /// Set when the function failed to run to completion.
    pub function_error: Option<String>,
    /// Base64-encoded tail of the execution log.
    pub log_result: Option<String>,
    pub payload: Vec<u8>,
    pub executed_version: Option<String>,
    pub request_id: Option<String>,
}

/// Runs a named function with a byte payload.
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn invoke(&self, request: InvokeRequest) -> Result<InvokeReply, ClientError>;
}

/// AWS Lambda.
#[derive(Clone, Debug)]
pub struct LambdaInvoker {
    client: Client,
}

impl LambdaInvoker {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the default credential and region chain.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl Invoker for LambdaInvoker {
    #[tracing::instrument(skip_all, fields(function = %request.function_name))]
    async fn invoke(&self, request: InvokeRequest) -> Result<InvokeReply, ClientError> {
        let InvokeRequest {
            function_name,
            payload,
            options,
        } = request;

        let response = self
            .client
            .invoke()
            .function_name(function_name)
            .invocation_type(options.invocation_type.into())
            .log_type(options.log_type.into())
            .set_qualifier(options.qualifier)
            .set_client_context(options.client_context)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|err| {
                let message = DisplayErrorContext(&err).to_string();
                tracing::error!(error = %message, "lambda invocation failed");
                ClientError::Transport(message)
            })?;

        Ok(InvokeReply {
            status_code: response.status_code(),
            function_error: response.function_error().map(str::to_string),
            log_result: response.log_result().map(str::to_string),
            payload: response
                .payload()
                .map(|blob| blob.as_ref().to_vec())
                .unwrap_or_default(),
            executed_version: response.executed_version().map(str::to_string),
            request_id: response.request_id().map(str::to_string),
        })
    }
}
