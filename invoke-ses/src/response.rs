use base64::{engine::general_purpose::STANDARD, Engine};
use lambda_ses_types::{ResponseMetadata, SendBulkEmailOutput, SendEmailOutput};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ClientError, FunctionError};
use crate::invoker::InvokeReply;

/// Error document the Lambda runtime returns when a function fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionErrorPayload {
    #[serde(default)]
    pub error_type: String,
    #[serde(default)]
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stack_trace: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Output(T),
    FunctionError(FunctionErrorPayload),
}

/// Decoded result of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationResponse<T> {
    pub status: i32,
    /// Set when the function failed to run, not when an email failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
    /// Empty for event and dry-run invocations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub metadata: ResponseMetadata,
}

impl<T: DeserializeOwned> InvocationResponse<T> {
    pub fn from_reply(reply: InvokeReply) -> Result<Self, ClientError> {
        // The log tail is diagnostic only; losing it must not lose the payload.
        let logs = reply
            .log_result
            .as_deref()
            .and_then(|encoded| match decode_logs(encoded) {
                Ok(logs) => Some(logs),
                Err(err) => {
                    warn!(error = %err, "dropping undecodable log tail");
                    None
                }
            });

        let payload = if reply.payload.is_empty() {
            None
        } else if let Some(kind) = &reply.function_error {
            Some(Payload::FunctionError(decode_function_error(
                kind,
                &reply.payload,
            )))
        } else {
            let output = serde_json::from_slice(&reply.payload).map_err(ClientError::Decode)?;
            Some(Payload::Output(output))
        };

        Ok(Self {
            status: reply.status_code,
            error: reply.function_error,
            logs,
            payload,
            version: reply.executed_version,
            metadata: ResponseMetadata {
                request_id: reply.request_id,
            },
        })
    }
}

impl<T> InvocationResponse<T> {
    pub fn output(&self) -> Option<&T> {
        match &self.payload {
            Some(Payload::Output(output)) => Some(output),
            _ => None,
        }
    }

    pub fn function_error(&self) -> Option<&FunctionErrorPayload> {
        match &self.payload {
            Some(Payload::FunctionError(error)) => Some(error),
            _ => None,
        }
    }

    /// Turns a function error into [`ClientError::Function`].
    pub fn into_result(self) -> Result<Self, ClientError> {
        if self.error.is_none() {
            return Ok(self);
        }

        let payload = self.function_error().cloned().unwrap_or_default();
        let error_type = if payload.error_type.is_empty() {
            self.error.clone().unwrap_or_default()
        } else {
            payload.error_type
        };

        Err(ClientError::Function(Box::new(FunctionError {
            error_type,
            error_message: payload.error_message,
            status: self.status,
            logs: self.logs,
            version: self.version,
            metadata: self.metadata,
        })))
    }
}

/// Decodes the base64 log tail. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_logs(encoded: &str) -> Result<String, ClientError> {
    let bytes = STANDARD.decode(encoded.trim())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// A crash can leave something other than the runtime's error document.
fn decode_function_error(kind: &str, payload: &[u8]) -> FunctionErrorPayload {
    serde_json::from_slice(payload).unwrap_or_else(|_| FunctionErrorPayload {
        error_type: kind.to_string(),
        error_message: String::from_utf8_lossy(payload).into_owned(),
        stack_trace: Vec::new(),
    })
}

/// Result of a single send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<SendEmailOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a batch send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailsReply {
    #[serde(default)]
    pub emails: Vec<SendEmailOutput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_indices: Vec<usize>,
}

/// Result of a bulk send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEmailReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_email: Option<SendBulkEmailOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_email_error: Option<String>,
}
