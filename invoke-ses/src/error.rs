use lambda_ses_types::ResponseMetadata;

/// The remote function itself failed, as opposed to an email being rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{error_type}: {error_message}")]
pub struct FunctionError {
    pub error_type: String,
    pub error_message: String,
    pub status: i32,
    pub logs: Option<String>,
    pub version: Option<String>,
    pub metadata: ResponseMetadata,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("unable to serialize input: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("unable to decode function response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("unable to invoke function: {0}")]
    Transport(String),

    #[error("unable to decode log tail: {0}")]
    Logs(#[from] base64::DecodeError),

    #[error(transparent)]
    Function(Box<FunctionError>),
}
