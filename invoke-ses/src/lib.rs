//! Client for the `lambda-ses` function.
//!
//! ```rust,ignore
//! use invoke_ses::{LambdaInvoker, LambdaSesClient, TransportOptions};
//!
//! let client = LambdaSesClient::new(LambdaInvoker::from_env().await);
//! let response = client
//!     .send_email_or_throw(email, &TransportOptions::default())
//!     .await?;
//! ```

mod client;
mod error;
mod invoker;
mod response;

pub use client::{LambdaSesClient, DEFAULT_FUNCTION_NAME};
pub use error::{ClientError, FunctionError};
pub use invoker::{
    InvocationType, InvokeReply, InvokeRequest, Invoker, LambdaInvoker, LogType, TransportOptions,
};
pub use response::{
    decode_logs, BulkEmailReply, EmailReply, EmailsReply, FunctionErrorPayload,
    InvocationResponse, Payload,
};
