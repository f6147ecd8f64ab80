use aws_sdk_sesv2::error::BuildError;
use lambda_ses_types::Output;

/// Failure of a single or bulk send.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("Content is required")]
    MissingContent,

    #[error("Destination is required")]
    MissingDestination,

    #[error("Failed to build request: {0}")]
    Build(#[from] BuildError),

    #[error("{message}")]
    Provider {
        code: Option<String>,
        message: String,
    },
}

impl SendError {
    /// Name reported as the function error type.
    pub fn error_type(&self) -> &str {
        match self {
            Self::MissingContent => "MissingContentError",
            Self::MissingDestination => "MissingDestinationError",
            Self::Build(_) => "BuildError",
            Self::Provider {
                code: Some(code), ..
            } => code,
            Self::Provider { code: None, .. } => "ProviderError",
        }
    }
}

/// A failed dispatch. Carries the envelope with the error already embedded
/// so callers can read either one.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct DispatchError {
    pub output: Box<Output>,
    pub source: SendError,
}

impl From<DispatchError> for lambda_runtime::Diagnostic {
    fn from(error: DispatchError) -> Self {
        lambda_runtime::Diagnostic {
            error_type: error.source.error_type().to_string(),
            error_message: error.source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_code_becomes_the_error_type() {
        let error = SendError::Provider {
            code: Some("MessageRejected".to_string()),
            message: "Email address is not verified.".to_string(),
        };
        assert_eq!(error.error_type(), "MessageRejected");
        assert_eq!(error.to_string(), "Email address is not verified.");

        let error = SendError::Provider {
            code: None,
            message: "dispatch failure".to_string(),
        };
        assert_eq!(error.error_type(), "ProviderError");
    }

    #[test]
    fn dispatch_error_converts_to_diagnostic() {
        let error = DispatchError {
            output: Box::default(),
            source: SendError::MissingContent,
        };

        let diagnostic = lambda_runtime::Diagnostic::from(error);
        assert_eq!(diagnostic.error_type, "MissingContentError");
        assert_eq!(diagnostic.error_message, "Content is required");
    }
}
