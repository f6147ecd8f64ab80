use std::env;

/// Settings read from the function's environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Overrides the region resolved by the AWS default chain.
    pub region: Option<String>,
    /// Custom SES endpoint, e.g. LocalStack.
    pub endpoint_url: Option<String>,
    /// Configuration set for sends that do not name one.
    pub configuration_set: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            region: var("LAMBDA_SES_REGION"),
            endpoint_url: var("LAMBDA_SES_ENDPOINT_URL"),
            configuration_set: var("LAMBDA_SES_CONFIGURATION_SET"),
        }
    }

    pub async fn ses_client(&self) -> aws_sdk_sesv2::Client {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &self.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_sesv2::config::Builder::from(&sdk_config);
        if let Some(url) = &self.endpoint_url {
            builder = builder.endpoint_url(url);
        }
        aws_sdk_sesv2::Client::from_conf(builder.build())
    }
}
