use std::sync::Arc;

use lambda_runtime::{run, service_fn, tracing, Error};

mod config;
mod error;
mod event_handler;
mod provider;
mod router;
mod translate;

use config::Config;
use event_handler::function_handler;
use provider::SesProvider;
use router::Router;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err.into());
        }
    }

    let config = Config::from_env();
    tracing::info!(?config, "starting lambda-ses");

    let client = config.ses_client().await;
    let router = Router::new(SesProvider::new(client))
        .with_default_configuration_set(config.configuration_set.clone());
    let router = Arc::new(router);

    run(service_fn(move |event| {
        let router = Arc::clone(&router);
        async move { function_handler(&router, event).await }
    }))
    .await
}
