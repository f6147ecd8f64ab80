use lambda_runtime::LambdaEvent;
use lambda_ses_types::{Input, Output};

use crate::error::DispatchError;
use crate::provider::EmailProvider;
use crate::router::Router;

/// Entry point for each invocation. A failed single or bulk send becomes a
/// function error; batch failures are reported inside the [`Output`].
pub(crate) async fn function_handler<P: EmailProvider>(
    router: &Router<P>,
    event: LambdaEvent<Input>,
) -> Result<Output, DispatchError> {
    tracing::info!(request_id = %event.context.request_id, "handling invocation");

    router.dispatch(event.payload).await
}
