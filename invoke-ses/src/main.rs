use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use invoke_ses::{InvocationType, LambdaInvoker, LambdaSesClient, LogType, TransportOptions};
use lambda_ses_types::Input;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "invoke-ses")]
#[command(about = "Send email through the lambda-ses function")]
struct Args {
    /// Lambda function name
    #[arg(default_value = invoke_ses::DEFAULT_FUNCTION_NAME)]
    function: String,

    /// File holding the request JSON; reads stdin when omitted or "-"
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = InvocationType::RequestResponse)]
    invocation_type: InvocationType,

    #[arg(long, value_enum, default_value_t = LogType::Tail)]
    log_type: LogType,

    /// Version or alias to invoke
    #[arg(long)]
    qualifier: Option<String>,

    /// Base64-encoded client context passed to the function
    #[arg(long)]
    client_context: Option<String>,

    /// Exit with an error when the function itself fails
    #[arg(long)]
    throw_on_error: bool,
}

impl Args {
    fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            invocation_type: self.invocation_type,
            log_type: self.log_type,
            qualifier: self.qualifier.clone(),
            client_context: self.client_context.clone(),
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<Input> {
    let text = match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("unable to read {}", path.display()))?,
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("unable to read stdin")?;
            text
        }
    };

    serde_json::from_str(&text).context("input is not a valid request")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let input = read_input(args.input.as_ref())?;

    let options = args.transport_options();
    let client =
        LambdaSesClient::new(LambdaInvoker::from_env().await).with_function_name(args.function);

    let response = if args.throw_on_error {
        client.send_or_throw(&input, &options).await?
    } else {
        client.send_or_return(&input, &options).await?
    };

    if let Some(logs) = &response.logs {
        eprintln!("{logs}");
    }
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
