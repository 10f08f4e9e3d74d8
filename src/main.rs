use amo_publish::{
    action::{self, ActionInputs, PublishConfig},
    amo::AmoClient,
    publish::{Publisher, clock::TokioClock},
    utils::{
        api::get_amo_base_url,
        logger::{LogLevel, Logger},
    },
};
use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "amo-publish")]
#[command(author = "Labscend Studios")]
#[command(version, about = "Publish a browser extension to addons.mozilla.org")]
struct Cli {
    #[command(flatten)]
    inputs: ActionInputs,

    /// AMO origin to talk to (defaults to $AMO_BASE_URL, then addons.mozilla.org)
    #[arg(long = "amo-base-url")]
    amo_base_url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            action::report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = PublishConfig::try_from(cli.inputs)?;
    let origin = cli.amo_base_url.unwrap_or_else(get_amo_base_url);

    let client = AmoClient::new(config.credentials.clone(), origin);
    let publisher = Publisher::new(client, TokioClock);

    let outcome = publisher.publish(&config).await?;
    action::report_outcome(&outcome).context("Failed to write step outputs")?;

    Logger::new().log_message(
        LogLevel::Success,
        &format!("Version \"{}\" has been published", outcome.version),
    );
    Ok(())
}
