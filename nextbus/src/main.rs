use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nextbus::cli::Cli;
use nextbus::inquiry::{Answer, InquiryError, Orchestrator};
use nextbus::nextrip::NexTripClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli).await {
        Ok(answer) => {
            println!("{answer}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<Answer, InquiryError> {
    let inquiry = cli.inquiry();
    let client = NexTripClient::new(cli.nextrip_config())?;
    Orchestrator::new(&client).answer(&inquiry).await
}
