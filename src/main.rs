//! # PhishLine Main Entry Point
//!
//! Interactive phishing analyzer and assistant chat in the terminal.

use anyhow::Result;
use phishline::cmd_args::CommandLineArgs;
use phishline::config::{self, AppConfig};
use phishline::TerminalAppController;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose())?;

    let config = AppConfig::from_args(&cmd_args)?;
    let mut app = TerminalAppController::new(&config)?;

    println!("PhishLine - email phishing analyzer");
    println!("Service: {}", config.base_url());
    println!("Type 'analyze' to paste an email, 'chat' to open the assistant, 'help' for more.\n");

    app.run().await?;

    println!("Bye!");
    Ok(())
}

fn init_tracing_subscriber(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(config::LOG_LEVEL_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level))
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("hyper_util=warn".parse()?)
        .add_directive("rustls=warn".parse()?)
        .add_directive("tokio=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
