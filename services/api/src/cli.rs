use crate::quote::{run_quote, run_selectors, QuoteArgs, SelectorsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use renewal_incentives::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Renewal Incentive Calculator",
    about = "Serve or query the vehicle renewal incentive catalog from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Look up the incentive for one vehicle combination
    Quote(QuoteArgs),
    /// List the selectable values for each lookup field
    Selectors(SelectorsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote(args) => run_quote(args),
        Command::Selectors(args) => run_selectors(args),
    }
}
