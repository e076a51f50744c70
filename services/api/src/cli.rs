use crate::catalog::{run_check, run_tier_table, CheckArgs, PayloadKind};
use crate::server;
use clap::{Args, Parser, Subcommand};
use roogo::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Roogo API",
    about = "Serve and inspect the Roogo listing and payment API",
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
    /// Print the tier comparison table
    Tiers,
    /// Validate a JSON payload file without starting the server
    Check {
        #[command(subcommand)]
        command: CheckCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CheckCommand {
    /// Validate a listing-creation payload
    Listing(CheckArgs),
    /// Validate a payment-initiation payload
    Payment(CheckArgs),
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
        Command::Tiers => {
            run_tier_table();
            Ok(())
        }
        Command::Check {
            command: CheckCommand::Listing(args),
        } => run_check(PayloadKind::Listing, args),
        Command::Check {
            command: CheckCommand::Payment(args),
        } => run_check(PayloadKind::Payment, args),
    }
}
