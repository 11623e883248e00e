use crate::demo::{run_availability, run_demo, AvailabilityArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use leaseflow::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Leaseflow Marketplace Service",
    about = "Run the workspace rental marketplace core from the command line",
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
    /// Booking availability utilities
    Booking {
        #[command(subcommand)]
        command: BookingCommand,
    },
    /// Walk one tenant through the full lease lifecycle against the in-memory backend
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum BookingCommand {
    /// Check schedule coverage and the billing window for a date range
    Availability(AvailabilityArgs),
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
        Command::Booking {
            command: BookingCommand::Availability(args),
        } => run_availability(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
