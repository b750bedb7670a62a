use crate::classify::{run_classify, ClassifyArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use scholar_detect::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Scholarly Article Detector",
    about = "Classify PDFs as scholarly or popular from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service with the upload form (default command)
    Serve(ServeArgs),
    /// Classify a single PDF and print the verdict with its evidence
    Classify(ClassifyArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the zero-shot inference endpoint URL
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Classify(args) => run_classify(args).await,
    }
}
