use crate::console::{
    confirm_application, decline_application, list_applications, list_filter_options,
    search_offers, ApplicationListArgs, OfferSearchArgs,
};
use crate::demo::run_demo;
use crate::server;
use clap::{Args, Parser, Subcommand};
use internship_portal::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Internship Portal",
    about = "Track internship applications and browse open offers from the command line",
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
    /// Inspect and respond to tracked applications
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
    /// Search the internship offer catalog
    Offers {
        #[command(subcommand)]
        command: OffersCommand,
    },
    /// Walk through the application lifecycle and offer search on demo data
    Demo,
}

#[derive(Subcommand, Debug)]
enum ApplicationsCommand {
    /// List applications with optional status filter and ordering
    List(ApplicationListArgs),
    /// Confirm an accepted internship
    Confirm {
        /// Application identifier
        id: String,
    },
    /// Decline an accepted internship (cannot be undone)
    Decline {
        /// Application identifier
        id: String,
        /// Acknowledge that declining is irreversible
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum OffersCommand {
    /// Filter offers by free text and category values
    Search(OfferSearchArgs),
    /// Show the selectable values for each filter category
    Options,
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
        Command::Applications { command } => match command {
            ApplicationsCommand::List(args) => list_applications(args),
            ApplicationsCommand::Confirm { id } => confirm_application(&id),
            ApplicationsCommand::Decline { id, yes } => decline_application(&id, yes),
        },
        Command::Offers { command } => match command {
            OffersCommand::Search(args) => search_offers(args),
            OffersCommand::Options => list_filter_options(),
        },
        Command::Demo => run_demo(),
    }
}
