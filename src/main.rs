use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use dispute_desk::commands::{
    self, Context, dashboard::DashboardArgs, jobs::JobsCommand, members::MembersCommand,
    payments::PaymentsCommand, profile::ProfileCommand, prospects::ProspectsCommand,
    session::SessionCommand,
};
use dispute_desk::config::{ConfigLayer, ConsoleConfig};
use dispute_desk::session::SessionStore;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Admin console for the dispute resolution job marketplace
struct Cli {
    /// Backend base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token for the backend
    #[arg(long, global = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Rows per page
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Job schedule, bookings and job posting
    #[command(subcommand)]
    Jobs(JobsCommand),

    /// Member approval and ranking
    #[command(subcommand)]
    Members(MembersCommand),

    /// Payments to members
    #[command(subcommand)]
    Payments(PaymentsCommand),

    /// Potential members and invitation emails
    #[command(subcommand)]
    Prospects(ProspectsCommand),

    /// The signed-in member's profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Dashboard counters
    Dashboard(DashboardArgs),

    /// Signed-in member
    #[command(subcommand)]
    Session(SessionCommand),
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let flags = ConfigLayer {
        base_url: cli.base_url,
        token: cli.token,
        timeout_secs: cli.timeout_secs,
        page_size: cli.page_size,
        session_file: None,
    };
    let layer = ConfigLayer::resolve(flags).context("Failed to load configuration")?;
    let store = SessionStore::new(layer.session_path());

    let command = match cli.command {
        Commands::Session(command) => return commands::session::run(command, &store),
        command => command,
    };

    let config = ConsoleConfig::from_layer(layer)?;
    let session = store.load()?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight requests");
            on_interrupt.cancel();
        }
    });

    let ctx = Context::new(config, session, cli.yes, cancel)?;
    match command {
        Commands::Jobs(command) => commands::jobs::run(command, &ctx).await,
        Commands::Members(command) => commands::members::run(command, &ctx).await,
        Commands::Payments(command) => commands::payments::run(command, &ctx).await,
        Commands::Prospects(command) => commands::prospects::run(command, &ctx).await,
        Commands::Profile(command) => commands::profile::run(command, &ctx).await,
        Commands::Dashboard(args) => commands::dashboard::run(args, &ctx).await,
        Commands::Session(_) => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut filter = EnvFilter::new("info,hyper=warn,reqwest=warn");
    if let Ok(var) = std::env::var("RUST_LOG") {
        filter = filter.add_directive(var.parse()?);
    }
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_env_filter(filter)
        .init();

    if let Err(e) = run().await {
        error!(?e, "run error");
        std::process::exit(1);
    }

    Ok(())
}
