mod commands;
mod datetime;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use eventdesk_core::EventId;
use eventdesk_core::EventStatus;
use eventdesk_core::query::SortBy;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eventdesk")]
#[command(about = "Browse and manage events on an events backend")]
struct Cli {
    /// Backend base URL (overrides config and EVENTDESK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events
    List {
        /// Only show events with this status
        #[arg(long)]
        status: Option<EventStatus>,

        #[arg(long, value_enum, default_value_t = SortArg::Start)]
        sort: SortArg,
    },
    /// Create an event (prompts for anything missing)
    New {
        title: Option<String>,

        /// Start date/time (e.g. "2026-03-20T15:00" or "fri 3pm")
        #[arg(short, long)]
        start: Option<String>,

        /// End date/time (e.g. "2026-03-20T17:00" or "until 5pm")
        #[arg(short, long, conflicts_with = "duration")]
        end: Option<String>,

        /// Length of the event (e.g. "2h", "3 days")
        #[arg(short, long)]
        duration: Option<String>,

        /// Ticket price (e.g. "12.50" or "12,50")
        #[arg(short, long)]
        price: Option<String>,

        #[arg(long, default_value_t = EventStatus::Started)]
        status: EventStatus,
    },
    /// Change fields of an existing event
    Edit {
        id: EventId,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        status: Option<EventStatus>,
    },
    /// Set the status of an event
    Status { id: EventId, status: EventStatus },
    /// Delete an event
    Delete {
        id: EventId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show config location, or write a default config file
    Config {
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Start,
    StartDesc,
    Price,
    PriceDesc,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Start => SortBy::StartDateAsc,
            SortArg::StartDesc => SortBy::StartDateDesc,
            SortArg::Price => SortBy::PriceAsc,
            SortArg::PriceDesc => SortBy::PriceDesc,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let api_url = cli.api_url;

    match cli.command {
        Commands::List { status, sort } => {
            commands::list::run(api_url.as_deref(), status, sort.into()).await
        }
        Commands::New {
            title,
            start,
            end,
            duration,
            price,
            status,
        } => {
            let args = commands::new::NewArgs {
                title,
                start,
                end,
                duration,
                price,
                status,
            };
            commands::new::run(api_url.as_deref(), args).await
        }
        Commands::Edit {
            id,
            title,
            start,
            end,
            price,
            status,
        } => {
            let args = commands::edit::EditArgs {
                title,
                start,
                end,
                price,
                status,
            };
            commands::edit::run(api_url.as_deref(), id, args).await
        }
        Commands::Status { id, status } => {
            commands::status::run(api_url.as_deref(), id, status).await
        }
        Commands::Delete { id, yes } => commands::delete::run(api_url.as_deref(), id, yes).await,
        Commands::Config { init } => commands::config::run(init),
    }
}
