//! `genova` — CLI client for the Genova tutoring platform.
//!
//! Logs in against a Genova server, keeps the session in a local
//! credential store, and exposes the marketplace over the same client
//! library the apps use. Expired access tokens refresh transparently.

mod commands;
mod config;

use clap::{Parser, Subcommand};

use genova_client::{CreateBooking, TutorQuery};

use config::CliConfig;

/// Genova CLI tool.
#[derive(Parser, Debug)]
#[command(name = "genova", about = "Genova CLI client")]
struct Cli {
    /// Path to client config file (default: ~/.genova/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show or set the server URL.
    Server {
        /// New server URL; omit to show the current one.
        url: Option<String>,
    },

    /// Login to the configured server.
    Login {
        /// Account email.
        #[arg(long)]
        email: Option<String>,
        /// Password (not recommended — use interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Logout — erase the stored session.
    Logout,

    /// Show the authenticated user's profile.
    Me,

    /// Search tutors.
    Tutors {
        /// Filter by subject (e.g. math).
        #[arg(long)]
        subject: Option<String>,
        /// Filter by level (e.g. secondary).
        #[arg(long)]
        level: Option<String>,
        /// Limit results.
        #[arg(long)]
        limit: Option<usize>,
        /// Offset for pagination.
        #[arg(long)]
        offset: Option<usize>,
    },

    /// List your bookings.
    Bookings,

    /// Book a session with a tutor.
    Book {
        /// Tutor ID.
        #[arg(long)]
        tutor: String,
        /// Subject of the session.
        #[arg(long)]
        subject: String,
        /// Start time, RFC 3339 (e.g. 2025-07-01T16:00:00Z).
        #[arg(long)]
        at: String,
        /// Duration in minutes.
        #[arg(long, default_value = "60")]
        minutes: u32,
    },

    /// Cancel a booking.
    Cancel {
        /// Booking ID.
        id: String,
    },

    /// Show wallet balance.
    Wallet {
        /// Include the transaction history.
        #[arg(long)]
        transactions: bool,
    },

    /// Check server and session status.
    Status,

    /// Show version.
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(CliConfig::default_path);
    let config = CliConfig::load(&config_path)?;
    let json_output = cli.output == "json";

    match cli.command {
        Commands::Server { url } => {
            match url {
                Some(url) => {
                    let mut config = config;
                    config.server = url.trim_end_matches('/').to_string();
                    config.save(&config_path)?;
                    println!("Server set to {}.", config.server);
                }
                None => {
                    println!(
                        "{}",
                        if config.server.is_empty() { "-" } else { &config.server }
                    );
                }
            }
        }

        Commands::Login { email, password } => {
            let email = email.unwrap_or_else(|| {
                eprint!("Email: ");
                let mut s = String::new();
                std::io::stdin().read_line(&mut s).unwrap();
                s.trim().to_string()
            });
            let password = password.unwrap_or_else(|| {
                rpassword::prompt_password("Password: ").unwrap_or_default()
            });
            commands::login::login(&email, &password, &config).await?;
        }

        Commands::Logout => {
            commands::login::logout(&config).await?;
        }

        Commands::Me => {
            commands::account::me(json_output, &config).await?;
        }

        Commands::Tutors {
            subject,
            level,
            limit,
            offset,
        } => {
            let query = TutorQuery {
                subject,
                level,
                limit,
                offset,
            };
            commands::marketplace::tutors(query, json_output, &config).await?;
        }

        Commands::Bookings => {
            commands::marketplace::bookings(json_output, &config).await?;
        }

        Commands::Book {
            tutor,
            subject,
            at,
            minutes,
        } => {
            let booking = CreateBooking {
                tutor_id: tutor,
                subject,
                scheduled_at: at,
                duration_minutes: minutes,
            };
            commands::marketplace::book(booking, &config).await?;
        }

        Commands::Cancel { id } => {
            commands::marketplace::cancel(&id, &config).await?;
        }

        Commands::Wallet { transactions } => {
            commands::account::wallet(transactions, json_output, &config).await?;
        }

        Commands::Status => {
            commands::account::status(&config).await?;
        }

        Commands::Version => {
            println!("genova cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
