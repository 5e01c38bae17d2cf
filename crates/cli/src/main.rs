//! Userhub CLI - command-line frontend for the profile service.
//!
//! # Usage
//!
//! ```bash
//! # Register a profile
//! userhub register -e a@b.com -p hunter22 -n "Asha" --dob 31-01-2000 \
//!     --phone 9876543210 --address "12 Park St 560001"
//!
//! # Log in (caches the session locally)
//! userhub login -e a@b.com -p hunter22
//!
//! # Show the logged-in profile
//! userhub show
//!
//! # Update fields (current password required by the service)
//! userhub update -p hunter22 --name "Asha R"
//!
//! # Clear the cached session
//! userhub logout
//! ```
//!
//! # Environment Variables
//!
//! - `USERHUB_API_BASE` - Base URL of the profile service (required)
//! - `USERHUB_SESSION_FILE` - Session cache path (optional)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};

use userhub_client::{ClientConfig, ProfileClient};

mod commands;

#[derive(Parser)]
#[command(name = "userhub")]
#[command(author, version, about = "Command-line frontend for the profile service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Editable profile fields shared by `register` and `update`.
#[derive(Args)]
struct ProfileFields {
    /// Display name
    #[arg(short, long)]
    name: Option<String>,

    /// Date of birth (yyyy-MM-dd, dd-MM-yyyy, dd/MM/yyyy, or dd MM yyyy)
    #[arg(long)]
    dob: Option<String>,

    /// Sex
    #[arg(long)]
    sex: Option<String>,

    /// Phone number (repeat the flag for several)
    #[arg(long = "phone", value_name = "PHONE")]
    phones: Vec<String>,

    /// Address row; both "12 Park St<|PIN|>560001" and the legacy
    /// "12 Park St 560001" form are accepted (repeat for several)
    #[arg(long = "address", value_name = "ADDRESS")]
    addresses: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new profile
    Register {
        /// Login email
        #[arg(short, long)]
        email: String,

        /// Login password
        #[arg(short, long)]
        password: String,

        #[command(flatten)]
        fields: ProfileFields,
    },
    /// Log in and cache the session
    Login {
        /// Login email
        #[arg(short, long)]
        email: String,

        /// Login password
        #[arg(short, long)]
        password: String,
    },
    /// Show a profile (defaults to the logged-in one)
    Show {
        /// Profile id to fetch instead of the cached session's
        #[arg(long)]
        id: Option<i64>,
    },
    /// Update the logged-in profile
    Update {
        /// Current password (the service requires it on every update)
        #[arg(short, long)]
        password: String,

        #[command(flatten)]
        fields: ProfileFields,
    },
    /// Check a password against the logged-in profile
    VerifyPassword {
        /// Password to check
        #[arg(short, long)]
        password: String,
    },
    /// Print the cached session
    Whoami,
    /// Clear the cached session
    Logout,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let client = ProfileClient::new(&config)?;

    match cli.command {
        Commands::Register {
            email,
            password,
            fields,
        } => {
            commands::auth::register(&client, &email, &password, fields.into()).await?;
        }
        Commands::Login { email, password } => {
            commands::auth::login(&client, &email, &password).await?;
        }
        Commands::Show { id } => commands::profile::show(&client, id).await?,
        Commands::Update { password, fields } => {
            commands::profile::update(&client, &password, fields.into()).await?;
        }
        Commands::VerifyPassword { password } => {
            commands::profile::verify_password(&client, &password).await?;
        }
        Commands::Whoami => commands::auth::whoami(&client),
        Commands::Logout => commands::auth::logout(&client)?,
    }
    Ok(())
}

impl From<ProfileFields> for commands::FieldInput {
    fn from(fields: ProfileFields) -> Self {
        Self {
            name: fields.name,
            dob: fields.dob,
            sex: fields.sex,
            phones: fields.phones,
            addresses: fields.addresses,
        }
    }
}
