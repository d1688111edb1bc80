use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod console;
mod setup;

const LOG_ENV: &str = "QUIZZIFY_LOG";

#[derive(Parser)]
#[command(name = "quizzify")]
#[command(about = "Quizzify CLI - log in, browse and take tests", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend host, e.g. localhost:8080 (overrides config and environment)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Session token to use for this run instead of the saved one (nothing is written to disk)
    #[arg(long, global = true, env = "QUIZZIFY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Keep the session in memory only; `login` prints the token instead of saving it
    #[arg(long, global = true)]
    no_persist: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session token
    Login {
        #[arg(long)]
        login: String,
        #[arg(long, env = "QUIZZIFY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a new account
    Register {
        #[arg(long)]
        login: String,
        #[arg(long, env = "QUIZZIFY_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        email: String,
    },
    /// Forget the session token
    Logout,
    /// Show the profile of the logged in user
    Whoami,
    /// Manage accounts
    Accounts {
        #[command(subcommand)]
        action: AccountsAction,
    },
    /// Browse, create and take tests
    Tests {
        #[command(subcommand)]
        action: TestsAction,
    },
    /// List submitted results
    Results,
    /// Show or edit config.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Save settings to the config file
    Set {
        #[arg(long)]
        backend_host: Option<String>,
        #[arg(long)]
        scheme: Option<String>,
        #[arg(long)]
        app_id: Option<i64>,
    },
}

#[derive(Subcommand)]
enum AccountsAction {
    /// List all accounts
    List,
    /// Delete an account by id
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum TestsAction {
    /// List tests
    List {
        /// Include correct answers
        #[arg(long)]
        with_answers: bool,
    },
    /// Show one test
    Show { id: String },
    /// Delete a test
    Delete { id: String },
    /// Create a test from a JSON file or just a title
    Create {
        #[arg(long, conflicts_with = "title")]
        file: Option<PathBuf>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Submit answers for a test
    Apply {
        id: String,
        /// JSON array of answers, or @path to a file containing one
        #[arg(long)]
        answers: String,
    },
}

fn run_config(config_path: Option<&Path>, host: Option<&str>, action: ConfigAction) -> Result<()> {
    let paths = setup::resolve_paths(config_path)?;
    let file = setup::config_file(config_path, &paths);
    match action {
        ConfigAction::Show => {
            let config = setup::load_config(config_path, &paths, host)?;
            commands::config::show(&config, &file);
        }
        ConfigAction::Set {
            backend_host,
            scheme,
            app_id,
        } => {
            let changes = commands::config::ConfigChanges {
                backend_host,
                scheme,
                app_id,
            };
            commands::config::set(&file, changes)?;
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let command = match cli.command {
        Commands::Config { action } => {
            return run_config(cli.config.as_deref(), cli.host.as_deref(), action);
        }
        command => command,
    };

    let source = setup::TokenSource::from_flags(cli.token, cli.no_persist);
    let ephemeral = source.is_ephemeral();
    let store = setup::build_store(cli.config.as_deref(), cli.host.as_deref(), source)?;

    match command {
        Commands::Login { login, password } => {
            commands::auth::login(&store, &login, &password, ephemeral).await?
        }
        Commands::Register {
            login,
            password,
            email,
        } => commands::auth::register(&store, &login, &password, &email).await?,
        Commands::Logout => commands::auth::logout(&store),
        Commands::Whoami => commands::auth::whoami(&store).await?,
        Commands::Accounts { action } => match action {
            AccountsAction::List => commands::auth::list_accounts(&store).await?,
            AccountsAction::Delete { id } => commands::auth::delete_account(&store, id).await?,
        },
        Commands::Tests { action } => match action {
            TestsAction::List { with_answers } => commands::tests::list(&store, with_answers).await?,
            TestsAction::Show { id } => commands::tests::show(&store, &id).await?,
            TestsAction::Delete { id } => commands::tests::delete(&store, &id).await?,
            TestsAction::Create { file, title } => {
                commands::tests::create(&store, file.as_deref(), title.as_deref()).await?
            }
            TestsAction::Apply { id, answers } => commands::tests::apply(&store, &id, &answers).await?,
        },
        Commands::Results => commands::tests::results(&store).await?,
        Commands::Config { action } => run_config(cli.config.as_deref(), cli.host.as_deref(), action)?,
    }

    Ok(())
}
