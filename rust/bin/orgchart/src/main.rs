//! `orgchart`: org chart builder for the employee portal.
//!
//! Pulls the flat employee listing from the portal's directory API (or a
//! JSON dump), folds it into the reporting tree, and prints it. Can also
//! serve the same transform over HTTP.

mod commands;
mod config;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

/// Org chart CLI tool.
#[derive(Parser, Debug)]
#[command(name = "orgchart", about = "Org chart builder for the employee portal")]
struct Cli {
    /// Path to client config file (default: ~/.orgchart/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Placement policy file (TOML). Overrides the config's `policy` entry.
    #[arg(long = "policy", global = true)]
    policy: Option<String>,

    /// Output format.
    #[arg(long = "output", short = 'o', global = true, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage directory contexts.
    #[command(name = "context")]
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Switch the current context.
    #[command(name = "use")]
    Use {
        #[command(subcommand)]
        what: UseWhat,
    },

    /// Store a bearer token on the current context.
    Login {
        /// Token (not recommended, use interactive prompt).
        #[arg(long)]
        token: Option<String>,
    },

    /// Logout: clear token from current context.
    Logout,

    /// Build and print the org chart.
    Tree {
        /// Read employees from a JSON file instead of the directory.
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
        /// Only show this team and the path down to it.
        #[arg(long)]
        team: Option<String>,
    },

    /// Print headcount figures.
    Summary {
        /// Read employees from a JSON file instead of the directory.
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
    },

    /// Serve the org chart API over HTTP.
    Serve {
        /// Listen address.
        #[arg(long = "listen", default_value = "0.0.0.0:8080")]
        listen: String,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ContextAction {
    /// Create a new context.
    Create {
        /// Context name.
        name: String,
        /// Directory base URL.
        #[arg(long)]
        server: String,
        /// Employee listing path (default: /api/employees).
        #[arg(long)]
        employees_path: Option<String>,
    },
    /// List all contexts.
    List,
    /// Set properties on a context.
    Set {
        name: String,
        #[arg(long)]
        server: Option<String>,
        #[arg(long)]
        employees_path: Option<String>,
    },
    /// Delete a context.
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum UseWhat {
    /// Switch to a context.
    Context { name: String },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the chart.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);
    let policy_path = cli.policy.map(PathBuf::from);
    let json_output = cli.output == OutputFormat::Json;

    match cli.command {
        Commands::Context { action } => match action {
            ContextAction::Create {
                name,
                server,
                employees_path,
            } => {
                commands::context::create(&name, &server, employees_path.as_deref(), &config_path)?;
            }
            ContextAction::List => {
                commands::context::list(&config_path)?;
            }
            ContextAction::Set {
                name,
                server,
                employees_path,
            } => {
                commands::context::set(
                    &name,
                    server.as_deref(),
                    employees_path.as_deref(),
                    &config_path,
                )?;
            }
            ContextAction::Delete { name } => {
                commands::context::delete(&name, &config_path)?;
            }
        },

        Commands::Use { what } => match what {
            UseWhat::Context { name } => {
                commands::context::use_context(&name, &config_path)?;
            }
        },

        Commands::Login { token } => {
            let token = match token {
                Some(t) => t,
                None => rpassword::prompt_password("API token: ")?,
            };
            commands::login::login(&token, &config_path)?;
        }

        Commands::Logout => {
            commands::login::logout(&config_path)?;
        }

        Commands::Tree { file, team } => {
            let (employees, policy) = commands::chart::inputs(
                file.as_deref().map(Path::new),
                policy_path.as_deref(),
                &config_path,
            )?;
            commands::chart::tree(&employees, team.as_deref(), json_output, &policy)?;
        }

        Commands::Summary { file } => {
            let (employees, policy) = commands::chart::inputs(
                file.as_deref().map(Path::new),
                policy_path.as_deref(),
                &config_path,
            )?;
            commands::chart::summary(&employees, json_output, &policy)?;
        }

        Commands::Serve { listen } => {
            let policy = config::ClientConfig::load(&config_path)?
                .resolve_policy(policy_path.as_deref())?;
            commands::serve::serve(&listen, policy)?;
        }

        Commands::Version => {
            println!("orgchart cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
