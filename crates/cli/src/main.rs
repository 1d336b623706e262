mod config_commands;
mod query_commands;

use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    spindle_config::{Severity, SpindleConfig},
    tracing::{info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "spindle", about = "Spindle: graph queries over REST resources", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file to load instead of searching the standard locations.
    #[arg(long, global = true, env = "SPINDLE_CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config value).
    #[arg(long, global = true, env = "SPINDLE_BACKEND_URL")]
    backend_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway (default when no subcommand is provided).
    Serve {
        /// Address to bind to (overrides config value).
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (overrides config value).
        #[arg(long)]
        port: Option<u16>,
    },
    /// Execute a single query or mutation and print the response.
    Query {
        /// GraphQL document.
        query: String,
        /// Variables as a JSON object.
        #[arg(long)]
        variables: Option<String>,
        /// Operation to run when the document holds several.
        #[arg(long)]
        operation: Option<String>,
    },
    /// Print the schema as SDL.
    Schema,
    /// Configuration inspection.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Load the config file (explicit or discovered) and apply CLI overrides.
fn load_config(cli: &Cli) -> anyhow::Result<SpindleConfig> {
    let mut config = match &cli.config {
        Some(path) => spindle_config::load_config(path)?,
        None => spindle_config::discover_and_load(),
    };
    if let Some(url) = &cli.backend_url {
        config.backend.base_url.clone_from(url);
    }
    if let Some(Commands::Serve { bind, port }) = &cli.command {
        if let Some(bind) = bind {
            config.server.bind.clone_from(bind);
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }
    Ok(config)
}

/// Refuse to run with a config that cannot work; log the warnings.
fn ensure_valid(config: &SpindleConfig) -> anyhow::Result<()> {
    let result = config.validate();
    for d in result
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
    {
        warn!(path = d.path, "{}", d.message);
    }
    result.into_result()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    let config = load_config(&cli)?;

    match cli.command {
        None | Some(Commands::Serve { .. }) => {
            ensure_valid(&config)?;
            info!(version = env!("CARGO_PKG_VERSION"), "spindle starting");
            spindle_gateway::start_gateway(&config).await
        },
        Some(Commands::Query {
            query,
            variables,
            operation,
        }) => {
            ensure_valid(&config)?;
            query_commands::run_query(&config, query, variables.as_deref(), operation).await
        },
        Some(Commands::Schema) => query_commands::print_schema(&config),
        Some(Commands::Config { action }) => {
            config_commands::handle_config(action, &config, cli.config.as_deref())
        },
    }
}
