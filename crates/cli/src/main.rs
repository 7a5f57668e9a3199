//! listq CLI - Inspect and drive Redis-backed queues
//!
//! Connection settings come from REDIS_URL / QUEUE_REDIS_TIMEOUT unless
//! overridden on the command line.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use config::{Config, Environment};
use tabled::{Table, Tabled};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use listq_core::application::{QueueAdmin, ReadMode};
use listq_core::domain::QueueName;
use listq_core::port::ListStore;
use listq_infra_redis::{is_wrong_type, RedisQueues, RedisSettings, REDIS_URL_KEY, TIMEOUT_KEY};

const DEFAULT_LOG_FILTER: &str = "listq=info,listq_core=warn,listq_infra_redis=warn";

#[derive(Parser)]
#[command(name = "listq")]
#[command(about = "Redis list-backed queue CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Connection URL (overrides REDIS_URL)
    #[arg(long, global = true)]
    redis_url: Option<String>,

    /// Connection/response timeout in seconds (overrides QUEUE_REDIS_TIMEOUT)
    #[arg(long = "connect-timeout", global = true)]
    connect_timeout: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Append a value to a queue
    Write {
        queue: String,
        value: String,
    },

    /// Pop a value from a queue
    Read {
        queue: String,

        /// Wait for a value instead of failing on an empty queue
        #[arg(short, long)]
        block: bool,

        /// Seconds to wait when blocking (rounded up; omit to wait forever)
        #[arg(short, long, requires = "block")]
        timeout: Option<f64>,
    },

    /// Show the number of values in a queue
    Len {
        queue: String,
    },

    /// Delete a queue and everything in it
    Delete {
        queue: String,
    },

    /// List keys in the store (the whole keyspace by default)
    List {
        /// Glob pattern to filter names
        #[arg(short, long, default_value = "*")]
        pattern: String,
    },

    /// Provision a queue (no-op for list stores)
    Create {
        queue: String,
    },

    /// Print the resolved connection settings
    Config,
}

#[derive(Tabled)]
struct QueueRow {
    name: String,
    length: String,
}

fn init_logging() {
    let log_format = std::env::var("LISTQ_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Logs go to stderr so queue values on stdout stay pipeable
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load_settings(cli: &Cli) -> Result<RedisSettings> {
    let config = Config::builder()
        .add_source(Environment::default())
        .set_override_option(REDIS_URL_KEY, cli.redis_url.clone())?
        .set_override_option(TIMEOUT_KEY, cli.connect_timeout.map(|t| t.to_string()))?
        .build()
        .context("Failed to read settings")?;

    Ok(RedisSettings::from_config(&config)?)
}

/// Raw bytes so binary payloads survive piping
fn write_value(out: &mut impl Write, value: &[u8]) -> std::io::Result<()> {
    out.write_all(value)?;
    out.write_all(b"\n")?;
    out.flush()
}

async fn connect(queues: &RedisQueues) -> Result<Arc<dyn ListStore>> {
    queues
        .connect()
        .await
        .with_context(|| format!("Failed to connect to {}", queues.config().redacted_url()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    let queues = RedisQueues::from_settings(&settings)?;

    match cli.command {
        Commands::Write { queue, value } => {
            let store = connect(&queues).await?;
            let queue = queues.open_with(&queue, store)?;
            if queue.write(value.as_bytes()).await? {
                println!("{}", format!("✓ Written to {}", queue).green().bold());
            } else {
                anyhow::bail!("Store did not acknowledge write to {}", queue);
            }
        }

        Commands::Read {
            queue,
            block,
            timeout,
        } => {
            let store = connect(&queues).await?;
            let queue = queues.open_with(&queue, store)?;
            let mode = ReadMode::from_flags(block, timeout);
            debug!(queue = %queue.name(), mode = ?mode, "Reading");

            let value = queue.read_required(mode).await?;
            write_value(&mut std::io::stdout().lock(), &value)?;
        }

        Commands::Len { queue } => {
            let store = connect(&queues).await?;
            let queue = queues.open_with(&queue, store)?;
            println!("{}", queue.len().await?);
        }

        Commands::Delete { queue } => {
            let store = connect(&queues).await?;
            let admin = QueueAdmin::new(Arc::clone(&store));
            let name = QueueName::new(queue)?;
            if admin.delete_queue(&name).await? {
                println!("{}", format!("✓ Queue {} deleted", name).green().bold());
            } else {
                println!("{}", format!("Queue {} does not exist", name).yellow());
            }
        }

        Commands::List { pattern } => {
            let store = connect(&queues).await?;
            let admin = QueueAdmin::new(Arc::clone(&store));
            let names = admin.list_queue_names_matching(&pattern).await?;

            if names.is_empty() {
                println!("{}", "No queues found".yellow());
                return Ok(());
            }

            let mut rows = Vec::with_capacity(names.len());
            for name in names {
                let queue = queues.open_with(&name, Arc::clone(&store))?;
                // Non-list keys answer LLEN with WRONGTYPE
                let length = match queue.len().await {
                    Ok(len) => len.to_string(),
                    Err(e) if is_wrong_type(&e) => "-".to_string(),
                    Err(e) => {
                        return Err(e).with_context(|| format!("Failed to read length of {}", name))
                    }
                };
                rows.push(QueueRow { name, length });
            }

            println!("{}", Table::new(rows));
        }

        Commands::Create { queue } => {
            queues
                .create_queue(&queue)
                .await
                .with_context(|| format!("Failed to create queue {}", queue))?;
            println!("{}", format!("✓ Queue {} ready", queue).green().bold());
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(queues.config())?);
        }
    }

    Ok(())
}
