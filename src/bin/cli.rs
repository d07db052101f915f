//! cpulog CLI
//!
//! Non-interactive companion to the query tool:
//! - Generate synthetic day files
//! - Run a single query
//! - Show index statistics
//! - Print the default config

use clap::{Parser, Subcommand, ValueEnum};
use cpulog::generator::LogGenerator;
use cpulog::query::{parse_date, parse_query_args, QueryExecutor};
use cpulog::storage::{discover_log_files, Zone};
use cpulog::{Config, UsageIndex};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cpulog-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate, index and query CPU usage logs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Interpret dates and print times in UTC instead of local time
    #[arg(long, global = true)]
    pub utc: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write one day of synthetic samples
    Generate {
        /// Log root directory
        root: PathBuf,
        /// Day to generate (YYYY-MM-DD)
        date: String,
        /// Number of servers (overrides config)
        #[arg(long)]
        servers: Option<usize>,
        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Index a log root and run one query
    Query {
        /// Log root directory
        root: PathBuf,
        /// Server IP
        server_ip: String,
        /// CPU id
        cpu_id: String,
        /// Start date (YYYY-MM-DD)
        start_date: String,
        /// Start time (HH:MM)
        start_time: String,
        /// End date (YYYY-MM-DD)
        end_date: String,
        /// End time (HH:MM)
        end_time: String,
    },

    /// Index a log root and print statistics
    Stats {
        /// Log root directory
        root: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    cpulog::logging::init(&config.logging);
    let zone = if cli.utc { Zone::Utc } else { config.time.zone };

    match cli.command {
        Commands::Generate {
            root,
            date,
            servers,
            seed,
        } => {
            let date = parse_date(&date)?;

            let mut generator_config = config.generator.clone();
            if let Some(servers) = servers {
                generator_config.servers = servers;
            }

            let mut generator = LogGenerator::new(&generator_config);
            if let Some(seed) = seed {
                generator = generator.with_seed(seed);
            }

            let path = generator.generate_day(&root, date, zone)?;
            println!("Generated {:?}", path);
        }

        Commands::Query {
            root,
            server_ip,
            cpu_id,
            start_date,
            start_time,
            end_date,
            end_time,
        } => {
            let query = parse_query_args(&[
                server_ip.as_str(),
                cpu_id.as_str(),
                start_date.as_str(),
                start_time.as_str(),
                end_date.as_str(),
                end_time.as_str(),
            ])?;

            let index = UsageIndex::build(discover_log_files(&root));
            tracing::info!("Index ready: {}", index.stats());

            let output = QueryExecutor::new(&index, zone).execute(&query)?;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
                OutputFormat::Text => println!("{}", output),
            }
        }

        Commands::Stats { root } => {
            let index = UsageIndex::build(discover_log_files(&root));
            let stats = index.stats();

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(stats)?),
                OutputFormat::Text => {
                    println!("Keys:          {}", stats.keys);
                    println!("Samples:       {}", stats.samples);
                    println!("Files indexed: {}", stats.files_indexed);
                    println!("Files skipped: {}", stats.files_skipped);
                    println!("Lines skipped: {}", stats.lines_skipped);
                }
            }
        }

        Commands::Config { output } => {
            let config = cpulog::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}
