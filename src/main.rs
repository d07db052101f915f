//! cpulog query tool
//!
//! Indexes every day file under a log root, then answers QUERY commands
//! from stdin until EXIT.

use clap::Parser;
use cpulog::storage::{discover_log_files, Zone};
use cpulog::{Config, QueryExecutor, Shell, UsageIndex};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cpulog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive CPU usage query tool")]
struct Args {
    /// Root of the <year>/<month>/<day>.txt log tree
    root: Option<PathBuf>,

    /// Config file (default: standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interpret dates and print times in UTC instead of local time
    #[arg(long)]
    utc: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    cpulog::logging::init(&config.logging);

    let root = match args.root.or_else(|| config.data.root_path()) {
        Some(root) => root,
        None => {
            eprintln!("Please provide a data path");
            std::process::exit(1);
        }
    };
    let zone = if args.utc { Zone::Utc } else { config.time.zone };

    println!("Initializing query tool...");
    tracing::info!("Indexing logs under {:?}", root);

    let files = discover_log_files(&root);
    let index = UsageIndex::build(&files);
    tracing::info!("Index ready: {}", index.stats());

    let shell = Shell::new(QueryExecutor::new(&index, zone));
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell.run(stdin.lock(), &mut stdout)?;

    Ok(())
}
