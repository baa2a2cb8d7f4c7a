use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use tagdegree::{
    run_clean, run_degree, CleanFormat, InputFormat, ProcessorConfig, RunOptions, Timestamp,
    DEFAULT_WINDOW,
};

/// Rolling average degree of a hashtag co-occurrence graph
#[derive(Parser, Debug)]
#[command(name = "tagdegree")]
#[command(about = "Rolling average degree of a hashtag graph", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the average degree after every accepted record
    Degree {
        /// Read from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Input record format
        #[arg(short, long, value_enum, default_value_t = InputFormat::Text)]
        format: InputFormat,

        /// Trailing window, in seconds
        #[arg(short, long, default_value_t = DEFAULT_WINDOW)]
        window: Timestamp,

        /// Decimal places per output line
        #[arg(long, default_value_t = 2)]
        precision: usize,

        /// Print final graph statistics as JSON to stderr
        #[arg(long)]
        stats: bool,
    },
    /// Filter raw tweets into graph records
    Clean {
        /// Read from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output record format
        #[arg(short, long, value_enum, default_value_t = CleanFormat::Text)]
        format: CleanFormat,
    },
}

fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("cannot open {:?}", path))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // stdout carries data only
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting tagdegree v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Degree {
            input,
            format,
            window,
            precision,
            stats,
        } => {
            let options = RunOptions {
                format,
                config: ProcessorConfig::with_window(window),
                precision,
            };
            let summary = run_degree(open_input(input.as_deref())?, io::stdout().lock(), &options)?;
            if stats {
                eprintln!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }
        Command::Clean { input, format } => {
            let summary = run_clean(open_input(input.as_deref())?, io::stdout().lock(), format)?;
            info!(
                "Cleaned {} records, dropped {}, {} distinct hashtags",
                summary.records, summary.dropped, summary.tags
            );
        }
    }

    Ok(())
}
