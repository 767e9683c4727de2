use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use log::warn;
use tokio_util::sync::CancellationToken;

use ping_sweep::{report, NetworkRange, PingClient, PingClientConfigBuilder, Sweeper};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SEPARATOR_WIDTH: usize = 50;

/// Discover active hosts in an IPv4 network range.
#[derive(Parser, Debug)]
#[command(name = "ping-sweep", version, about, long_about = None)]
struct Args {
    /// Network range in CIDR notation (e.g., 192.168.1.0/24)
    network: NetworkRange,

    /// Number of concurrent probes
    #[arg(short = 't', long = "threads", default_value_t = 50)]
    threads: usize,

    /// Output file for results
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Time to wait for an echo reply, in milliseconds
    #[arg(long, default_value_t = 1000)]
    reply_timeout_ms: u64,

    /// Hard cap on a single probe, in milliseconds
    #[arg(long, default_value_t = 2000)]
    probe_timeout_ms: u64,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn setup_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(&args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[ERROR] {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> ping_sweep::Result<()> {
    let client = Arc::new(PingClient::new(
        PingClientConfigBuilder::new()
            .with_reply_timeout(Duration::from_millis(args.reply_timeout_ms))
            .with_probe_timeout(Duration::from_millis(args.probe_timeout_ms))
            .build(),
    ));

    let cancellation = CancellationToken::new();
    let sweeper = Sweeper::new(client)
        .with_concurrency(args.threads)
        .with_cancellation(cancellation.clone())
        .on_host_up(|host| println!("[+] {host} is UP"));

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("[!] Interrupted, draining in-flight probes...");
            cancellation.cancel();
        }
    });

    println!("[*] Starting ping sweep on {}", args.network);
    println!("[*] Scanning {} addresses...", args.network.host_count());
    println!("[*] Start time: {}", Local::now().format(TIMESTAMP_FORMAT));
    println!("{}", "-".repeat(SEPARATOR_WIDTH));

    let outcome = sweeper.sweep(args.network).await?;

    println!("{}", "-".repeat(SEPARATOR_WIDTH));
    println!("[*] Scan complete: {} host(s) found", outcome.active_count());
    println!("[*] End time: {}", outcome.finished_at.format(TIMESTAMP_FORMAT));

    if let Some(path) = &args.output {
        match report::save(path, &outcome) {
            Ok(true) => println!("[*] Results saved to {}", path.display()),
            Ok(false) => {}
            // The hosts are already reported on the console; a failed
            // write only loses the file copy.
            Err(err) => warn!("{err}"),
        }
    }

    Ok(())
}
