//! LineKV - A Small In-Memory Key-Value Server
//!
//! This is the main entry point for the LineKV server.
//! It sets up logging, the storage engine and the TCP listener, then accepts
//! connections until interrupted.

use anyhow::Context;
use linekv::connection::ConnectionStats;
use linekv::storage::StorageEngine;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Server configuration
struct Config {
    /// Host to bind to
    host: String,
    /// Port to listen on
    port: u16,
    /// Default log filter, used when `RUST_LOG` is unset
    log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: linekv::DEFAULT_HOST.to_string(),
            port: linekv::DEFAULT_PORT,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> Self {
        let mut config = Config::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    config.host = flag_value(&args, i, "--host").to_string();
                    i += 2;
                }
                "--port" | "-p" => {
                    config.port = flag_value(&args, i, "--port").parse().unwrap_or_else(|_| {
                        eprintln!("Error: invalid port number");
                        std::process::exit(1);
                    });
                    i += 2;
                }
                "--log-level" | "-l" => {
                    config.log_level = flag_value(&args, i, "--log-level").to_string();
                    i += 2;
                }
                "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("LineKV version {}", linekv::VERSION);
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                    print_help();
                    std::process::exit(1);
                }
            }
        }

        config
    }

    /// Returns the bind address as a string
    fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Returns the argument following the flag at `i`, or exits if there is none.
fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i + 1) {
        Some(value) => value,
        None => {
            eprintln!("Error: {} requires a value", flag);
            std::process::exit(1);
        }
    }
}

fn print_help() {
    println!(
        r#"
LineKV - A Small In-Memory Key-Value Server

USAGE:
    linekv [OPTIONS]

OPTIONS:
    -h, --host <HOST>        Host to bind to (default: 127.0.0.1)
    -p, --port <PORT>        Port to listen on (default: 6378)
    -l, --log-level <LEVEL>  Log filter when RUST_LOG is unset (default: info)
    -v, --version            Print version information
        --help               Print this help message

EXAMPLES:
    linekv                        # Start on 127.0.0.1:6378
    linekv --port 7000            # Start on port 7000
    linekv --log-level debug      # Log every received command

CONNECTING:
    $ linekv-cli
    Enter command (e.g., GET key or SET key value): SET name Alice
    Server response: OK
    Enter command (e.g., GET key or SET key value): GET name
    Server response: Alice
"#
    );
}

fn print_banner(config: &Config) {
    println!(
        r#"
LineKV v{} - In-Memory Key-Value Server
───────────────────────────────────────
Server listening on {}
Ready to accept connections.

Use Ctrl+C to stop.
"#,
        linekv::VERSION,
        config.bind_address()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_args();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("invalid log level '{}'", config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Shared across all connections for the lifetime of the process
    let storage = Arc::new(StorageEngine::new());
    let stats = Arc::new(ConnectionStats::new());

    let listener = match TcpListener::bind(config.bind_address()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(address = %config.bind_address(), error = %e, "Failed to bind");
            return Err(e)
                .with_context(|| format!("failed to bind to {}", config.bind_address()));
        }
    };

    print_banner(&config);
    info!("Listening on {}", config.bind_address());

    // Without a signal handler the server simply runs until killed
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received, stopping server...");
    };

    tokio::select! {
        _ = linekv::server::run(listener, Arc::clone(&storage), Arc::clone(&stats)) => {}
        _ = shutdown => {}
    }

    let storage_stats = storage.stats();
    info!(
        connections = stats.connections_accepted.load(Ordering::Relaxed),
        commands = stats.commands_processed.load(Ordering::Relaxed),
        command_errors = stats.command_errors.load(Ordering::Relaxed),
        keys = storage_stats.keys,
        gets = storage_stats.get_ops,
        sets = storage_stats.set_ops,
        "Server shutdown complete"
    );
    Ok(())
}
