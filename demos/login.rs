//! Example: Login to a Kast server
//!
//! Usage:
//!   cargo run --example login -- --host HOST --user USER --password PASSWORD [--proxy PROXY]

mod cli;

use cli::{parse_credentials, usage_and_exit};
use tracing_subscriber::{EnvFilter, fmt};

const USAGE: &str =
    "Usage: cargo run --example login -- --host HOST --user USER --password PASSWORD [--proxy PROXY]";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kastlib=debug"));
    fmt().with_env_filter(filter).with_target(false).init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let creds = parse_credentials(USAGE);
    if !creds.positionals.is_empty() {
        usage_and_exit(USAGE);
    }

    println!("Logging in as: {}", creds.username);
    println!();

    match creds.login().await {
        Ok(session) => {
            println!("Login successful!");
            println!("  backend: {}", session.base_url());
            println!("  admin:   {}", session.is_admin());
        }
        Err(e) => {
            eprintln!("Login failed: {}", e);
            std::process::exit(1);
        }
    }
}
