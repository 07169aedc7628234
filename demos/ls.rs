//! Example: List files on a Kast server
//!
//! Usage:
//!   cargo run --example ls -- --host HOST --user USER --password PASSWORD [--path PATH] [--filter QUERY]

mod cli;

use cli::{ArgParser, credentials_from_parser, usage_and_exit};
use kastlib::Browser;

const USAGE: &str = "Usage: cargo run --example ls -- --host HOST --user USER --password PASSWORD [--path PATH] [--filter QUERY]";

#[tokio::main]
async fn main() {
    let mut parser = ArgParser::new(USAGE);
    let creds = credentials_from_parser(&mut parser, USAGE);
    let path = parser.take_value(&["--path"]).unwrap_or_default();
    let filter = parser.take_value(&["--filter"]);
    if !parser.remaining().is_empty() {
        usage_and_exit(USAGE);
    }

    let session = match creds.login().await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Login failed: {}", e);
            std::process::exit(1);
        }
    };

    let mut browser = Browser::new(session);
    if let Err(e) = browser.navigate_route(&path).await {
        eprintln!("Listing failed: {}", e);
        std::process::exit(1);
    }
    if let Some(query) = filter {
        browser.set_filter(&query);
    }

    println!("Listing: {}\n", browser.path());
    for entry in browser.visible() {
        let kind = if entry.is_directory() { "d" } else { "-" };
        let qr = if entry.qr_code().is_some() { " [qr]" } else { "" };
        println!("{} {}{}", kind, entry.name(), qr);
    }
}
