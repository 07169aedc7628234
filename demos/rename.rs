//! Example: Rename a file or folder on a Kast server
//!
//! Usage:
//!   cargo run --example rename -- --host HOST --user USER --password PASSWORD [--path PATH] NAME NEW_NAME

mod cli;

use cli::{ArgParser, credentials_from_parser, usage_and_exit};
use kastlib::Browser;

const USAGE: &str = "Usage: cargo run --example rename -- --host HOST --user USER --password PASSWORD [--path PATH] NAME NEW_NAME";

#[tokio::main]
async fn main() {
    let mut parser = ArgParser::new(USAGE);
    let creds = credentials_from_parser(&mut parser, USAGE);
    let path = parser.take_value(&["--path"]).unwrap_or_default();
    let positionals = parser.remaining();
    let [name, new_name] = positionals.as_slice() else {
        usage_and_exit(USAGE);
    };

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

    match browser.rename_entry(name, new_name).await {
        Ok(()) => println!("Renamed {} to {}", name, new_name),
        Err(e) => {
            eprintln!("Rename failed: {}", e);
            std::process::exit(1);
        }
    }
}
