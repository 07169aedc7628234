//! Example: Upload a local file to a Kast server
//!
//! Usage:
//!   cargo run --example upload -- --host HOST --user USER --password PASSWORD [--path PATH] LOCAL_FILE

mod cli;

use cli::{ArgParser, credentials_from_parser, usage_and_exit};
use kastlib::Browser;

const USAGE: &str = "Usage: cargo run --example upload -- --host HOST --user USER --password PASSWORD [--path PATH] LOCAL_FILE";

#[tokio::main]
async fn main() {
    let mut parser = ArgParser::new(USAGE);
    let creds = credentials_from_parser(&mut parser, USAGE);
    let path = parser.take_value(&["--path"]).unwrap_or_default();
    let mut positionals = parser.remaining();
    if positionals.len() != 1 {
        usage_and_exit(USAGE);
    }
    let local = positionals.remove(0);

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

    println!("Uploading {} to {}...", local, browser.path());
    match browser.upload_file(&local).await {
        Ok(()) => println!(
            "Done; directory now holds {} entries",
            browser.entries().len()
        ),
        Err(e) => {
            eprintln!("Upload failed: {}", e);
            std::process::exit(1);
        }
    }
}
