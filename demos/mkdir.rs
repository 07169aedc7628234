//! Example: Create a folder on a Kast server
//!
//! Usage:
//!   cargo run --example mkdir -- --host HOST --user USER --password PASSWORD [--path PATH] [--groups G1,G2] NAME

mod cli;

use std::collections::BTreeSet;

use cli::{ArgParser, credentials_from_parser, usage_and_exit};
use kastlib::Browser;

const USAGE: &str = "Usage: cargo run --example mkdir -- --host HOST --user USER --password PASSWORD [--path PATH] [--groups G1,G2] NAME";

#[tokio::main]
async fn main() {
    let mut parser = ArgParser::new(USAGE);
    let creds = credentials_from_parser(&mut parser, USAGE);
    let path = parser.take_value(&["--path"]).unwrap_or_default();
    let groups: Option<BTreeSet<String>> = parser.take_value(&["--groups"]).map(|list| {
        list.split(',')
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect()
    });
    let mut positionals = parser.remaining();
    if positionals.len() != 1 {
        usage_and_exit(USAGE);
    }
    let name = positionals.remove(0);

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

    match browser.create_folder(&name, groups.as_ref()).await {
        Ok(()) => println!("Created {}/{}", browser.path(), name),
        Err(e) => {
            eprintln!("Create folder failed: {}", e);
            std::process::exit(1);
        }
    }
}
