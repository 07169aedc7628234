//! Example: Manage user accounts on a Kast server
//!
//! Usage:
//!   cargo run --example users -- --host HOST --user USER --password PASSWORD [--search QUERY]
//!   cargo run --example users -- ... add USERNAME PASSWORD [admin]
//!   cargo run --example users -- ... delete USERNAME

mod cli;

use cli::{ArgParser, credentials_from_parser, usage_and_exit};
use kastlib::{Role, admin::filter_users};

const USAGE: &str = "Usage: cargo run --example users -- --host HOST --user USER --password PASSWORD [--search QUERY] [add USERNAME PASSWORD [admin] | delete USERNAME]";

#[tokio::main]
async fn main() {
    let mut parser = ArgParser::new(USAGE);
    let creds = credentials_from_parser(&mut parser, USAGE);
    let search = parser.take_value(&["--search"]).unwrap_or_default();
    let positionals = parser.remaining();

    let session = match creds.login().await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Login failed: {}", e);
            std::process::exit(1);
        }
    };

    match positionals.first().map(String::as_str) {
        Some("add") => {
            let (username, password, role) = match positionals.as_slice() {
                [_, username, password] => (username, password, Role::User),
                [_, username, password, role] if role == "admin" => {
                    (username, password, Role::Admin)
                }
                _ => usage_and_exit(USAGE),
            };
            if let Err(e) = session.create_user(username, password, role).await {
                eprintln!("Add user failed: {}", e);
                std::process::exit(1);
            }
            println!("Added {} ({})", username, role.as_str());
        }
        Some("delete") => {
            let [_, username] = positionals.as_slice() else {
                usage_and_exit(USAGE);
            };
            if let Err(e) = session.delete_user(username).await {
                eprintln!("Delete user failed: {}", e);
                std::process::exit(1);
            }
            println!("Deleted {}", username);
        }
        Some(_) => usage_and_exit(USAGE),
        None => {
            let users = match session.list_users().await {
                Ok(users) => users,
                Err(e) => {
                    eprintln!("Listing users failed: {}", e);
                    std::process::exit(1);
                }
            };
            for user in filter_users(&users, &search) {
                println!("{:<24} {}", user.username, user.role.as_str());
            }
        }
    }
}
