//! Example: Inspect and edit a folder's group permissions
//!
//! Usage:
//!   cargo run --example permissions -- --host HOST --user USER --password PASSWORD --path PATH \
//!       [--add GROUP] [--remove GROUP] [--save]
//!
//! Without edit flags the current and addable groups are printed. Note the
//! commit discipline: --remove applies immediately, --add only reaches the
//! server together with --save.

mod cli;

use cli::{ArgParser, credentials_from_parser, usage_and_exit};
use kastlib::{PermissionEditor, RemotePath};

const USAGE: &str = "Usage: cargo run --example permissions -- --host HOST --user USER --password PASSWORD --path PATH [--add GROUP] [--remove GROUP] [--save]";

#[tokio::main]
async fn main() {
    let mut parser = ArgParser::new(USAGE);
    let creds = credentials_from_parser(&mut parser, USAGE);
    let path = parser
        .take_value(&["--path"])
        .unwrap_or_else(|| usage_and_exit(USAGE));
    let add = parser.take_value(&["--add"]);
    let remove = parser.take_value(&["--remove"]);
    let save = parser.take_flag(&["--save"]);
    if !parser.remaining().is_empty() {
        usage_and_exit(USAGE);
    }

    let mut session = match creds.login().await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Login failed: {}", e);
            std::process::exit(1);
        }
    };
    if !session.is_admin() {
        eprintln!("Permission editing requires an admin session");
        std::process::exit(1);
    }

    let folder = RemotePath::from_route_tail(&path);
    let mut editor = PermissionEditor::new();
    if let Err(e) = editor.open(&session, folder.clone()).await {
        eprintln!("Failed to load permissions for {}: {}", folder, e);
        std::process::exit(1);
    }

    if let Some(group) = remove {
        match editor.remove_group(&session, &group).await {
            Ok(()) => println!("Removed {} (applied immediately)", group),
            Err(e) => {
                eprintln!("Remove failed: {}", e);
                std::process::exit(1);
            }
        }
    }
    if let Some(group) = add {
        if let Err(e) = editor.add_group(&group) {
            eprintln!("Add failed: {}", e);
            std::process::exit(1);
        }
        println!("Staged {} (saved only with --save)", group);
    }

    let catalog = match session.group_catalog().await {
        Ok(catalog) => catalog.clone(),
        Err(e) => {
            eprintln!("Failed to fetch group catalog: {}", e);
            std::process::exit(1);
        }
    };

    println!("\nPermissions for {}:", folder);
    if let Some(groups) = editor.groups() {
        for group in groups {
            println!("  {}", group);
        }
    }
    println!("Addable:");
    for group in editor.addable_groups(&catalog) {
        println!("  {}", group);
    }

    if save {
        match editor.save(&session).await {
            Ok(()) => println!("\nSaved."),
            Err(e) => {
                eprintln!("Save failed: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        editor.cancel();
    }
}
