//! # kastlib
//!
//! Rust client library for Kast file-sharing servers.
//!
//! ## Features
//!
//! - **Authentication**: cookie-based login with an explicit session
//!   lifecycle (login, check-auth, client-side logout) and HTTP proxy
//!   support.
//! - **Browsing**: path-based navigation mirroring the server's route
//!   scheme, with case-insensitive substring filtering of the current
//!   listing and stale-response protection on rapid path changes.
//! - **Mutations**: delete, rename, folder creation and single-request
//!   multipart upload, each followed by an unconditional listing refresh
//!   so the view tracks best-effort server state.
//! - **Viewing**: entries open by extension classification — images
//!   inline, everything else externally — with ready-made QR share
//!   images surfaced from the listing.
//! - **Admin**: user account CRUD, the system-wide group catalog, and a
//!   per-folder permission editor.
//!
//! ## Example: Browsing
//!
//! ```no_run
//! use kastlib::{Browser, Config, Session};
//!
//! # async fn example() -> kastlib::Result<()> {
//! let config = Config::new("https://files.example.com");
//! let session = Session::login(&config, "jan", "password").await?;
//!
//! let mut browser = Browser::new(session);
//! browser.refresh().await?;
//! for entry in browser.entries() {
//!     println!("{} {}", if entry.is_directory() { "d" } else { "-" }, entry.name());
//! }
//!
//! browser.descend("Docs").await?;
//! browser.upload_file("report.pdf").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Editing folder permissions
//!
//! ```no_run
//! use kastlib::{Config, PermissionEditor, RemotePath, Session};
//!
//! # async fn example() -> kastlib::Result<()> {
//! let config = Config::new("https://files.example.com");
//! let mut session = Session::login(&config, "admin", "password").await?;
//!
//! let mut editor = PermissionEditor::new();
//! editor.open(&session, RemotePath::from_segments(["Docs", "HR"])).await?;
//! editor.add_group("management")?;          // staged locally
//! editor.remove_group(&session, "interns").await?; // applied immediately
//! editor.save(&session).await?;             // pushes the whole set
//! # let _ = session.group_catalog().await?;
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod api;
pub mod error;
pub mod fs;
pub mod http;
pub mod session;

// Re-export commonly used types
pub use admin::{PermissionEditor, Role, UserRecord, UserUpdate};
pub use error::{KastError, Result};
pub use fs::{Browser, Entry, OpenOutcome, RemotePath};
pub use session::{AuthStatus, Config, Session};
