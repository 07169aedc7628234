//! Path-based navigation and listing state for a Kast session.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{KastError, Result};
use crate::fs::entry::Entry;
use crate::fs::path::RemotePath;
use crate::session::Session;

/// Extensions rendered inline; everything else opens externally.
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "bmp"];

/// What opening an entry resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The entry was a directory; the browser descended into it and
    /// refreshed the listing.
    Descended,
    /// The entry is an image file; render it inline from the given URL.
    ViewImage { url: String },
    /// Any other file; hand the URL to an external viewer or download.
    OpenExternal { url: String },
}

/// File browser over one [`Session`].
///
/// Holds the currently browsed path, the listing fetched for it, and a
/// case-insensitive substring filter over that listing. Every mutating
/// command issues its request and then refreshes the listing
/// unconditionally, so the view tracks best-effort server state. Listing
/// responses are keyed by a generation token bumped on every path change;
/// a response that arrives for a superseded path is discarded instead of
/// being applied.
///
/// The encoded form of the current path ([`route_tail`](Self::route_tail))
/// is what a UI mirrors into its location bar.
pub struct Browser {
    session: Session,
    path: RemotePath,
    entries: Vec<Entry>,
    filter: String,
    generation: u64,
    last_error: Option<String>,
}

impl Browser {
    /// Wrap a session, starting at the storage root with an empty listing.
    ///
    /// Call [`refresh`](Self::refresh) (or navigate somewhere) to populate
    /// it.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            path: RemotePath::root(),
            entries: Vec::new(),
            filter: String::new(),
            generation: 0,
            last_error: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Give the session back, dropping the browsing state.
    pub fn into_session(self) -> Session {
        self.session
    }

    /// The currently browsed path.
    pub fn path(&self) -> &RemotePath {
        &self.path
    }

    /// Encoded path for the location bar.
    pub fn route_tail(&self) -> String {
        self.path.encoded()
    }

    /// The full listing as last fetched, in backend order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Message of the last failed listing fetch, cleared by the next
    /// successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Navigate to an explicit path and refresh.
    pub async fn set_path(&mut self, path: RemotePath) -> Result<()> {
        self.generation = self.generation.wrapping_add(1);
        self.path = path;
        self.refresh().await
    }

    /// Navigate from a route tail (browser back/forward, bookmarked URL).
    ///
    /// The tail is decoded before the fetch, so the listing request always
    /// reflects the decoded path.
    pub async fn navigate_route(&mut self, tail: &str) -> Result<()> {
        self.set_path(RemotePath::from_route_tail(tail)).await
    }

    /// Descend into a child directory and refresh.
    pub async fn descend(&mut self, name: &str) -> Result<()> {
        self.set_path(self.path.child(name)).await
    }

    /// Go one level up and refresh; a no-op at the root.
    pub async fn ascend(&mut self) -> Result<()> {
        match self.path.parent() {
            Some(parent) => self.set_path(parent).await,
            None => Ok(()),
        }
    }

    /// Re-fetch the listing for the current path.
    ///
    /// On success the entry collection is replaced wholesale and the error
    /// slot cleared. On failure the previous collection stays in place and
    /// the error is recorded in [`last_error`](Self::last_error) as well as
    /// returned. A response for a superseded generation is dropped.
    pub async fn refresh(&mut self) -> Result<()> {
        let generation = self.generation;
        let path = self.path.clone();
        match self.session.list_dir(&path).await {
            Ok(entries) => {
                if !self.apply_listing(generation, entries) {
                    debug!(%path, "discarding listing for a superseded path");
                }
                Ok(())
            }
            Err(e) => {
                warn!(%path, error = %e, "listing fetch failed; keeping previous entries");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Apply a fetched listing if it still belongs to the current
    /// generation. Returns `false` for a stale one.
    fn apply_listing(&mut self, generation: u64, entries: Vec<Entry>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.entries = entries;
        self.last_error = None;
        true
    }

    /// Set the substring filter applied by [`visible`](Self::visible).
    pub fn set_filter(&mut self, query: &str) {
        self.filter = query.to_string();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// The filtered view of the listing: entries whose name contains the
    /// filter, case-insensitively. The empty filter yields everything.
    /// Never mutates the underlying collection.
    pub fn visible(&self) -> Vec<&Entry> {
        if self.filter.is_empty() {
            return self.entries.iter().collect();
        }
        let needle = self.filter.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// Whether the permission gear is offered for `entry`: directories
    /// only, admin sessions only.
    pub fn can_edit_permissions(&self, entry: &Entry) -> bool {
        self.session.is_admin() && entry.is_directory()
    }

    /// Open an entry from the current listing.
    ///
    /// Directories descend. Files are classified by lowercased extension,
    /// never by content: the image extensions get an inline-view outcome,
    /// everything else an open-externally outcome, both carrying the
    /// constructed `/data` URL.
    pub async fn open_entry(&mut self, name: &str) -> Result<OpenOutcome> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name() == name)
            .ok_or_else(|| KastError::Custom(format!("No such entry: {}", name)))?;

        if entry.is_directory() {
            let dir = entry.name().to_string();
            self.descend(&dir).await?;
            return Ok(OpenOutcome::Descended);
        }

        let url = self.session.file_url(&self.path, name);
        if has_image_extension(name) {
            Ok(OpenOutcome::ViewImage { url })
        } else {
            Ok(OpenOutcome::OpenExternal { url })
        }
    }

    /// Delete the entry `name` in the current directory, then refresh.
    pub async fn delete_entry(&mut self, name: &str) -> Result<()> {
        let result = self.session.delete_entry(&self.path, name).await;
        if let Err(e) = &result {
            warn!(name, error = %e, "delete failed");
        }
        self.refresh_after_mutation().await;
        result
    }

    /// Rename the entry `name` to `new_name`, then refresh.
    pub async fn rename_entry(&mut self, name: &str, new_name: &str) -> Result<()> {
        let result = self.session.rename_entry(&self.path, name, new_name).await;
        if let Err(e) = &result {
            warn!(name, new_name, error = %e, "rename failed");
        }
        self.refresh_after_mutation().await;
        result
    }

    /// Create a folder in the current directory, then refresh.
    ///
    /// `groups` seeds the folder's permission set and is honored only for
    /// admin sessions.
    pub async fn create_folder(
        &mut self,
        name: &str,
        groups: Option<&BTreeSet<String>>,
    ) -> Result<()> {
        let result = self.session.create_folder(&self.path, name, groups).await;
        if let Err(e) = &result {
            warn!(name, error = %e, "create folder failed");
        }
        self.refresh_after_mutation().await;
        result
    }

    /// Upload bytes as `filename` into the current directory, then refresh.
    pub async fn upload(&mut self, filename: &str, bytes: Vec<u8>) -> Result<()> {
        let result = self.session.upload(&self.path, filename, bytes).await;
        if let Err(e) = &result {
            warn!(filename, error = %e, "upload failed");
        }
        self.refresh_after_mutation().await;
        result
    }

    /// Upload a local file into the current directory, then refresh.
    pub async fn upload_file(&mut self, local: impl AsRef<Path>) -> Result<()> {
        let local = local.as_ref();
        let result = self.session.upload_file(&self.path, local).await;
        if let Err(e) = &result {
            warn!(local = %local.display(), error = %e, "upload failed");
        }
        self.refresh_after_mutation().await;
        result
    }

    /// The refresh that keeps the view consistent with best-effort server
    /// state after any mutation, successful or not. Its own failure is
    /// already recorded in the error slot.
    async fn refresh_after_mutation(&mut self) {
        let _ = self.refresh().await;
    }
}

fn has_image_extension(name: &str) -> bool {
    // Same classification the listing UI always used: the text after the
    // last dot, lowercased.
    let ext = name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::session::AuthStatus;

    fn file(name: &str) -> Entry {
        Entry::File {
            name: name.to_string(),
            qr_code: None,
        }
    }

    fn dir(name: &str) -> Entry {
        Entry::Directory {
            name: name.to_string(),
            qr_code: None,
        }
    }

    fn browser_with(entries: Vec<Entry>) -> Browser {
        let session = Session::new(ApiClient::new("http://localhost:3001").expect("client"));
        let mut browser = Browser::new(session);
        browser.entries = entries;
        browser
    }

    #[test]
    fn test_filter_scenario() {
        let mut browser = browser_with(vec![file("a.png"), dir("Docs")]);
        browser.set_filter("doc");
        let names: Vec<&str> = browser.visible().iter().map(|e| e.name()).collect();
        assert_eq!(names, ["Docs"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let mut browser = browser_with(vec![file("a.png"), dir("Docs"), file("readme.md")]);
        browser.set_filter("d");
        let once: Vec<String> = browser
            .visible()
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        browser.set_filter("d");
        let twice: Vec<String> = browser
            .visible()
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_filter_shows_everything() {
        let browser = browser_with(vec![file("a.png"), dir("Docs")]);
        assert_eq!(browser.visible().len(), 2);
    }

    #[test]
    fn test_filter_never_mutates_collection() {
        let mut browser = browser_with(vec![file("a.png"), dir("Docs")]);
        browser.set_filter("doc");
        assert_eq!(browser.visible().len(), 1);
        assert_eq!(browser.entries().len(), 2);
        browser.set_filter("");
        assert_eq!(browser.visible().len(), 2);
    }

    #[test]
    fn test_stale_listing_discarded() {
        let mut browser = browser_with(vec![file("old.txt")]);
        let stale_generation = browser.generation;
        browser.generation = browser.generation.wrapping_add(1);

        assert!(!browser.apply_listing(stale_generation, vec![file("new.txt")]));
        assert_eq!(browser.entries()[0].name(), "old.txt");
    }

    #[test]
    fn test_current_listing_applied_and_error_cleared() {
        let mut browser = browser_with(vec![file("old.txt")]);
        browser.last_error = Some("listing fetch failed".to_string());

        assert!(browser.apply_listing(browser.generation, vec![file("new.txt")]));
        assert_eq!(browser.entries()[0].name(), "new.txt");
        assert!(browser.last_error().is_none());
    }

    #[test]
    fn test_image_extension_classification() {
        assert!(has_image_extension("photo.JPG"));
        assert!(has_image_extension("scan.jpeg"));
        assert!(has_image_extension("chart.png"));
        assert!(has_image_extension("anim.gif"));
        assert!(has_image_extension("old.BMP"));
        assert!(!has_image_extension("notes.txt"));
        assert!(!has_image_extension("archive.tar.gz"));
    }

    #[tokio::test]
    async fn test_open_image_file_yields_inline_view_url() {
        let mut browser = browser_with(vec![file("photo.JPG")]);
        let outcome = browser.open_entry("photo.JPG").await.expect("outcome");
        assert_eq!(
            outcome,
            OpenOutcome::ViewImage {
                url: "http://localhost:3001/data//photo.JPG".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_open_other_file_opens_externally() {
        let mut browser = browser_with(vec![file("report.pdf")]);
        let outcome = browser.open_entry("report.pdf").await.expect("outcome");
        assert_eq!(
            outcome,
            OpenOutcome::OpenExternal {
                url: "http://localhost:3001/data//report.pdf".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_open_unknown_entry_fails() {
        let mut browser = browser_with(vec![file("a.png")]);
        assert!(browser.open_entry("missing.txt").await.is_err());
    }

    #[test]
    fn test_permission_gear_visibility() {
        let mut browser = browser_with(vec![file("a.png"), dir("Docs")]);
        assert!(!browser.can_edit_permissions(&dir("Docs")));

        browser.session_mut().status = AuthStatus {
            authenticated: true,
            is_admin: true,
        };
        assert!(browser.can_edit_permissions(&dir("Docs")));
        assert!(!browser.can_edit_permissions(&file("a.png")));
    }

    #[test]
    fn test_route_tail_tracks_path() {
        let mut browser = browser_with(vec![]);
        assert_eq!(browser.route_tail(), "");
        browser.path = RemotePath::from_segments(["Docs", "Q1 reports"]);
        assert_eq!(browser.route_tail(), "Docs%2FQ1%20reports");
    }
}
