//! File and folder operations against the Kast API.

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::json;
use tracing::debug;

use crate::error::{KastError, Result};
use crate::fs::entry::{Entry, RawEntry, parse_listing};
use crate::fs::path::RemotePath;
use crate::session::Session;

impl Session {
    /// Fetch the directory listing at `path`.
    ///
    /// Entries come back in backend order and are validated at this
    /// boundary; no client-side sort is applied.
    pub async fn list_dir(&self, path: &RemotePath) -> Result<Vec<Entry>> {
        let url = self.api.files_url(path);
        let raw: Vec<RawEntry> = self.api.get_json(&url).await?;
        parse_listing(raw)
    }

    /// Delete the entry `name` under `path`.
    ///
    /// Whether folder deletion is recursive is defined by the backend,
    /// not the client.
    pub async fn delete_entry(&self, path: &RemotePath, name: &str) -> Result<()> {
        let url = self.api.entry_url(path, name);
        self.api.delete(&url).await
    }

    /// Rename the entry `name` under `path` to `new_name`.
    ///
    /// `new_name` is not validated locally; emptiness and illegal
    /// characters are the backend's responsibility.
    pub async fn rename_entry(&self, path: &RemotePath, name: &str, new_name: &str) -> Result<()> {
        let url = self.api.entry_url(path, name);
        self.api.put_json(&url, &json!({ "newName": new_name })).await
    }

    /// Create a folder named `name` under `path`.
    ///
    /// `groups` establishes the initial permission set for the new folder
    /// and is attached only when the session is an admin session; for a
    /// non-admin session it is dropped before the request.
    pub async fn create_folder(
        &self,
        path: &RemotePath,
        name: &str,
        groups: Option<&BTreeSet<String>>,
    ) -> Result<()> {
        let url = self.api.create_folder_url(path);
        let body = match groups {
            Some(groups) if self.is_admin() => {
                json!({ "name": name, "groups": groups })
            }
            Some(_) => {
                debug!(name, "dropping initial groups: session is not admin");
                json!({ "name": name })
            }
            None => json!({ "name": name }),
        };
        self.api.post_json_unit(&url, &body).await
    }

    /// Upload file contents as `filename` into `path`.
    ///
    /// One multipart request carrying the file part and the destination
    /// path; no chunking, no resume.
    pub async fn upload(&self, path: &RemotePath, filename: &str, bytes: Vec<u8>) -> Result<()> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("currentPath", path.as_joined());
        let url = self.api.upload_url();
        self.api.post_multipart(&url, form).await
    }

    /// Upload a local file into `path`, keeping its file name.
    pub async fn upload_file(&self, path: &RemotePath, local: impl AsRef<Path>) -> Result<()> {
        let local = local.as_ref();
        let filename = local
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| KastError::Custom(format!("Invalid file name: {}", local.display())))?
            .to_string();
        let bytes = tokio::fs::read(local).await?;
        self.upload(path, &filename, bytes).await
    }

    /// URL of the raw file bytes for direct viewing or download.
    pub fn file_url(&self, path: &RemotePath, name: &str) -> String {
        self.api.data_url(path, name)
    }

    /// Fetch the raw bytes of the file `name` under `path`.
    pub async fn fetch_file(&self, path: &RemotePath, name: &str) -> Result<Vec<u8>> {
        let url = self.api.data_url(path, name);
        self.api.get_bytes(&url).await
    }
}
