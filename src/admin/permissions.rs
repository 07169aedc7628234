//! Folder permission sets and the permission editor.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{KastError, Result};
use crate::fs::path::RemotePath;
use crate::session::Session;

#[derive(Debug, Deserialize)]
struct PermissionsResponse {
    #[serde(default)]
    permissions: Vec<String>,
}

impl Session {
    /// Fetch the group permission set attached to one folder.
    pub async fn folder_permissions(&self, folder: &RemotePath) -> Result<BTreeSet<String>> {
        let url = self.api.permissions_url(folder);
        let response: PermissionsResponse = self.api.get_json(&url).await?;
        Ok(response.permissions.into_iter().collect())
    }

    /// Replace a folder's permission set wholesale.
    pub async fn replace_folder_permissions(
        &self,
        folder: &RemotePath,
        groups: &BTreeSet<String>,
    ) -> Result<()> {
        let url = self.api.permissions_replace_url();
        let body = json!({
            "folderPath": folder.as_joined(),
            "groups": groups,
        });
        self.api.put_json(&url, &body).await
    }

    /// Detach a single group from a folder.
    pub async fn remove_folder_permission(
        &self,
        folder: &RemotePath,
        group: &str,
    ) -> Result<()> {
        let url = self.api.permissions_remove_url();
        let body = json!({
            "path": folder.as_joined(),
            "group": group,
        });
        self.api.put_json(&url, &body).await
    }
}

#[derive(Debug, Default)]
enum EditorState {
    #[default]
    Closed,
    Open {
        folder: RemotePath,
        groups: BTreeSet<String>,
    },
}

/// One-folder-at-a-time editor for group permissions.
///
/// Commit discipline: additions are staged locally and reach the backend
/// only on [`save`](Self::save), which pushes the whole edited set;
/// removals are sent to the backend immediately, one call per group.
/// Cancelling therefore drops staged additions but does not restore
/// groups that were already removed.
///
/// The permission set is fetched fresh on every [`open`](Self::open) and
/// discarded on close, saved or not.
#[derive(Debug, Default)]
pub struct PermissionEditor {
    state: EditorState,
}

impl PermissionEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Open { .. })
    }

    /// The folder being edited, if any.
    pub fn folder(&self) -> Option<&RemotePath> {
        match &self.state {
            EditorState::Open { folder, .. } => Some(folder),
            EditorState::Closed => None,
        }
    }

    /// The edited permission set, if open.
    pub fn groups(&self) -> Option<&BTreeSet<String>> {
        match &self.state {
            EditorState::Open { groups, .. } => Some(groups),
            EditorState::Closed => None,
        }
    }

    /// Open the editor on `folder`, fetching its current permission set.
    ///
    /// Replaces whatever the editor previously held.
    pub async fn open(&mut self, session: &Session, folder: RemotePath) -> Result<()> {
        let groups = session.folder_permissions(&folder).await?;
        debug!(%folder, count = groups.len(), "permission editor opened");
        self.state = EditorState::Open { folder, groups };
        Ok(())
    }

    /// Catalog groups not yet present in the edited set; empty when the
    /// editor is closed.
    pub fn addable_groups(&self, catalog: &BTreeSet<String>) -> Vec<String> {
        match &self.state {
            EditorState::Open { groups, .. } => catalog.difference(groups).cloned().collect(),
            EditorState::Closed => Vec::new(),
        }
    }

    /// Stage a group addition locally; nothing reaches the backend until
    /// [`save`](Self::save).
    pub fn add_group(&mut self, group: &str) -> Result<()> {
        match &mut self.state {
            EditorState::Open { groups, .. } => {
                groups.insert(group.to_string());
                Ok(())
            }
            EditorState::Closed => Err(KastError::Custom(
                "Permission editor is not open".to_string(),
            )),
        }
    }

    /// Detach `group` on the backend immediately, then drop it from the
    /// edited set. The removal stands even if the editor is cancelled
    /// afterwards.
    pub async fn remove_group(&mut self, session: &Session, group: &str) -> Result<()> {
        match &mut self.state {
            EditorState::Open { folder, groups } => {
                session.remove_folder_permission(folder, group).await?;
                groups.remove(group);
                Ok(())
            }
            EditorState::Closed => Err(KastError::Custom(
                "Permission editor is not open".to_string(),
            )),
        }
    }

    /// Push the edited set as the folder's new authoritative permission
    /// set, then close. On failure the editor stays open for a retry.
    pub async fn save(&mut self, session: &Session) -> Result<()> {
        match &self.state {
            EditorState::Open { folder, groups } => {
                session.replace_folder_permissions(folder, groups).await?;
                debug!(%folder, count = groups.len(), "permission set saved");
                self.state = EditorState::Closed;
                Ok(())
            }
            EditorState::Closed => Err(KastError::Custom(
                "Permission editor is not open".to_string(),
            )),
        }
    }

    /// Close and discard the edited set without contacting the backend.
    pub fn cancel(&mut self) {
        if self.is_open() {
            debug!("permission editor cancelled");
        }
        self.state = EditorState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_editor(groups: &[&str]) -> PermissionEditor {
        PermissionEditor {
            state: EditorState::Open {
                folder: RemotePath::from_segments(["Docs", "HR"]),
                groups: groups.iter().map(|g| g.to_string()).collect(),
            },
        }
    }

    fn catalog(groups: &[&str]) -> BTreeSet<String> {
        groups.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn test_closed_editor_rejects_edits() {
        let mut editor = PermissionEditor::new();
        assert!(!editor.is_open());
        assert!(editor.folder().is_none());
        assert!(editor.groups().is_none());
        assert!(editor.add_group("staff").is_err());
    }

    #[test]
    fn test_add_group_is_local_and_duplicate_free() {
        let mut editor = open_editor(&["staff"]);
        editor.add_group("management").expect("add");
        editor.add_group("management").expect("add twice");

        let groups = editor.groups().expect("open");
        assert_eq!(groups.len(), 2);
        assert!(groups.contains("management"));
    }

    #[test]
    fn test_addable_groups_is_catalog_minus_current() {
        let editor = open_editor(&["staff"]);
        let catalog = catalog(&["staff", "management", "interns"]);
        assert_eq!(editor.addable_groups(&catalog), ["interns", "management"]);

        let closed = PermissionEditor::new();
        assert!(closed.addable_groups(&catalog).is_empty());
    }

    #[test]
    fn test_cancel_discards_staged_additions() {
        // add_group never touches the backend, so cancelling after an add
        // leaves the server-side set exactly as fetched.
        let mut editor = open_editor(&["staff"]);
        editor.add_group("management").expect("add");
        editor.cancel();

        assert!(!editor.is_open());
        assert!(editor.groups().is_none());
    }

    #[test]
    fn test_parse_permissions_response() {
        let response: PermissionsResponse =
            serde_json::from_str(r#"{"permissions":["staff","staff","management"]}"#)
                .expect("response");
        let set: BTreeSet<String> = response.permissions.into_iter().collect();
        // Duplicates collapse at the fetch boundary
        assert_eq!(set.len(), 2);

        let empty: PermissionsResponse = serde_json::from_str("{}").expect("response");
        assert!(empty.permissions.is_empty());
    }
}
