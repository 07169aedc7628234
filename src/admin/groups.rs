//! System-wide group catalog.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::session::Session;

impl Session {
    /// All group names known to the backend.
    ///
    /// Fetched once per session and cached; the catalog is read-only
    /// reference data for the permission editor and the create-folder
    /// form.
    pub async fn group_catalog(&mut self) -> Result<&BTreeSet<String>> {
        if self.group_catalog.is_none() {
            let url = self.api.admin_groups_url();
            let groups: Vec<String> = self.api.get_json(&url).await?;
            self.group_catalog = Some(groups.into_iter().collect());
        }
        Ok(self.group_catalog.get_or_insert_with(BTreeSet::new))
    }

    /// Drop the cached catalog and fetch it again.
    pub async fn refresh_group_catalog(&mut self) -> Result<&BTreeSet<String>> {
        self.group_catalog = None;
        self.group_catalog().await
    }
}
