//! Kast API client with endpoint construction and request execution.

use reqwest::Response;
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::api::error::ApiFailure;
use crate::error::{KastError, Result};
use crate::fs::path::RemotePath;
use crate::http::HttpClient;

fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Kast API client.
///
/// Owns the configured backend host and the cookie-credentialed transport.
/// Every endpoint URL is assembled here, with each path placeholder
/// percent-encoded as its own unit, so the exact interpolation the backend
/// sees is unit-testable.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given backend host.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new API client with a proxy.
    ///
    /// # Arguments
    /// * `proxy` - Proxy URL (e.g., "http://proxy:8080" or "socks5://proxy:1080")
    pub fn with_proxy(base_url: &str, proxy: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_proxy(proxy)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured backend host, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn check_auth_url(&self) -> String {
        format!("{}/check-auth", self.base_url)
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", self.base_url)
    }

    /// Listing endpoint for a directory path.
    pub fn files_url(&self, path: &RemotePath) -> String {
        format!("{}/api/files/{}", self.base_url, path.encoded())
    }

    /// Mutation endpoint for a single entry under a directory path.
    pub fn entry_url(&self, path: &RemotePath, name: &str) -> String {
        format!(
            "{}/api/files/{}/{}",
            self.base_url,
            path.encoded(),
            encode(name)
        )
    }

    pub fn create_folder_url(&self, path: &RemotePath) -> String {
        format!(
            "{}/api/files/{}/create-folder",
            self.base_url,
            path.encoded()
        )
    }

    pub fn upload_url(&self) -> String {
        format!("{}/api/upload", self.base_url)
    }

    /// Static file bytes for direct viewing or download.
    pub fn data_url(&self, path: &RemotePath, name: &str) -> String {
        format!(
            "{}/data/{}/{}",
            self.base_url,
            path.encoded(),
            encode(name)
        )
    }

    pub fn admin_users_url(&self) -> String {
        format!("{}/admin/users", self.base_url)
    }

    pub fn admin_user_url(&self, username: &str) -> String {
        format!("{}/admin/users/{}", self.base_url, encode(username))
    }

    pub fn admin_groups_url(&self) -> String {
        format!("{}/admin/groups", self.base_url)
    }

    /// Permission set attached to one folder.
    pub fn permissions_url(&self, path: &RemotePath) -> String {
        format!("{}/admin/permissions/{}", self.base_url, path.encoded())
    }

    /// Whole-set replacement endpoint.
    pub fn permissions_replace_url(&self) -> String {
        format!("{}/admin/permissions", self.base_url)
    }

    /// Per-item detach endpoint.
    pub fn permissions_remove_url(&self) -> String {
        format!("{}/admin/permissions/remove", self.base_url)
    }

    /// GET a JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "api request GET");
        let response = self.http.get(url).await?;
        let response = Self::ensure_success(response)?;
        Ok(response.json().await?)
    }

    /// GET raw bytes (the `/data` endpoint).
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!(%url, "api request GET (bytes)");
        let response = self.http.get(url).await?;
        let response = Self::ensure_success(response)?;
        Ok(response.bytes().await?.to_vec())
    }

    /// POST a JSON body and decode a JSON response.
    pub async fn post_json<T: DeserializeOwned>(&self, url: &str, body: &Value) -> Result<T> {
        debug!(%url, "api request POST");
        let response = self.http.post_json(url, body).await?;
        let response = Self::ensure_success(response)?;
        Ok(response.json().await?)
    }

    /// POST a JSON body, checking only transport-level failure.
    ///
    /// Used where the caller must read the body of an error response
    /// (the login endpoint carries its message that way).
    pub async fn post_json_raw(&self, url: &str, body: &Value) -> Result<Response> {
        debug!(%url, "api request POST");
        self.http.post_json(url, body).await
    }

    /// POST a JSON body, ignoring the response body.
    pub async fn post_json_unit(&self, url: &str, body: &Value) -> Result<()> {
        debug!(%url, "api request POST");
        let response = self.http.post_json(url, body).await?;
        Self::ensure_success(response)?;
        Ok(())
    }

    /// PUT a JSON body, ignoring the response body.
    pub async fn put_json(&self, url: &str, body: &Value) -> Result<()> {
        debug!(%url, "api request PUT");
        let response = self.http.put_json(url, body).await?;
        Self::ensure_success(response)?;
        Ok(())
    }

    /// DELETE, ignoring the response body.
    pub async fn delete(&self, url: &str) -> Result<()> {
        debug!(%url, "api request DELETE");
        let response = self.http.delete(url).await?;
        Self::ensure_success(response)?;
        Ok(())
    }

    /// POST a multipart form, ignoring the response body.
    pub async fn post_multipart(&self, url: &str, form: Form) -> Result<()> {
        debug!(%url, "api request POST (multipart)");
        let response = self.http.post_multipart(url, form).await?;
        Self::ensure_success(response)?;
        Ok(())
    }

    fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "api response");
            return Ok(response);
        }
        let failure = ApiFailure::from_status(status.as_u16());
        Err(KastError::Api {
            status: status.as_u16(),
            message: failure.description().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:3001").expect("client")
    }

    #[test]
    fn test_base_url_normalization() {
        let client = ApiClient::new("http://localhost:3001/").expect("client");
        assert_eq!(client.base_url(), "http://localhost:3001");
    }

    #[test]
    fn test_auth_urls() {
        let client = client();
        assert_eq!(client.check_auth_url(), "http://localhost:3001/check-auth");
        assert_eq!(client.login_url(), "http://localhost:3001/login");
    }

    #[test]
    fn test_files_url_root() {
        let client = client();
        let path = RemotePath::root();
        assert_eq!(client.files_url(&path), "http://localhost:3001/api/files/");
    }

    #[test]
    fn test_files_url_encodes_whole_path_as_one_unit() {
        let client = client();
        let path = RemotePath::from_segments(["Docs", "Q1 reports"]);
        assert_eq!(
            client.files_url(&path),
            "http://localhost:3001/api/files/Docs%2FQ1%20reports"
        );
    }

    #[test]
    fn test_entry_url_encodes_name_separately() {
        let client = client();
        let path = RemotePath::from_segments(["Docs"]);
        assert_eq!(
            client.entry_url(&path, "jaar verslag.pdf"),
            "http://localhost:3001/api/files/Docs/jaar%20verslag.pdf"
        );
    }

    #[test]
    fn test_create_folder_and_upload_urls() {
        let client = client();
        let path = RemotePath::from_segments(["Docs"]);
        assert_eq!(
            client.create_folder_url(&path),
            "http://localhost:3001/api/files/Docs/create-folder"
        );
        assert_eq!(client.upload_url(), "http://localhost:3001/api/upload");
    }

    #[test]
    fn test_data_url() {
        let client = client();
        let path = RemotePath::from_segments(["Docs", "2024"]);
        assert_eq!(
            client.data_url(&path, "photo.JPG"),
            "http://localhost:3001/data/Docs%2F2024/photo.JPG"
        );
    }

    #[test]
    fn test_admin_urls() {
        let client = client();
        assert_eq!(client.admin_users_url(), "http://localhost:3001/admin/users");
        assert_eq!(
            client.admin_user_url("jan de vries"),
            "http://localhost:3001/admin/users/jan%20de%20vries"
        );
        assert_eq!(
            client.admin_groups_url(),
            "http://localhost:3001/admin/groups"
        );
    }

    #[test]
    fn test_permission_urls() {
        let client = client();
        let path = RemotePath::from_segments(["Docs", "HR"]);
        assert_eq!(
            client.permissions_url(&path),
            "http://localhost:3001/admin/permissions/Docs%2FHR"
        );
        assert_eq!(
            client.permissions_replace_url(),
            "http://localhost:3001/admin/permissions"
        );
        assert_eq!(
            client.permissions_remove_url(),
            "http://localhost:3001/admin/permissions/remove"
        );
    }
}
