//! HTTP client wrapper for Kast API requests.

use reqwest::multipart::Form;
use reqwest::{Client, Response};
use serde_json::Value;

use crate::error::{KastError, Result};

/// HTTP client for making requests to a Kast server.
///
/// The backend credentials every call through a session cookie set by
/// `/login`, so the underlying reqwest client keeps an in-memory cookie
/// store for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| KastError::Custom(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }

    /// Create a new HTTP client with a proxy.
    ///
    /// # Arguments
    /// * `proxy` - Proxy URL (e.g., "http://proxy:8080" or "socks5://proxy:1080")
    pub fn with_proxy(proxy: &str) -> Result<Self> {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| KastError::Custom(format!("Invalid proxy: {}", e)))?;

        let client = Client::builder()
            .cookie_store(true)
            .proxy(proxy)
            .build()
            .map_err(|e| KastError::Custom(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }

    /// Make a GET request.
    pub async fn get(&self, url: &str) -> Result<Response> {
        Ok(self.client.get(url).send().await?)
    }

    /// Make a POST request with a JSON body.
    pub async fn post_json(&self, url: &str, body: &Value) -> Result<Response> {
        Ok(self.client.post(url).json(body).send().await?)
    }

    /// Make a PUT request with a JSON body.
    pub async fn put_json(&self, url: &str, body: &Value) -> Result<Response> {
        Ok(self.client.put(url).json(body).send().await?)
    }

    /// Make a DELETE request.
    pub async fn delete(&self, url: &str) -> Result<Response> {
        Ok(self.client.delete(url).send().await?)
    }

    /// Make a multipart POST request.
    pub async fn post_multipart(&self, url: &str, form: Form) -> Result<Response> {
        Ok(self.client.post(url).multipart(form).send().await?)
    }
}
