//! HTTP client and backend adapters for the stamp storefront.
//!
//! Provides a small builder API over a pluggable [`HttpTransport`], plus
//! the adapters that implement the `stamp-commerce` collaborator traits:
//!
//! - [`StorefrontClient`]: catalog query and cart checkout over the
//!   storefront GraphQL API
//! - [`AssetHostClient`]: unsigned design uploads to the asset host
//!
//! # Example
//!
//! ```rust,ignore
//! use stamp_data::{FetchClient, StorefrontClient, StorefrontConfig};
//! use stamp_commerce::catalog::Catalog;
//!
//! let client = FetchClient::new();
//! let storefront = StorefrontClient::new(client, StorefrontConfig::from_env());
//!
//! let catalog = Catalog::load(&storefront).await?;
//! for product in catalog.display() {
//!     println!("{} {}", product.name, product.price);
//! }
//! ```

mod assets;
mod config;
mod error;
mod request;
mod response;
mod storefront;
mod transport;

pub use assets::AssetHostClient;
pub use config::{AssetHostConfig, StorefrontConfig, ACCESS_TOKEN_ENV, DOMAIN_ENV};
pub use error::FetchError;
pub use request::{FormPart, Method, MultipartForm, RequestBody, RequestBuilder};
pub use response::Response;
pub use storefront::StorefrontClient;
pub use transport::{HttpTransport, ReqwestTransport};

use std::collections::HashMap;
use std::sync::Arc;

/// HTTP client for making outbound requests.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn HttpTransport>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FetchClient {
    /// Create a new HTTP client over `reqwest`.
    pub fn new() -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::default()))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport,
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn HttpTransport>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Set the request body as a multipart form.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.builder = self.builder.multipart(form);
        self
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.transport.execute(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AssetHostClient, FetchClient, FetchError, HttpTransport, Method, Response,
        StorefrontClient,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct EchoTransport {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl HttpTransport for EchoTransport {
        async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(request.url().to_string());
            }
            Ok(Response::new(204, HashMap::new(), Vec::new()))
        }
    }

    #[tokio::test]
    async fn test_base_url_and_default_headers() {
        let transport = Arc::new(EchoTransport::default());
        let client = FetchClient::with_transport(transport.clone())
            .with_base_url("https://shop.example/")
            .with_default_header("Accept", "application/json");

        let response = client.get("/api/products").send().await.unwrap();
        assert_eq!(response.status, 204);
        client.get("https://other.example/x").send().await.unwrap();

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0], "https://shop.example/api/products");
        assert_eq!(seen[1], "https://other.example/x");
    }
}
