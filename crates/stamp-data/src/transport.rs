//! Pluggable HTTP transport.

use crate::request::{FormPart, RequestBody};
use crate::{FetchError, Method, RequestBuilder, Response};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Sends a built request and returns the raw response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Client with a request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client))
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

fn into_form(parts: Vec<FormPart>) -> Result<reqwest::multipart::Form, FetchError> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let part = reqwest::multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| FetchError::RequestError(format!("Invalid content type: {}", e)))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        for (key, value) in &headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Bytes(bytes) => builder.body(bytes),
            RequestBody::Multipart(form) => builder.multipart(into_form(form.parts)?),
        };

        tracing::debug!(method = method.as_str(), url = %url, "sending request");
        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();
        tracing::debug!(status, bytes = body.len(), "received response");

        Ok(Response::new(status, headers, body))
    }
}
