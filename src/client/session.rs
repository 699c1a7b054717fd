//! Cookie-carrying HTTP session bound to one backend

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::common::{Error, Result};

/// A fully-read backend response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// Raw `content-type` header, empty if the backend sent none
    pub content_type: String,
    pub body: String,
}

impl ApiResponse {
    /// Return self if the status matches, otherwise an `UnexpectedStatus` error
    pub fn expect_status(self, call: &str, expected: u16) -> Result<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(Error::unexpected_status(
                call,
                expected,
                self.status,
                self.body.trim(),
            ))
        }
    }

    /// Deserialize the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Whether the body is syntactically valid JSON
    pub fn body_parses_as_json(&self) -> bool {
        serde_json::from_str::<serde::de::IgnoredAny>(&self.body).is_ok()
    }
}

/// HTTP client context for one actor
pub struct ApiSession {
    http: Client,
    base_url: String,
}

impl ApiSession {
    /// Create a session against `base_url` with an empty cookie jar
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        reqwest::Url::parse(base_url).map_err(|_| Error::InvalidUrl(base_url.to_string()))?;

        let mut builder = Client::builder()
            .cookie_store(true)
            .user_agent(concat!("kyc-smoke/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send("GET", path, self.http.get(self.url(path))).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse> {
        let request = self.http.post(self.url(path)).json(body);
        self.send("POST", path, request).await
    }

    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<ApiResponse> {
        let request = self.http.post(self.url(path)).multipart(form);
        self.send("POST", path, request).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<ApiResponse> {
        tracing::debug!(method, path, "sending request");

        let response = request.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response.text().await?;

        tracing::debug!(
            method,
            path,
            status,
            %content_type,
            bytes = body.len(),
            "received response"
        );

        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }
}
