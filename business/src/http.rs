//! Thin HTTP client for the admin API.
//!
//! All console calls share a base URL and an optional bearer token, so the
//! client is constructed once from [`crate::AdminConfig`] and handed to the
//! API functions. Responses are reduced to status + body bytes: that keeps
//! the futures `Send` and the call sites free of `reqwest` types.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// HTTP method for requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
}

/// A response reduced to the parts the console consumes.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    body: Vec<u8>,
}

impl Response {
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Attempt to parse the body as UTF-8 text.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.clone())
    }

    /// Attempt to deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client error.
#[derive(Debug, Clone)]
pub struct HttpError {
    message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP error: {}", self.message)
    }
}

impl std::error::Error for HttpError {}

/// Result type for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// Client bound to one API base URL and credential set.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    authorization: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, authorization: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            authorization,
        }
    }

    /// Create a GET request for `path` with URL-encoded query parameters.
    pub fn get(&self, path: &str, query: &[(&str, &str)]) -> RequestBuilder {
        let mut url = format!("{}{path}", self.base_url);
        for (index, (name, value)) in query.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            url.push(separator);
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        self.request(Method::Get, url)
    }

    /// Create a POST request for `path`.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::Post, format!("{}{path}", self.base_url))
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let mut builder = RequestBuilder {
            method,
            url,
            headers: Vec::new(),
            body: None,
        };
        if let Some(token) = &self.authorization {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        builder
    }
}

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(value)?);
        self.headers
            .push(("content-type".to_owned(), "application/json".to_owned()));
        Ok(self)
    }

    /// Send the request. The returned future is `Send`, so it can run on the
    /// command runtime.
    pub async fn send(self) -> HttpResult<Response> {
        let client = reqwest::Client::new();

        let mut request = match self.method {
            Method::Get => client.get(&self.url),
            Method::Post => client.post(&self.url),
        };

        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        if let Some(body) = self.body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?
            .to_vec();

        Ok(Response { status, body })
    }
}
