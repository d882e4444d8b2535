//! Request description.
//!
//! A [`RequestSpec`] is built once and handed to the client by reference,
//! so every retry resends exactly the same method, headers and body.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde_json::Value;

use crate::http::error::HttpError;

/// Supported HTTP verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(HttpError::InvalidRequest(format!(
                "unsupported HTTP method: {}",
                s
            ))),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request payload. JSON wins when both kinds were supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody<'a> {
    Json(&'a Value),
    Raw(&'a [u8]),
}

/// One logical HTTP call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    url: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
    json: Option<Value>,
    raw: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            json: None,
            raw: None,
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Add a header. Repeated names are all sent.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add every header from an iterator of pairs.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Structured JSON payload.
    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Raw payload, sent only when no JSON payload is set.
    pub fn raw(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.raw = Some(body.into());
        self
    }

    /// Per-call timeout override.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn header_pairs(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn timeout_override(&self) -> Option<Duration> {
        self.timeout
    }

    /// The payload that will actually be sent.
    pub fn body(&self) -> Option<RequestBody<'_>> {
        match (&self.json, &self.raw) {
            (Some(json), _) => Some(RequestBody::Json(json)),
            (None, Some(raw)) => Some(RequestBody::Raw(raw)),
            (None, None) => None,
        }
    }

    /// Check the URL before any attempt is made.
    pub fn validate(&self) -> Result<url::Url, HttpError> {
        if self.url.trim().is_empty() {
            return Err(HttpError::InvalidRequest("url must not be empty".into()));
        }
        let parsed = url::Url::parse(&self.url)
            .map_err(|e| HttpError::InvalidRequest(format!("invalid url '{}': {}", self.url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            scheme => Err(HttpError::InvalidRequest(format!(
                "unsupported url scheme '{}'",
                scheme
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parsing() {
        assert_eq!("post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!(" Delete ".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert!(matches!(
            "PATCH".parse::<HttpMethod>(),
            Err(HttpError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_json_takes_precedence() {
        let spec = RequestSpec::post("https://x/test")
            .raw("raw")
            .json(json!({"a": 1}));
        assert_eq!(spec.body(), Some(RequestBody::Json(&json!({"a": 1}))));

        let spec = RequestSpec::post("https://x/test").raw("raw");
        assert_eq!(spec.body(), Some(RequestBody::Raw(b"raw")));
        assert_eq!(RequestSpec::get("https://x").body(), None);
    }

    #[test]
    fn test_validate() {
        assert!(RequestSpec::get("https://x/test").validate().is_ok());
        assert!(RequestSpec::get("").validate().is_err());
        assert!(RequestSpec::get("not a url").validate().is_err());
        assert!(RequestSpec::get("ftp://x/file").validate().is_err());
    }

    #[test]
    fn test_builder_keeps_headers_in_order() {
        let spec = RequestSpec::get("https://x")
            .header("A", "1")
            .headers([("B", "2"), ("C", "3")])
            .timeout(Duration::from_secs(5));
        let names: Vec<&str> = spec.header_pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(spec.timeout_override(), Some(Duration::from_secs(5)));
    }
}
