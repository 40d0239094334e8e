use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use url::Url;

use crate::client::error::ClientError;

const REPL_PATH: &str = "/zounds/repl";

/// Successful reply from the interpreter endpoint.
///
/// `result` is the textual echo for the transcript; `url` and
/// `content_type` are both present when the command produced something
/// renderable.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Interpretation {
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "contentType")]
    pub content_type: Option<String>,
}

/// One opaque payload inside a fetched result set. Identity is positional;
/// the console never looks inside beyond building a display label.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ResultItem(pub serde_json::Value);

impl ResultItem {
    pub fn label(&self) -> String {
        let text = match &self.0 {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if text.chars().count() > 64 {
            let mut truncated: String = text.chars().take(64).collect();
            truncated.push_str("...");
            truncated
        } else {
            text
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ResultSet {
    pub results: Vec<ResultItem>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Command interpreter plus the secondary fetch for paginated result sets.
///
/// Implemented over HTTP for the real server; tests substitute their own.
pub trait Transport: Send {
    fn interpret(&self, command: &str) -> Result<Interpretation, ClientError>;
    fn fetch_results(&self, url: &str) -> Result<ResultSet, ClientError>;
}

pub struct HttpTransport {
    http: reqwest::blocking::Client,
    base: Url,
}

impl HttpTransport {
    pub fn new(server: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base = Url::parse(server)?;
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { http, base })
    }

    /// Resolves server-relative resource paths against the base URL.
    fn absolute(&self, url: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(url)?)
    }
}

impl Transport for HttpTransport {
    fn interpret(&self, command: &str) -> Result<Interpretation, ClientError> {
        let endpoint = self.base.join(REPL_PATH)?;
        let response = self
            .http
            .post(endpoint)
            .header(CONTENT_TYPE, "text/plain")
            .body(command.to_string())
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            // The server reports interpreter failures as {"error": "..."}.
            match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => Err(ClientError::Api(parsed.error)),
                Err(_) => Err(ClientError::Api(format!("server returned {status}"))),
            }
        }
    }

    fn fetch_results(&self, url: &str) -> Result<ResultSet, ClientError> {
        let response = self
            .http
            .get(self.absolute(url)?)
            .send()?
            .error_for_status()?;
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}
