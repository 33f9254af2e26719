use crate::config::{Config, Endpoints};
use crate::model::{Film, Genre};
use reqwest::{Client, Url};
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use thiserror::Error;

const ERROR_BODY_LIMIT: usize = 200;

/// Failure of a catalog request. Slices keep only `to_string()`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: HTTP {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Empty response from {0}")]
    EmptyResponse(String),

    #[error("Unexpected response format: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http(e) if e.is_connect() => "Cannot reach the catalog server".to_string(),
            ApiError::Http(e) => format!("Network error: {}", e),
            ApiError::Status { status, .. } => format!("Server answered with HTTP {}", status),
            ApiError::EmptyResponse(_) => "Server returned no data".to_string(),
            ApiError::Decode(_) => "Server returned data in an unknown format".to_string(),
        }
    }
}

/// Thin GET client for the catalog API. No retries, timeouts or caching.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    api_key: Option<String>,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("film-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            endpoints: config.endpoints.clone(),
        })
    }

    /// `base` and `endpoint` joined with exactly one slash.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// GET an endpoint and return its JSON body.
    pub async fn fetch(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!(%url, ?params, "GET");

        let mut request = self.client.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(key) = &self.api_key {
            request = request.header("X-API-KEY", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let body = response.bytes().await?;
        parse_body(&body).ok_or(ApiError::EmptyResponse(url))?
    }

    pub async fn films(&self) -> Result<Vec<Film>, ApiError> {
        decode_list(self.fetch(&self.endpoints.films, &[]).await?)
    }

    pub async fn popular_films(&self) -> Result<Vec<Film>, ApiError> {
        decode_list(self.fetch(&self.endpoints.popular, &[]).await?)
    }

    pub async fn search_films(&self, query: &str) -> Result<Vec<Film>, ApiError> {
        let params = [(self.endpoints.search_param.as_str(), query)];
        decode_list(self.fetch(&self.endpoints.search, &params).await?)
    }

    pub async fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        decode_list(self.fetch(&self.endpoints.genres, &[]).await?)
    }
}

/// `None` for a falsy body (blank, `null`, `false`, `""`, `0`).
fn parse_body(body: &[u8]) -> Option<Result<Value, ApiError>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(value) if is_falsy(&value) => None,
        Ok(value) => Some(Ok(value)),
        Err(e) => Some(Err(e.into())),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Lists arrive bare or wrapped in `results` / `docs`. The wrapper is
/// peeled off first so item errors keep their own message.
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
    let items = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => match map.remove("results").or_else(|| map.remove("docs")) {
            Some(items) => items,
            None => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                return Err(serde_json::Error::custom(format!(
                    "expected a list, `results` or `docs`, got object with keys [{}]",
                    keys.join(", ")
                ))
                .into());
            }
        },
        other => {
            return Err(serde_json::Error::custom(format!(
                "expected a list, got {}",
                json_kind(&other)
            ))
            .into());
        }
    };
    Ok(serde_json::from_value(items)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
