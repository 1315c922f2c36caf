// API client module: a small blocking HTTP client that talks to the
// nutrition backend.
//
// Every backend action is described by an `ApiRequest<T>` built by one of
// the submodules (`diet::add`, `weight::trend`, ...). The descriptor is a
// plain value: method, path, query, body and an optional timeout override.
// `ApiClient::send` turns it into a `reqwest` request, attaches the bearer
// token and parses the `{code, message, data}` envelope the backend wraps
// every answer in. The descriptors carry no network state, so each
// wrapper can be checked without a server.

use std::marker::PhantomData;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::{multipart, Client, Request};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ClientError, Result};

pub mod ai;
pub mod chat;
pub mod diet;
pub mod food;
pub mod nutrition;
pub mod timestamp;
pub mod user;
pub mod weight;


/// Timeout applied to the food recognition endpoints; the model behind
/// them routinely needs far longer than a regular request.
pub const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(60);

/// Request payload carried by an [`ApiRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

/// One field of a multipart form. File parts are read when the request
/// is built, not when the descriptor is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, path: PathBuf },
}

/// Description of one HTTP call. `T` is the type of the envelope's `data`
/// field for this endpoint.
#[derive(Debug)]
pub struct ApiRequest<T> {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Body,
    pub timeout: Option<Duration>,
    response: PhantomData<fn() -> T>,
}

impl<T> ApiRequest<T> {
    fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
            timeout: None,
            response: PhantomData,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Fails only if `body` cannot be represented as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Body::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = Body::Multipart(parts);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// The backend's response envelope. `code` is `0` or `200` on success;
/// anything else comes with a human-readable `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self.code, 0 | 200)
    }

    /// Return the optional payload of a successful envelope.
    ///
    /// # Errors
    ///
    /// `ClientError::Rejected` when the envelope code is not a success code.
    pub fn into_result(self) -> Result<Option<T>> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ClientError::Rejected {
                code: self.code,
                message: self.message.unwrap_or_default(),
            })
        }
    }

    /// Like [`ApiResponse::into_result`] but also requires a payload.
    ///
    /// # Errors
    ///
    /// `ClientError::Rejected` or `ClientError::EmptyData`.
    pub fn into_data(self) -> Result<T> {
        self.into_result()?.ok_or(ClientError::EmptyData)
    }
}

/// Blocking API client holding the reqwest client, the base URL of the
/// backend and an optional token for authenticated calls.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client for `base_url` with a default per-request timeout.
    ///
    /// # Errors
    ///
    /// Fails when the underlying TLS backend cannot be initialised.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(ApiClient {
            client,
            base_url,
            token: None,
        })
    }

    /// Build a client from the parsed command line / environment.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store a token for subsequent authenticated requests.
    pub fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(t) = &self.token {
            let val = HeaderValue::from_str(&format!("Bearer {t}"))?;
            headers.insert(AUTHORIZATION, val);
        }
        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a descriptor into a ready-to-send request. Reads upload files.
    ///
    /// # Errors
    ///
    /// `ClientError::Io` when a file part cannot be read, or a reqwest
    /// error when the URL is invalid.
    pub fn build<T>(&self, req: &ApiRequest<T>) -> Result<Request> {
        let mut builder = self
            .client
            .request(req.method.clone(), self.url(&req.path))
            .headers(self.auth_headers()?);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        match &req.body {
            Body::Empty => {}
            Body::Json(value) => builder = builder.json(value),
            Body::Multipart(parts) => builder = builder.multipart(build_form(parts)?),
        }
        if let Some(timeout) = req.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    /// Execute a descriptor and parse the response envelope.
    ///
    /// # Errors
    ///
    /// `ClientError::Http` for transport failures, `ClientError::Status`
    /// for non-2xx responses. The envelope code is left to the caller.
    pub fn send<T: DeserializeOwned>(&self, req: ApiRequest<T>) -> Result<ApiResponse<T>> {
        debug!(method = %req.method, path = %req.path, "sending request");
        let request = self.build(&req)?;
        let res = self.client.execute(request)?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            warn!(%status, path = %req.path, "request failed");
            return Err(ClientError::Status { status, body });
        }
        Ok(res.json()?)
    }
}

fn build_form(parts: &[FormPart]) -> Result<multipart::Form> {
    let mut form = multipart::Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
            // `Form::file` guesses the mime type from the extension.
            FormPart::File { name, path } => {
                form.file(name.clone(), path)
                    .map_err(|source| ClientError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
        };
    }
    Ok(form)
}
