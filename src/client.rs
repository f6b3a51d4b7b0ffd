//! Kibana client, request pipeline and error types.

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Request};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::http::{self, BoxError, RequestOption, KBN_XSRF};
use crate::options::{ClientOptions, Credential, DEFAULT_BASE_URL};
use crate::response::{check_response, ErrorResponse, Response};
use crate::services::{RolesService, SpacesService};

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("JSON encode error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Query encode error: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    #[error("Request option failed: {0}")]
    RequestOption(#[source] BoxError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Api(Box<ErrorResponse>),

    #[error("Failed to read response body: {source}")]
    Body {
        #[source]
        source: reqwest::Error,
        response: Box<Response>,
    },

    #[error("JSON decode error: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        response: Box<Response>,
    },

    #[error("Failed to write response body: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        response: Box<Response>,
    },
}

impl ClientError {
    /// The response received before the error occurred, if any.
    ///
    /// `None` for construction and build errors and when the transport
    /// failed before a response arrived.
    pub fn response(&self) -> Option<&Response> {
        match self {
            ClientError::Api(err) => Some(&err.response),
            ClientError::Body { response, .. }
            | ClientError::Decode { response, .. }
            | ClientError::Io { response, .. } => Some(&**response),
            _ => None,
        }
    }

    /// The API error, when Kibana answered with a non-success status.
    pub fn api_error(&self) -> Option<&ErrorResponse> {
        match self {
            ClientError::Api(err) => Some(&**err),
            _ => None,
        }
    }
}

impl From<ErrorResponse> for ClientError {
    fn from(err: ErrorResponse) -> Self {
        ClientError::Api(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// A client for the Kibana REST API.
///
/// The client is immutable once built; clone it freely to share it between
/// tasks.
///
/// # Example
/// ```no_run
/// use kibana_api::{Client, ClientOptions};
///
/// # async fn run() -> Result<(), kibana_api::ClientError> {
/// let client = Client::with_basic_auth(
///     "elastic",
///     "changeme",
///     ClientOptions::new().with_base_url("https://kibana.example.com"),
/// )?;
/// let (space, resp) = client.spaces().get_space("default", &[]).await?;
/// println!("{} -> {}", space.name, resp.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    credential: Credential,
    user_agent: String,
}

impl Client {
    /// Create a client with the given credential and options.
    pub fn new(credential: Credential, options: ClientOptions) -> Result<Self> {
        let base_url = http::normalize_base_url(
            options.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
        )?;
        if !options.user_agent.is_empty() {
            HeaderValue::from_str(&options.user_agent)?;
        }
        HeaderValue::from_str(&credential.authorization())?;

        Ok(Self {
            http: http::build_http_client(&options.transport)?,
            base_url,
            credential,
            user_agent: options.user_agent,
        })
    }

    /// Create a client authenticating with a username and password.
    pub fn with_basic_auth(
        username: impl Into<String>,
        password: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self> {
        Self::new(
            Credential::basic_auth(username.into(), password.into()),
            options,
        )
    }

    /// Create a client authenticating with an API key.
    pub fn with_api_key(api_key: impl Into<String>, options: ClientOptions) -> Result<Self> {
        Self::new(Credential::api_key(api_key.into()), options)
    }

    /// The normalized base URL, always ending in `api/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Spaces API.
    pub fn spaces(&self) -> SpacesService<'_> {
        SpacesService::new(self)
    }

    /// Role management API.
    pub fn roles(&self) -> RolesService<'_> {
        RolesService::new(self)
    }

    /// Build an API request without sending it.
    ///
    /// `path` is relative to the base URL and must not start with a slash.
    /// For POST and PUT `opt` is JSON-encoded into the body; for GET it is
    /// encoded as the query string; DELETE never carries a body.
    pub fn new_request<T>(
        &self,
        method: Method,
        path: &str,
        opt: Option<&T>,
        options: &[RequestOption],
    ) -> Result<Request>
    where
        T: Serialize + ?Sized,
    {
        let mut url = http::resolve_url(&self.base_url, path)?;

        let mut body = None;
        if method == Method::POST || method == Method::PUT {
            if let Some(opt) = opt {
                body = Some(http::encode_json(opt)?);
            }
        } else if method != Method::DELETE {
            if let Some(opt) = opt {
                let query = http::encode_query(opt)?;
                if !query.is_empty() {
                    url.set_query(Some(&query));
                }
            }
        }

        let mut req = Request::new(method.clone(), url);
        let headers = req.headers_mut();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if !self.user_agent.is_empty() {
            headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        }

        if method == Method::POST || method == Method::PUT {
            headers.insert(KBN_XSRF, HeaderValue::from_static("true"));
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        } else if method == Method::DELETE {
            headers.insert(KBN_XSRF, HeaderValue::from_static("true"));
        }

        if let Some(body) = body {
            *req.body_mut() = Some(body.into());
        }

        for option in options {
            option.apply(&mut req)?;
        }

        Ok(req)
    }

    /// Set the `Authorization` header from the client credential unless the
    /// request already carries one.
    pub fn authenticate(&self, req: &mut Request) -> Result<()> {
        http::authenticate(req, &self.credential)
    }

    /// Send a request without decoding the body.
    ///
    /// Use this for endpoints that answer without a body. The raw body is
    /// still available through [`Response::body`].
    pub async fn execute(&self, req: Request) -> Result<Response> {
        let response = self.send(req).await?;
        Ok(check_response(response)?)
    }

    /// Send a request and decode the JSON success body into `T`.
    pub async fn execute_json<T: DeserializeOwned>(&self, req: Request) -> Result<(T, Response)> {
        let response = self.execute(req).await?;
        let decoded = serde_json::from_slice::<T>(response.body());
        match decoded {
            Ok(value) => Ok((value, response)),
            Err(source) => Err(ClientError::Decode {
                source,
                response: Box::new(response),
            }),
        }
    }

    /// Send a request and copy the raw success body into `writer`.
    pub async fn execute_raw<W: std::io::Write>(
        &self,
        req: Request,
        writer: &mut W,
    ) -> Result<Response> {
        let response = self.execute(req).await?;
        if let Err(source) = writer.write_all(response.body()) {
            return Err(ClientError::Io {
                source,
                response: Box::new(response),
            });
        }
        Ok(response)
    }

    /// Authenticate, send once, and read the whole body.
    async fn send(&self, mut req: Request) -> Result<Response> {
        self.authenticate(&mut req)?;

        let method = req.method().clone();
        tracing::debug!(%method, url = %req.url(), "sending Kibana request");

        let resp = self.http.execute(req).await?;
        let url = resp.url().clone();
        let status = resp.status();
        let version = resp.version();
        let headers = resp.headers().clone();

        match resp.bytes().await {
            Ok(body) => {
                tracing::debug!(
                    %method,
                    %url,
                    status = status.as_u16(),
                    len = body.len(),
                    "received Kibana response"
                );
                Ok(Response::new(method, url, status, version, headers, body))
            }
            Err(source) => Err(ClientError::Body {
                source,
                response: Box::new(Response::new(
                    method,
                    url,
                    status,
                    version,
                    headers,
                    Default::default(),
                )),
            }),
        }
    }
}
