//! HTTP plumbing shared by every Kibana operation.
//!
//! This module provides HTTP client construction, base URL normalization,
//! body/query encoding and the per-request customization hook.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Request};
use serde::Serialize;
use url::Url;

use crate::client::ClientError;
use crate::options::{Credential, TransportOptions};

/// Fixed API path segment every base URL ends with.
pub const API_PATH: &str = "api/";

/// Anti-CSRF header Kibana requires on state-changing calls.
pub const KBN_XSRF: &str = "kbn-xsrf";

/// Boxed error returned by request customizers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// Characters escaped when an identifier is placed into a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Build a configured HTTP client from transport options.
///
/// # Example
/// ```ignore
/// let client = build_http_client(&transport_options)?;
/// ```
pub fn build_http_client(transport_options: &TransportOptions) -> Result<Client, ClientError> {
    let mut builder = Client::builder();

    if let Some(timeout) = transport_options.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(proxy_url) = &transport_options.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| ClientError::Config(format!("invalid proxy {proxy_url:?}: {e}")))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))
}

/// Normalize a base URL so that it ends with a slash and with `api/`.
///
/// `http://host` and `http://host/` both become `http://host/api/`.
pub fn normalize_base_url(url: &str) -> Result<Url, ClientError> {
    let mut url_str = url.to_string();
    if !url_str.ends_with('/') {
        url_str.push('/');
    }

    let mut base_url = Url::parse(&url_str)?;
    if !base_url.path().ends_with(API_PATH) {
        let path = format!("{}{}", base_url.path(), API_PATH);
        base_url.set_path(&path);
    }

    Ok(base_url)
}

/// Check that every percent escape in `path` is well formed and decodes to UTF-8.
pub fn validate_path(path: &str) -> Result<(), ClientError> {
    let invalid = |reason: String| ClientError::InvalidPath {
        path: path.to_string(),
        reason,
    };

    let bytes = path.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape_ok = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(|b| b.is_ascii_hexdigit()));
            if !escape_ok {
                return Err(invalid(format!("invalid escape at byte {i}")));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(path)
        .decode_utf8()
        .map_err(|e| invalid(e.to_string()))?;
    Ok(())
}

/// Resolve a relative path (no leading slash) against the base URL by concatenation.
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ClientError> {
    validate_path(path)?;

    let mut url = base_url.clone();
    url.set_path(&format!("{}{}", base_url.path(), path));
    Ok(url)
}

/// Escape an identifier so it occupies exactly one path segment.
///
/// Empty identifiers and the dot segments `.` and `..` are rejected: URL
/// normalization would drop or collapse them and move the request to
/// another endpoint.
pub fn encode_segment(segment: &str) -> Result<String, ClientError> {
    if matches!(segment, "" | "." | "..") {
        return Err(ClientError::InvalidPath {
            path: segment.to_string(),
            reason: "identifier must be a non-empty name other than `.` or `..`".to_string(),
        });
    }
    Ok(utf8_percent_encode(segment, PATH_SEGMENT).to_string())
}

/// JSON-encode an options value for a request body.
pub fn encode_json<T: Serialize + ?Sized>(opt: &T) -> Result<Vec<u8>, ClientError> {
    serde_json::to_vec(opt).map_err(ClientError::Encode)
}

/// URL-encode an options value as a query string.
pub fn encode_query<T: Serialize + ?Sized>(opt: &T) -> Result<String, ClientError> {
    Ok(serde_urlencoded::to_string(opt)?)
}

/// Set the `Authorization` header from `credential` unless one is already present.
pub fn authenticate(request: &mut Request, credential: &Credential) -> Result<(), ClientError> {
    if request.headers().contains_key(AUTHORIZATION) {
        return Ok(());
    }

    let mut value = HeaderValue::from_str(&credential.authorization())?;
    value.set_sensitive(true);
    request.headers_mut().insert(AUTHORIZATION, value);
    Ok(())
}

type RequestOptionFn = dyn Fn(&mut Request) -> Result<(), BoxError> + Send + Sync;

/// A customization applied to a request after it has been built.
///
/// Options run in the order given; the first failure aborts the request
/// before anything is sent.
///
/// # Example
/// ```rust
/// use kibana_api::http::RequestOption;
///
/// let options = [
///     RequestOption::space("marketing"),
///     RequestOption::header("x-opaque-id", "audit-42"),
/// ];
/// ```
pub struct RequestOption(Box<RequestOptionFn>);

impl RequestOption {
    /// Wrap an arbitrary request transformation.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Request) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self(Box::new(f))
    }

    /// Set a header, replacing any existing value.
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        Self::new(move |req| {
            let name = HeaderName::try_from(name.as_str())?;
            let value = HeaderValue::try_from(value.as_str())?;
            req.headers_mut().insert(name, value);
            Ok(())
        })
    }

    /// Authenticate this request with basic auth instead of the client credential.
    pub fn basic_auth(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::credential(Credential::basic_auth(username.into(), password.into()))
    }

    /// Authenticate this request with an API key instead of the client credential.
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::credential(Credential::api_key(key.into()))
    }

    fn credential(credential: Credential) -> Self {
        Self::new(move |req| {
            let mut value = HeaderValue::from_str(&credential.authorization())?;
            value.set_sensitive(true);
            req.headers_mut().insert(AUTHORIZATION, value);
            Ok(())
        })
    }

    /// Target a non-default space by rewriting `/api/...` to `/s/{space_id}/api/...`.
    pub fn space(space_id: impl Into<String>) -> Self {
        let space_id = space_id.into();
        Self::new(move |req| {
            let segment = encode_segment(&space_id)?;
            let path = req.url().path().to_string();
            let idx = path
                .find("/api/")
                .ok_or_else(|| format!("request path {path:?} has no /api/ segment"))?;
            let scoped = format!(
                "{}/s/{}{}",
                &path[..idx],
                segment,
                &path[idx..]
            );
            req.url_mut().set_path(&scoped);
            Ok(())
        })
    }

    pub(crate) fn apply(&self, request: &mut Request) -> Result<(), ClientError> {
        (self.0)(request).map_err(ClientError::RequestOption)
    }
}

impl std::fmt::Debug for RequestOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RequestOption(..)")
    }
}
