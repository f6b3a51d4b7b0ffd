//! Response envelope, API error type and error message extraction.

use bytes::Bytes;
use itertools::Itertools;
use percent_encoding::percent_decode_str;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Version};
use serde_json::Value;
use url::Url;

/// Message used when an error body is not valid JSON.
pub const UNKNOWN_ERROR_FORMAT: &str = "failed to parse unknown error format";

/// A Kibana API response.
///
/// Wraps the transport-level metadata of the HTTP exchange together with the
/// raw body bytes, so callers can inspect status and headers next to the
/// decoded entity or error.
#[derive(Debug, Clone)]
pub struct Response {
    method: Method,
    url: Url,
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    pub(crate) fn new(
        method: Method,
        url: Url,
        status: StatusCode,
        version: Version,
        headers: HeaderMap,
        body: Bytes,
    ) -> Self {
        Self {
            method,
            url,
            status,
            version,
            headers,
            body,
        }
    }

    /// Method of the request that produced this response.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Final URL of the response, after redirects.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Numeric status code.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw response body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Response body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// An error reported by the Kibana API through a non-success status code.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    /// Raw error body as returned by Kibana
    pub body: Bytes,

    /// The response the error was read from
    pub response: Response,

    /// Human-readable message derived from the body
    pub message: String,
}

impl ErrorResponse {
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let url = self.response.url();
        let path = percent_decode_str(url.path()).decode_utf8_lossy();
        let host = match url.port() {
            Some(port) => format!("{}:{}", url.host_str().unwrap_or_default(), port),
            None => url.host_str().unwrap_or_default().to_string(),
        };
        write!(
            f,
            "{} {}://{}{}: {} {}",
            self.response.method(),
            url.scheme(),
            host,
            path,
            self.response.status_code(),
            self.message
        )
    }
}

impl std::error::Error for ErrorResponse {}

/// Whether `status` counts as success for the Kibana API.
pub fn is_success(status: StatusCode) -> bool {
    matches!(status.as_u16(), 200 | 201 | 202 | 204 | 304)
}

/// Check the response for an API error.
///
/// Returns the response unchanged for 200, 201, 202, 204 and 304; every other
/// status becomes an [`ErrorResponse`] carrying a message parsed from the body.
pub fn check_response(response: Response) -> Result<Response, ErrorResponse> {
    if is_success(response.status()) {
        return Ok(response);
    }

    Err(ErrorResponse {
        body: response.body().clone(),
        message: error_message(response.body()),
        response,
    })
}

/// Derive the error message from a raw error body.
///
/// Kibana errors look like
/// `{"statusCode":401,"error":"Unauthorized","message":"..."}`; when the body
/// is an object with a `message` field only that field is parsed.
pub fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Err(_) => UNKNOWN_ERROR_FORMAT.to_string(),
        Ok(Value::Object(map)) => match map.get("message") {
            Some(message) => parse_error(message),
            None => parse_error(&Value::Object(map)),
        },
        Ok(raw) => parse_error(&raw),
    }
}

/// Flatten an arbitrary JSON error value into a single string.
///
/// Strings are returned as is, arrays become `[a, b]` and objects become
/// `{key: value}` pairs sorted lexicographically and joined with `, `.
pub fn parse_error(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Array(values) => format!("[{}]", values.iter().map(parse_error).join(", ")),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{{{}: {}}}", k, parse_error(v)))
            .sorted()
            .join(", "),
        other => format!(
            "failed to parse unexpected error type: {}",
            json_type_name(other)
        ),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(method: Method, url: &str, status: u16, body: &'static str) -> Response {
        Response::new(
            method,
            Url::parse(url).unwrap(),
            StatusCode::from_u16(status).unwrap(),
            Version::HTTP_11,
            HeaderMap::new(),
            Bytes::from_static(body.as_bytes()),
        )
    }

    #[test]
    fn test_parse_error_string() {
        assert_eq!(parse_error(&json!("boom")), "boom");
    }

    #[test]
    fn test_parse_error_list() {
        assert_eq!(parse_error(&json!(["x", "y"])), "[x, y]");
    }

    #[test]
    fn test_parse_error_object_is_sorted() {
        let raw: Value = serde_json::from_str(r#"{"b":"y","a":"x"}"#).unwrap();
        assert_eq!(parse_error(&raw), "{a: x}, {b: y}");
    }

    #[test]
    fn test_parse_error_nested() {
        let raw = json!({"name": ["too short", "invalid"], "id": {"reason": "taken"}});
        assert_eq!(
            parse_error(&raw),
            "{id: {reason: taken}}, {name: [too short, invalid]}"
        );
    }

    #[test]
    fn test_parse_error_unexpected_types() {
        assert_eq!(
            parse_error(&json!(42)),
            "failed to parse unexpected error type: number"
        );
        assert_eq!(
            parse_error(&json!(true)),
            "failed to parse unexpected error type: boolean"
        );
        assert_eq!(
            parse_error(&Value::Null),
            "failed to parse unexpected error type: null"
        );
        assert_eq!(
            parse_error(&json!(["ok", 1])),
            "[ok, failed to parse unexpected error type: number]"
        );
    }

    #[test]
    fn test_error_message_prefers_message_field() {
        let body = br#"{"statusCode":404,"error":"Not Found","message":"Saved object [space/s1] not found"}"#;
        assert_eq!(error_message(body), "Saved object [space/s1] not found");
    }

    #[test]
    fn test_error_message_without_message_field() {
        assert_eq!(error_message(br#"{"error":"Bad"}"#), "{error: Bad}");
        assert_eq!(error_message(br#"["a","b"]"#), "[a, b]");
    }

    #[test]
    fn test_error_message_unknown_format() {
        assert_eq!(error_message(b"<html>502</html>"), UNKNOWN_ERROR_FORMAT);
        assert_eq!(error_message(b""), UNKNOWN_ERROR_FORMAT);
    }

    #[test]
    fn test_success_statuses() {
        for code in [200, 201, 202, 204, 304] {
            assert!(is_success(StatusCode::from_u16(code).unwrap()), "{code}");
        }
        for code in [203, 206, 301, 302, 400, 401, 403, 404, 409, 500, 503] {
            assert!(!is_success(StatusCode::from_u16(code).unwrap()), "{code}");
        }
    }

    #[test]
    fn test_check_response_builds_error() {
        let resp = response(
            Method::GET,
            "http://localhost:5601/api/spaces/space/a%20b",
            404,
            r#"{"statusCode":404,"error":"Not Found","message":"Not Found"}"#,
        );
        let err = check_response(resp).unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Not Found");
        assert_eq!(
            err.to_string(),
            "GET http://localhost:5601/api/spaces/space/a b: 404 Not Found"
        );
    }

    #[test]
    fn test_check_response_passes_success() {
        let resp = response(Method::DELETE, "http://host/api/x", 204, "");
        let resp = check_response(resp).unwrap();
        assert_eq!(resp.status_code(), 204);
        assert!(resp.body().is_empty());
    }
}
