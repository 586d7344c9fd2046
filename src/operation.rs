use reqwest::Method;
use serde::Serialize;

use crate::{GenZError, Result};

/// One logical call against the ledger API.
///
/// The body, when present, is opaque JSON text: the executor attaches it
/// verbatim and never parses it.
#[derive(Clone, Debug)]
pub struct Operation {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the client's base URL, starting with `/`.
    ///
    /// Segments holding user-controlled data must already be percent-encoded.
    pub path: String,
    /// Optional JSON body text.
    pub body_json: Option<String>,
}

impl Operation {
    /// Builds a bodiless GET operation.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body_json: None,
        }
    }

    /// Builds a POST operation, encoding the payload with `serde_json`.
    pub fn post_json<T: Serialize>(path: impl Into<String>, payload: &T) -> Result<Self> {
        let body = serde_json::to_string(payload)
            .map_err(|err| GenZError::InvalidRequest(format!("unserializable payload: {err}")))?;
        Ok(Self {
            method: Method::POST,
            path: path.into(),
            body_json: Some(body),
        })
    }

    /// Builds a POST operation from pre-encoded JSON text.
    ///
    /// The text is attached as-is; the caller is responsible for its
    /// validity.
    pub fn post_raw(path: impl Into<String>, body_json: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body_json: Some(body_json.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde::Serialize;

    use super::Operation;

    #[derive(Serialize)]
    struct Payload {
        name: &'static str,
    }

    #[test]
    fn get_has_no_body() {
        let op = Operation::get("/v1/health");
        assert_eq!(op.method, Method::GET);
        assert_eq!(op.path, "/v1/health");
        assert!(op.body_json.is_none());
    }

    #[test]
    fn post_json_encodes_payload() {
        let op = Operation::post_json("/v1/things", &Payload { name: "kit" })
            .expect("payload must serialize");
        assert_eq!(op.method, Method::POST);
        assert_eq!(op.body_json.as_deref(), Some(r#"{"name":"kit"}"#));
    }

    #[test]
    fn post_raw_passes_body_through() {
        let op = Operation::post_raw("/v1/things", r#"{"already":"encoded"}"#);
        assert_eq!(op.body_json.as_deref(), Some(r#"{"already":"encoded"}"#));
    }
}
