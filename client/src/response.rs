//! Response classification.
//!
//! Turns an [`ApiResponse`] into either a [`Lookup`] or a [`ClientError`]:
//!
//! | Status | Body | Outcome |
//! |---|---|---|
//! | 2xx | empty | `Lookup::Absent` |
//! | 2xx | JSON | `Lookup::Found(T)` |
//! | 401 | `Missing permissions: [..]` | `ClientError::PermissionDenied` |
//! | 401 | anything else | `ClientError::InvalidToken` |
//! | 404 | anything | `Lookup::Absent` |
//! | other | anything | `ClientError::Status` |

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::transport::ApiResponse;

const MISSING_PERMISSIONS: &str = "Missing permissions";

/// Outcome of a call that reached the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The service returned a value.
    Found(T),
    /// The resource does not exist or the body was empty.
    Absent,
}

impl<T> Lookup<T> {
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Absent => None,
        }
    }

    pub const fn as_ref(&self) -> Lookup<&T> {
        match self {
            Self::Found(value) => Lookup::Found(value),
            Self::Absent => Lookup::Absent,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(f(value)),
            Self::Absent => Lookup::Absent,
        }
    }
}

impl<T> From<Lookup<T>> for Option<T> {
    fn from(lookup: Lookup<T>) -> Self {
        lookup.into_option()
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Found)
    }
}

/// Decode a response into a [`Lookup`], or the error its status stands for.
pub fn classify<T: DeserializeOwned>(response: ApiResponse) -> ClientResult<Lookup<T>> {
    if response.status.is_success() {
        if response.body.trim().is_empty() {
            return Ok(Lookup::Absent);
        }
        return serde_json::from_str(&response.body)
            .map(Lookup::Found)
            .map_err(ClientError::Decode);
    }

    if response.status == StatusCode::NOT_FOUND {
        return Ok(Lookup::Absent);
    }

    Err(failure(response))
}

/// `true` on 2xx, `false` on 404, otherwise the error the status stands for.
pub fn presence(response: ApiResponse) -> ClientResult<bool> {
    if response.status.is_success() {
        return Ok(true);
    }
    if response.status == StatusCode::NOT_FOUND {
        return Ok(false);
    }
    Err(failure(response))
}

/// Map a non-success, non-404 response to an error.
fn failure(response: ApiResponse) -> ClientError {
    if response.status == StatusCode::UNAUTHORIZED {
        let message = error_message(&response.body);
        return match parse_missing(&message) {
            Some(missing) => ClientError::PermissionDenied { missing },
            None => ClientError::InvalidToken,
        };
    }

    ClientError::Status {
        status: response.status,
        body: response.body,
    }
}

/// Human-readable message carried by an error body.
///
/// Accepts a JSON string, a JSON object with `message` or `error`, or plain text.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(message)) => message,
        Ok(Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map_or_else(|| body.trim().to_string(), str::to_string),
        _ => body.trim().to_string(),
    }
}

/// Flags listed in a `Missing permissions: [a.b, c.d]` message.
pub fn parse_missing(message: &str) -> Option<Vec<String>> {
    let rest = message.trim_start().strip_prefix(MISSING_PERMISSIONS)?;
    if rest
        .chars()
        .next()
        .is_some_and(|c| c != ':' && !c.is_whitespace())
    {
        return None;
    }

    let Some((_, list)) = rest.split_once('[') else {
        return Some(Vec::new());
    };
    let list = list.split_once(']').map_or(list, |(inner, _)| inner);

    Some(
        list.split(',')
            .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(StatusCode::from_u16(status).unwrap(), body)
    }

    #[test]
    fn test_success_with_body_is_found() {
        let lookup: Lookup<Item> = classify(response(200, r#"{"name":"admin"}"#)).unwrap();
        assert_eq!(
            lookup,
            Lookup::Found(Item {
                name: "admin".into()
            })
        );
    }

    #[test]
    fn test_success_with_empty_body_is_absent() {
        for body in ["", "   ", "\n"] {
            let lookup: Lookup<Item> = classify(response(200, body)).unwrap();
            assert!(lookup.is_absent());
        }
        let lookup: Lookup<Item> = classify(response(204, "")).unwrap();
        assert!(lookup.is_absent());
    }

    #[test]
    fn test_success_with_wrong_shape_is_decode_error() {
        let err = classify::<Item>(response(200, r#"{"title":"x"}"#)).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_not_found_is_absent_regardless_of_body() {
        for body in ["", "Not found", r#"{"error":"User not found"}"#] {
            let lookup: Lookup<Item> = classify(response(404, body)).unwrap();
            assert!(lookup.is_absent(), "404 with body {body:?}");
        }
    }

    #[test]
    fn test_unauthorized_missing_permissions() {
        for body in [
            "Missing permissions: [ciam.user.get]",
            r#""Missing permissions: [ciam.user.get]""#,
            r#"{"message":"Missing permissions: [ciam.user.get]"}"#,
        ] {
            let err = classify::<Item>(response(401, body)).unwrap_err();
            match err {
                ClientError::PermissionDenied { missing } => {
                    assert_eq!(missing, vec!["ciam.user.get".to_string()]);
                }
                other => panic!("expected PermissionDenied for {body:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unauthorized_otherwise_is_invalid_token() {
        for body in ["", "Unauthorized", r#"{"error":"Invalid token"}"#] {
            let err = classify::<Item>(response(401, body)).unwrap_err();
            assert!(matches!(err, ClientError::InvalidToken), "401 with {body:?}");
        }
    }

    #[test]
    fn test_other_status_is_passed_through() {
        let err = classify::<Item>(response(500, "boom")).unwrap_err();
        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Status, got {other:?}"),
        }

        let err = classify::<Item>(response(403, "")).unwrap_err();
        assert!(matches!(err, ClientError::Status { .. }));
    }

    #[test]
    fn test_presence() {
        assert!(presence(response(200, "")).unwrap());
        assert!(!presence(response(404, "User not found")).unwrap());
        assert!(matches!(
            presence(response(401, "")).unwrap_err(),
            ClientError::InvalidToken
        ));
    }

    #[test]
    fn test_parse_missing_lists() {
        assert_eq!(
            parse_missing("Missing permissions: [ciam.user.get, ciam.role.*]"),
            Some(vec!["ciam.user.get".into(), "ciam.role.*".into()])
        );
        assert_eq!(
            parse_missing(r#"Missing permissions: ["a.b","c.d"]"#),
            Some(vec!["a.b".into(), "c.d".into()])
        );
        assert_eq!(parse_missing("Missing permissions: []"), Some(vec![]));
        assert_eq!(parse_missing("Missing permissions"), Some(vec![]));
        assert_eq!(parse_missing("Invalid token"), None);
    }

    #[test]
    fn test_parse_missing_requires_word_boundary() {
        assert_eq!(parse_missing("Missing permissionsX: [a.b]"), None);
        assert_eq!(parse_missing("Missing permissions_list"), None);
        assert_eq!(
            parse_missing("Missing permissions [a.b]"),
            Some(vec!["a.b".into()])
        );

        let err = classify::<Item>(response(401, "Missing permissionsX")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidToken));
    }

    #[test]
    fn test_lookup_conversions() {
        assert_eq!(Lookup::Found(3).map(|n| n * 2), Lookup::Found(6));
        assert_eq!(Option::<i32>::from(Lookup::Absent), None);
        assert_eq!(Lookup::from(Some("x")).into_option(), Some("x"));
        assert!(Lookup::<i32>::from(None).is_absent());
    }
}
