//! # Status dispatch
//!
//! Every remote operation declares a small decision table mapping HTTP status
//! codes to outcomes, then resolves the transport's `{status, body}` pair
//! against it. Centralizing the table shape gives each new operation the same
//! exhaustiveness guarantee for free: an unclaimed status can only ever
//! resolve to `UnexpectedStatus`, so no response leaves the dispatcher
//! unclassified.

use crate::transport::HttpResponse;
use nexus_error::{Error, Result};
use serde::de::DeserializeOwned;

enum Arm<T> {
    Value(Box<dyn FnOnce(String) -> Result<T> + Send>),
    Fail(Box<dyn FnOnce(String) -> Error + Send>),
}

/// A per-operation table of `status -> outcome` arms.
///
/// Arms are consulted in insertion order; the first match wins. Statuses with
/// no arm fall through to the shared defaults: 401 resolves to
/// `InvalidCredentials`, 403 to `PermissionDenied`, and everything else to
/// `UnexpectedStatus` carrying the offending code.
///
/// # Example
///
/// ```ignore
/// StatusTable::new()
///     .on_value(200, json::<Role>)
///     .on_error(404, move |_| Error::role_not_found(&id))
///     .resolve(response)
/// ```
pub struct StatusTable<T> {
    arms: Vec<(u16, Arm<T>)>,
}

impl<T> StatusTable<T> {
    pub fn new() -> Self {
        Self { arms: Vec::new() }
    }

    /// Map a status to a success value produced from the body
    pub fn on_value(
        mut self,
        status: u16,
        transform: impl FnOnce(String) -> Result<T> + Send + 'static,
    ) -> Self {
        self.arms.push((status, Arm::Value(Box::new(transform))));
        self
    }

    /// Map a status to a classified failure built from the body
    pub fn on_error(
        mut self,
        status: u16,
        build: impl FnOnce(String) -> Error + Send + 'static,
    ) -> Self {
        self.arms.push((status, Arm::Fail(Box::new(build))));
        self
    }

    /// Resolve a response to exactly one outcome.
    pub fn resolve(self, response: HttpResponse) -> Result<T> {
        let HttpResponse { status, body } = response;

        for (arm_status, arm) in self.arms {
            if arm_status == status {
                return match arm {
                    Arm::Value(transform) => transform(body),
                    Arm::Fail(build) => Err(build(body)),
                };
            }
        }

        Err(match status {
            401 => Error::invalid_credentials(),
            403 => Error::permission_denied(),
            other => Error::unexpected_status(other),
        })
    }
}

impl<T> Default for StatusTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Body transforms
// ============================================================================

/// The body is the value, verbatim
pub fn text(body: String) -> Result<String> {
    Ok(body)
}

/// The body parses as JSON into `T`; a 2xx that does not parse is still a
/// classified failure, never a panic
pub fn json<T: DeserializeOwned>(body: String) -> Result<T> {
    serde_json::from_str(&body).map_err(|e| Error::malformed_response(e.to_string()))
}

/// No meaningful body; the status alone means the operation succeeded
pub fn done(_body: String) -> Result<bool> {
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_error::ErrorKind;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(status, body)
    }

    #[test]
    fn test_value_arm() {
        let outcome = StatusTable::new()
            .on_value(200, text)
            .resolve(response(200, "role listing"));
        assert_eq!(outcome.unwrap(), "role listing");
    }

    #[test]
    fn test_json_arm() {
        let outcome: Result<serde_json::Value> = StatusTable::new()
            .on_value(200, json)
            .resolve(response(200, r#"{"id": "x"}"#));
        assert_eq!(outcome.unwrap(), serde_json::json!({"id": "x"}));
    }

    #[test]
    fn test_json_arm_with_garbage_body_is_classified() {
        let outcome: Result<serde_json::Value> = StatusTable::new()
            .on_value(200, json)
            .resolve(response(200, "<html>surprise</html>"));
        assert_eq!(outcome.unwrap_err().kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_error_arm_receives_body() {
        let outcome: Result<bool> = StatusTable::new()
            .on_value(201, done)
            .on_error(400, Error::create_role_failed)
            .resolve(response(400, r#"{"errors":["bad"]}"#));

        let err = outcome.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CreateRoleFailed);
        assert!(err.message().contains("bad"));
    }

    #[test]
    fn test_unclaimed_status_is_unexpected() {
        let outcome: Result<String> = StatusTable::new()
            .on_value(200, text)
            .resolve(response(503, ""));

        let err = outcome.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
        assert_eq!(err.context()[0], ("status", "503".to_string()));
    }

    #[test]
    fn test_auth_defaults() {
        let unauthorized: Result<String> =
            StatusTable::new().on_value(200, text).resolve(response(401, ""));
        assert_eq!(
            unauthorized.unwrap_err().kind(),
            ErrorKind::InvalidCredentials
        );

        let forbidden: Result<String> =
            StatusTable::new().on_value(200, text).resolve(response(403, ""));
        assert_eq!(forbidden.unwrap_err().kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_explicit_arm_overrides_default() {
        let outcome: Result<String> = StatusTable::new()
            .on_error(403, |_| Error::feature_unavailable())
            .resolve(response(403, ""));
        assert_eq!(outcome.unwrap_err().kind(), ErrorKind::FeatureUnavailable);
    }

    #[test]
    fn test_every_status_resolves_to_exactly_one_outcome() {
        // Sweep the full wire-observable range; nothing may escape
        // classification and nothing may panic.
        for status in 0u16..=1023 {
            let outcome: Result<bool> = StatusTable::new()
                .on_value(204, done)
                .on_error(404, |_| Error::role_not_found("x"))
                .resolve(response(status, "body"));

            match status {
                204 => assert!(outcome.unwrap()),
                404 => assert_eq!(outcome.unwrap_err().kind(), ErrorKind::RoleNotFound),
                401 => assert_eq!(outcome.unwrap_err().kind(), ErrorKind::InvalidCredentials),
                403 => assert_eq!(outcome.unwrap_err().kind(), ErrorKind::PermissionDenied),
                _ => assert_eq!(outcome.unwrap_err().kind(), ErrorKind::UnexpectedStatus),
            }
        }
    }
}
