//! User management operations

use crate::dispatch::{done, json, text, StatusTable};
use crate::ops::data_envelope;
use crate::transport::Transport;
use nexus_error::{Error, Result};
use std::sync::Arc;

/// Remote operations over the server's users.
pub struct Users {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Users {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Users").finish_non_exhaustive()
    }
}

impl Users {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// List all users, verbatim.
    pub async fn list(&self) -> Result<String> {
        self.transport
            .get("service/local/users")
            .await
            .and_then(|r| StatusTable::new().on_value(200, text).resolve(r))
            .map_err(|e| e.with_operation("users::list"))
    }

    /// Fetch one user by id, parsed as JSON.
    pub async fn get(&self, id: &str) -> Result<serde_json::Value> {
        let path = format!("service/local/users/{}", id);
        let id = id.to_string();
        self.transport
            .get(&path)
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(200, json)
                    .on_error(404, move |_| Error::user_not_found(id))
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("users::get"))
    }

    /// Create a user from the given parameters.
    pub async fn create(&self, params: serde_json::Value) -> Result<bool> {
        self.transport
            .post("service/local/users", Some(data_envelope(params)))
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(201, done)
                    .on_error(400, Error::create_user_failed)
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("users::create"))
    }

    /// Update an existing user. `params` must carry the `userId` being
    /// updated alongside the fields to change.
    pub async fn update(&self, params: serde_json::Value) -> Result<bool> {
        let id = params
            .get("userId")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        self.transport
            .put("service/local/users", Some(data_envelope(params)))
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(200, done)
                    .on_error(400, Error::update_user_failed)
                    .on_error(404, move |_| Error::user_not_found(id))
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("users::update"))
    }

    /// Delete the user with the given id.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let path = format!("service/local/users/{}", id);
        let id = id.to_string();
        self.transport
            .delete(&path)
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(204, done)
                    .on_error(404, move |_| Error::user_not_found(id))
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("users::delete"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::stub::StubTransport;
    use nexus_error::ErrorKind;

    fn users(stub: StubTransport) -> Users {
        Users::new(Arc::new(stub))
    }

    #[tokio::test]
    async fn test_get_parses_json() {
        let module = users(StubTransport::new().respond(200, r#"{"userId": "deployer"}"#));
        let user = module.get("deployer").await.unwrap();
        assert_eq!(user["userId"], "deployer");
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let module = users(StubTransport::new().respond(404, ""));
        let err = module.get("ghost").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UserNotFound);
        assert!(err.message().contains("ghost"));
    }

    #[tokio::test]
    async fn test_update_status_space() {
        let module = users(StubTransport::new().respond(200, ""));
        let params = serde_json::json!({"userId": "deployer", "email": "d@example.com"});
        assert!(module.update(params.clone()).await.unwrap());

        let module = users(StubTransport::new().respond(400, r#"{"errors":["bad email"]}"#));
        let err = module.update(params.clone()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpdateUserFailed);
        assert!(err.message().contains("bad email"));

        let module = users(StubTransport::new().respond(404, ""));
        let err = module.update(params).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UserNotFound);
        assert!(err.message().contains("deployer"));
    }

    #[tokio::test]
    async fn test_update_uses_put_with_envelope() {
        let transport = Arc::new(StubTransport::new().respond(200, ""));
        let module = Users::new(transport.clone());

        let params = serde_json::json!({"userId": "deployer"});
        module.update(params.clone()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, "PUT");
        let sent: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(sent["data"], params);
    }

    #[tokio::test]
    async fn test_create_and_delete() {
        let module = users(StubTransport::new().respond(201, ""));
        assert!(module.create(serde_json::json!({"userId": "new"})).await.unwrap());

        let module = users(StubTransport::new().respond(204, ""));
        assert!(module.delete("old").await.unwrap());

        let module = users(StubTransport::new().respond(500, ""));
        assert_eq!(
            module.delete("old").await.unwrap_err().kind(),
            ErrorKind::UnexpectedStatus
        );
    }
}
