//! Repository management operations

use crate::dispatch::{done, json, text, StatusTable};
use crate::ops::data_envelope;
use crate::transport::Transport;
use nexus_error::{Error, Result};
use std::sync::Arc;

/// Remote operations over the server's hosted repositories.
pub struct Repositories {
    transport: Arc<dyn Transport>,
}

impl Repositories {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// List all repositories, verbatim.
    pub async fn list(&self) -> Result<String> {
        self.transport
            .get("service/local/repositories")
            .await
            .and_then(|r| StatusTable::new().on_value(200, text).resolve(r))
            .map_err(|e| e.with_operation("repositories::list"))
    }

    /// Fetch one repository's definition by id, parsed as JSON.
    pub async fn get(&self, id: &str) -> Result<serde_json::Value> {
        let path = format!("service/local/repositories/{}", id);
        let id = id.to_string();
        self.transport
            .get(&path)
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(200, json)
                    .on_error(404, move |_| Error::repository_not_found(id))
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("repositories::get"))
    }

    /// Create a repository from the given parameters.
    pub async fn create(&self, params: serde_json::Value) -> Result<bool> {
        self.transport
            .post("service/local/repositories", Some(data_envelope(params)))
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(201, done)
                    .on_error(400, Error::create_repository_failed)
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("repositories::create"))
    }

    /// Delete the repository with the given id.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let path = format!("service/local/repositories/{}", id);
        let id = id.to_string();
        self.transport
            .delete(&path)
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(204, done)
                    .on_error(404, move |_| Error::repository_does_not_exist(id))
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("repositories::delete"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::stub::StubTransport;
    use nexus_error::ErrorKind;

    fn repositories(stub: StubTransport) -> Repositories {
        Repositories::new(Arc::new(stub))
    }

    #[tokio::test]
    async fn test_get() {
        let module = repositories(StubTransport::new().respond(200, r#"{"id": "releases"}"#));
        assert_eq!(module.get("releases").await.unwrap()["id"], "releases");

        let module = repositories(StubTransport::new().respond(404, ""));
        assert_eq!(
            module.get("releases").await.unwrap_err().kind(),
            ErrorKind::RepositoryNotFound
        );
    }

    #[tokio::test]
    async fn test_create_rejection() {
        let module =
            repositories(StubTransport::new().respond(400, r#"{"errors":["id taken"]}"#));
        let err = module.create(serde_json::json!({"id": "releases"})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CreateRepositoryFailed);
        assert!(err.message().contains("id taken"));
    }

    #[tokio::test]
    async fn test_delete_missing_uses_does_not_exist_kind() {
        // Deleting a missing repository is its own kind (113), distinct from
        // the lookup kind (114).
        let module = repositories(StubTransport::new().respond(404, ""));
        let err = module.delete("releases").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RepositoryDoesNotExist);
        assert_eq!(err.code(), 113);
    }

    #[tokio::test]
    async fn test_delete() {
        let module = repositories(StubTransport::new().respond(204, ""));
        assert!(module.delete("releases").await.unwrap());
    }
}
