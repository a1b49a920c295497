//! Privilege management operations

use crate::dispatch::{done, json, text, StatusTable};
use crate::ops::data_envelope;
use crate::transport::Transport;
use nexus_error::{Error, Result};
use std::sync::Arc;

/// Remote operations over the server's privileges.
pub struct Privileges {
    transport: Arc<dyn Transport>,
}

impl Privileges {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// List all privileges, verbatim.
    pub async fn list(&self) -> Result<String> {
        self.transport
            .get("service/local/privileges")
            .await
            .and_then(|r| StatusTable::new().on_value(200, text).resolve(r))
            .map_err(|e| e.with_operation("privileges::list"))
    }

    /// List the privilege types the server knows about.
    pub async fn list_types(&self) -> Result<String> {
        self.transport
            .get("service/local/privilege_types")
            .await
            .and_then(|r| StatusTable::new().on_value(200, text).resolve(r))
            .map_err(|e| e.with_operation("privileges::list_types"))
    }

    /// Fetch one privilege by id, parsed as JSON.
    pub async fn get(&self, id: &str) -> Result<serde_json::Value> {
        let path = format!("service/local/privileges/{}", id);
        let id = id.to_string();
        self.transport
            .get(&path)
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(200, json)
                    .on_error(404, move |_| Error::privilege_not_found(id))
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("privileges::get"))
    }

    /// Create a repository-target privilege from the given parameters.
    pub async fn create(&self, params: serde_json::Value) -> Result<bool> {
        self.transport
            .post("service/local/privileges_target", Some(data_envelope(params)))
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(201, done)
                    .on_error(400, Error::create_privilege_failed)
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("privileges::create"))
    }

    /// Delete the privilege with the given id.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let path = format!("service/local/privileges/{}", id);
        let id = id.to_string();
        self.transport
            .delete(&path)
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(204, done)
                    .on_error(404, move |_| Error::privilege_not_found(id))
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("privileges::delete"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::stub::StubTransport;
    use nexus_error::ErrorKind;

    fn privileges(stub: StubTransport) -> Privileges {
        Privileges::new(Arc::new(stub))
    }

    #[tokio::test]
    async fn test_list_and_types_return_raw_bodies() {
        let module = privileges(StubTransport::new().respond(200, "<privileges/>"));
        assert_eq!(module.list().await.unwrap(), "<privileges/>");

        let module = privileges(StubTransport::new().respond(200, "<types/>"));
        assert_eq!(module.list_types().await.unwrap(), "<types/>");
    }

    #[tokio::test]
    async fn test_create_targets_the_target_endpoint() {
        let transport = Arc::new(StubTransport::new().respond(201, ""));
        let module = Privileges::new(transport.clone());

        module.create(serde_json::json!({"name": "deploy"})).await.unwrap();
        assert_eq!(transport.requests()[0].path, "service/local/privileges_target");
    }

    #[tokio::test]
    async fn test_get_missing_privilege() {
        let module = privileges(StubTransport::new().respond(404, ""));
        let err = module.get("1000a1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PrivilegeNotFound);
        assert!(err.message().contains("1000a1"));
    }

    #[tokio::test]
    async fn test_create_rejection() {
        let module = privileges(StubTransport::new().respond(400, r#"{"errors":["no target"]}"#));
        let err = module.create(serde_json::json!({})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CreatePrivilegeFailed);
        assert!(err.message().contains("no target"));
    }

    #[tokio::test]
    async fn test_delete() {
        let module = privileges(StubTransport::new().respond(204, ""));
        assert!(module.delete("1000a1").await.unwrap());

        let module = privileges(StubTransport::new().respond(404, ""));
        assert_eq!(
            module.delete("1000a1").await.unwrap_err().kind(),
            ErrorKind::PrivilegeNotFound
        );
    }
}
