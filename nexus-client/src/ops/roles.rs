//! Role management operations

use crate::dispatch::{done, json, text, StatusTable};
use crate::ops::data_envelope;
use crate::transport::Transport;
use nexus_error::{Error, Result};
use std::sync::Arc;

/// Remote operations over the server's roles.
pub struct Roles {
    transport: Arc<dyn Transport>,
}

impl Roles {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// List all roles. The server answers with its native listing document,
    /// returned verbatim.
    pub async fn list(&self) -> Result<String> {
        self.transport
            .get("service/local/roles")
            .await
            .and_then(|r| StatusTable::new().on_value(200, text).resolve(r))
            .map_err(|e| e.with_operation("roles::list"))
    }

    /// Fetch one role by id, parsed as JSON.
    pub async fn get(&self, id: &str) -> Result<serde_json::Value> {
        let path = format!("service/local/roles/{}", id);
        let id = id.to_string();
        self.transport
            .get(&path)
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(200, json)
                    .on_error(404, move |_| Error::role_not_found(id))
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("roles::get"))
    }

    /// Create a role from the given parameters.
    pub async fn create(&self, params: serde_json::Value) -> Result<bool> {
        self.transport
            .post("service/local/roles", Some(data_envelope(params)))
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(201, done)
                    .on_error(400, Error::create_role_failed)
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("roles::create"))
    }

    /// Delete the role with the given id.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let path = format!("service/local/roles/{}", id);
        let id = id.to_string();
        self.transport
            .delete(&path)
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(204, done)
                    .on_error(404, move |_| Error::role_not_found(id))
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("roles::delete"))
    }
}
