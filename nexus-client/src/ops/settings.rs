//! Global settings operations

use crate::dispatch::{done, text, StatusTable};
use crate::transport::Transport;
use nexus_error::{Error, Result};
use std::sync::Arc;

/// Remote operations over the server's global settings document.
pub struct GlobalSettings {
    transport: Arc<dyn Transport>,
}

impl GlobalSettings {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch the current global settings document, verbatim.
    pub async fn current(&self) -> Result<String> {
        self.transport
            .get("service/local/global_settings/current")
            .await
            .and_then(|r| StatusTable::new().on_value(200, text).resolve(r))
            .map_err(|e| e.with_operation("settings::current"))
    }

    /// Upload a replacement global settings document. The body is sent as-is;
    /// the server validates it and answers 400 with its complaints when the
    /// document is malformed.
    pub async fn upload(&self, settings_json: impl Into<String>) -> Result<bool> {
        self.transport
            .put(
                "service/local/global_settings/current",
                Some(settings_json.into()),
            )
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(204, done)
                    .on_error(400, Error::bad_settings)
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("settings::upload"))
    }
}
