//! Server logging configuration operations

use crate::dispatch::{done, text, StatusTable};
use crate::ops::data_envelope;
use crate::transport::Transport;
use nexus_error::{Error, Result};
use std::sync::Arc;

const LEVELS: [&str; 3] = ["INFO", "DEBUG", "ERROR"];

/// Remote operations over the server's logging configuration.
pub struct Logging {
    transport: Arc<dyn Transport>,
}

impl Logging {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch the current logging configuration, verbatim.
    pub async fn info(&self) -> Result<String> {
        self.transport
            .get("service/local/log/config")
            .await
            .and_then(|r| StatusTable::new().on_value(200, text).resolve(r))
            .map_err(|e| e.with_operation("logging::info"))
    }

    /// Set the root logger level. Accepts INFO, DEBUG, or ERROR in any case;
    /// anything else is rejected before a request is issued.
    pub async fn set_level(&self, level: &str) -> Result<bool> {
        let level = level.to_uppercase();
        if !LEVELS.contains(&level.as_str()) {
            return Err(Error::invalid_logging_level()
                .with_operation("logging::set_level")
                .with_context("level", level));
        }

        let params = serde_json::json!({"rootLoggerLevel": level});
        self.transport
            .put("service/local/log/config", Some(data_envelope(params)))
            .await
            .and_then(|r| StatusTable::new().on_value(200, done).resolve(r))
            .map_err(|e| e.with_operation("logging::set_level"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::stub::StubTransport;
    use nexus_error::ErrorKind;

    #[tokio::test]
    async fn test_info() {
        let module = Logging::new(Arc::new(StubTransport::new().respond(200, "<config/>")));
        assert_eq!(module.info().await.unwrap(), "<config/>");
    }

    #[tokio::test]
    async fn test_set_level_normalizes_case() {
        let transport = Arc::new(StubTransport::new().respond(200, ""));
        let module = Logging::new(transport.clone());

        assert!(module.set_level("debug").await.unwrap());

        let body = transport.requests()[0].body.clone().unwrap();
        let sent: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(sent["data"]["rootLoggerLevel"], "DEBUG");
    }

    #[tokio::test]
    async fn test_invalid_level_never_touches_the_wire() {
        let transport = Arc::new(StubTransport::new());
        let module = Logging::new(transport.clone());

        let err = module.set_level("TRACE").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLoggingLevel);
        assert!(transport.requests().is_empty());
    }
}
