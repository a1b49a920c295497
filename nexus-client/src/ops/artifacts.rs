//! Artifact lookup and search operations
//!
//! Artifact identifiers are validated client-side before anything touches the
//! wire: a malformed coordinate string never becomes a request.

use crate::dispatch::{text, StatusTable};
use crate::transport::Transport;
use nexus_error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A fully-qualified artifact identifier:
/// `group:artifact:version:extension`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub extension: String,
}

impl FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 4 || parts.iter().any(|p| p.is_empty()) {
            return Err(Error::artifact_malformed().with_context("input", s));
        }
        Ok(Self {
            group_id: parts[0].to_string(),
            artifact_id: parts[1].to_string(),
            version: parts[2].to_string(),
            extension: parts[3].to_string(),
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.version, self.extension
        )
    }
}

/// Remote operations over artifacts held in a repository.
pub struct Artifacts {
    transport: Arc<dyn Transport>,
}

impl Artifacts {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Resolve an artifact's metadata document from the given repository.
    ///
    /// A 503 here means the repository backend itself is unreachable, which
    /// callers treat the same as a failed connection.
    pub async fn info(&self, repository: &str, coordinates: &Coordinates) -> Result<String> {
        let path = format!(
            "service/local/artifact/maven/resolve?r={}&g={}&a={}&v={}&e={}",
            repository,
            coordinates.group_id,
            coordinates.artifact_id,
            coordinates.version,
            coordinates.extension
        );
        self.transport
            .get(&path)
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(200, text)
                    .on_error(404, |_| Error::artifact_not_found())
                    .on_error(503, |_| Error::connection_failed())
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("artifacts::info"))
    }

    /// Search the index for artifacts matching a group and artifact id.
    pub async fn search(&self, group_id: &str, artifact_id: &str) -> Result<String> {
        let path = format!(
            "service/local/data_index?g={}&a={}",
            group_id, artifact_id
        );
        self.transport
            .get(&path)
            .await
            .and_then(|r| StatusTable::new().on_value(200, text).resolve(r))
            .map_err(|e| e.with_operation("artifacts::search"))
    }
}
