//! Custom-metadata (tag) operations - licensed editions only
//!
//! Tags and search terms are validated client-side; malformed input is
//! rejected before any request is issued.

use crate::dispatch::{done, text, StatusTable};
use crate::ops::artifacts::Coordinates;
use crate::ops::data_envelope;
use crate::transport::Transport;
use nexus_error::{Error, Result};
use std::str::FromStr;
use std::sync::Arc;

/// One custom-metadata tag, written `key:value`. The key must be
/// alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl FromStr for Tag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((key, value))
                if !key.is_empty()
                    && !value.is_empty()
                    && key.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                Ok(Self {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
            _ => Err(Error::tag_parameter_malformed().with_context("input", s)),
        }
    }
}

/// One metadata search term, written `key:type:value` where type is one of
/// `equal`, `matches`, `bounded`, or `notequal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    pub key: String,
    pub search_type: String,
    pub value: String,
}

const SEARCH_TYPES: [&str; 4] = ["equal", "matches", "bounded", "notequal"];

impl FromStr for SearchTerm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3
            || parts.iter().any(|p| p.is_empty())
            || !SEARCH_TYPES.contains(&parts[1])
        {
            return Err(Error::search_parameter_malformed().with_context("input", s));
        }
        Ok(Self {
            key: parts[0].to_string(),
            search_type: parts[1].to_string(),
            value: parts[2].to_string(),
        })
    }
}

/// Remote operations over artifact custom metadata.
pub struct CustomMetadata {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for CustomMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomMetadata").finish_non_exhaustive()
    }
}

impl CustomMetadata {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch the custom metadata attached to an artifact, verbatim.
    pub async fn get(&self, repository: &str, coordinates: &Coordinates) -> Result<String> {
        let path = format!(
            "service/local/index/custom_metadata/{}/content?g={}&a={}&v={}&e={}",
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
                    .on_error(404, |_| Error::metadata_not_found())
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("metadata::get"))
    }

    /// Replace the custom metadata attached to an artifact.
    pub async fn update(
        &self,
        repository: &str,
        coordinates: &Coordinates,
        tags: &[Tag],
    ) -> Result<bool> {
        let path = format!("service/local/index/custom_metadata/{}", repository);
        let params = serde_json::json!({
            "uri": coordinates.to_string(),
            "tags": tags
                .iter()
                .map(|t| serde_json::json!({"key": t.key, "value": t.value}))
                .collect::<Vec<_>>(),
        });
        self.transport
            .post(&path, Some(data_envelope(params)))
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(201, done)
                    .on_error(404, Error::command_failed)
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("metadata::update"))
    }

    /// Search artifacts by custom-metadata terms.
    pub async fn search(&self, terms: &[SearchTerm]) -> Result<String> {
        let query = terms
            .iter()
            .map(|t| format!("{}:{}:{}", t.key, t.search_type, t.value))
            .collect::<Vec<_>>()
            .join(",");
        let path = format!("service/local/index/custom_metadata_search?q={}", query);
        self.transport
            .get(&path)
            .await
            .and_then(|r| {
                StatusTable::new()
                    .on_value(200, text)
                    .on_error(400, |_| Error::bad_search_request())
                    .resolve(r)
            })
            .map_err(|e| e.with_operation("metadata::search"))
    }
}
