//! # Capability modules
//!
//! One module per remote resource group. Each module is a stateless bundle of
//! operations over the shared transport; every operation declares its own
//! status table and resolves the response through it, so the full status
//! space is classified per operation.

pub mod artifacts;
pub mod logging;
pub mod metadata;
pub mod privileges;
pub mod repositories;
pub mod roles;
pub mod settings;
pub mod users;

pub use artifacts::{Artifacts, Coordinates};
pub use logging::Logging;
pub use metadata::{CustomMetadata, SearchTerm, Tag};
pub use privileges::Privileges;
pub use repositories::Repositories;
pub use roles::Roles;
pub use settings::GlobalSettings;
pub use users::Users;

/// Wrap create/update parameters in the `{"data": ...}` envelope the server
/// expects.
pub(crate) fn data_envelope(params: serde_json::Value) -> String {
    serde_json::json!({ "data": params }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_envelope_round_trip() {
        let params = serde_json::json!({"id": "devs", "name": "Developers"});
        let body = data_envelope(params.clone());

        let decoded: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(decoded["data"], params);
    }
}
