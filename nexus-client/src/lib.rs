//! # nexus-client
//!
//! A typed client for a Nexus-style artifact-repository server.
//!
//! ## Core Concepts
//! - **Transport**: the abstract wire; verbs in, `{status, body}` out
//! - **StatusTable**: per-operation dispatch from status code to outcome;
//!   every status resolves, unknown ones to `UnexpectedStatus`
//! - **Capability modules**: independent operation bundles (roles, users,
//!   repositories, artifacts, ...) sharing one transport
//! - **Client**: structural composition of an explicit capability subset;
//!   disabled capabilities answer `FeatureUnavailable` locally

pub mod client;
pub mod config;
pub mod dispatch;
pub mod ops;
pub mod transport;

pub use client::{Capability, Client, ClientBuilder};
pub use config::ServerConfig;
pub use dispatch::StatusTable;
pub use nexus_error::{Error, ErrorGroup, ErrorKind, Result};
pub use ops::{
    Artifacts, Coordinates, CustomMetadata, GlobalSettings, Logging, Privileges, Repositories,
    Roles, SearchTerm, Tag, Users,
};
pub use transport::{HttpResponse, ReqwestTransport, Transport};
