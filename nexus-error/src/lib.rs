//! # nexus-error
//!
//! Unified error taxonomy for nexus-rs - the typed vocabulary every remote
//! operation resolves into.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what failed (e.g., RoleNotFound, CreateUserFailed)
//! - **Stable codes**: Every kind carries a numeric code for process exit
//!   codes; codes never change across versions
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use nexus_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::role_not_found("developers")
//!         .with_operation("roles::get")
//!         .with_context("server", "https://nexus.example.com"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, nexus_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Messages are rendered once at construction; `Display` is pure
//! - Server bodies embedded in messages are pretty-printed when they parse
//!   as JSON and embedded verbatim when they do not

mod error;
mod kind;

pub use error::{pretty_body, Error};
pub use kind::{ErrorGroup, ErrorKind};

/// Result type alias using the nexus Error
pub type Result<T> = std::result::Result<T, Error>;
