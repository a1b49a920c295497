//! The main Error type for nexus-rs

use crate::ErrorKind;
use std::fmt;

/// The unified error type for all remote Nexus operations.
///
/// This error type provides:
/// - `kind`: Which taxonomy member this failure resolved to
/// - `code`: The stable numeric code callers turn into exit codes
/// - `message`: The fully rendered, user-facing description
/// - `operation`: What operation produced the error
/// - `context`: Key-value pairs for diagnostics
/// - `source`: The underlying error (if any)
///
/// The message is rendered once at construction, so `Display` is a pure read
/// of immutable state and formatting the same error twice yields identical
/// strings.
///
/// # Example
///
/// ```rust
/// use nexus_error::{Error, ErrorKind};
///
/// let err = Error::role_not_found("developers")
///     .with_operation("roles::get");
///
/// assert_eq!(err.kind(), ErrorKind::RoleNotFound);
/// assert_eq!(err.code(), 118);
/// ```
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<anyhow::Error>,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The stable numeric code of this error's kind
    pub fn code(&self) -> u16 {
        self.kind.code()
    }

    /// Get the rendered, user-facing message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the operation that produced this error
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Get the context key-value pairs
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Get the source error (if any)
    pub fn source_ref(&self) -> Option<&anyhow::Error> {
        self.source.as_ref()
    }

    // =========================================================================
    // Builders (chainable)
    // =========================================================================

    /// Set the operation that produced this error.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(source.into());
        self
    }
}

/// Pretty-print a server response body for embedding in a message.
///
/// The server usually answers rejections with a JSON document, but nothing
/// guarantees it. Rendering must never fail, so a body that does not parse is
/// embedded verbatim.
pub fn pretty_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| body.to_string())
}

// =============================================================================
// Display - compact, single-line format for logs
// =============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.kind, self.kind.code())?;

        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }

        if !self.context.is_empty() {
            write!(f, ", context {{ ")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}] at {}", self.kind, self.kind.code(), self.operation)?;

        if !self.message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.message)?;
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "    Source: {:?}", source)?;
        }

        Ok(())
    }
}

// =============================================================================
// std::error::Error implementation
// =============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

// =============================================================================
// Convenience constructors - one per taxonomy member that the client raises
// =============================================================================

impl Error {
    /// Could not reach the server at all
    pub fn connection_failed() -> Self {
        Self::new(
            ErrorKind::ConnectionFailed,
            "could not connect to the server; please ensure the url you are using is reachable",
        )
    }

    /// TLS validation failed during the handshake
    pub fn non_secure_connection() -> Self {
        Self::new(
            ErrorKind::NonSecureConnection,
            "communication with the server failed during SSL certificate validation; \
             you may want to retry with ssl verification disabled",
        )
    }

    /// The server's certificate is not trusted
    pub fn untrusted_certificate() -> Self {
        Self::new(
            ErrorKind::UntrustedCertificate,
            "the server presented an untrusted certificate; \
             ensure the certificate is correct or set ssl_verify to false",
        )
    }

    /// The supplied credentials were rejected
    pub fn invalid_credentials() -> Self {
        Self::new(
            ErrorKind::InvalidCredentials,
            "invalid credentials were supplied; \
             please make sure you are passing the correct values",
        )
    }

    /// The server denied the request with a permissions error
    pub fn permission_denied() -> Self {
        Self::new(
            ErrorKind::PermissionDenied,
            "the request was denied by the server due to a permissions error; \
             administer the server or use a different user/password",
        )
    }

    /// Artifact identifier failed client-side validation
    pub fn artifact_malformed() -> Self {
        Self::new(
            ErrorKind::ArtifactMalformed,
            "please submit your request using 4 colon-separated values: \
             `group:artifact:version:extension`",
        )
    }

    /// Search parameter failed client-side validation
    pub fn search_parameter_malformed() -> Self {
        Self::new(
            ErrorKind::SearchParameterMalformed,
            "submit your search request specifying one or more 3 colon-separated values: \
             `key:type:value`; the available search types are \
             `equal`, `matches`, `bounded`, and `notequal`",
        )
    }

    /// Tag parameter failed client-side validation
    pub fn tag_parameter_malformed() -> Self {
        Self::new(
            ErrorKind::TagParameterMalformed,
            "submit your tag request specifying one or more 2 colon-separated values: \
             `key:value`; the key can only consist of alphanumeric characters",
        )
    }

    /// Logging level is not INFO, DEBUG, or ERROR
    pub fn invalid_logging_level() -> Self {
        Self::new(
            ErrorKind::InvalidLoggingLevel,
            "logging level must be set to one of either INFO, DEBUG, or ERROR",
        )
    }

    /// The resolved configuration carries an invalid value
    pub fn invalid_settings(errors: impl Into<String>) -> Self {
        let errors = errors.into();
        Self::new(
            ErrorKind::InvalidSettings,
            format!("the configuration has an error: {}", errors),
        )
        .with_context("errors", errors)
    }

    /// No settings could be resolved
    pub fn missing_settings_file() -> Self {
        Self::new(
            ErrorKind::MissingSettingsFile,
            "the settings source is missing or corrupt; \
             fix the settings or pass explicit overrides",
        )
    }

    /// The requested artifact does not exist on the server
    pub fn artifact_not_found() -> Self {
        Self::new(
            ErrorKind::ArtifactNotFound,
            "the artifact you requested information for could not be found; \
             please ensure it exists on the server",
        )
    }

    /// No privilege with the given id
    pub fn privilege_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(
            ErrorKind::PrivilegeNotFound,
            format!("a privilege with the ID of {} could not be found", id),
        )
        .with_context("privilege_id", id)
    }

    /// No role with the given id
    pub fn role_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(
            ErrorKind::RoleNotFound,
            format!("a role with the ID of {} could not be found", id),
        )
        .with_context("role_id", id)
    }

    /// No user with the given id
    pub fn user_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(
            ErrorKind::UserNotFound,
            format!("a user with the ID of {} could not be found", id),
        )
        .with_context("user_id", id)
    }

    /// The referenced repository could not be found
    pub fn repository_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(
            ErrorKind::RepositoryNotFound,
            "the repository you provided could not be found; \
             please ensure the repository exists",
        )
        .with_context("repository_id", id)
    }

    /// The repository targeted for deletion does not exist
    pub fn repository_does_not_exist(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(
            ErrorKind::RepositoryDoesNotExist,
            "the repository you are trying to delete does not exist",
        )
        .with_context("repository_id", id)
    }

    /// The artifact carries no custom metadata yet
    pub fn metadata_not_found() -> Self {
        Self::new(
            ErrorKind::MetadataNotFound,
            "the artifact does not have any custom metadata added yet",
        )
    }

    /// Artifact upload was rejected with a bad request
    pub fn bad_upload_request() -> Self {
        Self::new(
            ErrorKind::BadUploadRequest,
            "the request was denied by the server due to a bad request and the artifact \
             has not been uploaded; the target repository may be invalid, or the artifact \
             already exists and the repository does not allow multiple deployments",
        )
    }

    /// Search request was rejected by the server
    pub fn bad_search_request() -> Self {
        Self::new(
            ErrorKind::BadSearchRequest,
            "the request was denied by the server due to a bad request; \
             check that your search parameters contain valid values",
        )
    }

    /// Global settings upload was rejected as malformed
    pub fn bad_settings(body: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::BadSettings,
            format!(
                "the global settings are malformed and could not be uploaded; \
                 the output from the server was:\n{}",
                pretty_body(body.as_ref())
            ),
        )
    }

    /// Repository creation was rejected
    pub fn create_repository_failed(body: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::CreateRepositoryFailed,
            format!(
                "the create repository command failed due to the following:\n{}",
                pretty_body(body.as_ref())
            ),
        )
    }

    /// Privilege creation was rejected
    pub fn create_privilege_failed(body: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::CreatePrivilegeFailed,
            format!(
                "the create privilege command failed due to the following:\n{}",
                pretty_body(body.as_ref())
            ),
        )
    }

    /// Role creation was rejected
    pub fn create_role_failed(body: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::CreateRoleFailed,
            format!(
                "the create role command failed due to the following:\n{}",
                pretty_body(body.as_ref())
            ),
        )
    }

    /// User creation was rejected
    pub fn create_user_failed(body: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::CreateUserFailed,
            format!(
                "the create user command failed due to the following:\n{}",
                pretty_body(body.as_ref())
            ),
        )
    }

    /// User update was rejected
    pub fn update_user_failed(body: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::UpdateUserFailed,
            format!(
                "the update user command failed due to the following:\n{}",
                pretty_body(body.as_ref())
            ),
        )
    }

    /// The server returned an error body for an otherwise routine command
    pub fn command_failed(body: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::CommandFailed,
            format!(
                "the command failed and the server returned an error; \
                 the output of the response was:\n{}",
                body.as_ref()
            ),
        )
    }

    /// License upload failed
    pub fn license_install_failed() -> Self {
        Self::new(
            ErrorKind::LicenseInstallFailed,
            "either the server already has a license installed or \
             there was a problem with the uploaded file",
        )
    }

    /// The capability is not enabled on this client edition
    pub fn feature_unavailable() -> Self {
        Self::new(
            ErrorKind::FeatureUnavailable,
            "this feature is not available unless you are using a licensed server edition",
        )
    }

    /// The repository is already a member of the group
    pub fn repository_in_group() -> Self {
        Self::new(
            ErrorKind::RepositoryInGroup,
            "you are attempting to add a repository that is already a part of this group",
        )
    }

    /// The repository is not a member of the group
    pub fn repository_not_in_group() -> Self {
        Self::new(
            ErrorKind::RepositoryNotInGroup,
            "you are attempting to remove a repository that isn't a part of the group",
        )
    }

    /// The repository is not a proxy repository
    pub fn not_proxy_repository(repository_id: impl Into<String>) -> Self {
        let repository_id = repository_id.into();
        Self::new(
            ErrorKind::NotProxyRepository,
            format!(
                "the {} repository is not a proxy repository and cannot subscribe to \
                 artifact updates",
                repository_id
            ),
        )
        .with_context("repository_id", repository_id)
    }

    /// The server answered with a status code no dispatch arm claims
    pub fn unexpected_status(status: u16) -> Self {
        Self::new(
            ErrorKind::UnexpectedStatus,
            format!(
                "the server responded with a {} status code which is unexpected; \
                 please submit a bug report",
                status
            ),
        )
        .with_context("status", status.to_string())
    }

    /// A 2xx body failed to parse as the JSON the operation promised
    pub fn malformed_response(detail: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::MalformedResponse,
            format!(
                "the server responded with a success status but the body could not \
                 be parsed: {}",
                detail.into()
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::RoleNotFound, "a role could not be found");
        assert_eq!(err.kind(), ErrorKind::RoleNotFound);
        assert_eq!(err.code(), 118);
        assert_eq!(err.message(), "a role could not be found");
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::role_not_found("developers")
            .with_operation("roles::get")
            .with_context("repository", "releases");

        assert_eq!(err.operation(), "roles::get");
        assert_eq!(err.context().len(), 2);
        assert_eq!(err.context()[0], ("role_id", "developers".to_string()));
    }

    #[test]
    fn test_operation_chaining() {
        let err = Error::connection_failed()
            .with_operation("transport::get")
            .with_operation("roles::list");

        assert_eq!(err.operation(), "roles::list");
        assert_eq!(err.context()[0], ("called", "transport::get".to_string()));
    }

    #[test]
    fn test_display_is_idempotent() {
        let err = Error::unexpected_status(503).with_operation("users::delete");
        let first = format!("{}", err);
        let second = format!("{}", err);
        assert_eq!(first, second);
        assert!(first.contains("UnexpectedStatus"));
        assert!(first.contains("503"));
        assert!(first.contains("users::delete"));
    }

    #[test]
    fn test_pretty_body_valid_json() {
        let rendered = pretty_body(r#"{"errors":["bad"]}"#);
        assert!(rendered.contains("\"errors\""));
        assert!(rendered.contains('\n'), "expected multi-line pretty output");
    }

    #[test]
    fn test_pretty_body_falls_back_to_raw_text() {
        let raw = "<html>502 Bad Gateway</html>";
        assert_eq!(pretty_body(raw), raw);
    }

    #[test]
    fn test_rejection_message_embeds_pretty_body() {
        let err = Error::create_role_failed(r#"{"errors":["name taken"]}"#);
        assert_eq!(err.kind(), ErrorKind::CreateRoleFailed);
        assert!(err.message().contains("name taken"));
        assert!(err.message().contains('\n'));
    }

    #[test]
    fn test_rejection_with_non_json_body_does_not_fail() {
        let err = Error::create_user_failed("not json at all");
        assert!(err.message().contains("not json at all"));
    }

    #[test]
    fn test_id_interpolation() {
        let err = Error::privilege_not_found("1000a1");
        assert!(err.message().contains("1000a1"));
        assert_eq!(err.context()[0], ("privilege_id", "1000a1".to_string()));
    }

    #[test]
    fn test_set_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::connection_failed().set_source(io_err);
        assert!(err.source_ref().is_some());
    }
}
