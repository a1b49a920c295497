//! Error kinds for remote Nexus operations

use std::fmt;

/// The kind of failure a remote operation resolved to.
///
/// Every kind carries a stable numeric code (see [`ErrorKind::code`]) that
/// callers use to pick process exit codes. Codes are part of the external
/// contract and must not be renumbered. Several kinds deliberately share a
/// code (117 for the create-rejected family, 118 for the not-found-by-id
/// family) to stay compatible with automation keyed on the historical codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // Connectivity / TLS
    // =========================================================================
    /// Could not reach the server at all
    ConnectionFailed,

    /// TLS validation failed while talking to the server
    NonSecureConnection,

    /// The server presented a certificate the client does not trust
    UntrustedCertificate,

    // =========================================================================
    // Authorization / authentication
    // =========================================================================
    /// The supplied credentials were rejected
    InvalidCredentials,

    /// The server denied the request due to a permissions error
    PermissionDenied,

    // =========================================================================
    // Caller-input validation
    // =========================================================================
    /// Artifact identifier is not `group:artifact:version:extension`
    ArtifactMalformed,

    /// Search parameter is not `key:type:value` with a known type
    SearchParameterMalformed,

    /// Tag parameter is not `key:value` with an alphanumeric key
    TagParameterMalformed,

    /// Logging level is not one of INFO, DEBUG, or ERROR
    InvalidLoggingLevel,

    /// The resolved configuration contains an invalid value
    InvalidSettings,

    /// No settings could be resolved at all
    MissingSettingsFile,

    // =========================================================================
    // Resource not found
    // =========================================================================
    /// The requested artifact does not exist on the server
    ArtifactNotFound,

    /// No privilege with the given id
    PrivilegeNotFound,

    /// No role with the given id
    RoleNotFound,

    /// No user with the given id
    UserNotFound,

    /// The referenced repository could not be found
    RepositoryNotFound,

    /// The repository targeted for deletion does not exist
    RepositoryDoesNotExist,

    /// The artifact has no custom metadata attached yet
    MetadataNotFound,

    // =========================================================================
    // Server rejected the request
    // =========================================================================
    /// Artifact upload was rejected with a bad request
    BadUploadRequest,

    /// Search request was rejected; parameters carried invalid values
    BadSearchRequest,

    /// Global settings upload was rejected as malformed
    BadSettings,

    /// Repository creation was rejected
    CreateRepositoryFailed,

    /// Privilege creation was rejected
    CreatePrivilegeFailed,

    /// Role creation was rejected
    CreateRoleFailed,

    /// User creation was rejected
    CreateUserFailed,

    /// User update was rejected
    UpdateUserFailed,

    /// The server returned an error body for an otherwise routine command
    CommandFailed,

    /// License upload failed or a license is already installed
    LicenseInstallFailed,

    // =========================================================================
    // Licensing / edition
    // =========================================================================
    /// The capability is not enabled on this client edition
    FeatureUnavailable,

    // =========================================================================
    // Repository group membership
    // =========================================================================
    /// The repository is already a member of the group
    RepositoryInGroup,

    /// The repository is not a member of the group
    RepositoryNotInGroup,

    /// The repository is not a proxy repository
    NotProxyRepository,

    // =========================================================================
    // Catch-all
    // =========================================================================
    /// The server answered with a status code no dispatch arm claims
    UnexpectedStatus,

    /// A 2xx body failed to parse as the JSON the operation promised
    MalformedResponse,
}

/// Coarse grouping of kinds, mirroring how callers react to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorGroup {
    /// Cannot connect, TLS failure - fatal to the current operation
    Connectivity,
    /// Bad credentials or permission denied - surfaced verbatim
    Auth,
    /// Rejected client-side before any request was sent
    CallerInput,
    /// An id-scoped resource does not exist
    NotFound,
    /// The server refused the request (usually a 400)
    Rejected,
    /// The capability requires a licensed edition
    Licensing,
    /// Not yet classified - file a report
    Unclassified,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            // Connectivity
            ErrorKind::ConnectionFailed => "ConnectionFailed",
            ErrorKind::NonSecureConnection => "NonSecureConnection",
            ErrorKind::UntrustedCertificate => "UntrustedCertificate",

            // Auth
            ErrorKind::InvalidCredentials => "InvalidCredentials",
            ErrorKind::PermissionDenied => "PermissionDenied",

            // Caller input
            ErrorKind::ArtifactMalformed => "ArtifactMalformed",
            ErrorKind::SearchParameterMalformed => "SearchParameterMalformed",
            ErrorKind::TagParameterMalformed => "TagParameterMalformed",
            ErrorKind::InvalidLoggingLevel => "InvalidLoggingLevel",
            ErrorKind::InvalidSettings => "InvalidSettings",
            ErrorKind::MissingSettingsFile => "MissingSettingsFile",

            // Not found
            ErrorKind::ArtifactNotFound => "ArtifactNotFound",
            ErrorKind::PrivilegeNotFound => "PrivilegeNotFound",
            ErrorKind::RoleNotFound => "RoleNotFound",
            ErrorKind::UserNotFound => "UserNotFound",
            ErrorKind::RepositoryNotFound => "RepositoryNotFound",
            ErrorKind::RepositoryDoesNotExist => "RepositoryDoesNotExist",
            ErrorKind::MetadataNotFound => "MetadataNotFound",

            // Rejected
            ErrorKind::BadUploadRequest => "BadUploadRequest",
            ErrorKind::BadSearchRequest => "BadSearchRequest",
            ErrorKind::BadSettings => "BadSettings",
            ErrorKind::CreateRepositoryFailed => "CreateRepositoryFailed",
            ErrorKind::CreatePrivilegeFailed => "CreatePrivilegeFailed",
            ErrorKind::CreateRoleFailed => "CreateRoleFailed",
            ErrorKind::CreateUserFailed => "CreateUserFailed",
            ErrorKind::UpdateUserFailed => "UpdateUserFailed",
            ErrorKind::CommandFailed => "CommandFailed",
            ErrorKind::LicenseInstallFailed => "LicenseInstallFailed",

            // Licensing
            ErrorKind::FeatureUnavailable => "FeatureUnavailable",

            // Group membership
            ErrorKind::RepositoryInGroup => "RepositoryInGroup",
            ErrorKind::RepositoryNotInGroup => "RepositoryNotInGroup",
            ErrorKind::NotProxyRepository => "NotProxyRepository",

            // Catch-all
            ErrorKind::UnexpectedStatus => "UnexpectedStatus",
            ErrorKind::MalformedResponse => "MalformedResponse",
        }
    }

    /// The stable numeric code used for process exit codes.
    ///
    /// Codes 117 and 118 are shared across the create-rejected and
    /// not-found-by-id families respectively; match on the kind itself when
    /// you need to tell those apart.
    pub fn code(&self) -> u16 {
        match self {
            ErrorKind::ArtifactMalformed => 100,
            ErrorKind::ArtifactNotFound => 101,
            ErrorKind::InvalidSettings => 102,
            ErrorKind::MissingSettingsFile => 103,
            ErrorKind::NonSecureConnection => 104,
            ErrorKind::ConnectionFailed => 105,
            ErrorKind::PermissionDenied => 106,
            ErrorKind::BadUploadRequest => 107,
            ErrorKind::FeatureUnavailable => 108,
            ErrorKind::SearchParameterMalformed => 109,
            ErrorKind::BadSearchRequest => 110,
            ErrorKind::BadSettings => 111,
            ErrorKind::CreateRepositoryFailed => 112,
            ErrorKind::RepositoryDoesNotExist => 113,
            ErrorKind::RepositoryNotFound => 114,
            ErrorKind::UnexpectedStatus => 115,
            ErrorKind::TagParameterMalformed => 116,
            ErrorKind::CreatePrivilegeFailed => 117,
            ErrorKind::CreateRoleFailed => 117,
            ErrorKind::CreateUserFailed => 117,
            ErrorKind::PrivilegeNotFound => 118,
            ErrorKind::RoleNotFound => 118,
            ErrorKind::UserNotFound => 118,
            ErrorKind::UpdateUserFailed => 119,
            ErrorKind::InvalidCredentials => 120,
            ErrorKind::NotProxyRepository => 121,
            ErrorKind::LicenseInstallFailed => 122,
            ErrorKind::InvalidLoggingLevel => 123,
            ErrorKind::MetadataNotFound => 124,
            ErrorKind::UntrustedCertificate => 125,
            ErrorKind::RepositoryInGroup => 126,
            ErrorKind::RepositoryNotInGroup => 127,
            ErrorKind::CommandFailed => 128,
            ErrorKind::MalformedResponse => 129,
        }
    }

    /// The taxonomy group this kind belongs to
    pub fn group(&self) -> ErrorGroup {
        match self {
            ErrorKind::ConnectionFailed
            | ErrorKind::NonSecureConnection
            | ErrorKind::UntrustedCertificate => ErrorGroup::Connectivity,

            ErrorKind::InvalidCredentials | ErrorKind::PermissionDenied => ErrorGroup::Auth,

            ErrorKind::ArtifactMalformed
            | ErrorKind::SearchParameterMalformed
            | ErrorKind::TagParameterMalformed
            | ErrorKind::InvalidLoggingLevel
            | ErrorKind::InvalidSettings
            | ErrorKind::MissingSettingsFile => ErrorGroup::CallerInput,

            ErrorKind::ArtifactNotFound
            | ErrorKind::PrivilegeNotFound
            | ErrorKind::RoleNotFound
            | ErrorKind::UserNotFound
            | ErrorKind::RepositoryNotFound
            | ErrorKind::RepositoryDoesNotExist
            | ErrorKind::MetadataNotFound => ErrorGroup::NotFound,

            ErrorKind::BadUploadRequest
            | ErrorKind::BadSearchRequest
            | ErrorKind::BadSettings
            | ErrorKind::CreateRepositoryFailed
            | ErrorKind::CreatePrivilegeFailed
            | ErrorKind::CreateRoleFailed
            | ErrorKind::CreateUserFailed
            | ErrorKind::UpdateUserFailed
            | ErrorKind::CommandFailed
            | ErrorKind::LicenseInstallFailed
            | ErrorKind::RepositoryInGroup
            | ErrorKind::RepositoryNotInGroup
            | ErrorKind::NotProxyRepository => ErrorGroup::Rejected,

            ErrorKind::FeatureUnavailable => ErrorGroup::Licensing,

            ErrorKind::UnexpectedStatus | ErrorKind::MalformedResponse => {
                ErrorGroup::Unclassified
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
