//! Resolved server configuration consumed by the transport.
//!
//! The library does not read or merge settings files; it only consumes the
//! already-resolved values a caller hands it.

/// Connection settings for one server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub url: String,
    pub repository: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ssl_verify: bool,
    pub timeout_secs: u64,
}

impl ServerConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            repository: None,
            username: None,
            password: None,
            ssl_verify: true,
            timeout_secs: 60,
        }
    }

    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Disable certificate verification (the `--insecure` escape hatch)
    pub fn insecure(mut self) -> Self {
        self.ssl_verify = false;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Base url with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ServerConfig::new("https://nexus.example.com/")
            .with_repository("releases")
            .with_credentials("admin", "admin123")
            .with_timeout(30);

        assert_eq!(config.base_url(), "https://nexus.example.com");
        assert_eq!(config.repository.as_deref(), Some("releases"));
        assert_eq!(config.username.as_deref(), Some("admin"));
        assert!(config.ssl_verify);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_insecure() {
        let config = ServerConfig::new("https://nexus.example.com").insecure();
        assert!(!config.ssl_verify);
    }
}
