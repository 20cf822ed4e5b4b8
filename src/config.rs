//! Client configuration.
//!
//! All connection parameters are supplied by the embedding application at
//! construction time: server host, port (or the default), credentials, the
//! per-call deadline, and the default thumbnail size. There is no file or
//! environment based configuration in this crate.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use micrograph_client::ClientConfig;
//!
//! let config = ClientConfig::new("images.example.org", "alice", "s3cret")
//!     .with_port(14064)
//!     .with_call_timeout(Duration::from_secs(10));
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.effective_port(), 14064);
//! ```

use std::time::Duration;

use crate::error::ConfigError;
use crate::remote::Credentials;

// =============================================================================
// Default Values
// =============================================================================

/// Default repository service port, used when no port is configured.
pub const DEFAULT_PORT: u16 = 4064;

/// Default deadline applied to every remote call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Default edge length for square thumbnails, in pixels.
pub const DEFAULT_THUMBNAIL_EDGE: u32 = 96;

// =============================================================================
// Client Configuration
// =============================================================================

/// Connection and behavior settings for a repository client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Hostname or address of the repository service.
    pub host: String,

    /// Service port. `None` means "use [`DEFAULT_PORT`]".
    pub port: Option<u16>,

    /// Account name used to authenticate.
    pub username: String,

    /// Password used to authenticate.
    pub password: String,

    /// Deadline applied to each individual remote call. Remote calls that
    /// exceed it fail instead of hanging.
    pub call_timeout: Duration,

    /// Edge length for square thumbnails requested without an explicit size.
    pub thumbnail_edge: u32,
}

impl ClientConfig {
    /// Create a configuration with default port, timeout, and thumbnail size.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: None,
            username: username.into(),
            password: password.into(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
            thumbnail_edge: DEFAULT_THUMBNAIL_EDGE,
        }
    }

    /// Use an explicit service port instead of [`DEFAULT_PORT`].
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Use an explicit per-call deadline instead of [`DEFAULT_CALL_TIMEOUT`].
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Use an explicit default thumbnail edge instead of
    /// [`DEFAULT_THUMBNAIL_EDGE`].
    pub fn with_thumbnail_edge(mut self, edge: u32) -> Self {
        self.thumbnail_edge = edge;
        self
    }

    /// Validate the configuration and return the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        if self.password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        if self.port == Some(0) {
            return Err(ConfigError::ZeroPort);
        }
        if self.call_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.thumbnail_edge == 0 {
            return Err(ConfigError::ZeroThumbnailEdge);
        }
        Ok(())
    }

    /// The port remote calls will actually use.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// The credentials passed to the service on connect.
    pub(crate) fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
