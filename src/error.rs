use std::time::Duration;

use thiserror::Error;

/// Errors reported by the remote repository service boundary.
///
/// Implementations of [`RepositoryService`](crate::remote::RepositoryService)
/// return these; the client wraps them into [`ClientError`] variants that
/// identify the failed operation while preserving the cause.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The service cannot be reached, or the session is broken or expired.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The service accepted the call but failed to execute it.
    #[error("remote service error: {0}")]
    Service(String),

    /// A referenced entity does not exist on the remote side.
    #[error("not found: {0}")]
    NotFound(String),

    /// The call did not complete within the configured deadline.
    #[error("remote call exceeded the {limit:?} deadline")]
    TimedOut { limit: Duration },
}

/// Errors raised when validating a [`ClientConfig`](crate::config::ClientConfig).
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Server host is empty.
    #[error("server host must not be empty")]
    EmptyHost,

    /// Username is empty.
    #[error("username must not be empty")]
    EmptyUsername,

    /// Password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// Port 0 was given explicitly; the "use default" sentinel is `None`.
    #[error("port 0 is not addressable; leave the port unset to use the default")]
    ZeroPort,

    /// Per-call deadline of zero would fail every remote call.
    #[error("call timeout must be non-zero")]
    ZeroTimeout,

    /// A zero-sized thumbnail cannot be requested.
    #[error("thumbnail edge must be non-zero")]
    ZeroThumbnailEdge,
}

/// Errors surfaced by the public client operations.
///
/// Every remote failure carries its originating [`RemoteError`]; an empty
/// result and a failed call never share a return shape.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No session is active; `connect()` has not succeeded yet or the
    /// session was already released.
    #[error("no active session; call connect() first")]
    NotConnected,

    /// A session is already active; release it before connecting again.
    #[error("a session is already active; call disconnect() first")]
    AlreadyConnected,

    /// Connecting, authenticating, or releasing the session failed.
    #[error("could not reach the repository service")]
    ServiceUnavailable {
        #[source]
        source: RemoteError,
    },

    /// A hierarchy or listing query failed.
    #[error("fetch from the repository service failed")]
    FetchFailed {
        #[source]
        source: RemoteError,
    },

    /// The project id is not present in the loaded hierarchy, or the
    /// hierarchy has not been loaded yet.
    #[error("project {project_id} is not in the loaded hierarchy")]
    UnknownProject { project_id: i64 },

    /// A referenced entity could not be resolved.
    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: i64 },

    /// The rendering engine or thumbnail store failed.
    #[error("rendering failed")]
    RenderFailed {
        #[source]
        source: RemoteError,
    },

    /// The compressed render stream could not be decoded into a raster.
    #[error("could not decode rendered image data: {message}")]
    DecodeFailed { message: String },

    /// Requested thumbnail edge is outside the accepted range.
    #[error("invalid thumbnail edge {edge}; must be at least 1 pixel")]
    InvalidThumbnailEdge { edge: u32 },

    /// A save or annotation write was rejected by the service.
    #[error("write to the repository service failed")]
    WriteFailed {
        #[source]
        source: RemoteError,
    },

    /// The image has no stored file format, so no download link exists.
    #[error("image {image_id} has no stored format and cannot be downloaded")]
    DownloadUnavailable { image_id: i64 },
}
