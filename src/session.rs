//! Session lifecycle management.
//!
//! [`ConnectionManager`] owns the single authenticated session a client holds
//! against the repository service. Connecting and disconnecting are explicit,
//! caller-controlled actions; no read or write operation ever tears the
//! session down behind the caller's back.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::remote::{
    with_deadline, Credentials, RepositoryService, SecurityContext, SessionHandle,
};

/// Owner of the client's single remote session.
///
/// At most one session is live at a time. Before `connect()` succeeds, and
/// after `disconnect()`, every accessor fails with
/// [`ClientError::NotConnected`].
pub struct ConnectionManager<R: RepositoryService> {
    remote: Arc<R>,
    host: String,
    port: u16,
    credentials: Credentials,
    call_timeout: Duration,
    session: Option<ActiveSession>,
}

struct ActiveSession {
    handle: SessionHandle,
    ctx: SecurityContext,
}

impl<R: RepositoryService> ConnectionManager<R> {
    pub fn new(remote: Arc<R>, config: &ClientConfig) -> Self {
        Self {
            remote,
            host: config.host.clone(),
            port: config.effective_port(),
            credentials: config.credentials(),
            call_timeout: config.call_timeout,
            session: None,
        }
    }

    /// Establish the session.
    ///
    /// On failure no partial session is retained; the manager stays
    /// disconnected and a later retry is safe. Connecting while a session is
    /// live fails with [`ClientError::AlreadyConnected`] instead of leaking
    /// the live session.
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        if self.session.is_some() {
            return Err(ClientError::AlreadyConnected);
        }

        let handle = with_deadline(
            self.call_timeout,
            self.remote.connect(&self.host, self.port, &self.credentials),
        )
        .await
        .map_err(|source| ClientError::ServiceUnavailable { source })?;

        debug!(
            session = %handle.session_id,
            group = handle.group_id,
            host = %self.host,
            "session established"
        );

        let ctx = SecurityContext {
            group_id: handle.group_id,
        };
        self.session = Some(ActiveSession { handle, ctx });
        Ok(())
    }

    /// Release the session.
    ///
    /// Fails with [`ClientError::NotConnected`] when no session is live.
    /// Local session state is dropped even if the remote hangup fails; the
    /// remote error is still surfaced so the caller knows the service may
    /// hold the session until it expires.
    pub async fn disconnect(&mut self) -> Result<(), ClientError> {
        let active = self.session.take().ok_or(ClientError::NotConnected)?;

        match with_deadline(self.call_timeout, self.remote.disconnect(&active.handle)).await {
            Ok(()) => {
                debug!(session = %active.handle.session_id, "session released");
                Ok(())
            }
            Err(source) => {
                warn!(
                    session = %active.handle.session_id,
                    error = %source,
                    "remote hangup failed; session dropped locally"
                );
                Err(ClientError::ServiceUnavailable { source })
            }
        }
    }

    /// The security context of the live session.
    pub fn context(&self) -> Result<SecurityContext, ClientError> {
        self.session
            .as_ref()
            .map(|active| active.ctx)
            .ok_or(ClientError::NotConnected)
    }

    /// Server-assigned id of the live session, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|active| active.handle.session_id.as_str())
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }
}
