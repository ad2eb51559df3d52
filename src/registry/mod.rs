//! Session registry interface
//!
//! The registry is the sole mutable shared resource in the orchestration
//! core and its concurrency-safety boundary: it accepts constructed
//! handles, assigns session ids, tracks sessions until stopped, and
//! enumerates the active set. The orchestrator consumes this interface and
//! never caches the id-to-descriptor mapping.

pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::session::handle::SessionHandle;
use crate::session::kind::{SessionDescriptor, SessionId};

pub use memory::InMemorySessionRegistry;

/// One active session as enumerated by the registry
#[derive(Debug, Clone)]
pub struct ActiveSession {
    /// Registry-assigned id
    pub session_id: SessionId,
    /// Runtime descriptor (read-only for consumers)
    pub descriptor: SessionDescriptor,
}

/// Tracks running sessions and assigns their ids
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Register a constructed handle, assigning a fresh session id
    ///
    /// Once this returns, the id is visible to `list_active`.
    async fn register(&self, handle: SessionHandle) -> SessionId;

    /// Stop a session, releasing its handle
    ///
    /// Fails with `SessionNotFound` for an unknown or already-stopped id;
    /// a second stop on the same id is an error, not a no-op.
    async fn stop(&self, id: SessionId) -> Result<()>;

    /// Stop every active session
    ///
    /// Continue-on-error: every session gets a stop attempt, and failures
    /// are aggregated into `StreamError::StopAll`.
    async fn stop_all(&self) -> Result<()>;

    /// Enumerate active sessions in registration order
    async fn list_active(&self) -> Vec<ActiveSession>;
}
