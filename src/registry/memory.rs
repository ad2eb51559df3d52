//! In-memory session registry
//!
//! Reference implementation of `SessionRegistry`: a `RwLock`-guarded map of
//! active sessions keyed by ascending id, so enumeration order is
//! registration order. Sessions live until an explicit stop; dropping a
//! stored handle closes its output pipe.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ActiveSession, SessionRegistry};
use crate::error::{Result, StreamError};
use crate::session::handle::SessionHandle;
use crate::session::kind::SessionId;

/// Thread-safe in-memory registry
///
/// Serializes concurrent start/stop through the inner lock; callers hold it
/// behind an `Arc`.
pub struct InMemorySessionRegistry {
    sessions: RwLock<BTreeMap<SessionId, SessionHandle>>,
    next_id: AtomicU64,
}

impl InMemorySessionRegistry {
    /// Create an empty registry; ids start at 1
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of active sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Stop each id in turn, aggregating failures
    ///
    /// An id already gone when its turn comes (a concurrent stop raced the
    /// snapshot) is recorded; the remaining ids still get a stop attempt.
    async fn stop_each(&self, ids: Vec<SessionId>) -> Result<()> {
        let mut failures = Vec::new();
        for id in ids {
            if let Err(err) = self.stop(id).await {
                failures.push((id, err));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(StreamError::StopAll { failures })
        }
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn register(&self, handle: SessionHandle) -> SessionId {
        let id = SessionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));

        let mut sessions = self.sessions.write().await;
        sessions.insert(id, handle);

        tracing::info!(
            session_id = %id,
            active = sessions.len(),
            "Session registered"
        );

        id
    }

    async fn stop(&self, id: SessionId) -> Result<()> {
        let mut sessions = self.sessions.write().await;

        match sessions.remove(&id) {
            Some(handle) => {
                tracing::info!(
                    session_id = %id,
                    kind = %handle.descriptor().kind,
                    age_ms = handle.age().as_millis() as u64,
                    active = sessions.len(),
                    "Session stopped"
                );
                Ok(())
            }
            None => Err(StreamError::SessionNotFound(id)),
        }
    }

    async fn stop_all(&self) -> Result<()> {
        let ids: Vec<SessionId> = self.sessions.read().await.keys().copied().collect();
        self.stop_each(ids).await
    }

    async fn list_active(&self) -> Vec<ActiveSession> {
        self.sessions
            .read()
            .await
            .iter()
            .map(|(id, handle)| ActiveSession {
                session_id: *id,
                descriptor: handle.descriptor().clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::kind::{FileKind, LiveKind, SessionDescriptor, StreamKind};

    fn live_handle(channel: u64) -> SessionHandle {
        SessionHandle::new(
            SessionDescriptor::live(LiveKind::M2ts, channel),
            "encode".into(),
            Some(tokio::sync::mpsc::channel(4)),
        )
    }

    fn file_handle(video_file: u64) -> SessionHandle {
        SessionHandle::new(
            SessionDescriptor::file(FileKind::Recorded, video_file),
            "play".into(),
            Some(tokio::sync::mpsc::channel(4)),
        )
    }

    #[tokio::test]
    async fn test_register_assigns_distinct_ids() {
        let registry = InMemorySessionRegistry::new();

        let a = registry.register(live_handle(1)).await;
        let b = registry.register(live_handle(2)).await;

        assert_ne!(a, b);
        assert_eq!(registry.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_list_in_registration_order() {
        let registry = InMemorySessionRegistry::new();

        let first = registry.register(live_handle(10)).await;
        let second = registry.register(file_handle(20)).await;
        let third = registry.register(live_handle(30)).await;

        let active = registry.list_active().await;
        let ids: Vec<SessionId> = active.iter().map(|s| s.session_id).collect();
        assert_eq!(ids, vec![first, second, third]);
        assert_eq!(active[1].descriptor.kind, StreamKind::Recorded);
    }

    #[tokio::test]
    async fn test_stop_removes_session() {
        let registry = InMemorySessionRegistry::new();
        let id = registry.register(live_handle(1)).await;

        registry.stop(id).await.unwrap();

        assert!(registry.list_active().await.is_empty());
    }

    #[tokio::test]
    async fn test_second_stop_fails() {
        let registry = InMemorySessionRegistry::new();
        let id = registry.register(live_handle(1)).await;

        registry.stop(id).await.unwrap();

        let result = registry.stop(id).await;
        assert!(matches!(result, Err(StreamError::SessionNotFound(e)) if e == id));
    }

    #[tokio::test]
    async fn test_stop_all_mixed_sessions() {
        let registry = InMemorySessionRegistry::new();
        registry.register(live_handle(1)).await;
        registry.register(live_handle(2)).await;
        registry.register(file_handle(3)).await;

        registry.stop_all().await.unwrap();

        assert_eq!(registry.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_stop_all_aggregates_failures() {
        let registry = InMemorySessionRegistry::new();
        let a = registry.register(live_handle(1)).await;
        let b = registry.register(live_handle(2)).await;
        let c = registry.register(file_handle(3)).await;

        // Replay the race deterministically: b is gone by the time the
        // snapshot loop reaches it, and the snapshot also carries an id
        // that never existed
        registry.stop(b).await.unwrap();
        let stale = SessionId::new(999);

        let result = registry.stop_each(vec![a, b, c, stale]).await;

        let failures = match result {
            Err(StreamError::StopAll { failures }) => failures,
            other => panic!("expected StopAll, got {:?}", other),
        };
        assert_eq!(failures.len(), 2);
        assert!(failures
            .iter()
            .any(|(id, err)| *id == b && matches!(err, StreamError::SessionNotFound(_))));
        assert!(failures
            .iter()
            .any(|(id, err)| *id == stale && matches!(err, StreamError::SessionNotFound(_))));

        // a and c still got their stop attempt despite the failures
        assert_eq!(registry.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_stop_all_when_empty() {
        let registry = InMemorySessionRegistry::new();

        assert!(registry.stop_all().await.is_ok());
    }
}
