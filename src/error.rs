//! Error types
//!
//! One crate-level taxonomy for orchestrator, factory and registry
//! operations. Errors are propagated to the caller unchanged from the
//! operation that detected them; the only deliberate degrade path is the
//! placeholder-metadata behavior during enrichment, which is not an error.

use crate::session::kind::{LiveKind, SessionId};

/// Convenience alias for fallible operations in this crate
pub type Result<T> = std::result::Result<T, StreamError>;

/// Error type for stream orchestration
#[derive(Debug, Clone)]
pub enum StreamError {
    /// The configuration has no section for this stream kind
    ConfigSectionMissing(LiveKind),
    /// The configuration section exists but has no profile with this name
    ProfileNotFound {
        /// Kind whose section was searched
        kind: LiveKind,
        /// Requested profile name
        name: String,
    },
    /// Session construction failed to allocate its resources
    ResourceAllocationFailed(String),
    /// No active session with this id (unknown or already stopped)
    SessionNotFound(SessionId),
    /// The registry returned a descriptor whose fields contradict its kind
    UnknownSessionKind(SessionId),
    /// One or more sessions failed to stop during stop-all
    StopAll {
        /// Each failed session with the error its stop produced
        failures: Vec<(SessionId, StreamError)>,
    },
    /// A metadata store could not answer a lookup
    MetadataUnavailable(String),
}

impl std::fmt::Display for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamError::ConfigSectionMissing(kind) => {
                write!(f, "No {} section in stream configuration", kind)
            }
            StreamError::ProfileNotFound { kind, name } => {
                write!(f, "Profile not found in {} section: {}", kind, name)
            }
            StreamError::ResourceAllocationFailed(reason) => {
                write!(f, "Session resource allocation failed: {}", reason)
            }
            StreamError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
            StreamError::UnknownSessionKind(id) => {
                write!(f, "Session {} has a malformed descriptor", id)
            }
            StreamError::StopAll { failures } => {
                write!(f, "Failed to stop {} session(s):", failures.len())?;
                for (id, err) in failures {
                    write!(f, " [{}: {}]", id, err)?;
                }
                Ok(())
            }
            StreamError::MetadataUnavailable(reason) => {
                write!(f, "Metadata lookup failed: {}", reason)
            }
        }
    }
}

impl std::error::Error for StreamError {}
