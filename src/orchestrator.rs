//! Stream session orchestrator
//!
//! Turns a client request into a running, uniquely identified streaming
//! session: resolves the requested profile, builds the execution handle,
//! registers it, and later reports on or terminates sessions. The
//! orchestrator holds no mutable state of its own beyond the injected
//! collaborators; all serialization of concurrent start/stop belongs to the
//! registry.

use std::sync::Arc;

use crate::config::StreamConfig;
use crate::error::{Result, StreamError};
use crate::info::{Enricher, StreamInfoList};
use crate::metadata::{ProgramStore, RecordingStore, VideoFileStore};
use crate::registry::SessionRegistry;
use crate::session::factory::SessionFactory;
use crate::session::handle::StreamOutput;
use crate::session::kind::{ChannelId, LiveKind, SessionId};

/// Caller input for starting a live stream
#[derive(Debug, Clone)]
pub struct StreamRequest {
    /// Name of the profile to resolve in the kind's section
    pub profile_name: String,
    /// Channel to bind the session to
    pub channel_id: ChannelId,
}

impl StreamRequest {
    /// Create a request
    pub fn new(profile_name: impl Into<String>, channel_id: ChannelId) -> Self {
        Self {
            profile_name: profile_name.into(),
            channel_id,
        }
    }
}

/// A started live stream
#[derive(Debug)]
pub struct LiveStream {
    /// Registry-assigned session id
    pub session_id: SessionId,
    /// Consumable byte stream; `None` for HLS, whose payload is delivered
    /// out-of-band as playlist and segment files
    pub output: Option<StreamOutput>,
}

/// Orchestrates stream sessions over injected collaborators
///
/// Collaborators are explicit capabilities passed at construction, so tests
/// substitute fakes freely.
pub struct StreamOrchestrator {
    config: Arc<StreamConfig>,
    factory: SessionFactory,
    registry: Arc<dyn SessionRegistry>,
    enricher: Enricher,
}

impl StreamOrchestrator {
    /// Create an orchestrator over its collaborators
    pub fn new(
        config: Arc<StreamConfig>,
        registry: Arc<dyn SessionRegistry>,
        programs: Arc<dyn ProgramStore>,
        video_files: Arc<dyn VideoFileStore>,
        recordings: Arc<dyn RecordingStore>,
    ) -> Self {
        let factory = SessionFactory::new(&config);
        let enricher = Enricher::new(programs, video_files, recordings, config.lookup_timeout);

        Self {
            config,
            factory,
            registry,
            enricher,
        }
    }

    /// Start a live stream of any kind
    ///
    /// One parameterized operation for all four live kinds: resolve the
    /// profile, build the handle, register it. Configuration and
    /// allocation errors propagate unchanged. Once this returns, the id is
    /// visible in the registry.
    pub async fn start_live(&self, kind: LiveKind, request: StreamRequest) -> Result<LiveStream> {
        let profile = self.config.live_profile(kind, &request.profile_name)?;

        let mut handle = self
            .factory
            .create_live(kind, request.channel_id, &profile.cmd)
            .await?;
        let output = handle.take_output();

        let session_id = self.registry.register(handle).await;

        tracing::info!(
            session_id = %session_id,
            kind = %kind,
            channel_id = request.channel_id,
            profile = %request.profile_name,
            "Live stream started"
        );

        Ok(LiveStream { session_id, output })
    }

    /// Start an MPEG-2 TS live stream
    pub async fn start_m2ts(
        &self,
        profile_name: &str,
        channel_id: ChannelId,
    ) -> Result<(SessionId, StreamOutput)> {
        self.start_streamed(LiveKind::M2ts, profile_name, channel_id)
            .await
    }

    /// Start a WebM live stream
    pub async fn start_webm(
        &self,
        profile_name: &str,
        channel_id: ChannelId,
    ) -> Result<(SessionId, StreamOutput)> {
        self.start_streamed(LiveKind::Webm, profile_name, channel_id)
            .await
    }

    /// Start an MP4 live stream
    pub async fn start_mp4(
        &self,
        profile_name: &str,
        channel_id: ChannelId,
    ) -> Result<(SessionId, StreamOutput)> {
        self.start_streamed(LiveKind::Mp4, profile_name, channel_id)
            .await
    }

    /// Start an HLS live stream
    ///
    /// Returns only the session id; the payload is served out-of-band.
    pub async fn start_hls(&self, profile_name: &str, channel_id: ChannelId) -> Result<SessionId> {
        let stream = self
            .start_live(LiveKind::Hls, StreamRequest::new(profile_name, channel_id))
            .await?;
        Ok(stream.session_id)
    }

    async fn start_streamed(
        &self,
        kind: LiveKind,
        profile_name: &str,
        channel_id: ChannelId,
    ) -> Result<(SessionId, StreamOutput)> {
        let stream = self
            .start_live(kind, StreamRequest::new(profile_name, channel_id))
            .await?;

        // Continuous kinds always allocate a pipe
        let output = stream.output.ok_or_else(|| {
            StreamError::ResourceAllocationFailed("output pipe missing".into())
        })?;

        Ok((stream.session_id, output))
    }

    /// Stop a session
    ///
    /// Fails with `SessionNotFound` for an unknown or already-stopped id.
    pub async fn stop(&self, id: SessionId) -> Result<()> {
        self.registry.stop(id).await?;
        tracing::info!(session_id = %id, "Stream stopped");
        Ok(())
    }

    /// Stop every active session
    ///
    /// Best-effort: every session gets a stop attempt and failures are
    /// aggregated into `StreamError::StopAll`.
    pub async fn stop_all(&self) -> Result<()> {
        self.registry.stop_all().await
    }

    /// Report all active sessions joined with their metadata
    ///
    /// Re-queries the registry on every call and enriches each session
    /// independently; items come back in registry enumeration order.
    pub async fn stream_infos(&self) -> Result<StreamInfoList> {
        let active = self.registry.list_active().await;
        self.enricher.enrich_all(&active).await
    }
}
