//! Stream info reporting and metadata enrichment
//!
//! Joins each bare session descriptor with program or recording metadata
//! into a `StreamInfoItem`. Items are built fresh on every list call and
//! never persisted. Lookups for different sessions run concurrently and
//! carry a per-lookup timeout, so one slow store bounds the response by a
//! single lookup rather than the sum; a missed or failed lookup degrades to
//! a placeholder item instead of failing the list.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use futures::future::join_all;

use crate::error::{Result, StreamError};
use crate::metadata::{ProgramStore, RecordingStore, VideoFileStore};
use crate::registry::ActiveSession;
use crate::session::kind::{
    ChannelId, RecordedId, SessionClass, SessionId, UnixMillis, VideoFileId,
};

/// Reporting class of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamType {
    /// Live session over a tuned channel
    LiveStream,
    /// Session over a recorded video file
    RecordedStream,
}

impl std::fmt::Display for StreamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StreamType::LiveStream => "LiveStream",
            StreamType::RecordedStream => "RecordedStream",
        };
        f.write_str(name)
    }
}

/// One session joined with its metadata
///
/// `description`/`extended` are `None` when the backing record has no
/// value for them; absence, not null, signals "unknown".
#[derive(Debug, Clone)]
pub struct StreamInfoItem {
    /// Session id
    pub session_id: SessionId,
    /// Reporting class
    pub stream_type: StreamType,
    /// Channel (from the descriptor for live, from the recording for file;
    /// 0 when unknown)
    pub channel_id: ChannelId,
    /// Program or recording title; empty when no metadata matched
    pub name: String,
    /// Start time, unix millis; 0 when no metadata matched
    pub start_at: UnixMillis,
    /// End time, unix millis; 0 when no metadata matched
    pub end_at: UnixMillis,
    /// Short description
    pub description: Option<String>,
    /// Extended description
    pub extended: Option<String>,
    /// Backing video file (file-based sessions only)
    pub video_file_id: Option<VideoFileId>,
    /// Backing recording (file-based sessions only; 0 when the video file
    /// itself was not found)
    pub recorded_id: Option<RecordedId>,
}

impl StreamInfoItem {
    /// Live item for a channel with no currently-airing program
    fn live_placeholder(session_id: SessionId, channel_id: ChannelId) -> Self {
        Self {
            session_id,
            stream_type: StreamType::LiveStream,
            channel_id,
            name: String::new(),
            start_at: 0,
            end_at: 0,
            description: None,
            extended: None,
            video_file_id: None,
            recorded_id: None,
        }
    }

    /// File item whose metadata could not be resolved
    fn file_placeholder(
        session_id: SessionId,
        video_file_id: VideoFileId,
        recorded_id: RecordedId,
    ) -> Self {
        Self {
            session_id,
            stream_type: StreamType::RecordedStream,
            channel_id: 0,
            name: String::new(),
            start_at: 0,
            end_at: 0,
            description: None,
            extended: None,
            video_file_id: Some(video_file_id),
            recorded_id: Some(recorded_id),
        }
    }
}

/// Result of a list call
#[derive(Debug, Clone)]
pub struct StreamInfoList {
    /// One item per active session, in registry enumeration order
    pub items: Vec<StreamInfoItem>,
}

/// Joins session descriptors with program/recording metadata
pub(crate) struct Enricher {
    programs: Arc<dyn ProgramStore>,
    video_files: Arc<dyn VideoFileStore>,
    recordings: Arc<dyn RecordingStore>,
    lookup_timeout: Duration,
}

impl Enricher {
    pub(crate) fn new(
        programs: Arc<dyn ProgramStore>,
        video_files: Arc<dyn VideoFileStore>,
        recordings: Arc<dyn RecordingStore>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            programs,
            video_files,
            recordings,
            lookup_timeout,
        }
    }

    /// Enrich every active session, preserving enumeration order
    ///
    /// Item-level lookup trouble degrades to placeholders; a malformed
    /// descriptor fails the whole call with `UnknownSessionKind`.
    pub(crate) async fn enrich_all(&self, sessions: &[ActiveSession]) -> Result<StreamInfoList> {
        let items = join_all(sessions.iter().map(|session| self.enrich_one(session)))
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        Ok(StreamInfoList { items })
    }

    async fn enrich_one(&self, session: &ActiveSession) -> Result<StreamInfoItem> {
        let id = session.session_id;

        match session.descriptor.kind.class() {
            SessionClass::Live => {
                let channel_id = session
                    .descriptor
                    .channel_id
                    .ok_or(StreamError::UnknownSessionKind(id))?;
                Ok(self.enrich_live(id, channel_id).await)
            }
            SessionClass::File => {
                let video_file_id = session
                    .descriptor
                    .video_file_id
                    .ok_or(StreamError::UnknownSessionKind(id))?;
                Ok(self.enrich_file(id, video_file_id).await)
            }
        }
    }

    async fn enrich_live(&self, id: SessionId, channel_id: ChannelId) -> StreamInfoItem {
        let at = now_millis();
        let lookup = self
            .bounded(self.programs.find_by_channel_and_time(channel_id, at))
            .await;

        match lookup {
            Ok(Some(program)) => StreamInfoItem {
                session_id: id,
                stream_type: StreamType::LiveStream,
                channel_id,
                name: program.name,
                start_at: program.start_at,
                end_at: program.end_at,
                description: program.description,
                extended: program.extended,
                video_file_id: None,
                recorded_id: None,
            },
            // Ad-hoc channel with no scheduled program
            Ok(None) => StreamInfoItem::live_placeholder(id, channel_id),
            Err(err) => {
                tracing::warn!(
                    session_id = %id,
                    channel_id = channel_id,
                    error = %err,
                    "Program lookup degraded to placeholder"
                );
                StreamInfoItem::live_placeholder(id, channel_id)
            }
        }
    }

    async fn enrich_file(&self, id: SessionId, video_file_id: VideoFileId) -> StreamInfoItem {
        let video_file = match self.bounded(self.video_files.find_by_id(video_file_id)).await {
            Ok(Some(file)) => file,
            Ok(None) => return StreamInfoItem::file_placeholder(id, video_file_id, 0),
            Err(err) => {
                tracing::warn!(
                    session_id = %id,
                    video_file_id = video_file_id,
                    error = %err,
                    "Video file lookup degraded to placeholder"
                );
                return StreamInfoItem::file_placeholder(id, video_file_id, 0);
            }
        };

        match self
            .bounded(self.recordings.find_by_id(video_file.recorded_id))
            .await
        {
            Ok(Some(recording)) => StreamInfoItem {
                session_id: id,
                stream_type: StreamType::RecordedStream,
                channel_id: recording.channel_id,
                name: recording.name,
                start_at: recording.start_at,
                end_at: recording.end_at,
                description: recording.description,
                extended: recording.extended,
                video_file_id: Some(video_file_id),
                recorded_id: Some(video_file.recorded_id),
            },
            Ok(None) => StreamInfoItem::file_placeholder(id, video_file_id, video_file.recorded_id),
            Err(err) => {
                tracing::warn!(
                    session_id = %id,
                    recorded_id = video_file.recorded_id,
                    error = %err,
                    "Recording lookup degraded to placeholder"
                );
                StreamInfoItem::file_placeholder(id, video_file_id, video_file.recorded_id)
            }
        }
    }

    /// Bound a store lookup by the configured timeout
    async fn bounded<T>(
        &self,
        lookup: impl std::future::Future<Output = Result<Option<T>>>,
    ) -> Result<Option<T>> {
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(result) => result,
            Err(_) => Err(StreamError::MetadataUnavailable(format!(
                "lookup exceeded {:?}",
                self.lookup_timeout
            ))),
        }
    }
}

/// Current wall clock as unix millis
pub(crate) fn now_millis() -> UnixMillis {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as UnixMillis)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_type_display() {
        assert_eq!(StreamType::LiveStream.to_string(), "LiveStream");
        assert_eq!(StreamType::RecordedStream.to_string(), "RecordedStream");
    }

    #[test]
    fn test_live_placeholder_shape() {
        let item = StreamInfoItem::live_placeholder(SessionId::new(1), 101);

        assert_eq!(item.channel_id, 101);
        assert_eq!(item.name, "");
        assert_eq!(item.start_at, 0);
        assert_eq!(item.end_at, 0);
        assert!(item.description.is_none());
        assert!(item.extended.is_none());
        assert!(item.video_file_id.is_none());
    }

    #[test]
    fn test_file_placeholder_shape() {
        let item = StreamInfoItem::file_placeholder(SessionId::new(2), 9, 0);

        assert_eq!(item.video_file_id, Some(9));
        assert_eq!(item.recorded_id, Some(0));
        assert_eq!(item.channel_id, 0);
        assert_eq!(item.name, "");
    }

    #[test]
    fn test_now_millis_is_recent() {
        // Anything after 2020 is plausible wall clock
        assert!(now_millis() > 1_577_836_800_000);
    }
}
