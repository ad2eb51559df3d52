//! Metadata store interfaces
//!
//! Program, video-file and recording lookups backing enrichment. The
//! actual stores (EPG database, recorded-media database) live outside this
//! crate; these traits are the consumed contract. A store that cannot
//! answer reports `MetadataUnavailable`, which enrichment degrades to a
//! placeholder item rather than failing the list.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::kind::{ChannelId, RecordedId, UnixMillis, VideoFileId};

/// A program airing on a channel
#[derive(Debug, Clone)]
pub struct Program {
    /// Channel the program airs on
    pub channel_id: ChannelId,
    /// Program title
    pub name: String,
    /// Airing start, unix millis
    pub start_at: UnixMillis,
    /// Airing end, unix millis
    pub end_at: UnixMillis,
    /// Short description, if the EPG carries one
    pub description: Option<String>,
    /// Extended description, if the EPG carries one
    pub extended: Option<String>,
}

/// A recorded media file on disk
#[derive(Debug, Clone)]
pub struct VideoFile {
    /// File id
    pub id: VideoFileId,
    /// Recording this file belongs to
    pub recorded_id: RecordedId,
}

/// A finished or in-progress recording
#[derive(Debug, Clone)]
pub struct Recording {
    /// Recording id
    pub id: RecordedId,
    /// Channel the recording was taken from
    pub channel_id: ChannelId,
    /// Recording title
    pub name: String,
    /// Recording start, unix millis
    pub start_at: UnixMillis,
    /// Recording end, unix millis
    pub end_at: UnixMillis,
    /// Short description, if recorded
    pub description: Option<String>,
    /// Extended description, if recorded
    pub extended: Option<String>,
}

/// Looks up the program airing on a channel at a point in time
#[async_trait]
pub trait ProgramStore: Send + Sync {
    /// Find the program airing on `channel_id` at `at`
    async fn find_by_channel_and_time(
        &self,
        channel_id: ChannelId,
        at: UnixMillis,
    ) -> Result<Option<Program>>;
}

/// Looks up recorded video files by id
#[async_trait]
pub trait VideoFileStore: Send + Sync {
    /// Find a video file by id
    async fn find_by_id(&self, id: VideoFileId) -> Result<Option<VideoFile>>;
}

/// Looks up recordings by id
#[async_trait]
pub trait RecordingStore: Send + Sync {
    /// Find a recording by id
    async fn find_by_id(&self, id: RecordedId) -> Result<Option<Recording>>;
}
