//! Stream kind and session descriptor types
//!
//! Every session carries a closed kind tag that decides which configuration
//! section applies at start time and which metadata store enrichment must
//! query at list time.

/// Channel identifier (tuner/broadcast channel)
pub type ChannelId = u64;

/// Video file identifier (recorded media on disk)
pub type VideoFileId = u64;

/// Recording identifier (the recording a video file belongs to)
pub type RecordedId = u64;

/// Unix-epoch timestamp in milliseconds
pub type UnixMillis = u64;

/// Opaque session identifier assigned by the registry
///
/// Stable for the session's lifetime and never reused while the session is
/// active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Create a session id from its raw value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Live stream kinds (started through the orchestrator)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiveKind {
    /// MPEG-2 transport stream, continuous
    M2ts,
    /// WebM container, continuous
    Webm,
    /// Fragmented MP4 container, continuous
    Mp4,
    /// HTTP Live Streaming, segmented (payload delivered out-of-band)
    Hls,
}

impl LiveKind {
    /// Configuration section name for this kind
    pub fn section_name(&self) -> &'static str {
        match self {
            LiveKind::M2ts => "m2ts",
            LiveKind::Webm => "webm",
            LiveKind::Mp4 => "mp4",
            LiveKind::Hls => "hls",
        }
    }

    /// Whether the payload is delivered as one continuous byte stream
    ///
    /// HLS delivers playlist and segment files instead, so no output pipe
    /// is allocated for it.
    pub fn has_output_pipe(&self) -> bool {
        !matches!(self, LiveKind::Hls)
    }
}

impl std::fmt::Display for LiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.section_name())
    }
}

/// File-based stream kinds (sessions over recorded media)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Continuous stream from a recorded video file
    Recorded,
    /// Segmented HLS stream from a recorded video file
    RecordedHls,
}

impl FileKind {
    /// Whether the payload is delivered as one continuous byte stream
    pub fn has_output_pipe(&self) -> bool {
        !matches!(self, FileKind::RecordedHls)
    }
}

/// All stream kinds a session can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// Live MPEG-2 transport stream
    M2ts,
    /// Live WebM stream
    Webm,
    /// Live MP4 stream
    Mp4,
    /// Live HLS stream
    Hls,
    /// Recorded file stream
    Recorded,
    /// Recorded file HLS stream
    RecordedHls,
}

impl StreamKind {
    /// Which enrichment class this kind belongs to
    pub fn class(&self) -> SessionClass {
        match self {
            StreamKind::M2ts | StreamKind::Webm | StreamKind::Mp4 | StreamKind::Hls => {
                SessionClass::Live
            }
            StreamKind::Recorded | StreamKind::RecordedHls => SessionClass::File,
        }
    }

    /// Check if this is a live kind
    pub fn is_live(&self) -> bool {
        self.class() == SessionClass::Live
    }

    /// Check if this is a file-based kind
    pub fn is_file(&self) -> bool {
        self.class() == SessionClass::File
    }
}

impl From<LiveKind> for StreamKind {
    fn from(kind: LiveKind) -> Self {
        match kind {
            LiveKind::M2ts => StreamKind::M2ts,
            LiveKind::Webm => StreamKind::Webm,
            LiveKind::Mp4 => StreamKind::Mp4,
            LiveKind::Hls => StreamKind::Hls,
        }
    }
}

impl From<FileKind> for StreamKind {
    fn from(kind: FileKind) -> Self {
        match kind {
            FileKind::Recorded => StreamKind::Recorded,
            FileKind::RecordedHls => StreamKind::RecordedHls,
        }
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StreamKind::M2ts => "m2ts",
            StreamKind::Webm => "webm",
            StreamKind::Mp4 => "mp4",
            StreamKind::Hls => "hls",
            StreamKind::Recorded => "recorded",
            StreamKind::RecordedHls => "recorded-hls",
        };
        f.write_str(name)
    }
}

/// Enrichment class of a session kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionClass {
    /// Enriched from the program store (currently airing program)
    Live,
    /// Enriched from the video-file and recording stores
    File,
}

/// Runtime record describing an active session
///
/// Owned by the registry; the orchestrator only reads it. Exactly one of
/// `channel_id`/`video_file_id` is populated, according to `kind.class()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescriptor {
    /// Kind of stream this session delivers
    pub kind: StreamKind,
    /// Bound channel (live sessions only)
    pub channel_id: Option<ChannelId>,
    /// Backing video file (file-based sessions only)
    pub video_file_id: Option<VideoFileId>,
}

impl SessionDescriptor {
    /// Descriptor for a live session
    pub fn live(kind: LiveKind, channel_id: ChannelId) -> Self {
        Self {
            kind: kind.into(),
            channel_id: Some(channel_id),
            video_file_id: None,
        }
    }

    /// Descriptor for a file-based session
    pub fn file(kind: FileKind, video_file_id: VideoFileId) -> Self {
        Self {
            kind: kind.into(),
            channel_id: None,
            video_file_id: Some(video_file_id),
        }
    }
}
