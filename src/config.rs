//! Stream configuration
//!
//! Named execution-command profiles per live stream kind, plus the runtime
//! knobs for session pipes and metadata lookups. Configuration is loaded by
//! an external provider and handed in read-only; nothing here is mutated
//! after construction, so profile resolution is safe to call concurrently.

use std::time::Duration;

use crate::error::StreamError;
use crate::session::kind::LiveKind;

/// Default output pipe depth in chunks
pub const DEFAULT_PIPE_CAPACITY: usize = 64;

/// Default bound on a single metadata lookup during enrichment
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// A named execution-command template for one stream kind
///
/// Immutable once loaded. The `cmd` template may reference `{channelId}`
/// (live) or `{videoFileId}` (file-based), bound at session construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamProfile {
    /// Profile name, unique within its section
    pub name: String,
    /// Execution command template
    pub cmd: String,
}

impl StreamProfile {
    /// Create a new profile
    pub fn new(name: impl Into<String>, cmd: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cmd: cmd.into(),
        }
    }
}

/// Profile sections for live streaming
///
/// A section that is `None` means the deployment never configured that
/// stream kind; starting it fails with `ConfigSectionMissing`.
#[derive(Debug, Clone, Default)]
pub struct LiveStreamConfig {
    /// MPEG-2 TS profiles
    pub m2ts: Option<Vec<StreamProfile>>,
    /// WebM profiles
    pub webm: Option<Vec<StreamProfile>>,
    /// MP4 profiles
    pub mp4: Option<Vec<StreamProfile>>,
    /// HLS profiles
    pub hls: Option<Vec<StreamProfile>>,
}

impl LiveStreamConfig {
    /// Get the profile section for a kind, if configured
    pub fn section(&self, kind: LiveKind) -> Option<&[StreamProfile]> {
        let section = match kind {
            LiveKind::M2ts => &self.m2ts,
            LiveKind::Webm => &self.webm,
            LiveKind::Mp4 => &self.mp4,
            LiveKind::Hls => &self.hls,
        };
        section.as_deref()
    }

    /// Set the m2ts section
    pub fn m2ts(mut self, profiles: Vec<StreamProfile>) -> Self {
        self.m2ts = Some(profiles);
        self
    }

    /// Set the webm section
    pub fn webm(mut self, profiles: Vec<StreamProfile>) -> Self {
        self.webm = Some(profiles);
        self
    }

    /// Set the mp4 section
    pub fn mp4(mut self, profiles: Vec<StreamProfile>) -> Self {
        self.mp4 = Some(profiles);
        self
    }

    /// Set the hls section
    pub fn hls(mut self, profiles: Vec<StreamProfile>) -> Self {
        self.hls = Some(profiles);
        self
    }
}

/// Stream orchestration configuration
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Live streaming profile sections
    pub live: LiveStreamConfig,

    /// Output pipe depth in chunks for continuous stream kinds
    pub pipe_capacity: usize,

    /// Per-lookup bound during metadata enrichment
    pub lookup_timeout: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            live: LiveStreamConfig::default(),
            pipe_capacity: DEFAULT_PIPE_CAPACITY,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

impl StreamConfig {
    /// Set the live profile sections
    pub fn live(mut self, live: LiveStreamConfig) -> Self {
        self.live = live;
        self
    }

    /// Set the output pipe depth
    pub fn pipe_capacity(mut self, capacity: usize) -> Self {
        self.pipe_capacity = capacity;
        self
    }

    /// Set the per-lookup enrichment bound
    pub fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Resolve a live profile by kind and name
    ///
    /// Fails with `ConfigSectionMissing` when the kind has no section at
    /// all, and `ProfileNotFound` when the section has no matching entry.
    pub fn live_profile(&self, kind: LiveKind, name: &str) -> Result<&StreamProfile, StreamError> {
        let section = self
            .live
            .section(kind)
            .ok_or(StreamError::ConfigSectionMissing(kind))?;

        section
            .iter()
            .find(|profile| profile.name == name)
            .ok_or_else(|| StreamError::ProfileNotFound {
                kind,
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_m2ts() -> StreamConfig {
        StreamConfig::default().live(
            LiveStreamConfig::default().m2ts(vec![
                StreamProfile::new("default", "encode --ch {channelId}"),
                StreamProfile::new("mobile", "encode --low --ch {channelId}"),
            ]),
        )
    }

    #[test]
    fn test_default_config() {
        let config = StreamConfig::default();

        assert_eq!(config.pipe_capacity, DEFAULT_PIPE_CAPACITY);
        assert_eq!(config.lookup_timeout, DEFAULT_LOOKUP_TIMEOUT);
        assert!(config.live.section(LiveKind::M2ts).is_none());
    }

    #[test]
    fn test_section_missing() {
        let config = config_with_m2ts();

        let result = config.live_profile(LiveKind::Hls, "default");
        assert!(matches!(
            result,
            Err(StreamError::ConfigSectionMissing(LiveKind::Hls))
        ));
    }

    #[test]
    fn test_profile_not_found() {
        let config = config_with_m2ts();

        let result = config.live_profile(LiveKind::M2ts, "missing");
        assert!(matches!(
            result,
            Err(StreamError::ProfileNotFound { kind: LiveKind::M2ts, .. })
        ));
    }

    #[test]
    fn test_profile_resolution() {
        let config = config_with_m2ts();

        let profile = config.live_profile(LiveKind::M2ts, "mobile").unwrap();
        assert_eq!(profile.cmd, "encode --low --ch {channelId}");
    }

    #[test]
    fn test_builder_chaining() {
        let config = StreamConfig::default()
            .pipe_capacity(8)
            .lookup_timeout(Duration::from_millis(250))
            .live(LiveStreamConfig::default().hls(vec![StreamProfile::new("hls", "segment")]));

        assert_eq!(config.pipe_capacity, 8);
        assert_eq!(config.lookup_timeout, Duration::from_millis(250));
        assert_eq!(config.live.section(LiveKind::Hls).unwrap().len(), 1);
    }
}
