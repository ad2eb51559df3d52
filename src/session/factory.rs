//! Session construction
//!
//! Builds execution handles for requested stream kinds: binds the resolved
//! command template to the channel or video file and allocates the output
//! pipe before the handle becomes startable. Callers await construction
//! before registering the handle.

use tokio::sync::mpsc;

use crate::config::StreamConfig;
use crate::error::{Result, StreamError};
use crate::session::handle::{OutputSender, SessionHandle, StreamOutput};
use crate::session::kind::{ChannelId, FileKind, LiveKind, SessionDescriptor, VideoFileId};

/// Placeholder in command templates bound to the session's channel
const CHANNEL_PLACEHOLDER: &str = "{channelId}";

/// Placeholder in command templates bound to the session's video file
const VIDEO_FILE_PLACEHOLDER: &str = "{videoFileId}";

/// Builds session handles from resolved profiles
#[derive(Debug, Clone)]
pub struct SessionFactory {
    pipe_capacity: usize,
}

impl SessionFactory {
    /// Create a factory using the configured pipe capacity
    pub fn new(config: &StreamConfig) -> Self {
        Self {
            pipe_capacity: config.pipe_capacity,
        }
    }

    /// Build a handle for a live session on `channel_id`
    ///
    /// Continuous kinds get an output pipe; HLS does not. Fails with
    /// `ResourceAllocationFailed` if the pipe cannot be set up or the bound
    /// command is empty.
    pub async fn create_live(
        &self,
        kind: LiveKind,
        channel_id: ChannelId,
        cmd: &str,
    ) -> Result<SessionHandle> {
        let command = bind_command(cmd, CHANNEL_PLACEHOLDER, channel_id)?;

        let pipe = if kind.has_output_pipe() {
            Some(self.allocate_pipe()?)
        } else {
            None
        };

        tracing::debug!(
            kind = %kind,
            channel_id = channel_id,
            command = %command,
            "Live session handle built"
        );

        Ok(SessionHandle::new(
            SessionDescriptor::live(kind, channel_id),
            command,
            pipe,
        ))
    }

    /// Build a handle for a file-based session over `video_file_id`
    pub async fn create_file(
        &self,
        kind: FileKind,
        video_file_id: VideoFileId,
        cmd: &str,
    ) -> Result<SessionHandle> {
        let command = bind_command(cmd, VIDEO_FILE_PLACEHOLDER, video_file_id)?;

        let pipe = if kind.has_output_pipe() {
            Some(self.allocate_pipe()?)
        } else {
            None
        };

        tracing::debug!(
            kind = ?kind,
            video_file_id = video_file_id,
            command = %command,
            "File session handle built"
        );

        Ok(SessionHandle::new(
            SessionDescriptor::file(kind, video_file_id),
            command,
            pipe,
        ))
    }

    fn allocate_pipe(&self) -> Result<(OutputSender, StreamOutput)> {
        if self.pipe_capacity == 0 {
            return Err(StreamError::ResourceAllocationFailed(
                "pipe capacity is zero".into(),
            ));
        }

        Ok(mpsc::channel(self.pipe_capacity))
    }
}

fn bind_command(template: &str, placeholder: &str, value: u64) -> Result<String> {
    if template.trim().is_empty() {
        return Err(StreamError::ResourceAllocationFailed(
            "execution command is empty".into(),
        ));
    }

    Ok(template.replace(placeholder, &value.to_string()))
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[tokio::test]
    async fn test_create_live_binds_channel() {
        let factory = SessionFactory::new(&StreamConfig::default());

        let handle = factory
            .create_live(LiveKind::M2ts, 101, "encode --ch {channelId}")
            .await
            .unwrap();

        assert_eq!(handle.command(), "encode --ch 101");
        assert!(handle.has_output());
    }

    #[tokio::test]
    async fn test_create_live_hls_has_no_pipe() {
        let factory = SessionFactory::new(&StreamConfig::default());

        let handle = factory
            .create_live(LiveKind::Hls, 5, "segment --ch {channelId}")
            .await
            .unwrap();

        assert!(!handle.has_output());
    }

    #[tokio::test]
    async fn test_output_pipe_carries_bytes() {
        let factory = SessionFactory::new(&StreamConfig::default());

        let mut handle = factory
            .create_live(LiveKind::Mp4, 3, "encode --ch {channelId}")
            .await
            .unwrap();

        let sender = handle.output_sender().unwrap();
        let mut output = handle.take_output().unwrap();

        sender.send(Bytes::from_static(b"chunk")).await.unwrap();
        drop(sender);
        drop(handle);

        assert_eq!(output.recv().await.unwrap(), Bytes::from_static(b"chunk"));
        assert!(output.recv().await.is_none()); // pipe closed with the handle
    }

    #[tokio::test]
    async fn test_create_file_binds_video_file() {
        let factory = SessionFactory::new(&StreamConfig::default());

        let handle = factory
            .create_file(FileKind::Recorded, 9, "play --file {videoFileId}")
            .await
            .unwrap();

        assert_eq!(handle.command(), "play --file 9");
        assert!(handle.has_output());
    }

    #[tokio::test]
    async fn test_zero_capacity_fails_allocation() {
        let factory = SessionFactory::new(&StreamConfig::default().pipe_capacity(0));

        let result = factory.create_live(LiveKind::Webm, 1, "encode").await;
        assert!(matches!(
            result,
            Err(StreamError::ResourceAllocationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_command_fails() {
        let factory = SessionFactory::new(&StreamConfig::default());

        let result = factory.create_live(LiveKind::Webm, 1, "   ").await;
        assert!(matches!(
            result,
            Err(StreamError::ResourceAllocationFailed(_))
        ));
    }
}
