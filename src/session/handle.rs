//! Session execution handle
//!
//! A handle binds a resolved execution command to a channel or video file
//! and owns the output pipe the stream's bytes flow through. The external
//! execution engine feeds the sender side; the caller consumes the receiver.
//! Dropping the handle (registry stop) closes the pipe on both sides.

use std::time::Instant;

use bytes::Bytes;
use tokio::sync::mpsc;

use super::kind::SessionDescriptor;

/// Receiver side of a session's output pipe
///
/// `Bytes` chunks are reference counted, so handing them through the pipe
/// never copies payload data.
pub type StreamOutput = mpsc::Receiver<Bytes>;

/// Sender side of a session's output pipe, held by the execution engine
pub type OutputSender = mpsc::Sender<Bytes>;

/// Execution handle for one stream session
pub struct SessionHandle {
    descriptor: SessionDescriptor,
    command: String,
    output: Option<StreamOutput>,
    sender: Option<OutputSender>,
    created_at: Instant,
}

impl SessionHandle {
    pub(crate) fn new(
        descriptor: SessionDescriptor,
        command: String,
        pipe: Option<(OutputSender, StreamOutput)>,
    ) -> Self {
        let (sender, output) = match pipe {
            Some((tx, rx)) => (Some(tx), Some(rx)),
            None => (None, None),
        };

        Self {
            descriptor,
            command,
            output,
            sender,
            created_at: Instant::now(),
        }
    }

    /// The session's runtime descriptor
    pub fn descriptor(&self) -> &SessionDescriptor {
        &self.descriptor
    }

    /// The bound execution command
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Take the consumable output stream
    ///
    /// Returns `None` for segmented kinds (HLS delivers out-of-band) or if
    /// the output was already taken.
    pub fn take_output(&mut self) -> Option<StreamOutput> {
        self.output.take()
    }

    /// Sender side of the output pipe, for the execution engine to feed
    pub fn output_sender(&self) -> Option<OutputSender> {
        self.sender.clone()
    }

    /// Whether this session delivers a continuous output stream
    pub fn has_output(&self) -> bool {
        self.sender.is_some()
    }

    /// Time since the handle was constructed
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("descriptor", &self.descriptor)
            .field("command", &self.command)
            .field("has_output", &self.has_output())
            .finish()
    }
}
