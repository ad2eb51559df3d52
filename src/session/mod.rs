//! Session types and construction
//!
//! A session is one running stream-delivery instance, live or file-based.
//! This module holds the kind/descriptor types, the execution handle with
//! its output pipe, and the factory that builds handles from resolved
//! profiles.

pub mod factory;
pub mod handle;
pub mod kind;

pub use factory::SessionFactory;
pub use handle::{OutputSender, SessionHandle, StreamOutput};
pub use kind::{
    ChannelId, FileKind, LiveKind, RecordedId, SessionClass, SessionDescriptor, SessionId,
    StreamKind, UnixMillis, VideoFileId,
};
