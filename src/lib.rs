//! Stream session orchestration for personal video recorder servers
//!
//! Turns a client request ("start a live or recorded stream in format X for
//! channel Y") into a running, uniquely identified session, and later
//! reports on or terminates it. Media execution, configuration loading and
//! the metadata databases are external collaborators injected behind
//! traits.
//!
//! # Architecture
//!
//! ```text
//!   StreamRequest ──► StreamConfig::live_profile ──► SessionFactory
//!                                                          │
//!                                                   SessionHandle
//!                                                          │
//!                     SessionRegistry::register ◄──────────┘
//!                              │
//!                          SessionId ──► caller (+ StreamOutput pipe)
//!
//!   stream_infos:  registry.list_active ──► per-session metadata join
//!                  (program store | video-file + recording stores)
//!                  ──► StreamInfoList, in registration order
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pvr_stream::{
//!     InMemorySessionRegistry, LiveStreamConfig, StreamConfig, StreamOrchestrator,
//!     StreamProfile,
//! };
//! # use pvr_stream::{ProgramStore, RecordingStore, VideoFileStore};
//! # fn stores() -> (Arc<dyn ProgramStore>, Arc<dyn VideoFileStore>, Arc<dyn RecordingStore>) {
//! #     unimplemented!()
//! # }
//!
//! # async fn run() -> Result<(), pvr_stream::StreamError> {
//! let config = StreamConfig::default().live(
//!     LiveStreamConfig::default()
//!         .m2ts(vec![StreamProfile::new("default", "encode --ch {channelId}")]),
//! );
//! let (programs, video_files, recordings) = stores();
//!
//! let orchestrator = StreamOrchestrator::new(
//!     Arc::new(config),
//!     Arc::new(InMemorySessionRegistry::new()),
//!     programs,
//!     video_files,
//!     recordings,
//! );
//!
//! let (session_id, mut output) = orchestrator.start_m2ts("default", 101).await?;
//! while let Some(_chunk) = output.recv().await {
//!     // deliver chunk to the client
//! }
//! orchestrator.stop(session_id).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod info;
pub mod metadata;
pub mod orchestrator;
pub mod registry;
pub mod session;

pub use config::{LiveStreamConfig, StreamConfig, StreamProfile};
pub use error::{Result, StreamError};
pub use info::{StreamInfoItem, StreamInfoList, StreamType};
pub use metadata::{Program, ProgramStore, Recording, RecordingStore, VideoFile, VideoFileStore};
pub use orchestrator::{LiveStream, StreamOrchestrator, StreamRequest};
pub use registry::{ActiveSession, InMemorySessionRegistry, SessionRegistry};
pub use session::{
    ChannelId, FileKind, LiveKind, RecordedId, SessionDescriptor, SessionFactory, SessionHandle,
    SessionId, StreamKind, StreamOutput, UnixMillis, VideoFileId,
};
