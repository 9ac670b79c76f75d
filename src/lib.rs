//! Chunker - Video chunking service
//!
//! Accepts an uploaded video, splits it with ffmpeg into fixed-duration
//! stream-copied segments and answers with the URLs of those segments.
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (jobs, workspace, artifact ordering, payloads)
//! - ports/: Trait definitions (storage, segmenter)
//! - adapters/: Concrete implementations (filesystem, ffmpeg, HTTP)
//! - application/: The chunking job service
//! - config: Environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

pub use application::chunking::ChunkingService;
pub use config::ServerConfig;
pub use error::{JobError, ListError, SegmentationError, StorageError, ValidationError};
