//! Local adapters: filesystem, ffmpeg child process and the HTTP surface.

pub mod ffmpeg;
pub mod fs;
pub mod http;

#[cfg(test)]
mod functional_tests;

pub use ffmpeg::FfmpegSegmenter;
pub use fs::FsAdapter;
