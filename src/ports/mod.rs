//! Ports - Trait definitions for the external collaborators of a job.

pub mod segmenter;
pub mod storage;
