//! Domain layer - Pure business logic.

pub mod artifacts;
pub mod jobs;
pub mod response;
pub mod workspace;
