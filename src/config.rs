//! Configuration loaded from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_ADDR: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_UPLOADS_DIR: &str = "./uploads";
const DEFAULT_CHUNKS_DIR: &str = "./chunks";
const DEFAULT_FFMPEG_BIN: &str = "ffmpeg";

/// Server configuration, handed to the router and services at construction.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: u16,
    /// Staging area for uploaded source files
    pub uploads_root: PathBuf,
    /// Root under which every job gets its own segment directory
    pub chunks_root: PathBuf,
    /// Prefix for the chunk URLs returned to clients
    pub public_base_url: String,
    /// ffmpeg executable
    pub ffmpeg_bin: PathBuf,
    /// Upper bound on a single segmentation run. `None` waits forever.
    pub segment_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let port = parse_var("PORT").unwrap_or(DEFAULT_PORT);

        Self {
            addr: env::var("ADDR").unwrap_or_else(|_| String::from(DEFAULT_ADDR)),
            port,
            uploads_root: env::var("UPLOADS_DIR")
                .unwrap_or_else(|_| String::from(DEFAULT_UPLOADS_DIR))
                .into(),
            chunks_root: env::var("CHUNKS_DIR")
                .unwrap_or_else(|_| String::from(DEFAULT_CHUNKS_DIR))
                .into(),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            ffmpeg_bin: env::var("FFMPEG_BIN")
                .unwrap_or_else(|_| String::from(DEFAULT_FFMPEG_BIN))
                .into(),
            segment_timeout: parse_var("SEGMENT_TIMEOUT_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: String::from(DEFAULT_ADDR),
            port: DEFAULT_PORT,
            uploads_root: PathBuf::from(DEFAULT_UPLOADS_DIR),
            chunks_root: PathBuf::from(DEFAULT_CHUNKS_DIR),
            public_base_url: format!("http://localhost:{}", DEFAULT_PORT),
            ffmpeg_bin: PathBuf::from(DEFAULT_FFMPEG_BIN),
            segment_timeout: None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "ignoring unparseable value, using default");
            None
        }
    }
}
