use std::env;
use std::path::PathBuf;

/// Runtime configuration for the resize service
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port for the API server (default: 3000)
    pub port: u16,

    /// Directory holding request-lifetime files (default: "uploads")
    pub staging_dir: PathBuf,

    /// Maximum upload size in bytes (default: 32 MB)
    pub max_file_size: usize,

    /// Upper bound on requested width/height in pixels (default: 10000)
    pub max_dimension: u32,

    /// JPEG encode quality, 1-100 (default: 80)
    pub jpeg_quality: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            staging_dir: PathBuf::from("uploads"),
            max_file_size: 32 * 1024 * 1024, // 32 MB
            max_dimension: 10_000,
            jpeg_quality: 80,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            staging_dir: env::var("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.staging_dir),

            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            max_dimension: env::var("MAX_DIMENSION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_dimension),

            jpeg_quality: env::var("JPEG_QUALITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|q| (1..=100).contains(q))
                .unwrap_or(default.jpeg_quality),
        }
    }
}
