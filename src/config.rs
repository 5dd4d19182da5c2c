use std::path::PathBuf;

use crate::error::{AppError, Result};

pub const DEFAULT_CSV_PATH: &str = "data/BattedBallData.csv";

/// Canvas is square; coordinate spans are equal so distances render
/// with equal aspect.
pub const CANVAS_SIZE_PX: u32 = 1000;

/// Uniform margin around the plot area (pixels).
pub const CANVAS_MARGIN_PX: i32 = 20;

/// Scatter point radius (pixels).
pub const POINT_RADIUS_PX: i32 = 4;

/// Plot extents in feet, home plate at the origin. Both spans are 560 ft.
pub const X_MIN_FT: f64 = -280.0;
pub const X_MAX_FT: f64 = 280.0;
pub const Y_MIN_FT: f64 = -40.0;
pub const Y_MAX_FT: f64 = 520.0;

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the batted-ball CSV (CSV_PATH). Re-read on every request.
    pub csv_path: PathBuf,
    pub api_port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            csv_path: std::env::var("CSV_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CSV_PATH)),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "5001".to_string())
                .parse::<u16>()
                .map_err(|_| {
                    AppError::Config("API_PORT must be a valid port number".to_string())
                })?,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
