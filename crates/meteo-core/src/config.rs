//! Station configuration
//!
//! Defaults match the station hardware. A configuration record can also be
//! decoded from a `postcard` blob (for example one kept in a flash sector).

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::clock::DateTime;
use crate::sensors::bmp180::Oversampling;
use crate::sensors::bmp180::registers::BMP180_ADDRESS;
use crate::sensors::htu21d::{HTU21D_ADDRESS, HUMIDITY_SETTLE_MS};

/// Delay at the end of every loop iteration.
pub const REFRESH_INTERVAL_MS: u32 = 200;

/// Offset added to the whole-hPa pressure before display.
pub const PRESSURE_DISPLAY_OFFSET_HPA: i32 = 25;

/// Date and time written to the RTC at boot: 13.06.2024 12:00:00.
pub const DEFAULT_INITIAL_DATETIME: DateTime = DateTime::new(13, 6, 2024, 12, 0, 0);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationConfig {
    pub pressure_address: u8,
    pub humidity_address: u8,
    pub oversampling: Oversampling,
    pub humidity_settle_ms: u32,
    pub refresh_ms: u32,
    pub pressure_offset_hpa: i32,
    /// Written to the RTC when the station starts. `None` keeps whatever the
    /// RTC already holds.
    pub initial_datetime: Option<DateTime>,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            pressure_address: BMP180_ADDRESS,
            humidity_address: HTU21D_ADDRESS,
            oversampling: Oversampling::HighResolution,
            humidity_settle_ms: HUMIDITY_SETTLE_MS,
            refresh_ms: REFRESH_INTERVAL_MS,
            pressure_offset_hpa: PRESSURE_DISPLAY_OFFSET_HPA,
            initial_datetime: Some(DEFAULT_INITIAL_DATETIME),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Config record could not be decoded: {0:?}")]
    Decode(postcard::Error),
    #[error("Config initial date/time is out of range: {0:?}")]
    InvalidInitialDateTime(DateTime),
}

impl StationConfig {
    /// Decode and validate a `postcard` configuration record.
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: StationConfig = postcard::from_bytes(bytes).map_err(|e| {
            warn!("Rejecting config record: {:?}", e);
            ConfigError::Decode(e)
        })?;

        if let Some(datetime) = config.initial_datetime
            && !datetime.is_valid()
        {
            warn!("Rejecting config record with initial date/time {:?}", datetime);
            return Err(ConfigError::InvalidInitialDateTime(datetime));
        }

        Ok(config)
    }
}
