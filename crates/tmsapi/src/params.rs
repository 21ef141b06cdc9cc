//! Request parameter types for the TMS facade operations.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta};

use crate::error::{Result, TmsError};

/// Default grid window, in hours, when no end time is given.
pub const DEFAULT_AIRING_WINDOW_HOURS: i64 = 3;

/// Image size of the preferred image URI returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageSize {
    /// Small.
    Sm,
    /// Medium. Default for lineup grids and station details.
    #[default]
    Md,
    /// Large.
    Lg,
    /// Master.
    Ms,
}

impl ImageSize {
    /// Wire value of the size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sm => "Sm",
            Self::Md => "Md",
            Self::Lg => "Lg",
            Self::Ms => "Ms",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default image size for lineup grids (`/lineups/{id}/grid`).
pub const DEFAULT_IMAGE_SIZE: ImageSize = ImageSize::Md;

/// Resize options for a binary asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetParams {
    /// Target width in pixels.
    pub width: Option<u32>,
    /// Target height in pixels.
    pub height: Option<u32>,
    /// Trim transparent borders.
    pub trim: Option<bool>,
}

impl AssetParams {
    /// Creates empty asset parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            width: None,
            height: None,
            trim: None,
        }
    }

    /// Sets the target size.
    #[must_use]
    pub const fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the trim flag.
    #[must_use]
    pub const fn trim(mut self, trim: bool) -> Self {
        self.trim = Some(trim);
        self
    }
}

/// Options for a program details lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramParams {
    /// Preferred image size (default: `Sm`).
    pub image_size: ImageSize,
    /// Preferred TV image aspect ratio (default: `3x4`).
    pub image_aspect_tv: String,
}

impl Default for ProgramParams {
    fn default() -> Self {
        Self {
            image_size: ImageSize::Sm,
            image_aspect_tv: String::from("3x4"),
        }
    }
}

impl ProgramParams {
    /// Sets the image size.
    #[must_use]
    pub const fn image_size(mut self, size: ImageSize) -> Self {
        self.image_size = size;
        self
    }

    /// Sets the TV image aspect ratio (e.g. `16x9`).
    #[must_use]
    pub fn image_aspect_tv(mut self, aspect: impl Into<String>) -> Self {
        self.image_aspect_tv = aspect.into();
        self
    }
}

/// Maps an empty string to `None`.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses an ISO 8601 datetime. Values without an offset are taken as UTC.
///
/// Accepts `2024-01-01T00:00:00Z`, `2024-01-01T00:00:00+09:00`,
/// `2024-01-01T00:00Z`, `2024-01-01T00:00:00` and `2024-01-01` (midnight).
///
/// # Errors
///
/// Returns `TmsError::InvalidDateTime` if no known format matches.
pub fn parse_iso8601(s: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
        return Ok(dt);
    }
    let naive = s.strip_suffix(['Z', 'z']).unwrap_or(s);
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(naive, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|dt| dt.and_utc().fixed_offset())
        .ok_or_else(|| TmsError::InvalidDateTime(String::from(s)))
}

/// Computes the default end time: `start` plus [`DEFAULT_AIRING_WINDOW_HOURS`].
///
/// The result keeps the start's UTC offset, e.g. `2024-01-01T03:00:00+00:00`.
///
/// # Errors
///
/// Returns `TmsError::InvalidDateTime` if `start` cannot be parsed or the
/// addition overflows.
pub fn default_end_time(start: &str) -> Result<String> {
    let start_dt = parse_iso8601(start)?;
    let end = start_dt
        .checked_add_signed(TimeDelta::hours(DEFAULT_AIRING_WINDOW_HOURS))
        .ok_or_else(|| TmsError::InvalidDateTime(String::from(start)))?;
    Ok(end.to_rfc3339_opts(SecondsFormat::Secs, false))
}
