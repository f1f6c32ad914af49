use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};

/// Number of playlist items requested per page.
pub const PLAYLIST_PAGE_SIZE: u32 = 100;

/// Offsets used to page through a playlist with `total` items.
///
/// The first page starts at 0, the second at 1 and every following page 100
/// further on (0, 1, 101, 201, ...). One offset is produced per page of
/// [`PLAYLIST_PAGE_SIZE`] items.
///
/// These offsets are kept as-is for compatibility with existing snapshots. The
/// second page overlaps the first, so for a playlist longer than 100 items
/// entries 1..=99 appear twice and up to 99 trailing items are not fetched.
/// The earlier Python tool's loop produced 0, 101, 201 instead, which skips
/// item 100. Neither walks the list exactly once.
pub fn playlist_item_offsets(total: u32) -> Vec<u32> {
    (0..total)
        .step_by(PLAYLIST_PAGE_SIZE as usize)
        .enumerate()
        .map(|(page, start)| if page == 0 { 0 } else { start - PLAYLIST_PAGE_SIZE + 1 })
        .collect()
}

/// Builds a resource URL for an image UUID, e.g.
/// `https://resources.tidal.com/images/ab/cd/1080x1080.jpg`.
pub fn image_resource_url(base: &str, picture: &str, width: u32, height: u32) -> String {
    format!(
        "{base}/{path}/{width}x{height}.jpg",
        base = base.trim_end_matches('/'),
        path = picture.replace('-', "/"),
    )
}

/// Parses an `expiry_time` value from a credentials file.
///
/// Accepts RFC 3339 timestamps as well as `YYYY-MM-DD HH:MM:SS[.ffffff]`,
/// which is read as UTC.
pub fn parse_expiry_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Formats an expiry time the way [`parse_expiry_time`] reads it back.
pub fn format_expiry_time(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
