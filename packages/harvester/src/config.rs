//! Configuration constants and validation functions for the harvester.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvesterError, Result};

/// HTTP timeout in seconds.
///
/// Edition pages are fetched once, without retries.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Maximum number of characters in one chunk body.
pub const CHUNK_SIZE: usize = 1000;

/// Maximum number of characters shared by two consecutive chunks.
pub const CHUNK_OVERLAP: usize = 200;

/// Date key marking an edition that is still in force.
pub const OPEN_ENDED: u32 = 30_000_000;

/// Title of the section listing every amending act of a statute.
pub const AMENDMENT_MARKER_TITLE: &str = "Pakeitimai:";

/// Separator used when a breadcrumb is rendered on one line.
pub const BREADCRUMB_SEPARATOR: &str = " > ";

/// Date pattern: YYYY-MM-DD.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Edition URL pattern: absolute http(s) URL without whitespace.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EDITION_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/]+/\S*$").expect("valid regex"));

/// Validate date format (YYYY-MM-DD).
///
/// Future dates are accepted: the open-ended edition answers them.
///
/// # Arguments
/// * `date_str` - Date string to validate
///
/// # Returns
/// * `Ok(())` if the string is a real calendar date
/// * `Err(HarvesterError::InvalidDate)` if invalid
///
/// # Examples
/// ```
/// use statute_harvester::config::validate_date;
///
/// assert!(validate_date("2020-07-01").is_ok());
/// assert!(validate_date("invalid").is_err());
/// assert!(validate_date("2020-02-30").is_err()); // No such day
/// ```
pub fn validate_date(date_str: &str) -> Result<()> {
    if !DATE_PATTERN.is_match(date_str) {
        return Err(HarvesterError::InvalidDate(date_str.to_string()));
    }

    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| HarvesterError::InvalidDate(date_str.to_string()))?;

    Ok(())
}

/// Validate that a string is an absolute http(s) URL.
///
/// # Examples
/// ```
/// use statute_harvester::config::validate_url;
///
/// assert!(validate_url("https://e-seimas.lrs.lt/portal/legalAct/lt/TAD/abc/asr").is_ok());
/// assert!(validate_url("e-seimas.lrs.lt").is_err());
/// ```
pub fn validate_url(url: &str) -> Result<()> {
    if EDITION_URL_PATTERN.is_match(url) {
        Ok(())
    } else {
        Err(HarvesterError::InvalidUrl(url.to_string()))
    }
}
