//! Manifest version comparison
//!
//! Manifest versions follow semver precedence, with one historical exception:
//! the oldest projects were saved with two-component versions such as `"0.1"`.
//! Those are padded to `0.1.0` before comparison. Build metadata never
//! influences ordering.

use std::cmp::Ordering;

use semver::{BuildMetadata, Version};

use crate::error::{ProjectError, Result};

/// Parse a manifest version, accepting non-canonical forms
///
/// Accepted in addition to strict semver:
/// - one or two components (`"1"`, `"0.1"`), padded with zeros
/// - a leading `v` (`"v0.3.0"`)
///
/// # Errors
/// Returns [`ProjectError::InvalidVersion`] when the string is not a version.
pub fn parse_version(raw: &str) -> Result<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Err(ProjectError::invalid_version(raw, "empty version"));
    }

    // Pad the numeric core only, suffixes stay as written
    let core_end = trimmed.find(&['-', '+'][..]).unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(core_end);
    let padded = match core.split('.').count() {
        1 => format!("{core}.0.0{suffix}"),
        2 => format!("{core}.0{suffix}"),
        _ => trimmed.to_string(),
    };

    let mut version =
        Version::parse(&padded).map_err(|e| ProjectError::invalid_version(raw, e.to_string()))?;
    version.build = BuildMetadata::EMPTY;
    Ok(version)
}

/// Normalize a manifest version to its canonical semver text
///
/// # Errors
/// Returns [`ProjectError::InvalidVersion`] for malformed input.
pub fn normalize(raw: &str) -> Result<String> {
    parse_version(raw).map(|v| v.to_string())
}

/// Compare two manifest versions by semver precedence
///
/// # Errors
/// Returns [`ProjectError::InvalidVersion`] if either side is malformed.
pub fn compare(version: &str, target: &str) -> Result<Ordering> {
    Ok(parse_version(version)?.cmp(&parse_version(target)?))
}

/// `version < target`
///
/// # Errors
/// Returns [`ProjectError::InvalidVersion`] if either side is malformed.
#[inline]
pub fn less_than(version: &str, target: &str) -> Result<bool> {
    Ok(compare(version, target)? == Ordering::Less)
}

/// `version >= target`
///
/// # Errors
/// Returns [`ProjectError::InvalidVersion`] if either side is malformed.
#[inline]
pub fn greater_or_equal(version: &str, target: &str) -> Result<bool> {
    Ok(compare(version, target)? != Ordering::Less)
}
