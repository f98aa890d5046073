/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::errors::ImmichError;
use crate::properties::{AlbumUserRole, LibraryType};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use std::str::FromStr;

// Format of the `updatedAfter` query parameter on the asset listing
pub(crate) const UPDATED_AFTER_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Full sync cursor format, always with microseconds
pub(crate) const SYNC_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

const SYNC_TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// A point in time that may or may not carry an offset.
///
/// Naive values are taken to already be UTC, aware values are converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Aware(DateTime<FixedOffset>),
}

impl Timestamp {
    pub fn to_utc(self) -> DateTime<Utc> {
        match self {
            Timestamp::Naive(dt) => dt.and_utc(),
            Timestamp::Aware(dt) => dt.with_timezone(&Utc),
        }
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Timestamp::Naive(dt)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Timestamp::Aware(dt.fixed_offset())
    }
}

// Current UTC time as a full sync cursor
pub(crate) fn sync_timestamp_now() -> String {
    Utc::now().format(SYNC_TIMESTAMP_FORMAT).to_string()
}

// Checks a full sync cursor: `2024-01-01T01:23:45.678Z`. The fraction must have 1 to 6 digits.
pub(crate) fn validate_sync_timestamp(value: &str) -> Result<(), ImmichError> {
    let invalid = || ImmichError::InvalidTimestamp(value.to_string());
    let fraction = value
        .strip_suffix('Z')
        .and_then(|v| v.rsplit_once('.'))
        .map(|(_, fraction)| fraction)
        .ok_or_else(invalid)?;
    if fraction.is_empty() || fraction.len() > 6 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    NaiveDateTime::parse_from_str(value, SYNC_TIMESTAMP_PARSE_FORMAT)
        .map(|_| ())
        .map_err(|_| invalid())
}

// Parses library type, unrecognized types are read as no type
pub fn from_library_type<'de, D>(deserializer: D) -> Result<Option<LibraryType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(s.and_then(|s| LibraryType::from_str(&s).ok()))
}

// Parses album user role
pub fn from_album_user_role<'de, D>(deserializer: D) -> Result<AlbumUserRole, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    AlbumUserRole::from_str(&s).or(Ok(AlbumUserRole::Unknown))
}
