use serde::{Deserialize, Serialize};
use std::fmt;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

///
/// Timestamp
/// (in milliseconds)
///

#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Self = Self(u64::MIN);
    pub const MIN: Self = Self(u64::MIN);
    pub const MAX: Self = Self(u64::MAX);

    /// Construct from milliseconds.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Construct from seconds.
    #[must_use]
    pub const fn from_seconds(secs: u64) -> Self {
        Self(secs * 1_000)
    }

    #[allow(clippy::cast_sign_loss)]
    pub fn parse_rfc3339(s: &str) -> Result<Self, String> {
        let dt = OffsetDateTime::parse(s, &Rfc3339)
            .map_err(|e| format!("timestamp parse error: {e}"))?;
        let ms = dt.unix_timestamp_nanos() / 1_000_000;
        if ms < 0 {
            return Err("timestamp before epoch".to_string());
        }

        Ok(Self(ms as u64))
    }

    /// Current wall-clock timestamp in milliseconds.
    #[allow(clippy::cast_sign_loss)]
    #[must_use]
    pub fn now() -> Self {
        let ns = OffsetDateTime::now_utc().unix_timestamp_nanos();
        Self((ns / 1_000_000).max(0) as u64)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = i128::from(self.0) * 1_000_000;
        match OffsetDateTime::from_unix_timestamp_nanos(ns)
            .ok()
            .and_then(|dt| dt.format(&Rfc3339).ok())
        {
            Some(s) => write!(f, "{s}"),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<u64> for Timestamp {
    fn from(ms: u64) -> Self {
        Self(ms)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        let ts = Timestamp::parse_rfc3339("2024-05-01T12:30:00Z").unwrap();
        assert_eq!(ts.to_string(), "2024-05-01T12:30:00Z");
    }

    #[test]
    fn seconds_scale_to_millis() {
        assert_eq!(Timestamp::from_seconds(2).get(), 2_000);
    }
}
