use std::ops::Deref;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// a date, time, and timezone. serialized to rfc3339, which is what the
/// server emits for every timestamp on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Time(
    #[serde(
        serialize_with = "time::serde::rfc3339::serialize",
        deserialize_with = "time::serde::rfc3339::deserialize"
    )]
    OffsetDateTime,
);

impl Time {
    pub fn now_utc() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }
}

impl Deref for Time {
    type Target = OffsetDateTime;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<OffsetDateTime> for Time {
    fn from(value: OffsetDateTime) -> Self {
        Time(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_round_trip() {
        let json = r#""2026-03-01T20:00:00Z""#;
        let t: Time = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), json);
    }

    #[test]
    fn ordering_follows_the_instant() {
        let a: Time = serde_json::from_str(r#""2026-01-01T00:00:00Z""#).unwrap();
        let b: Time = serde_json::from_str(r#""2026-01-01T00:00:01Z""#).unwrap();
        assert!(a < b);
    }
}
