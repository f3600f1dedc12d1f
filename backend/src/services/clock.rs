//! Wall-clock readings for live annotation.
//!
//! Agenda times are local wall-clock values without a date or zone, so every
//! reading here is a `NaiveDateTime` in the broadcaster's local time.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Time zone the agenda's wall-clock is read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockZone {
    /// The host's local zone.
    #[default]
    Local,
    /// A named IANA zone, with daylight saving applied.
    Named(Tz),
    /// A constant offset from UTC.
    Fixed(FixedOffset),
}

impl ClockZone {
    /// Parse an IANA zone name such as `"Europe/Madrid"`.
    pub fn named(name: &str) -> Result<Self, String> {
        name.trim()
            .parse::<Tz>()
            .map(Self::Named)
            .map_err(|e| format!("Unknown time zone '{}': {}", name, e))
    }

    /// Offset in minutes east of UTC; must be strictly within one day.
    pub fn fixed_minutes(minutes: i32) -> Result<Self, String> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::Fixed)
            .ok_or_else(|| format!("UTC offset out of range: {} minutes", minutes))
    }
}

/// Reads the system clock in a configured zone.
///
/// Servers usually run in UTC, so the zone pins readings to the agenda's
/// broadcaster instead of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    zone: ClockZone,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_zone(zone: ClockZone) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> ClockZone {
        self.zone
    }

    /// Local wall-clock reading of a UTC instant.
    pub fn local_time_at(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self.zone {
            ClockZone::Local => instant.with_timezone(&Local).naive_local(),
            ClockZone::Named(tz) => instant.with_timezone(&tz).naive_local(),
            ClockZone::Fixed(offset) => instant.with_timezone(&offset).naive_local(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        self.local_time_at(Utc::now())
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn wall(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_fixed_clock() {
        let at = wall(6, 27, 13);
        assert_eq!(FixedClock(at).now(), at);
    }

    #[test]
    fn test_named_zone_follows_daylight_saving() {
        let clock = SystemClock::in_zone(ClockZone::named("Europe/Madrid").unwrap());

        let winter = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(clock.local_time_at(winter), wall(1, 15, 13));

        let summer = Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap();
        assert_eq!(clock.local_time_at(summer), wall(7, 15, 14));
    }

    #[test]
    fn test_unknown_zone_rejected() {
        assert!(ClockZone::named("Europe/Atlantis").is_err());
        assert!(ClockZone::named("").is_err());
    }

    #[test]
    fn test_fixed_minutes() {
        let zone = ClockZone::fixed_minutes(120).unwrap();
        assert_eq!(zone, ClockZone::Fixed(FixedOffset::east_opt(7200).unwrap()));

        let clock = SystemClock::in_zone(zone);
        let instant = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(clock.local_time_at(instant), wall(1, 15, 14));
    }

    #[test]
    fn test_fixed_minutes_out_of_range() {
        assert!(ClockZone::fixed_minutes(24 * 60).is_err());
        assert!(ClockZone::fixed_minutes(-24 * 60).is_err());
        assert!(ClockZone::fixed_minutes(100_000).is_err());
        assert!(ClockZone::fixed_minutes(i32::MAX).is_err());
    }

    #[test]
    fn test_default_is_host_local() {
        assert_eq!(SystemClock::new().zone(), ClockZone::Local);
    }
}
