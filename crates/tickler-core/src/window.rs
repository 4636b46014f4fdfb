//! Relative time windows used to look up items that are about to expire.

use crate::error::CoreError;
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp};
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

/// A named window relative to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomingPeriod {
    /// From now until the end of the current UTC day.
    Today,
    /// The whole next UTC day.
    Tomorrow,
    /// Seven whole UTC days starting at today's midnight.
    Week,
}

impl IncomingPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomingPeriod::Today => "today",
            IncomingPeriod::Tomorrow => "tomorrow",
            IncomingPeriod::Week => "week",
        }
    }
}

impl Display for IncomingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncomingPeriod {
    type Err = CoreError;

    /// Parses a period selector, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Today, Self::Tomorrow, Self::Week]
            .into_iter()
            .find(|period| period.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownPeriod(s.to_string()))
    }
}

/// A half-open `[start, end)` range of expiration dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomingWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl IncomingWindow {
    /// Returns whether `at` lies inside the window (start inclusive, end exclusive).
    pub fn contains(&self, at: Timestamp) -> bool {
        self.start <= at && at < self.end
    }
}

/// Computes the window for `period` as seen at `now`.
///
/// Day boundaries are UTC midnights. `Today` starts at `now` itself so that
/// items already past due earlier today are left out.
pub fn incoming_window(
    period: IncomingPeriod,
    now: Timestamp,
) -> Result<IncomingWindow, CoreError> {
    let midnight = now
        .to_zoned(TimeZone::UTC)
        .start_of_day()
        .map_err(|e| CoreError::TimeOutOfRange(e.to_string()))?
        .timestamp();

    let window = match period {
        IncomingPeriod::Today => IncomingWindow {
            start: now,
            end: add_days(midnight, 1)?,
        },
        IncomingPeriod::Tomorrow => IncomingWindow {
            start: add_days(midnight, 1)?,
            end: add_days(midnight, 2)?,
        },
        IncomingPeriod::Week => IncomingWindow {
            start: midnight,
            end: add_days(midnight, 7)?,
        },
    };

    Ok(window)
}

fn add_days(at: Timestamp, days: i64) -> Result<Timestamp, CoreError> {
    at.checked_add(SignedDuration::from_hours(24 * days))
        .map_err(|e| CoreError::TimeOutOfRange(format!("{at} + {days} days: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn now() -> Timestamp {
        ts("2025-10-18T14:30:15Z")
    }

    #[test]
    fn today_starts_now_and_ends_at_next_midnight() {
        let window = incoming_window(IncomingPeriod::Today, now()).unwrap();
        assert_eq!(window.start, now());
        assert_eq!(window.end, ts("2025-10-19T00:00:00Z"));
    }

    #[test]
    fn today_excludes_the_past_and_includes_the_near_future() {
        let window = incoming_window(IncomingPeriod::Today, now()).unwrap();
        assert!(!window.contains(now() - SignedDuration::from_secs(1)));
        assert!(window.contains(now()));
        assert!(window.contains(now() + SignedDuration::from_secs(1)));
        assert!(!window.contains(ts("2025-10-19T00:00:00Z")));
    }

    #[test]
    fn tomorrow_covers_the_whole_next_day() {
        let window = incoming_window(IncomingPeriod::Tomorrow, now()).unwrap();
        assert_eq!(window.start, ts("2025-10-19T00:00:00Z"));
        assert_eq!(window.end, ts("2025-10-20T00:00:00Z"));

        assert!(!window.contains(now() + SignedDuration::from_hours(1)));
        assert!(window.contains(ts("2025-10-19T01:00:00Z")));
    }

    #[test]
    fn week_spans_seven_days_from_midnight() {
        let window = incoming_window(IncomingPeriod::Week, now()).unwrap();
        assert_eq!(window.start, ts("2025-10-18T00:00:00Z"));
        assert_eq!(window.end, ts("2025-10-25T00:00:00Z"));

        assert!(window.contains(ts("2025-10-18T00:00:00Z")));
        assert!(window.contains(ts("2025-10-24T23:59:59Z")));
        assert!(!window.contains(ts("2025-10-25T00:00:00Z")));
    }

    #[test]
    fn window_at_exact_midnight() {
        let midnight = ts("2025-10-18T00:00:00Z");
        let window = incoming_window(IncomingPeriod::Today, midnight).unwrap();
        assert_eq!(window.start, midnight);
        assert_eq!(window.end, ts("2025-10-19T00:00:00Z"));
    }

    #[test]
    fn parse_is_case_insensitive() {
        for (raw, expected) in [
            ("today", IncomingPeriod::Today),
            ("Tomorrow", IncomingPeriod::Tomorrow),
            ("WEEK", IncomingPeriod::Week),
        ] {
            assert_eq!(raw.parse::<IncomingPeriod>().unwrap(), expected);
        }
    }

    #[test]
    fn parse_rejects_unknown_selectors() {
        for raw in ["", "month", "3", "week "] {
            let err = raw.parse::<IncomingPeriod>().unwrap_err();
            assert_eq!(err, CoreError::UnknownPeriod(raw.to_string()));
        }
    }

    #[test]
    fn display_matches_parse() {
        for period in [
            IncomingPeriod::Today,
            IncomingPeriod::Tomorrow,
            IncomingPeriod::Week,
        ] {
            let parsed: IncomingPeriod = period.to_string().parse().unwrap();
            assert_eq!(parsed, period);
        }
    }
}
