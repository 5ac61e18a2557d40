use crate::shared::entity::{Entity, ID};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The fixed wall-clock time of day at which review reminder emails
/// are delivered.
pub fn delivery_time() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap()
}

/// The closed set of spaced-repetition intervals. Every registered
/// `Review` fans out into exactly one `ReviewCycle` per interval, so
/// downstream invariants depend on this set never changing at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewCycleInterval {
    Day,
    Week,
    Month,
    Quarter,
    HalfYear,
}

impl ReviewCycleInterval {
    /// All intervals in ascending offset order.
    pub const ALL: [ReviewCycleInterval; 5] = [
        ReviewCycleInterval::Day,
        ReviewCycleInterval::Week,
        ReviewCycleInterval::Month,
        ReviewCycleInterval::Quarter,
        ReviewCycleInterval::HalfYear,
    ];

    pub fn days(self) -> i64 {
        match self {
            ReviewCycleInterval::Day => 1,
            ReviewCycleInterval::Week => 7,
            ReviewCycleInterval::Month => 30,
            ReviewCycleInterval::Quarter => 90,
            ReviewCycleInterval::HalfYear => 180,
        }
    }

    /// Expands an anchor date into the delivery timestamps for all
    /// intervals, ascending. The offsets are calendar-day additions
    /// composed with the given time of day, not elapsed durations, so
    /// the calendar date delta is exact across DST and leap boundaries.
    pub fn calculate(anchor: NaiveDate, time: NaiveTime) -> Vec<NaiveDateTime> {
        Self::ALL
            .iter()
            .map(|interval| (anchor + Duration::days(interval.days())).and_time(time))
            .collect()
    }

    /// Same as [`ReviewCycleInterval::calculate`] with the fixed
    /// delivery time of day (08:00).
    pub fn calculate_default(anchor: NaiveDate) -> Vec<NaiveDateTime> {
        Self::calculate(anchor, delivery_time())
    }
}

/// Delivery state of a `ReviewCycle`. The only legal transition is
/// `Pending` to one of the terminal states `Sent` / `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
}

impl NotificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationStatus::Pending => "PENDING",
            NotificationStatus::Sent => "SENT",
            NotificationStatus::Failed => "FAILED",
        }
    }
}

impl Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidNotificationStatusError {
    #[error("Notification status: {0} is unknown")]
    Unknown(String),
}

impl FromStr for NotificationStatus {
    type Err = InvalidNotificationStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(NotificationStatus::Pending),
            "SENT" => Ok(NotificationStatus::Sent),
            "FAILED" => Ok(NotificationStatus::Failed),
            _ => Err(InvalidNotificationStatusError::Unknown(s.to_string())),
        }
    }
}

/// A `ReviewCycle` is one planned reminder for a `Review` at a fixed
/// future timestamp. Five of them are created per `Review`, one per
/// `ReviewCycleInterval`.
#[derive(Debug, Clone)]
pub struct ReviewCycle {
    pub id: ID,
    pub review_id: ID,
    pub scheduled_at: NaiveDateTime,
    pub status: NotificationStatus,
}

impl ReviewCycle {
    pub fn new(review_id: ID, scheduled_at: NaiveDateTime) -> Self {
        Self {
            id: Default::default(),
            review_id,
            scheduled_at,
            status: NotificationStatus::Pending,
        }
    }

    /// Moves this cycle to a terminal status. Returns false without
    /// changing anything when the cycle is not `Pending` or when the
    /// requested status is not terminal.
    pub fn transition(&mut self, status: NotificationStatus) -> bool {
        if self.status != NotificationStatus::Pending || status == NotificationStatus::Pending {
            return false;
        }
        self.status = status;
        true
    }
}

impl Entity for ReviewCycle {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn hms(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    #[test]
    fn it_calculates_offsets_with_given_time() {
        let scheduled_ats = ReviewCycleInterval::calculate(ymd(2025, 1, 1), hms(10, 0));
        assert_eq!(
            scheduled_ats,
            vec![
                ymd(2025, 1, 2).and_time(hms(10, 0)),
                ymd(2025, 1, 8).and_time(hms(10, 0)),
                ymd(2025, 1, 31).and_time(hms(10, 0)),
                ymd(2025, 4, 1).and_time(hms(10, 0)),
                ymd(2025, 6, 30).and_time(hms(10, 0)),
            ]
        );
    }

    #[test]
    fn it_defaults_to_eight_in_the_morning() {
        let scheduled_ats = ReviewCycleInterval::calculate_default(ymd(2025, 1, 1));
        assert_eq!(
            scheduled_ats,
            vec![
                ymd(2025, 1, 2).and_time(hms(8, 0)),
                ymd(2025, 1, 8).and_time(hms(8, 0)),
                ymd(2025, 1, 31).and_time(hms(8, 0)),
                ymd(2025, 4, 1).and_time(hms(8, 0)),
                ymd(2025, 6, 30).and_time(hms(8, 0)),
            ]
        );
    }

    #[test]
    fn it_uses_calendar_day_arithmetic_across_leap_day() {
        let scheduled_ats = ReviewCycleInterval::calculate_default(ymd(2024, 1, 1));
        // 2024 is a leap year, +90 lands a day earlier on the calendar
        // than in 2025
        assert_eq!(scheduled_ats[3], ymd(2024, 3, 31).and_time(hms(8, 0)));
        assert_eq!(scheduled_ats[4], ymd(2024, 6, 29).and_time(hms(8, 0)));
    }

    #[test]
    fn it_returns_ascending_timestamps() {
        let scheduled_ats = ReviewCycleInterval::calculate_default(ymd(2025, 3, 15));
        assert_eq!(scheduled_ats.len(), 5);
        for pair in scheduled_ats.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn it_transitions_from_pending_to_terminal() {
        let mut cycle = ReviewCycle::new(Default::default(), ymd(2025, 1, 2).and_time(hms(8, 0)));
        assert!(cycle.transition(NotificationStatus::Sent));
        assert_eq!(cycle.status, NotificationStatus::Sent);
    }

    #[test]
    fn it_never_leaves_terminal_status() {
        let mut cycle = ReviewCycle::new(Default::default(), ymd(2025, 1, 2).and_time(hms(8, 0)));
        assert!(cycle.transition(NotificationStatus::Failed));

        assert!(!cycle.transition(NotificationStatus::Sent));
        assert!(!cycle.transition(NotificationStatus::Pending));
        assert_eq!(cycle.status, NotificationStatus::Failed);
    }

    #[test]
    fn it_rejects_pending_as_transition_target() {
        let mut cycle = ReviewCycle::new(Default::default(), ymd(2025, 1, 2).and_time(hms(8, 0)));
        assert!(!cycle.transition(NotificationStatus::Pending));
        assert_eq!(cycle.status, NotificationStatus::Pending);
    }
}
