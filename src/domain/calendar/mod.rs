//! Meeting calendar recurrence.
//!
//! Cycle start and end dates must fall on group meeting days, and the number
//! of expected meetings in a cycle is derived from the meeting pattern. The
//! pattern itself is a pure value; adapters load it, handlers do the math
//! through the methods here.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Unit of the meeting repeat interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// The recurring meeting schedule of a group: an anchor date plus a repeat
/// interval. Dates before the anchor are never meeting days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRecurrence {
    start: NaiveDate,
    frequency: MeetingFrequency,
    interval: u32,
}

impl MeetingRecurrence {
    pub fn new(
        start: NaiveDate,
        frequency: MeetingFrequency,
        interval: u32,
    ) -> Result<Self, DomainError> {
        if interval == 0 {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "error.msg.calendar.interval.invalid",
                "Meeting recurrence interval must be at least 1",
            ));
        }
        Ok(Self {
            start,
            frequency,
            interval,
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn frequency(&self) -> MeetingFrequency {
        self.frequency
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Returns true when the given date is the anchor or a later instance of
    /// the pattern.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        if date < self.start {
            return false;
        }
        match self.frequency {
            MeetingFrequency::Daily => {
                let days = (date - self.start).num_days();
                days % i64::from(self.interval) == 0
            }
            MeetingFrequency::Weekly => {
                let days = (date - self.start).num_days();
                days % (7 * i64::from(self.interval)) == 0
            }
            MeetingFrequency::Monthly | MeetingFrequency::Yearly => self
                .month_based_instances()
                .take_while(|d| *d <= date)
                .any(|d| d == date),
        }
    }

    /// Meeting dates strictly between `after` and `before`, ascending.
    pub fn occurrences_between(&self, after: NaiveDate, before: NaiveDate) -> Vec<NaiveDate> {
        if before <= after {
            return Vec::new();
        }
        match self.frequency {
            MeetingFrequency::Daily | MeetingFrequency::Weekly => {
                let step = match self.frequency {
                    MeetingFrequency::Daily => i64::from(self.interval),
                    _ => 7 * i64::from(self.interval),
                };
                let mut dates = Vec::new();
                let mut n = if after < self.start {
                    0
                } else {
                    (after - self.start).num_days() / step
                };
                loop {
                    let candidate = self.start + chrono::Duration::days(n * step);
                    if candidate >= before {
                        break;
                    }
                    if candidate > after {
                        dates.push(candidate);
                    }
                    n += 1;
                }
                dates
            }
            MeetingFrequency::Monthly | MeetingFrequency::Yearly => self
                .month_based_instances()
                .skip_while(|d| *d <= after)
                .take_while(|d| *d < before)
                .collect(),
        }
    }

    /// Number of meetings a cycle spanning `start_date..end_date` covers:
    /// the instances strictly between the two dates, plus one.
    pub fn expected_meetings(&self, start_date: NaiveDate, end_date: NaiveDate) -> u32 {
        self.occurrences_between(start_date, end_date).len() as u32 + 1
    }

    fn month_based_instances(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let months_per_step = match self.frequency {
            MeetingFrequency::Monthly => self.interval,
            MeetingFrequency::Yearly => self.interval * 12,
            _ => unreachable!("month stepping only applies to monthly and yearly patterns"),
        };
        let start = self.start;
        (0u32..).map_while(move |n| {
            start.checked_add_months(Months::new(n.checked_mul(months_per_step)?))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly(start: NaiveDate) -> MeetingRecurrence {
        MeetingRecurrence::new(start, MeetingFrequency::Weekly, 1).unwrap()
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(MeetingRecurrence::new(date(2024, 1, 1), MeetingFrequency::Weekly, 0).is_err());
    }

    #[test]
    fn anchor_date_is_an_occurrence() {
        let pattern = weekly(date(2024, 1, 1));
        assert!(pattern.occurs_on(date(2024, 1, 1)));
    }

    #[test]
    fn dates_before_anchor_never_occur() {
        let pattern = weekly(date(2024, 1, 8));
        assert!(!pattern.occurs_on(date(2024, 1, 1)));
    }

    #[test]
    fn weekly_pattern_matches_same_weekday_only() {
        let pattern = weekly(date(2024, 1, 1)); // a Monday
        assert!(pattern.occurs_on(date(2024, 1, 8)));
        assert!(pattern.occurs_on(date(2024, 1, 15)));
        assert!(!pattern.occurs_on(date(2024, 1, 9)));
    }

    #[test]
    fn biweekly_pattern_skips_alternate_weeks() {
        let pattern =
            MeetingRecurrence::new(date(2024, 1, 1), MeetingFrequency::Weekly, 2).unwrap();
        assert!(pattern.occurs_on(date(2024, 1, 15)));
        assert!(!pattern.occurs_on(date(2024, 1, 8)));
    }

    #[test]
    fn monthly_pattern_keeps_day_of_month() {
        let pattern =
            MeetingRecurrence::new(date(2024, 1, 15), MeetingFrequency::Monthly, 1).unwrap();
        assert!(pattern.occurs_on(date(2024, 2, 15)));
        assert!(pattern.occurs_on(date(2024, 6, 15)));
        assert!(!pattern.occurs_on(date(2024, 2, 14)));
    }

    #[test]
    fn monthly_pattern_clamps_to_month_end() {
        let pattern =
            MeetingRecurrence::new(date(2024, 1, 31), MeetingFrequency::Monthly, 1).unwrap();
        assert!(pattern.occurs_on(date(2024, 2, 29)));
        assert!(pattern.occurs_on(date(2024, 3, 31)));
    }

    #[test]
    fn yearly_pattern_matches_anniversary() {
        let pattern =
            MeetingRecurrence::new(date(2024, 3, 10), MeetingFrequency::Yearly, 1).unwrap();
        assert!(pattern.occurs_on(date(2025, 3, 10)));
        assert!(!pattern.occurs_on(date(2025, 3, 11)));
    }

    #[test]
    fn occurrences_between_excludes_both_endpoints() {
        let pattern = weekly(date(2024, 1, 1));
        let dates = pattern.occurrences_between(date(2024, 1, 1), date(2024, 1, 29));
        assert_eq!(
            dates,
            vec![date(2024, 1, 8), date(2024, 1, 15), date(2024, 1, 22)]
        );
    }

    #[test]
    fn occurrences_between_is_empty_for_inverted_range() {
        let pattern = weekly(date(2024, 1, 1));
        assert!(pattern
            .occurrences_between(date(2024, 2, 1), date(2024, 1, 1))
            .is_empty());
    }

    #[test]
    fn expected_meetings_counts_interior_instances_plus_one() {
        let pattern = weekly(date(2024, 1, 1));
        // 1 Jan .. 29 Jan with meetings on 8, 15, 22 in between
        assert_eq!(pattern.expected_meetings(date(2024, 1, 1), date(2024, 1, 29)), 4);
        // adjacent meetings have nothing in between
        assert_eq!(pattern.expected_meetings(date(2024, 1, 1), date(2024, 1, 8)), 1);
    }

    proptest! {
        #[test]
        fn every_reported_occurrence_satisfies_occurs_on(
            start_offset in 0i64..200,
            interval in 1u32..5,
            span in 1i64..400,
        ) {
            let anchor = date(2024, 1, 1) + chrono::Duration::days(start_offset);
            let pattern =
                MeetingRecurrence::new(anchor, MeetingFrequency::Weekly, interval).unwrap();
            let until = anchor + chrono::Duration::days(span);
            for d in pattern.occurrences_between(anchor, until) {
                prop_assert!(pattern.occurs_on(d));
                prop_assert!(d > anchor && d < until);
            }
        }

        #[test]
        fn daily_occurrence_count_matches_interval_arithmetic(
            interval in 1i64..10,
            steps in 1i64..50,
        ) {
            let anchor = date(2024, 1, 1);
            let pattern = MeetingRecurrence::new(
                anchor,
                MeetingFrequency::Daily,
                interval as u32,
            ).unwrap();
            let end = anchor + chrono::Duration::days(interval * steps);
            // instances strictly between anchor and anchor + steps*interval days
            prop_assert_eq!(
                pattern.occurrences_between(anchor, end).len() as i64,
                steps - 1
            );
        }

        #[test]
        fn occurrences_are_strictly_ascending(
            interval in 1u32..4,
            span in 1i64..300,
        ) {
            let anchor = date(2024, 5, 20);
            let pattern =
                MeetingRecurrence::new(anchor, MeetingFrequency::Daily, interval).unwrap();
            let dates = pattern.occurrences_between(anchor, anchor + chrono::Duration::days(span));
            for pair in dates.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }
}
