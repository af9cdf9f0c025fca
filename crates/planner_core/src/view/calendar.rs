//! Week strip shown above the calendar screen's day list.
//!
//! # Invariants
//! - Weeks start on Sunday.
//! - Navigation moves by exactly seven days.

use chrono::{Datelike, Duration, NaiveDate};

/// Position of a day relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRelation {
    Past,
    Today,
    Future,
}

/// One cell of the week strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Abbreviated weekday, e.g. `Sun`.
    pub weekday_label: String,
    pub relation: DayRelation,
    pub has_entries: bool,
}

/// Seven-day window starting on a Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWeek {
    start: NaiveDate,
}

impl CalendarWeek {
    /// Week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let offset = i64::from(date.weekday().num_days_from_sunday());
        Self {
            start: date - Duration::days(offset),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    pub fn next(self) -> Self {
        Self {
            start: self.start + Duration::days(7),
        }
    }

    pub fn previous(self) -> Self {
        Self {
            start: self.start - Duration::days(7),
        }
    }

    /// Week shown after picking `date` in the date picker.
    pub fn jump_to(self, date: NaiveDate) -> Self {
        Self::containing(date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..7).map(move |offset| start + Duration::days(offset))
    }

    /// Day cells relative to `today`; `has_entries` marks days with data.
    pub fn days(
        &self,
        today: NaiveDate,
        has_entries: impl Fn(NaiveDate) -> bool,
    ) -> Vec<CalendarDay> {
        self.dates()
            .map(|date| CalendarDay {
                date,
                weekday_label: date.format("%a").to_string(),
                relation: match date.cmp(&today) {
                    std::cmp::Ordering::Less => DayRelation::Past,
                    std::cmp::Ordering::Equal => DayRelation::Today,
                    std::cmp::Ordering::Greater => DayRelation::Future,
                },
                has_entries: has_entries(date),
            })
            .collect()
    }

    /// Header text: `May 2024`, `April - May 2024` or
    /// `December 2024 - January 2025`.
    pub fn month_year_label(&self) -> String {
        let start = self.start;
        let end = self.end();
        if start.month() == end.month() && start.year() == end.year() {
            start.format("%B %Y").to_string()
        } else if start.year() == end.year() {
            format!("{} - {} {}", start.format("%B"), end.format("%B"), end.year())
        } else {
            format!("{} - {}", start.format("%B %Y"), end.format("%B %Y"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CalendarWeek, DayRelation};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn week_starts_on_sunday() {
        // 2024-05-01 is a Wednesday.
        let week = CalendarWeek::containing(date(2024, 5, 1));
        assert_eq!(week.start(), date(2024, 4, 28));
        assert_eq!(week.end(), date(2024, 5, 4));
        assert_eq!(CalendarWeek::containing(date(2024, 4, 28)), week);
    }

    #[test]
    fn navigation_moves_whole_weeks() {
        let week = CalendarWeek::containing(date(2024, 5, 1));
        assert_eq!(week.next().start(), date(2024, 5, 5));
        assert_eq!(week.previous().start(), date(2024, 4, 21));
        assert_eq!(week.next().previous(), week);
    }

    #[test]
    fn header_label_covers_month_and_year_boundaries() {
        assert_eq!(
            CalendarWeek::containing(date(2024, 5, 15)).month_year_label(),
            "May 2024"
        );
        assert_eq!(
            CalendarWeek::containing(date(2024, 5, 1)).month_year_label(),
            "April - May 2024"
        );
        assert_eq!(
            CalendarWeek::containing(date(2024, 12, 31)).month_year_label(),
            "December 2024 - January 2025"
        );
    }

    #[test]
    fn days_flag_relation_and_entries() {
        let today = date(2024, 5, 1);
        let week = CalendarWeek::containing(today);
        let days = week.days(today, |day| day == date(2024, 5, 3));

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].weekday_label, "Sun");
        assert_eq!(days[0].relation, DayRelation::Past);
        assert_eq!(days[3].relation, DayRelation::Today);
        assert_eq!(days[6].relation, DayRelation::Future);
        assert!(days[5].has_entries);
        assert!(!days[4].has_entries);
    }
}
