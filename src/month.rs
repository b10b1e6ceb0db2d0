//! The month grid that a calendar view displays
//!
//! Weeks start on Sunday. The grid always contains whole weeks, so it can show a few days of the surrounding months.

use chrono::{Datelike, Duration, NaiveDate};

use crate::catalog::Catalog;
use crate::event::Event;

/// A displayed month
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthView {
    first_day: NaiveDate,
}

/// A day of the grid, with the events that occur on it
#[derive(Debug)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    /// Whether this day belongs to the displayed month, or is a padding day of a surrounding month
    pub in_month: bool,
    pub events: Vec<&'a Event>,
}

impl MonthView {
    /// Returns `None` in case the month is out of range
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
    }

    /// The month that contains `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self { first_day: date - Duration::days(i64::from(date.day0())) }
    }

    pub fn year(&self) -> i32      { self.first_day.year()  }
    pub fn month(&self) -> u32     { self.first_day.month() }
    pub fn first_day(&self) -> NaiveDate { self.first_day   }

    pub fn last_day(&self) -> NaiveDate {
        (28..=31).rev()
            .filter_map(|day| NaiveDate::from_ymd_opt(self.year(), self.month(), day))
            .next()
            .unwrap_or(self.first_day)
    }

    /// Returns `None` at the start of the supported date range
    pub fn previous(&self) -> Option<Self> {
        self.first_day.pred_opt().map(Self::containing)
    }

    /// Returns `None` at the end of the supported date range
    pub fn next(&self) -> Option<Self> {
        self.last_day().succ_opt().map(Self::containing)
    }

    pub fn is_in_month(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Every displayed day, from the Sunday on or before the first of the month, to the Saturday on or after its last day
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        // Padding days that would fall outside the supported date range are left out
        let grid_start = self.first_day
            .checked_sub_signed(Duration::days(i64::from(self.first_day.weekday().num_days_from_sunday())))
            .unwrap_or(self.first_day);
        let last_day = self.last_day();
        let grid_end = last_day
            .checked_add_signed(Duration::days(6 - i64::from(last_day.weekday().num_days_from_sunday())))
            .unwrap_or(last_day);

        let n_days = (grid_end - grid_start).num_days() + 1;
        (0..n_days)
            .filter_map(|offset| grid_start.checked_add_signed(Duration::days(offset)))
            .collect()
    }

    /// Pairs every visible day with the events of `catalog` that occur on it
    pub fn day_cells<'a>(&self, catalog: &'a Catalog) -> Vec<DayCell<'a>> {
        self.visible_days()
            .into_iter()
            .map(|date| DayCell {
                date,
                in_month: self.is_in_month(date),
                events: catalog.events_on(date),
            })
            .collect()
    }
}
