//! Pay-cycle boundaries and the sub-period timeline inside a cycle.
//!
//! The payday is the reset day: it opens a new cycle, so the running cycle ends at
//! 23:59:59.999 on the day before the next payday. A payday past the end of a short
//! month falls on that month's last day.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::{BudgetConfiguration, ViewGranularity};
use crate::ledger::window::DateWindow;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
const DAYS_PER_WEEK: i64 = 7;

/// Boundaries of the pay cycle containing "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleWindow {
    /// Payday that opened the running cycle.
    pub cycle_start: NaiveDate,
    /// Next payday, first day of the following cycle.
    pub reset_date: NaiveDate,
    /// Inclusive end-of-day instant of the last day in the cycle.
    pub cycle_end: NaiveDateTime,
    /// Whole days left, counting today.
    pub days_remaining: u32,
}

impl CycleWindow {
    pub fn last_day(&self) -> NaiveDate {
        self.cycle_end.date()
    }
}

/// Computes cycle boundaries from a payday-of-month setting.
pub struct CycleCalculator;

impl CycleCalculator {
    /// Returns `None` for a payday outside `1..=31`.
    pub fn compute(now: NaiveDateTime, payday_of_month: u32) -> Option<CycleWindow> {
        if !(1..=31).contains(&payday_of_month) {
            return None;
        }
        let today = now.date();
        let this_month = payday_in(today.year(), today.month(), payday_of_month)?;
        let reset_date = if today < this_month {
            this_month
        } else {
            let (year, month) = shift_month(today.year(), today.month(), 1);
            payday_in(year, month, payday_of_month)?
        };
        let (year, month) = shift_month(reset_date.year(), reset_date.month(), -1);
        let cycle_start = payday_in(year, month, payday_of_month)?;
        let cycle_end = end_of_day(reset_date.pred_opt()?);

        Some(CycleWindow {
            cycle_start,
            reset_date,
            cycle_end,
            days_remaining: whole_days_until(now, cycle_end),
        })
    }

    /// Days left in the cycle; `0` when no payday is configured.
    pub fn days_remaining(now: NaiveDateTime, payday_of_month: Option<u32>) -> u32 {
        payday_of_month
            .and_then(|payday| Self::compute(now, payday))
            .map(|window| window.days_remaining)
            .unwrap_or(0)
    }
}

/// Date range of one sub-period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubPeriodBounds {
    Dated(DateWindow),
    /// No payday configured: every expense belongs to the single sub-period.
    Undated,
}

impl SubPeriodBounds {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            SubPeriodBounds::Dated(window) => window.contains(date),
            SubPeriodBounds::Undated => true,
        }
    }

    pub fn window(&self) -> Option<DateWindow> {
        match self {
            SubPeriodBounds::Dated(window) => Some(*window),
            SubPeriodBounds::Undated => None,
        }
    }
}

/// Derived cycle view. Never persisted; rebuilt from the configuration and the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleState {
    pub window: Option<CycleWindow>,
    pub granularity: ViewGranularity,
    /// First day of sub-period 0: the cycle start, or the setup day when later.
    pub schedule_start: NaiveDate,
    /// At least 1.
    pub sub_period_count: usize,
    /// Sub-period containing "now", clamped into range.
    pub today_index: usize,
}

impl CycleState {
    pub fn derive(config: &BudgetConfiguration, now: NaiveDateTime) -> Self {
        let today = now.date();
        let window = config
            .payday_of_month
            .and_then(|payday| CycleCalculator::compute(now, payday));
        let granularity = match window {
            Some(_) => config.view_granularity,
            None => ViewGranularity::None,
        };
        let schedule_start = match window {
            Some(window) => window.cycle_start.max(config.configured_on).min(today),
            None => config.configured_on.min(today),
        };
        let sub_period_count = match window {
            Some(window) => {
                let schedule_days = (window.last_day() - schedule_start).num_days() + 1;
                count_sub_periods(granularity, schedule_days)
            }
            None => 1,
        };

        let mut state = Self {
            window,
            granularity,
            schedule_start,
            sub_period_count,
            today_index: 0,
        };
        state.today_index = state
            .index_for(today)
            .unwrap_or(sub_period_count - 1)
            .min(sub_period_count - 1);
        state
    }

    pub fn days_remaining(&self) -> u32 {
        self.window.map(|window| window.days_remaining).unwrap_or(0)
    }

    pub fn last_index(&self) -> usize {
        self.sub_period_count - 1
    }

    /// Bounds of sub-period `index`, `None` past the end of the cycle.
    pub fn sub_period(&self, index: usize) -> Option<SubPeriodBounds> {
        if index >= self.sub_period_count {
            return None;
        }
        let Some(window) = self.window else {
            return Some(SubPeriodBounds::Undated);
        };
        let limit = window.reset_date;
        let bounds = match self.granularity {
            ViewGranularity::Daily => {
                DateWindow::spanning(self.schedule_start + Duration::days(index as i64), 1).ok()
            }
            ViewGranularity::Weekly => {
                let start = self.schedule_start + Duration::days(index as i64 * DAYS_PER_WEEK);
                DateWindow::spanning(start, DAYS_PER_WEEK)
                    .ok()
                    .and_then(|week| week.clipped_to(limit))
            }
            ViewGranularity::None => DateWindow::new(self.schedule_start, limit).ok(),
        }?;
        Some(SubPeriodBounds::Dated(bounds))
    }

    /// Sub-period holding `date`, `None` outside the schedule.
    pub fn index_for(&self, date: NaiveDate) -> Option<usize> {
        let Some(window) = self.window else {
            return Some(0);
        };
        if date < self.schedule_start || date > window.last_day() {
            return None;
        }
        let offset = (date - self.schedule_start).num_days();
        let index = match self.granularity {
            ViewGranularity::Daily => offset,
            ViewGranularity::Weekly => offset / DAYS_PER_WEEK,
            ViewGranularity::None => 0,
        };
        usize::try_from(index).ok()
    }
}

fn count_sub_periods(granularity: ViewGranularity, schedule_days: i64) -> usize {
    let days = schedule_days.max(1);
    let count = match granularity {
        ViewGranularity::Daily => days,
        ViewGranularity::Weekly => (days + DAYS_PER_WEEK - 1) / DAYS_PER_WEEK,
        ViewGranularity::None => 1,
    };
    usize::try_from(count).unwrap_or(1).max(1)
}

fn whole_days_until(now: NaiveDateTime, end: NaiveDateTime) -> u32 {
    let millis = (end - now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    u32::try_from((millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY).unwrap_or(u32::MAX)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::default()) + Duration::days(1) - Duration::milliseconds(1)
}

fn payday_in(year: i32, month: u32, payday: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, payday.min(days_in_month(year, month)?))
}

fn shift_month(year: i32, month: u32, months: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + months;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = shift_month(year, month, 1);
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    first_next.pred_opt().map(|last| last.day())
}
