//! Planned, repeating spend templates.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Amounted, Identifiable, NamedEntity, ViewGranularity};

pub const DAYS_PER_WEEK: u8 = 7;

/// A repeating expense the user expects, e.g. a daily coffee.
///
/// Templates are cycle independent. Whether an occurrence has been confirmed is
/// derived from the expense ledger, never stored on the template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringSpend {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub schedule: SpendSchedule,
}

impl RecurringSpend {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        schedule: SpendSchedule,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            category: category.into(),
            schedule,
        }
    }

    /// Whether the template contributes to a daily sub-period on `date`.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        match &self.schedule {
            SpendSchedule::Weekdays { days } => days.contains(&date.weekday()),
            SpendSchedule::TimesPerWeek { .. } => false,
        }
    }

    /// Amount expected over one weekly sub-period, `None` when not weekly.
    pub fn weekly_amount(&self) -> Option<f64> {
        match self.schedule {
            SpendSchedule::TimesPerWeek { count } if count > 0 => {
                Some(self.amount * f64::from(count))
            }
            _ => None,
        }
    }

    pub fn schedule_granularity(&self) -> ViewGranularity {
        self.schedule.granularity()
    }
}

impl Identifiable for RecurringSpend {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for RecurringSpend {
    fn name(&self) -> &str {
        &self.description
    }
}

impl Amounted for RecurringSpend {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// When a recurring spend happens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpendSchedule {
    /// Used with daily granularity.
    Weekdays { days: Vec<Weekday> },
    /// Used with weekly granularity; 0..=7.
    TimesPerWeek { count: u8 },
}

impl SpendSchedule {
    pub fn every_day() -> Self {
        Self::Weekdays {
            days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
        }
    }

    /// Builds a weekday rule, dropping duplicates while keeping order.
    pub fn on(days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut unique: Vec<Weekday> = Vec::new();
        for day in days {
            if !unique.contains(&day) {
                unique.push(day);
            }
        }
        Self::Weekdays { days: unique }
    }

    pub fn times_per_week(count: u8) -> Self {
        Self::TimesPerWeek { count }
    }

    pub fn granularity(&self) -> ViewGranularity {
        match self {
            SpendSchedule::Weekdays { .. } => ViewGranularity::Daily,
            SpendSchedule::TimesPerWeek { .. } => ViewGranularity::Weekly,
        }
    }
}

impl fmt::Display for SpendSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpendSchedule::Weekdays { days } if days.len() == usize::from(DAYS_PER_WEEK) => {
                f.write_str("Every day")
            }
            SpendSchedule::Weekdays { days } => {
                let labels: Vec<String> = days.iter().map(|day| day.to_string()).collect();
                write!(f, "On {}", labels.join(", "))
            }
            SpendSchedule::TimesPerWeek { count } => write!(
                f,
                "{count} time{} per week",
                if *count == 1 { "" } else { "s" }
            ),
        }
    }
}
