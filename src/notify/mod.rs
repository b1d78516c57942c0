//! Status notices handed to whatever delivers alerts to the user.

pub mod ticker;

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::status::BudgetStatus;

pub use ticker::ReminderTicker;

/// Colour band a status maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    Green,
    Yellow,
    Red,
}

impl From<BudgetStatus> for MessageCategory {
    fn from(status: BudgetStatus) -> Self {
        match status {
            BudgetStatus::OnTrack => MessageCategory::Green,
            BudgetStatus::Warning => MessageCategory::Yellow,
            BudgetStatus::Over => MessageCategory::Red,
        }
    }
}

const GREEN_MESSAGES: [&str; 10] = [
    "You're in control. Nice work, your spending is under control.",
    "You're staying within your limits. Keep going.",
    "All good so far. Your budget looks healthy.",
    "You're managing your money well today.",
    "Still on track. Future you will appreciate this.",
    "No red flags, just smart spending.",
    "You've got room to breathe financially.",
    "Strong discipline. Your budget is holding.",
    "You're spending intentionally. That matters.",
    "Green zone. Stay steady.",
];

const YELLOW_MESSAGES: [&str; 10] = [
    "Pay attention. You're getting close to your limit. Slow down.",
    "Heads up: your budget is tightening.",
    "This is manageable, but be mindful.",
    "Careful now, spending is picking up.",
    "You're approaching the edge of your comfort zone.",
    "A few more expenses could push this over.",
    "Pause and check if this is necessary.",
    "Still okay, but not for long.",
    "This is your warning, not your failure.",
    "You're in control. You just need awareness.",
];

const RED_MESSAGES: [&str; 10] = [
    "Be honest with yourself. You're over budget. It's time to stop spending here.",
    "This category has crossed the limit.",
    "Ignoring this won't make it better.",
    "You've spent more than you planned.",
    "This needs attention now.",
    "Reality check: this is unsustainable.",
    "Future stress starts here if this continues.",
    "This category is officially out of control.",
    "No judgment, but this must change.",
    "You can recover, but only if you act.",
];

impl MessageCategory {
    pub fn title(self) -> &'static str {
        match self {
            MessageCategory::Green => "✅ You're in control",
            MessageCategory::Yellow => "🟡 Pay attention",
            MessageCategory::Red => "🔴 Be honest with yourself",
        }
    }

    pub fn messages(self) -> &'static [&'static str] {
        match self {
            MessageCategory::Green => &GREEN_MESSAGES,
            MessageCategory::Yellow => &YELLOW_MESSAGES,
            MessageCategory::Red => &RED_MESSAGES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub title: String,
    pub body: String,
}

/// Picks a message for `status`; the same seed always yields the same body.
pub fn message_for(status: BudgetStatus, seed: u64) -> NotificationMessage {
    let category = MessageCategory::from(status);
    let messages = category.messages();
    let body = messages[(seed % messages.len() as u64) as usize];
    NotificationMessage {
        title: category.title().to_string(),
        body: body.to_string(),
    }
}

/// What the engine publishes after every recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusNotice {
    pub status: BudgetStatus,
    pub remaining_amount: f64,
    pub currency_symbol: String,
    pub sub_period_index: usize,
    pub date: NaiveDate,
}

impl StatusNotice {
    /// Message rotating with the day and sub-period.
    pub fn message(&self) -> NotificationMessage {
        let seed = self.date.num_days_from_ce().unsigned_abs() as u64 + self.sub_period_index as u64;
        message_for(self.status, seed)
    }

    fn dedup_key(&self) -> (BudgetStatus, usize, NaiveDate) {
        (self.status, self.sub_period_index, self.date)
    }
}

/// Lets each `(status, sub-period, date)` combination through once.
#[derive(Debug, Default)]
pub struct ReminderGate {
    announced: HashSet<(BudgetStatus, usize, NaiveDate)>,
}

impl ReminderGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admit(&mut self, notice: StatusNotice) -> Option<StatusNotice> {
        if self.announced.insert(notice.dedup_key()) {
            tracing::debug!(status = %notice.status, index = notice.sub_period_index, "status notice admitted");
            Some(notice)
        } else {
            None
        }
    }

    /// Drops entries from days before `today`.
    pub fn forget_before(&mut self, today: NaiveDate) {
        self.announced.retain(|(_, _, date)| *date >= today);
    }

    pub fn len(&self) -> usize {
        self.announced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.announced.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(status: BudgetStatus, index: usize, day: u32) -> StatusNotice {
        StatusNotice {
            status,
            remaining_amount: 12.0,
            currency_symbol: "$".into(),
            sub_period_index: index,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        }
    }

    #[test]
    fn every_status_has_ten_messages_and_a_title() {
        for status in [BudgetStatus::OnTrack, BudgetStatus::Warning, BudgetStatus::Over] {
            let category = MessageCategory::from(status);
            assert_eq!(category.messages().len(), 10);
            assert_eq!(message_for(status, 3).title, category.title());
        }
    }

    #[test]
    fn seed_selects_message_deterministically() {
        assert_eq!(
            message_for(BudgetStatus::Over, 11),
            message_for(BudgetStatus::Over, 1)
        );
        assert_eq!(
            message_for(BudgetStatus::Warning, 0).body,
            "Pay attention. You're getting close to your limit. Slow down."
        );
    }

    #[test]
    fn gate_admits_each_combination_once() {
        let mut gate = ReminderGate::new();
        assert!(gate.admit(notice(BudgetStatus::Warning, 0, 10)).is_some());
        assert!(gate.admit(notice(BudgetStatus::Warning, 0, 10)).is_none());
        assert!(gate.admit(notice(BudgetStatus::Over, 0, 10)).is_some());
        assert!(gate.admit(notice(BudgetStatus::Warning, 1, 11)).is_some());

        gate.forget_before(NaiveDate::from_ymd_opt(2024, 1, 11).unwrap());
        assert_eq!(gate.len(), 1);
    }
}
