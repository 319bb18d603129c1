//! Flash-sale time slots.
//!
//! Sales run in fixed daily slots that start on the hour in the shop's local
//! time. The storefront shows the running slot, or the next one with a
//! countdown to its start.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::ClientError;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct FlashSaleSettings {
    /// Local hours (0-23) at which slots start.
    #[serde(default = "default_slot_start_hours")]
    pub slot_start_hours: Vec<u32>,
    #[serde(default = "default_slot_length_minutes")]
    pub slot_length_minutes: u32,
    /// Shop timezone as an offset from UTC.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

fn default_slot_start_hours() -> Vec<u32> {
    vec![0, 9, 12, 15, 18, 21]
}

fn default_slot_length_minutes() -> u32 {
    120
}

fn default_utc_offset_minutes() -> i32 {
    7 * 60
}

impl Default for FlashSaleSettings {
    fn default() -> Self {
        Self {
            slot_start_hours: default_slot_start_hours(),
            slot_length_minutes: default_slot_length_minutes(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("slot start hour {0} is outside 0-23")]
    InvalidHour(u32),
    #[error("slot length must be positive")]
    EmptySlot,
    #[error("UTC offset of {0} minutes is out of range")]
    InvalidOffset(i32),
}

/// A bad schedule is a configuration problem; the original error stays
/// reachable through `ConfigError::Foreign`.
impl From<ScheduleError> for ClientError {
    fn from(err: ScheduleError) -> Self {
        ClientError::Config(::config::ConfigError::Foreign(Box::new(err)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotPhase {
    Active,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlashSaleSlot {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub phase: SlotPhase,
}

impl FlashSaleSlot {
    /// Time to the end of an active slot or the start of an upcoming one.
    pub fn countdown(&self, now: DateTime<Utc>) -> Countdown {
        let target = match self.phase {
            SlotPhase::Active => self.ends_at,
            SlotPhase::Upcoming => self.starts_at,
        };
        Countdown::between(now, target)
    }
}

/// Non-negative whole-second countdown, rendered as `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    total_seconds: i64,
}

impl Countdown {
    pub fn between(now: DateTime<Utc>, target: DateTime<Utc>) -> Self {
        Self {
            total_seconds: (target - now).num_seconds().max(0),
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.total_seconds
    }

    pub fn is_finished(&self) -> bool {
        self.total_seconds == 0
    }

    pub fn hours(&self) -> i64 {
        self.total_seconds / 3600
    }

    pub fn minutes(&self) -> i64 {
        self.total_seconds % 3600 / 60
    }

    pub fn seconds(&self) -> i64 {
        self.total_seconds % 60
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

#[derive(Debug, Clone)]
pub struct SlotSchedule {
    start_hours: Vec<u32>,
    length: Duration,
    offset: FixedOffset,
}

impl SlotSchedule {
    pub fn new(
        start_hours: &[u32],
        length: Duration,
        offset: FixedOffset,
    ) -> Result<Self, ScheduleError> {
        if let Some(&hour) = start_hours.iter().find(|&&hour| hour > 23) {
            return Err(ScheduleError::InvalidHour(hour));
        }
        if length <= Duration::zero() {
            return Err(ScheduleError::EmptySlot);
        }

        let mut start_hours = start_hours.to_vec();
        start_hours.sort_unstable();
        start_hours.dedup();

        Ok(Self {
            start_hours,
            length,
            offset,
        })
    }

    pub fn from_settings(settings: &FlashSaleSettings) -> Result<Self, ScheduleError> {
        let offset = settings
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(ScheduleError::InvalidOffset(settings.utc_offset_minutes))?;
        Self::new(
            &settings.slot_start_hours,
            Duration::minutes(i64::from(settings.slot_length_minutes)),
            offset,
        )
    }

    /// The slot running at `now`, else the next one to start. `None` only when
    /// no slots are configured.
    ///
    /// When slots overlap, the most recently started one wins.
    pub fn select_slot(&self, now: DateTime<Utc>) -> Option<FlashSaleSlot> {
        let today = now.with_timezone(&self.offset).date_naive();

        // Yesterday covers slots that run past midnight.
        let days = [today.pred_opt(), Some(today), today.succ_opt()];
        let starts: Vec<DateTime<Utc>> = days
            .into_iter()
            .flatten()
            .flat_map(|day| self.starts_on(day))
            .collect();

        let active = starts
            .iter()
            .filter(|&&start| start <= now && now < start + self.length)
            .max();
        if let Some(&start) = active {
            return Some(FlashSaleSlot {
                starts_at: start,
                ends_at: start + self.length,
                phase: SlotPhase::Active,
            });
        }

        starts
            .iter()
            .filter(|&&start| start > now)
            .min()
            .map(|&start| FlashSaleSlot {
                starts_at: start,
                ends_at: start + self.length,
                phase: SlotPhase::Upcoming,
            })
    }

    fn starts_on(&self, day: NaiveDate) -> Vec<DateTime<Utc>> {
        self.start_hours
            .iter()
            .filter_map(|&hour| day.and_hms_opt(hour, 0, 0))
            .filter_map(|local| self.offset.from_local_datetime(&local).single())
            .map(|start| start.with_timezone(&Utc))
            .collect()
    }
}
