//! Session configuration: meeting lengths, business hours, retry policy.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};
use crate::slots::SLOT_MINUTES;
use crate::time::TimeOfDay;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Meeting lengths a user may pick. Each must be a multiple of 30.
    pub allowed_durations: Vec<u32>,
    pub default_duration: u32,
    /// Earliest start the "try 30 minutes earlier" suggestion may propose.
    pub opening_time: TimeOfDay,
    /// End of the weekly grid (exclusive).
    pub closing_time: TimeOfDay,
    pub suggest_earlier: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            allowed_durations: vec![30, 60],
            default_duration: 30,
            opening_time: TimeOfDay::hm(9, 0),
            closing_time: TimeOfDay::hm(18, 0),
            suggest_earlier: true,
        }
    }
}

impl SchedulerConfig {
    /// Parse a JSON config, filling missing fields from [`Default`], then validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SchedulerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.allowed_durations.is_empty() {
            return Err(SchedulerError::InvalidConfig(
                "allowedDurations must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .allowed_durations
            .iter()
            .find(|d| **d == 0 || **d % SLOT_MINUTES != 0)
        {
            return Err(SchedulerError::InvalidConfig(format!(
                "duration {} is not a positive multiple of {} minutes",
                bad, SLOT_MINUTES
            )));
        }
        if !self.allowed_durations.contains(&self.default_duration) {
            return Err(SchedulerError::InvalidConfig(format!(
                "defaultDuration {} is not in allowedDurations",
                self.default_duration
            )));
        }
        if self.opening_time >= self.closing_time {
            return Err(SchedulerError::InvalidConfig(format!(
                "openingTime {} must precede closingTime {}",
                self.opening_time, self.closing_time
            )));
        }
        Ok(())
    }

    pub fn is_allowed_duration(&self, duration: u32) -> bool {
        self.allowed_durations.contains(&duration)
    }

    /// Row labels of the weekly grid: every slot start from opening to closing.
    pub fn grid_times(&self) -> Vec<TimeOfDay> {
        let mut times = Vec::new();
        let mut t = self.opening_time;
        while t < self.closing_time {
            times.push(t);
            t = t.add_minutes(SLOT_MINUTES);
        }
        times
    }
}
