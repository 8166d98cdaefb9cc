//! Activity calorie estimator.
//!
//! Each activity burns a fixed number of kilocalories per minute; anything
//! not in the list uses [`Activity::Other`]'s rate.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Activity picked in the calorie form.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Activity {
    /// 10 kcal/min.
    Running,
    /// 8 kcal/min.
    Cycling,
    /// 5 kcal/min.
    Yoga,
    /// 4 kcal/min.
    Walking,
    /// Anything else, 6 kcal/min.
    Other,
}

impl Activity {
    /// Map the form value to an activity; unknown values become [`Activity::Other`].
    pub fn parse(raw: &str) -> Self {
        raw.trim().parse().unwrap_or(Self::Other)
    }

    /// Kilocalories burned per minute.
    pub fn kcal_per_minute(self) -> u64 {
        match self {
            Self::Running => 10,
            Self::Cycling => 8,
            Self::Yoga => 5,
            Self::Walking => 4,
            Self::Other => 6,
        }
    }
}

/// Result of a successful estimate.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalorieEstimate {
    /// Activity the estimate was computed for.
    pub activity: Activity,
    /// Duration in whole minutes.
    pub minutes: u32,
    /// Estimated kilocalories burned.
    pub kcal: u64,
}

impl CalorieEstimate {
    /// Compute for a positive duration.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidDuration`] when `minutes` is zero.
    pub fn compute(activity: Activity, minutes: u32) -> Result<Self, ModelError> {
        if minutes == 0 {
            return Err(ModelError::InvalidDuration);
        }
        Ok(Self {
            activity,
            minutes,
            kcal: u64::from(minutes) * activity.kcal_per_minute(),
        })
    }

    /// Parse raw form fields and compute.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidDuration`] for empty, non-integer, zero or
    /// negative minutes.
    pub fn from_input(activity: &str, minutes: &str) -> Result<Self, ModelError> {
        let minutes = minutes
            .trim()
            .parse::<u32>()
            .map_err(|_| ModelError::InvalidDuration)?;
        Self::compute(Activity::parse(activity), minutes)
    }

    /// Result markup shown under the form.
    pub fn to_html(&self) -> String {
        format!(
            "<strong>Estimated calories burned:</strong> {} kcal",
            self.kcal
        )
    }
}
