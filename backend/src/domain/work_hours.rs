//! Logged work hours.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::domain::draft::DraftError;
use crate::domain::{Actor, TransitionError, UserId, WorkHoursId};

/// Fewest hours accepted in one entry.
pub const MIN_HOURS: f64 = 0.5;
/// Most hours accepted in one entry.
pub const MAX_HOURS: f64 = 24.0;

/// Hours worked on one day.
///
/// The remote API stores a two-decimal fixed-point value and serialises it as
/// a string (`"7.50"`); numbers are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Hours(f64);

impl Hours {
    /// Wrap a raw value without range checks.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl<'de> Deserialize<'de> for Hours {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        let value = match Raw::deserialize(deserializer)? {
            Raw::Number(value) => value,
            Raw::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|err| de::Error::custom(format!("invalid hours {text:?}: {err}")))?,
        };
        if !value.is_finite() {
            return Err(de::Error::custom("hours must be finite"));
        }
        Ok(Self(value))
    }
}

/// One day's logged hours for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHours {
    id: WorkHoursId,
    user: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    date: NaiveDate,
    hours_worked: Hours,
    created_at: DateTime<Utc>,
}

impl WorkHours {
    /// Build an entry as the remote API would return it.
    pub fn new(
        id: WorkHoursId,
        user: UserId,
        date: NaiveDate,
        hours_worked: Hours,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user,
            user_name: None,
            date,
            hours_worked,
            created_at,
        }
    }

    /// Remote identifier.
    #[must_use]
    pub fn id(&self) -> WorkHoursId {
        self.id
    }

    /// User the hours belong to.
    #[must_use]
    pub fn user(&self) -> UserId {
        self.user
    }

    /// Username, when provided.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Day worked.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Hours worked.
    #[must_use]
    pub fn hours_worked(&self) -> Hours {
        self.hours_worked
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Draft for a work-hours entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkHours {
    /// Owner of the entry. `None` logs for the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserId>,
    /// Day worked.
    pub date: NaiveDate,
    /// Hours worked, between [`MIN_HOURS`] and [`MAX_HOURS`].
    pub hours_worked: Hours,
}

impl NewWorkHours {
    /// Check the hour range.
    pub fn validate(&self) -> Result<(), DraftError> {
        let value = self.hours_worked.get();
        if !(MIN_HOURS..=MAX_HOURS).contains(&value) {
            return Err(DraftError::HoursOutOfRange {
                value,
                min: MIN_HOURS,
                max: MAX_HOURS,
            });
        }
        Ok(())
    }

    /// Logging hours for someone else is reserved to administrators.
    pub fn authorize(&self, actor: Actor) -> Result<(), TransitionError> {
        match self.user {
            Some(user) if user != actor.id() && !actor.is_admin() => Err(
                TransitionError::forbidden("work hours", actor.role(), "log hours for another user"),
            ),
            _ => Ok(()),
        }
    }
}
