//! Per-operation input bodies. Each one validates itself into the typed values the
//! service writes, so malformed input never reaches the store.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::domain::{Mood, Theme};
use super::service::ProfileServiceError;
use super::validation::{check_confidence, check_rating};

const DEFAULT_CHALLENGE_RATING: i64 = 5;
const DEFAULT_SPEAKING_CONFIDENCE: i64 = 1;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoodInput {
    pub mood: String,
    pub notes: Option<String>,
}

impl MoodInput {
    pub(crate) fn validate(self) -> Result<(Mood, Option<String>), ProfileServiceError> {
        if self.mood.trim().is_empty() {
            return Err(ProfileServiceError::invalid("mood is required"));
        }
        let mood = Mood::parse(&self.mood).ok_or_else(|| {
            ProfileServiceError::InvalidArgument(format!("unknown mood '{}'", self.mood))
        })?;
        Ok((mood, self.notes))
    }
}

/// Inclusive date window over the mood tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MindfulnessInput {
    pub minutes: Option<Value>,
    pub date: Option<DateTime<Utc>>,
}

impl MindfulnessInput {
    pub(crate) fn validate(self) -> Result<(u32, Option<DateTime<Utc>>), ProfileServiceError> {
        let minutes = self
            .minutes
            .as_ref()
            .and_then(numeric)
            .filter(|minutes| *minutes > 0.0 && minutes.fract() == 0.0)
            .filter(|minutes| *minutes <= f64::from(u32::MAX))
            .ok_or_else(|| ProfileServiceError::invalid("valid minutes are required"))?;
        Ok((minutes as u32, self.date))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BadgeInput {
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl BadgeInput {
    pub(crate) fn validate(self) -> Result<Self, ProfileServiceError> {
        if self.name.trim().is_empty() {
            return Err(ProfileServiceError::invalid("badge name is required"));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct XpInput {
    pub xp: Option<Value>,
}

impl XpInput {
    pub fn new(xp: i64) -> Self {
        Self {
            xp: Some(Value::from(xp)),
        }
    }

    /// Accepts integers, floats (truncated toward zero) and numeric strings.
    pub(crate) fn validate(self) -> Result<i64, ProfileServiceError> {
        let invalid = || ProfileServiceError::invalid("valid XP amount is required");
        let value = self.xp.ok_or_else(invalid)?;
        if let Some(integer) = value.as_i64() {
            return Ok(integer);
        }
        if let Some(integer) = value.as_str().and_then(|raw| raw.trim().parse::<i64>().ok()) {
            return Ok(integer);
        }

        let float = numeric(&value).ok_or_else(invalid)?;
        if float.abs() >= i64::MAX as f64 {
            return Err(invalid());
        }
        Ok(float.trunc() as i64)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreakInput {
    pub increase: bool,
}

impl Default for StreakInput {
    fn default() -> Self {
        Self { increase: true }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChallengeInput {
    pub challenge_id: String,
    pub rating: Option<i64>,
}

impl ChallengeInput {
    pub(crate) fn validate(self) -> Result<(String, u8), ProfileServiceError> {
        if self.challenge_id.trim().is_empty() {
            return Err(ProfileServiceError::invalid("challenge ID is required"));
        }
        let rating = check_rating(self.rating.unwrap_or(DEFAULT_CHALLENGE_RATING))?;
        Ok((self.challenge_id, rating))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeakingTaskInput {
    pub title: String,
    pub date: Option<DateTime<Utc>>,
    pub duration: Option<u32>,
    pub confidence: Option<i64>,
}

pub(crate) struct ValidSpeakingTask {
    pub(crate) title: String,
    pub(crate) date: Option<DateTime<Utc>>,
    pub(crate) duration: u32,
    pub(crate) confidence: u8,
}

impl SpeakingTaskInput {
    pub(crate) fn validate(self) -> Result<ValidSpeakingTask, ProfileServiceError> {
        if self.title.trim().is_empty() {
            return Err(ProfileServiceError::invalid("task title is required"));
        }
        let confidence =
            check_confidence(self.confidence.unwrap_or(DEFAULT_SPEAKING_CONFIDENCE))?;
        Ok(ValidSpeakingTask {
            title: self.title,
            date: self.date,
            duration: self.duration.unwrap_or(0),
            confidence,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupInput {
    pub group_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MentorInput {
    pub mentor_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeInput {
    pub theme: String,
}

impl ThemeInput {
    pub(crate) fn validate(self) -> Result<Theme, ProfileServiceError> {
        Theme::parse(&self.theme).ok_or_else(|| ProfileServiceError::invalid("valid theme is required"))
    }
}

pub(crate) fn required_id(raw: &str, label: &str) -> Result<String, ProfileServiceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProfileServiceError::InvalidArgument(format!(
            "{label} is required"
        )));
    }
    Ok(trimmed.to_string())
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}
