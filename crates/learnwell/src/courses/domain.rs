use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Catalog key. Catalog files carry it as either a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CourseId(pub String);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

impl<'de> Deserialize<'de> for CourseId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Integer(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(value) => CourseId::from(value.as_str()),
            Raw::Integer(value) => CourseId(value.to_string()),
        })
    }
}

/// A read-only catalog entry. Field names follow the snake_case catalog files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub instructor: Instructor,
    /// `Beginner`, `Intermediate` or `Advanced`.
    pub level: String,
    /// `easy`, `medium` or `hard`.
    pub difficulty: String,
    pub department: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub learning_style: Vec<String>,
    pub price: Price,
    #[serde(default)]
    pub hours_per_week: f64,
    #[serde(default)]
    pub duration_weeks: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_ratings: u64,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub skills_gained: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    pub name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub years_teaching: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_language() -> String {
    "English".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}
