use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::courses::domain::{Course, CourseId, Instructor, Price};

const LIST_SEPARATOR: char = ';';

pub(crate) fn parse_courses<R: Read>(reader: R) -> Result<Vec<Course>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut courses = Vec::new();

    for record in csv_reader.deserialize::<CourseRow>() {
        courses.push(record?.into_course());
    }

    Ok(courses)
}

#[derive(Debug, Deserialize)]
struct CourseRow {
    course_id: String,
    title: String,
    #[serde(default)]
    description: String,
    instructor_name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    instructor_rating: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    instructor_years_teaching: Option<u32>,
    level: String,
    difficulty: String,
    department: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    learning_style: String,
    price_amount: f64,
    #[serde(default, deserialize_with = "empty_as_none")]
    price_currency: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    hours_per_week: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    duration_weeks: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    rating: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    total_ratings: Option<u64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    language: Option<String>,
    #[serde(default)]
    format: String,
    #[serde(default)]
    topics: String,
    #[serde(default)]
    skills_gained: String,
}

impl CourseRow {
    fn into_course(self) -> Course {
        Course {
            course_id: CourseId::from(self.course_id.as_str()),
            title: self.title,
            description: self.description,
            instructor: Instructor {
                name: self.instructor_name,
                rating: self.instructor_rating.unwrap_or_default(),
                years_teaching: self.instructor_years_teaching.unwrap_or_default(),
            },
            level: self.level,
            difficulty: self.difficulty,
            department: self.department,
            tags: split_list(&self.tags),
            learning_style: split_list(&self.learning_style),
            price: Price {
                amount: self.price_amount,
                currency: self.price_currency.unwrap_or_else(|| "USD".to_string()),
            },
            hours_per_week: self.hours_per_week.unwrap_or_default(),
            duration_weeks: self.duration_weeks.unwrap_or_default(),
            rating: self.rating.unwrap_or_default(),
            total_ratings: self.total_ratings.unwrap_or_default(),
            language: self.language.unwrap_or_else(|| "English".to_string()),
            format: self.format,
            topics: split_list(&self.topics),
            skills_gained: split_list(&self.skills_gained),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Blank CSV cells become `None` instead of failing numeric parsing.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
