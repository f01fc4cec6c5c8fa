use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::Course;
use super::range::NumericRange;

pub const MINIMUM_MATCH_SCORE: u32 = 15;
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Answers collected by the interest quiz. Empty values switch their criterion off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizAnswers {
    pub interests: Vec<String>,
    pub level: String,
    pub difficulty: String,
    pub learning_style: Vec<String>,
    /// Hours per week, `"min-max"`.
    pub time_commitment: String,
    /// `"min-max"` or open-ended `"min+"`.
    pub price_range: String,
}

/// Point values for each criterion plus the cut-off applied to recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchWeights {
    pub per_interest_tag: u32,
    pub department: u32,
    pub level: u32,
    pub difficulty: u32,
    pub per_learning_style: u32,
    pub time_commitment: u32,
    pub price_range: u32,
    pub minimum_score: u32,
    pub max_recommendations: usize,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            per_interest_tag: 3,
            department: 6,
            level: 10,
            difficulty: 10,
            per_learning_style: 4,
            time_commitment: 8,
            price_range: 8,
            minimum_score: MINIMUM_MATCH_SCORE,
            max_recommendations: MAX_RECOMMENDATIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    InterestTags,
    Department,
    Level,
    Difficulty,
    LearningStyle,
    TimeCommitment,
    PriceRange,
}

/// One criterion's contribution to a match score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchComponent {
    pub factor: MatchFactor,
    pub score: u32,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseMatch<'a> {
    pub course: &'a Course,
    pub score: u32,
    pub components: Vec<MatchComponent>,
}

impl CourseMatch<'_> {
    pub fn match_details(&self) -> Vec<&str> {
        self.components
            .iter()
            .map(|component| component.notes.as_str())
            .collect()
    }
}

/// Stateless scorer applying `MatchWeights` to quiz answers.
#[derive(Debug, Clone, Default)]
pub struct CourseMatcher {
    weights: MatchWeights,
}

impl CourseMatcher {
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    pub fn score<'a>(&self, answers: &QuizAnswers, course: &'a Course) -> CourseMatch<'a> {
        let weights = &self.weights;
        let mut components = Vec::new();

        let interests: Vec<String> = answers
            .interests
            .iter()
            .map(|interest| interest.trim().to_lowercase())
            .filter(|interest| !interest.is_empty())
            .collect();

        if !interests.is_empty() {
            let matching_tags = course
                .tags
                .iter()
                .filter(|tag| {
                    let tag = tag.to_lowercase();
                    interests.iter().any(|interest| tag.contains(interest.as_str()))
                })
                .count() as u32;
            if matching_tags > 0 {
                components.push(MatchComponent {
                    factor: MatchFactor::InterestTags,
                    score: matching_tags * weights.per_interest_tag,
                    notes: format!("Matched {matching_tags} interests with tags"),
                });
            }

            let department = course.department.to_lowercase();
            let initials = department_initials(&department);
            if interests.iter().any(|interest| {
                department.contains(interest.as_str()) || *interest == initials
            }) {
                components.push(MatchComponent {
                    factor: MatchFactor::Department,
                    score: weights.department,
                    notes: "Department match".to_string(),
                });
            }
        }

        if !answers.level.is_empty() && course.level == answers.level {
            components.push(MatchComponent {
                factor: MatchFactor::Level,
                score: weights.level,
                notes: "Experience level match".to_string(),
            });
        }

        if !answers.difficulty.is_empty() && course.difficulty == answers.difficulty {
            components.push(MatchComponent {
                factor: MatchFactor::Difficulty,
                score: weights.difficulty,
                notes: "Difficulty level match".to_string(),
            });
        }

        if !answers.learning_style.is_empty() {
            let style_matches = course
                .learning_style
                .iter()
                .filter(|style| answers.learning_style.contains(style))
                .count() as u32;
            if style_matches > 0 {
                components.push(MatchComponent {
                    factor: MatchFactor::LearningStyle,
                    score: style_matches * weights.per_learning_style,
                    notes: format!("Matched {style_matches} learning styles"),
                });
            }
        }

        if NumericRange::parse(&answers.time_commitment)
            .is_some_and(|range| range.contains(course.hours_per_week))
        {
            components.push(MatchComponent {
                factor: MatchFactor::TimeCommitment,
                score: weights.time_commitment,
                notes: "Time commitment match".to_string(),
            });
        }

        if NumericRange::parse(&answers.price_range)
            .is_some_and(|range| range.contains(course.price.amount))
        {
            components.push(MatchComponent {
                factor: MatchFactor::PriceRange,
                score: weights.price_range,
                notes: "Price range match".to_string(),
            });
        }

        let score = components.iter().map(|component| component.score).sum();
        CourseMatch {
            course,
            score,
            components,
        }
    }

    /// Scores every course, keeping catalog order.
    pub fn rank<'a>(&self, answers: &QuizAnswers, courses: &'a [Course]) -> Vec<CourseMatch<'a>> {
        courses
            .iter()
            .map(|course| self.score(answers, course))
            .collect()
    }

    /// Courses at or above the minimum score, best first, capped at the recommendation limit.
    /// Equal scores keep catalog order.
    pub fn recommend<'a>(
        &self,
        answers: &QuizAnswers,
        courses: &'a [Course],
    ) -> Vec<CourseMatch<'a>> {
        let mut matches: Vec<CourseMatch<'a>> = self
            .rank(answers, courses)
            .into_iter()
            .filter(|candidate| candidate.score >= self.weights.minimum_score)
            .collect();
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(self.weights.max_recommendations);

        debug!(
            catalog = courses.len(),
            recommended = matches.len(),
            "course recommendations computed"
        );
        matches
    }
}

/// `"artificial intelligence"` -> `"ai"`. Single-word departments have no initials.
fn department_initials(department: &str) -> String {
    let words: Vec<&str> = department.split_whitespace().collect();
    if words.len() < 2 {
        return String::new();
    }
    words
        .iter()
        .filter_map(|word| word.chars().next())
        .collect()
}
