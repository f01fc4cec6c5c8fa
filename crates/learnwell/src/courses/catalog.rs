use std::collections::HashSet;

use serde::Deserialize;

use super::domain::{Course, CourseId};
use super::range::NumericRange;
use super::sample;

/// Immutable, ordered set of courses with unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate course id {0}")]
    DuplicateCourse(CourseId),
}

/// Catalog browsing filter. Empty fields do not restrict the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseFilter {
    pub search: String,
    pub level: String,
    pub difficulty: String,
    pub department: String,
    pub price_range: String,
}

impl CourseCatalog {
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for course in &courses {
            if !seen.insert(&course.course_id) {
                return Err(CatalogError::DuplicateCourse(course.course_id.clone()));
            }
        }
        Ok(Self { courses })
    }

    /// Built-in catalog used when no catalog file is configured.
    pub fn sample() -> Self {
        Self {
            courses: sample::courses(),
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn get(&self, course_id: &CourseId) -> Option<&Course> {
        self.courses
            .iter()
            .find(|course| &course.course_id == course_id)
    }

    pub fn search(&self, filter: &CourseFilter) -> Vec<&Course> {
        let term = filter.search.trim().to_lowercase();
        let price = NumericRange::parse(&filter.price_range);

        self.courses
            .iter()
            .filter(|course| term.is_empty() || matches_term(course, &term))
            .filter(|course| filter.level.is_empty() || course.level == filter.level)
            .filter(|course| filter.difficulty.is_empty() || course.difficulty == filter.difficulty)
            .filter(|course| filter.department.is_empty() || course.department == filter.department)
            .filter(|course| price.map_or(true, |range| range.contains(course.price.amount)))
            .collect()
    }
}

fn matches_term(course: &Course, term: &str) -> bool {
    course.title.to_lowercase().contains(term)
        || course.description.to_lowercase().contains(term)
        || course.instructor.name.to_lowercase().contains(term)
        || course
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(courses: &[&Course]) -> Vec<String> {
        courses.iter().map(|course| course.course_id.0.clone()).collect()
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut courses = sample::courses();
        let duplicate = courses[0].clone();
        courses.push(duplicate.clone());

        assert_eq!(
            CourseCatalog::new(courses),
            Err(CatalogError::DuplicateCourse(duplicate.course_id))
        );
    }

    #[test]
    fn sample_ids_are_unique() {
        assert!(CourseCatalog::new(sample::courses()).is_ok());
    }

    #[test]
    fn empty_filter_returns_catalog_in_order() {
        let catalog = CourseCatalog::sample();
        let all = catalog.search(&CourseFilter::default());
        assert_eq!(all.len(), catalog.len());
        assert_eq!(all[0].course_id, catalog.courses()[0].course_id);
    }

    #[test]
    fn open_price_range_is_a_lower_bound() {
        let catalog = CourseCatalog::sample();
        let filter = CourseFilter {
            price_range: "700+".to_string(),
            ..CourseFilter::default()
        };

        let found = catalog.search(&filter);
        assert!(!found.is_empty());
        assert!(found.iter().all(|course| course.price.amount >= 700.0));
        let expected = catalog
            .courses()
            .iter()
            .filter(|course| course.price.amount >= 700.0)
            .count();
        assert_eq!(found.len(), expected);
    }

    #[test]
    fn search_term_matches_instructor_and_tags() {
        let catalog = CourseCatalog::sample();
        let by_tag = catalog.search(&CourseFilter {
            search: "ml".to_string(),
            ..CourseFilter::default()
        });
        assert!(by_tag.iter().any(|course| course.tags.iter().any(|tag| tag == "ML")));

        let instructor = catalog.courses()[0].instructor.name.to_uppercase();
        let by_instructor = catalog.search(&CourseFilter {
            search: instructor,
            ..CourseFilter::default()
        });
        assert!(ids(&by_instructor).contains(&catalog.courses()[0].course_id.0));
    }

    #[test]
    fn exact_filters_combine() {
        let catalog = CourseCatalog::sample();
        let filter = CourseFilter {
            level: "Beginner".to_string(),
            difficulty: "easy".to_string(),
            department: "Artificial Intelligence".to_string(),
            ..CourseFilter::default()
        };

        let found = catalog.search(&filter);
        assert!(!found.is_empty());
        assert!(found.iter().all(|course| course.level == "Beginner"
            && course.difficulty == "easy"
            && course.department == "Artificial Intelligence"));
    }

    #[test]
    fn get_finds_by_id() {
        let catalog = CourseCatalog::sample();
        let first = catalog.courses()[0].course_id.clone();
        assert!(catalog.get(&first).is_some());
        assert!(catalog.get(&CourseId::from("nope")).is_none());
    }
}
