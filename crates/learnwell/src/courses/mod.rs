//! Read-only course catalog, browsing filters and quiz-driven recommendations.

pub mod catalog;
pub mod domain;
pub mod import;
pub mod range;
pub mod router;
mod sample;
pub mod scorer;

pub use catalog::{CatalogError, CourseCatalog, CourseFilter};
pub use domain::{Course, CourseId, Instructor, Price};
pub use import::{CatalogImportError, CatalogImporter};
pub use range::NumericRange;
pub use router::{course_router, CourseState, RecommendationRequest};
pub use scorer::{
    CourseMatch, CourseMatcher, MatchComponent, MatchFactor, MatchWeights, QuizAnswers,
    MAX_RECOMMENDATIONS, MINIMUM_MATCH_SCORE,
};
