use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::{CourseCatalog, CourseFilter};
use super::domain::{Course, CourseId};
use super::scorer::{CourseMatch, CourseMatcher, QuizAnswers};

/// Shared state for the catalog routes.
#[derive(Debug, Clone)]
pub struct CourseState {
    pub catalog: Arc<CourseCatalog>,
    pub matcher: CourseMatcher,
}

impl CourseState {
    pub fn new(catalog: Arc<CourseCatalog>) -> Self {
        Self {
            catalog,
            matcher: CourseMatcher::default(),
        }
    }
}

/// Router builder exposing catalog browsing and recommendations.
pub fn course_router(state: CourseState) -> Router {
    Router::new()
        .route("/api/v1/courses", get(list_handler))
        .route("/api/v1/courses/recommendations", post(recommend_handler))
        .route("/api/v1/courses/:course_id", get(course_handler))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct CourseListView<'a> {
    count: usize,
    courses: Vec<&'a Course>,
}

pub(crate) async fn list_handler(
    State(state): State<CourseState>,
    Query(filter): Query<CourseFilter>,
) -> Response {
    let courses = state.catalog.search(&filter);
    let view = CourseListView {
        count: courses.len(),
        courses,
    };
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn course_handler(
    State(state): State<CourseState>,
    Path(course_id): Path<String>,
) -> Response {
    let id = CourseId::from(course_id.as_str());
    match state.catalog.get(&id) {
        Some(course) => (StatusCode::OK, axum::Json(course)).into_response(),
        None => {
            let payload = json!({
                "error": "course not found",
                "course_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

/// Quiz answers plus whether to return the score of every catalog course.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(flatten)]
    pub answers: QuizAnswers,
    #[serde(default)]
    pub include_scores: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedCourse<'a> {
    pub course: &'a Course,
    pub score: u32,
    pub match_details: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseScore<'a> {
    pub course_id: &'a CourseId,
    pub title: &'a str,
    pub score: u32,
    pub match_details: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationView<'a> {
    recommendations: Vec<RecommendedCourse<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<Vec<CourseScore<'a>>>,
}

impl<'a> From<&'a CourseMatch<'a>> for RecommendedCourse<'a> {
    fn from(candidate: &'a CourseMatch<'a>) -> Self {
        Self {
            course: candidate.course,
            score: candidate.score,
            match_details: candidate.match_details(),
        }
    }
}

impl<'a> From<&'a CourseMatch<'a>> for CourseScore<'a> {
    fn from(candidate: &'a CourseMatch<'a>) -> Self {
        Self {
            course_id: &candidate.course.course_id,
            title: &candidate.course.title,
            score: candidate.score,
            match_details: candidate.match_details(),
        }
    }
}

pub(crate) async fn recommend_handler(
    State(state): State<CourseState>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response {
    let courses = state.catalog.courses();
    let recommended = state.matcher.recommend(&request.answers, courses);
    let ranked = request
        .include_scores
        .then(|| state.matcher.rank(&request.answers, courses));

    let view = RecommendationView {
        recommendations: recommended.iter().map(RecommendedCourse::from).collect(),
        scores: ranked
            .as_ref()
            .map(|all| all.iter().map(CourseScore::from).collect()),
    };
    (StatusCode::OK, axum::Json(view)).into_response()
}
