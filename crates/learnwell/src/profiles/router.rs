use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{FromRequest, Path, Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::domain::{NotificationSettings, PrivacySettings, ProfileDocument};
use super::identity::CallerIdentity;
use super::repository::ProfileRepository;
use super::requests::{
    BadgeInput, ChallengeInput, GroupInput, MentorInput, MindfulnessInput, MoodInput, MoodRange,
    SpeakingTaskInput, StreakInput, ThemeInput, XpInput,
};
use super::service::{ProfileService, ProfileServiceError};

type SharedService<R> = Arc<ProfileService<R>>;

/// Router builder exposing one endpoint per profile operation.
pub fn profile_router<R>(service: SharedService<R>) -> Router
where
    R: ProfileRepository + 'static,
{
    Router::new()
        .route(
            "/api/profile",
            post(create_handler::<R>)
                .get(fetch_handler::<R>)
                .put(replace_handler::<R>)
                .delete(delete_handler::<R>),
        )
        // Static operation paths (`mood`, `badges`, ...) win over `:section`, so PATCH on
        // them is 405 rather than "invalid section".
        .route("/api/profile/:section", patch(patch_section_handler::<R>))
        .route(
            "/api/profile/mood",
            post(append_mood_handler::<R>).get(list_moods_handler::<R>),
        )
        .route(
            "/api/profile/mood/:entry_id",
            axum::routing::delete(delete_mood_handler::<R>),
        )
        .route(
            "/api/profile/mindfulness",
            post(mindfulness_handler::<R>),
        )
        .route("/api/profile/badges", post(badge_handler::<R>))
        .route("/api/profile/progress/xp", post(xp_handler::<R>))
        .route("/api/profile/progress/streak", post(streak_handler::<R>))
        .route(
            "/api/profile/progress/reset-streak",
            post(reset_streak_handler::<R>),
        )
        .route(
            "/api/profile/challenges/complete",
            post(challenge_handler::<R>),
        )
        .route(
            "/api/profile/speaking",
            post(add_speaking_handler::<R>).get(list_speaking_handler::<R>),
        )
        .route(
            "/api/profile/social/groups/join",
            post(join_group_handler::<R>),
        )
        .route(
            "/api/profile/social/groups/leave",
            post(leave_group_handler::<R>),
        )
        .route("/api/profile/social/mentors", post(mentor_handler::<R>))
        .route(
            "/api/profile/settings/notifications",
            patch(notifications_handler::<R>),
        )
        .route(
            "/api/profile/settings/privacy",
            patch(privacy_handler::<R>),
        )
        .route("/api/profile/settings/theme", patch(theme_handler::<R>))
        .with_state(service)
}

pub(crate) async fn create_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    JsonBody(document): JsonBody<ProfileDocument>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(
        StatusCode::CREATED,
        service.create_profile(&user_id, document),
    )
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.get_or_create_profile(&user_id))
}

pub(crate) async fn replace_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    JsonBody(document): JsonBody<ProfileDocument>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.replace_profile(&user_id, document))
}

pub(crate) async fn delete_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let outcome = service
        .delete_profile(&user_id)
        .map(|()| json!({ "message": "profile deleted" }));
    respond(StatusCode::OK, outcome)
}

pub(crate) async fn patch_section_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    Path(section): Path<String>,
    JsonBody(body): JsonBody<serde_json::Value>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.patch_section(&user_id, &section, body),
    )
}

pub(crate) async fn append_mood_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    JsonBody(input): JsonBody<MoodInput>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.append_mood(&user_id, input))
}

/// Raw `from` / `to` query bounds for the mood listing.
#[derive(Debug, Default, Deserialize)]
pub struct MoodQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl MoodQuery {
    /// Accepts RFC 3339 timestamps or plain dates; a plain `to` date covers the whole day.
    pub fn range(&self) -> Result<MoodRange, ProfileServiceError> {
        let from = self
            .from
            .as_deref()
            .map(|raw| parse_bound(raw, NaiveTime::MIN))
            .transpose()?;
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        let to = self
            .to
            .as_deref()
            .map(|raw| parse_bound(raw, end_of_day))
            .transpose()?;
        Ok(MoodRange { from, to })
    }
}

fn parse_bound(raw: &str, time_of_day: NaiveTime) -> Result<DateTime<Utc>, ProfileServiceError> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(time_of_day).and_utc())
        .map_err(|_| ProfileServiceError::InvalidArgument(format!("invalid date '{raw}'")))
}

pub(crate) async fn list_moods_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    Query(query): Query<MoodQuery>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let outcome = query
        .range()
        .and_then(|range| service.list_moods(&user_id, range));
    respond(StatusCode::OK, outcome)
}

pub(crate) async fn delete_mood_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    Path(entry_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.delete_mood(&user_id, &entry_id))
}

pub(crate) async fn mindfulness_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    JsonBody(input): JsonBody<MindfulnessInput>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.add_mindfulness_minutes(&user_id, input),
    )
}

pub(crate) async fn badge_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    JsonBody(input): JsonBody<BadgeInput>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.add_badge(&user_id, input))
}

pub(crate) async fn xp_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    JsonBody(input): JsonBody<XpInput>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.add_xp(&user_id, input))
}

pub(crate) async fn streak_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    body: Bytes,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let outcome = streak_input(&body).and_then(|input| service.adjust_streak(&user_id, input));
    respond(StatusCode::OK, outcome)
}

/// An empty body means the default `increase: true`.
fn streak_input(body: &[u8]) -> Result<StreakInput, ProfileServiceError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StreakInput::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        ProfileServiceError::InvalidArgument(format!("invalid request body: {err}"))
    })
}

pub(crate) async fn reset_streak_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.reset_streak(&user_id))
}

pub(crate) async fn challenge_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    JsonBody(input): JsonBody<ChallengeInput>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.complete_challenge(&user_id, input))
}

pub(crate) async fn add_speaking_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    JsonBody(input): JsonBody<SpeakingTaskInput>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.add_speaking_task(&user_id, input))
}

pub(crate) async fn list_speaking_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.list_speaking_tasks(&user_id))
}

pub(crate) async fn join_group_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    JsonBody(input): JsonBody<GroupInput>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.join_study_group(&user_id, input))
}

pub(crate) async fn leave_group_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    JsonBody(input): JsonBody<GroupInput>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.leave_study_group(&user_id, input))
}

pub(crate) async fn mentor_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    JsonBody(input): JsonBody<MentorInput>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.add_mentor(&user_id, input))
}

pub(crate) async fn notifications_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    JsonBody(settings): JsonBody<NotificationSettings>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.update_notification_settings(&user_id, settings),
    )
}

pub(crate) async fn privacy_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    JsonBody(settings): JsonBody<PrivacySettings>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.update_privacy_settings(&user_id, settings),
    )
}

pub(crate) async fn theme_handler<R>(
    State(service): State<SharedService<R>>,
    CallerIdentity(user_id): CallerIdentity,
    JsonBody(input): JsonBody<ThemeInput>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    respond(StatusCode::OK, service.update_theme(&user_id, input))
}

/// `axum::Json` whose rejections (bad content type, malformed JSON, mistyped fields)
/// become `InvalidArgument` responses.
pub(crate) struct JsonBody<T>(pub(crate) T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ProfileServiceError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        axum::Json::<T>::from_request(request, state)
            .await
            .map(|axum::Json(value)| JsonBody(value))
            .map_err(|rejection| {
                ProfileServiceError::InvalidArgument(format!(
                    "invalid request body: {}",
                    rejection.body_text()
                ))
            })
    }
}

fn respond<T: Serialize>(status: StatusCode, outcome: Result<T, ProfileServiceError>) -> Response {
    match outcome {
        Ok(body) => (status, axum::Json(body)).into_response(),
        Err(error) => error.into_response(),
    }
}

impl IntoResponse for ProfileServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProfileServiceError::InvalidArgument(_) | ProfileServiceError::AlreadyPresent { .. } => {
                StatusCode::BAD_REQUEST
            }
            ProfileServiceError::NotFound => StatusCode::NOT_FOUND,
            ProfileServiceError::Conflict => StatusCode::CONFLICT,
            ProfileServiceError::Repository(error) => {
                warn!(error = %error, "profile store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let payload = json!({ "error": self.to_string() });
        (status, axum::Json(payload)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn mood_query_accepts_dates_and_timestamps() {
        let query = MoodQuery {
            from: Some("2024-03-01".to_string()),
            to: Some("2024-03-02T08:30:00+02:00".to_string()),
        };
        let range = query.range().expect("valid bounds");
        assert_eq!(
            range.from,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            range.to,
            Some(Utc.with_ymd_and_hms(2024, 3, 2, 6, 30, 0).unwrap())
        );
    }

    #[test]
    fn plain_to_date_covers_the_whole_day() {
        let query = MoodQuery {
            from: None,
            to: Some("2024-03-02".to_string()),
        };
        let to = query.range().expect("valid bound").to.expect("to set");
        assert!(to > Utc.with_ymd_and_hms(2024, 3, 2, 23, 59, 0).unwrap());
    }

    #[test]
    fn mood_query_rejects_garbage() {
        let query = MoodQuery {
            from: Some("last tuesday".to_string()),
            to: None,
        };
        assert!(matches!(
            query.range(),
            Err(ProfileServiceError::InvalidArgument(_))
        ));
    }
}
