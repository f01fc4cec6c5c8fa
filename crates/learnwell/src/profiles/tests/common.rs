use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::profiles::domain::{ProfileDocument, UserId, UserProfile};
use crate::profiles::identity::USER_ID_HEADER;
use crate::profiles::repository::{ProfileRepository, RepositoryError, SetInsertion, WriteMode};
use crate::profiles::store::MemoryProfileStore;
use crate::profiles::update::{ProfileUpdate, SetField};
use crate::profiles::{profile_router, ProfileService};

pub(super) const LEARNER: &str = "auth0|learner-1";

pub(super) fn learner() -> UserId {
    UserId::from(LEARNER)
}

pub(super) fn build_service() -> (ProfileService<MemoryProfileStore>, Arc<MemoryProfileStore>) {
    let store = Arc::new(MemoryProfileStore::in_memory());
    let service = ProfileService::new(store.clone());
    (service, store)
}

pub(super) fn seeded_service() -> (ProfileService<MemoryProfileStore>, Arc<MemoryProfileStore>) {
    let (service, store) = build_service();
    service
        .get_or_create_profile(&learner())
        .expect("profile seeded");
    (service, store)
}

pub(super) fn sample_document() -> ProfileDocument {
    let mut document = ProfileDocument::default();
    document.personal_info.name = "Mina Okafor".to_string();
    document.personal_info.interests = vec!["AI".to_string(), "Design".to_string()];
    document.learning_preferences.preferred_subjects = vec!["Computer Science".to_string()];
    document.progress.experience_points = 900;
    document.wellbeing.stress_level = 3;
    document.social.study_groups = vec!["ml-reading-circle".to_string()];
    document
}

pub(super) fn profile_app() -> (axum::Router, Arc<MemoryProfileStore>) {
    let (service, store) = build_service();
    (profile_router(Arc::new(service)), store)
}

pub(super) fn authorized(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, "Bearer test-token")
        .header(USER_ID_HEADER, LEARNER);

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("json body")))
            .expect("request builds"),
        None => builder.body(Body::empty()).expect("request builds"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn fetch(&self, _user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _profile: UserProfile) -> Result<UserProfile, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(
        &self,
        _user_id: &UserId,
        _update: ProfileUpdate,
        _mode: WriteMode,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_into_set(
        &self,
        _user_id: &UserId,
        _field: SetField,
        _value: &str,
    ) -> Result<SetInsertion, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _user_id: &UserId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Hides the stored document from the first fetch, mimicking a creator that raced ahead.
pub(super) struct RacingRepository {
    inner: MemoryProfileStore,
    hide_next_fetch: AtomicBool,
}

impl RacingRepository {
    pub(super) fn with_existing(user_id: &UserId) -> Self {
        let inner = MemoryProfileStore::in_memory();
        inner
            .insert(UserProfile::with_defaults(user_id.clone(), chrono::Utc::now()))
            .expect("seed insert");
        Self {
            inner,
            hide_next_fetch: AtomicBool::new(true),
        }
    }
}

impl ProfileRepository for RacingRepository {
    fn fetch(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        if self.hide_next_fetch.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        self.inner.fetch(user_id)
    }

    fn insert(&self, profile: UserProfile) -> Result<UserProfile, RepositoryError> {
        self.inner.insert(profile)
    }

    fn update(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
        mode: WriteMode,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        self.inner.update(user_id, update, mode)
    }

    fn insert_into_set(
        &self,
        user_id: &UserId,
        field: SetField,
        value: &str,
    ) -> Result<SetInsertion, RepositoryError> {
        self.inner.insert_into_set(user_id, field, value)
    }

    fn delete(&self, user_id: &UserId) -> Result<bool, RepositoryError> {
        self.inner.delete(user_id)
    }
}

/// Holds every fetch until `callers` fetches are in flight, so concurrent read-then-write
/// callers all observe the same stale document.
pub(super) struct LockstepFetchRepository {
    pub(super) inner: MemoryProfileStore,
    barrier: Barrier,
}

impl LockstepFetchRepository {
    pub(super) fn seeded(user_id: &UserId, callers: usize) -> Self {
        let inner = MemoryProfileStore::in_memory();
        inner
            .insert(UserProfile::with_defaults(user_id.clone(), chrono::Utc::now()))
            .expect("seed insert");
        Self {
            inner,
            barrier: Barrier::new(callers),
        }
    }
}

impl ProfileRepository for LockstepFetchRepository {
    fn fetch(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        let snapshot = self.inner.fetch(user_id);
        self.barrier.wait();
        snapshot
    }

    fn insert(&self, profile: UserProfile) -> Result<UserProfile, RepositoryError> {
        self.inner.insert(profile)
    }

    fn update(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
        mode: WriteMode,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        self.inner.update(user_id, update, mode)
    }

    fn insert_into_set(
        &self,
        user_id: &UserId,
        field: SetField,
        value: &str,
    ) -> Result<SetInsertion, RepositoryError> {
        self.inner.insert_into_set(user_id, field, value)
    }

    fn delete(&self, user_id: &UserId) -> Result<bool, RepositoryError> {
        self.inner.delete(user_id)
    }
}
