use super::domain::{UserId, UserProfile};
use super::update::{ProfileUpdate, SetField};

/// Whether an update may create the document when none exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Upsert,
    ExistingOnly,
}

/// Result of a conditional "insert into set if absent" write.
#[derive(Debug, Clone, PartialEq)]
pub enum SetInsertion {
    Inserted(UserProfile),
    AlreadyPresent,
    Missing,
}

/// Document-store port the profile service depends on. Every call is atomic per document.
pub trait ProfileRepository: Send + Sync {
    fn fetch(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError>;

    /// Stores a new document, failing with `Conflict` when one exists for the owner.
    fn insert(&self, profile: UserProfile) -> Result<UserProfile, RepositoryError>;

    /// Applies `update` and returns the post-update snapshot. `None` means the document was
    /// absent and `mode` did not allow creating it.
    fn update(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
        mode: WriteMode,
    ) -> Result<Option<UserProfile>, RepositoryError>;

    fn insert_into_set(
        &self,
        user_id: &UserId,
        field: SetField,
        value: &str,
    ) -> Result<SetInsertion, RepositoryError>;

    /// Returns whether a document was removed.
    fn delete(&self, user_id: &UserId) -> Result<bool, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("profile already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
