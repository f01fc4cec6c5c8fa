//! Per-user profile documents and the single-document mutations applied to them.
//!
//! Every operation resolves to one `ProfileUpdate` executed atomically by a
//! `ProfileRepository`. `MemoryProfileStore` is the in-process implementation, with an
//! optional JSON snapshot read on connect and written on disconnect.

pub mod domain;
pub mod identity;
pub mod repository;
pub mod requests;
pub mod router;
pub mod service;
pub mod store;
pub mod update;
pub(crate) mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    level_for_experience, Badge, CompletedChallenge, LearningPreferences, LearningStyle,
    MindfulnessSession, Mood, MoodEntry, MoodEntryId, NotificationSettings, PersonalInfo,
    PrivacySettings, ProfileDocument, ProfileSection, ProfileVisibility, Progress, SectionName,
    Settings, Social, SpeakingTask, Theme, UserId, UserProfile, Wellbeing,
};
pub use identity::CallerIdentity;
pub use repository::{ProfileRepository, RepositoryError, SetInsertion, WriteMode};
pub use requests::{
    BadgeInput, ChallengeInput, GroupInput, MentorInput, MindfulnessInput, MoodInput, MoodRange,
    SpeakingTaskInput, StreakInput, ThemeInput, XpInput,
};
pub use router::profile_router;
pub use service::{ProfileService, ProfileServiceError};
pub use store::{MemoryProfileStore, StoreError};
pub use update::{ProfileUpdate, SetField};
pub use validation::ProfileViolation;
