use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use super::domain::{
    Badge, CompletedChallenge, MindfulnessSession, MoodEntry, MoodEntryId, NotificationSettings,
    PrivacySettings, ProfileDocument, ProfileSection, SectionName, SpeakingTask, UserId,
    UserProfile,
};
use super::repository::{ProfileRepository, RepositoryError, SetInsertion, WriteMode};
use super::requests::{
    required_id, BadgeInput, ChallengeInput, GroupInput, MentorInput, MindfulnessInput,
    MoodInput, MoodRange, SpeakingTaskInput, StreakInput, ThemeInput, XpInput,
};
use super::update::{ProfileUpdate, SetField};
use super::validation::{check_document, check_section, ProfileViolation};

/// Applies one semantic mutation to the caller's own profile and returns the resulting
/// snapshot.
pub struct ProfileService<R> {
    repository: Arc<R>,
}

impl<R> ProfileService<R>
where
    R: ProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(name = "profiles.create", skip(self, document), fields(user_id = %user_id))]
    pub fn create_profile(
        &self,
        user_id: &UserId,
        document: ProfileDocument,
    ) -> Result<UserProfile, ProfileServiceError> {
        check_document(&document)?;
        if self.repository.fetch(user_id)?.is_some() {
            return Err(ProfileServiceError::Conflict);
        }

        let profile = UserProfile::new(user_id.clone(), document, Utc::now());
        let stored = self.repository.insert(profile).map_err(|err| match err {
            RepositoryError::Conflict => ProfileServiceError::Conflict,
            other => ProfileServiceError::Repository(other),
        })?;
        info!("profile created");
        Ok(stored)
    }

    #[instrument(name = "profiles.get_or_create", skip(self), fields(user_id = %user_id))]
    pub fn get_or_create_profile(
        &self,
        user_id: &UserId,
    ) -> Result<UserProfile, ProfileServiceError> {
        if let Some(existing) = self.repository.fetch(user_id)? {
            return Ok(existing);
        }

        match self
            .repository
            .insert(UserProfile::with_defaults(user_id.clone(), Utc::now()))
        {
            Ok(created) => {
                info!("profile created with defaults on first read");
                Ok(created)
            }
            Err(RepositoryError::Conflict) => self
                .repository
                .fetch(user_id)?
                .ok_or(ProfileServiceError::NotFound),
            Err(other) => Err(other.into()),
        }
    }

    #[instrument(name = "profiles.replace", skip(self, document), fields(user_id = %user_id))]
    pub fn replace_profile(
        &self,
        user_id: &UserId,
        document: ProfileDocument,
    ) -> Result<UserProfile, ProfileServiceError> {
        check_document(&document)?;
        self.write(user_id, ProfileUpdate::Replace(document), WriteMode::Upsert)
    }

    #[instrument(name = "profiles.patch_section", skip(self, body), fields(user_id = %user_id))]
    pub fn patch_section(
        &self,
        user_id: &UserId,
        section_name: &str,
        body: serde_json::Value,
    ) -> Result<UserProfile, ProfileServiceError> {
        let name = SectionName::parse(section_name)
            .ok_or_else(|| ProfileServiceError::invalid("invalid section"))?;
        let section = ProfileSection::decode(name, body).map_err(|err| {
            ProfileServiceError::InvalidArgument(format!("invalid {} body: {err}", name.label()))
        })?;
        check_section(&section)?;

        self.write(user_id, ProfileUpdate::SetSection(section), WriteMode::Upsert)
    }

    #[instrument(name = "profiles.delete", skip(self), fields(user_id = %user_id))]
    pub fn delete_profile(&self, user_id: &UserId) -> Result<(), ProfileServiceError> {
        let removed = self.repository.delete(user_id)?;
        debug!(removed, "profile delete processed");
        Ok(())
    }

    #[instrument(name = "profiles.append_mood", skip(self, input), fields(user_id = %user_id))]
    pub fn append_mood(
        &self,
        user_id: &UserId,
        input: MoodInput,
    ) -> Result<UserProfile, ProfileServiceError> {
        let (mood, notes) = input.validate()?;
        let entry = MoodEntry {
            id: MoodEntryId::generate(),
            date: Utc::now(),
            mood,
            notes,
        };
        self.write(user_id, ProfileUpdate::PushMood(entry), WriteMode::Upsert)
    }

    #[instrument(name = "profiles.list_moods", skip(self), fields(user_id = %user_id))]
    pub fn list_moods(
        &self,
        user_id: &UserId,
        range: MoodRange,
    ) -> Result<Vec<MoodEntry>, ProfileServiceError> {
        let profile = self.existing(user_id)?;
        let entries = profile.document.wellbeing.mood_tracker;
        if range.from.is_none() && range.to.is_none() {
            return Ok(entries);
        }

        let from = range.from.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let to = range.to.unwrap_or_else(Utc::now);
        Ok(entries
            .into_iter()
            .filter(|entry| entry.date >= from && entry.date <= to)
            .collect())
    }

    #[instrument(name = "profiles.delete_mood", skip(self), fields(user_id = %user_id))]
    pub fn delete_mood(
        &self,
        user_id: &UserId,
        entry_id: &str,
    ) -> Result<UserProfile, ProfileServiceError> {
        let update = ProfileUpdate::PullMood(MoodEntryId(entry_id.to_string()));
        self.write(user_id, update, WriteMode::ExistingOnly)
    }

    #[instrument(name = "profiles.add_mindfulness", skip(self, input), fields(user_id = %user_id))]
    pub fn add_mindfulness_minutes(
        &self,
        user_id: &UserId,
        input: MindfulnessInput,
    ) -> Result<UserProfile, ProfileServiceError> {
        let (duration, date) = input.validate()?;
        let session = MindfulnessSession {
            date: date.unwrap_or_else(Utc::now),
            duration,
        };
        self.write(
            user_id,
            ProfileUpdate::RecordMindfulness(session),
            WriteMode::Upsert,
        )
    }

    #[instrument(name = "profiles.add_badge", skip(self, input), fields(user_id = %user_id))]
    pub fn add_badge(
        &self,
        user_id: &UserId,
        input: BadgeInput,
    ) -> Result<UserProfile, ProfileServiceError> {
        let BadgeInput {
            name,
            description,
            icon,
        } = input.validate()?;
        let badge = Badge {
            name,
            description,
            icon,
            date_earned: Utc::now(),
        };
        self.write(user_id, ProfileUpdate::PushBadge(badge), WriteMode::Upsert)
    }

    /// Negative deltas may take the total below zero; only the level is floored.
    #[instrument(name = "profiles.add_xp", skip(self, input), fields(user_id = %user_id))]
    pub fn add_xp(
        &self,
        user_id: &UserId,
        input: XpInput,
    ) -> Result<UserProfile, ProfileServiceError> {
        let delta = input.validate()?;
        let updated = self.write(
            user_id,
            ProfileUpdate::AddExperience(delta),
            WriteMode::ExistingOnly,
        )?;
        debug!(
            delta,
            total = updated.document.progress.experience_points,
            level = updated.document.progress.level,
            "experience updated"
        );
        Ok(updated)
    }

    #[instrument(name = "profiles.adjust_streak", skip(self, input), fields(user_id = %user_id))]
    pub fn adjust_streak(
        &self,
        user_id: &UserId,
        input: StreakInput,
    ) -> Result<UserProfile, ProfileServiceError> {
        let delta = if input.increase { 1 } else { -1 };
        let profile = self.write(
            user_id,
            ProfileUpdate::IncrementStreak(delta),
            WriteMode::Upsert,
        )?;

        if profile.document.progress.streak < 0 {
            debug!("streak dropped below zero, clamping");
            return self.write(user_id, ProfileUpdate::SetStreak(0), WriteMode::Upsert);
        }
        Ok(profile)
    }

    #[instrument(name = "profiles.reset_streak", skip(self), fields(user_id = %user_id))]
    pub fn reset_streak(&self, user_id: &UserId) -> Result<UserProfile, ProfileServiceError> {
        self.write(user_id, ProfileUpdate::SetStreak(0), WriteMode::ExistingOnly)
    }

    #[instrument(name = "profiles.complete_challenge", skip(self, input), fields(user_id = %user_id))]
    pub fn complete_challenge(
        &self,
        user_id: &UserId,
        input: ChallengeInput,
    ) -> Result<UserProfile, ProfileServiceError> {
        let (challenge_id, rating) = input.validate()?;
        let challenge = CompletedChallenge {
            challenge_id,
            completed_date: Utc::now(),
            rating,
        };
        self.write(
            user_id,
            ProfileUpdate::PushChallenge(challenge),
            WriteMode::Upsert,
        )
    }

    #[instrument(name = "profiles.add_speaking_task", skip(self, input), fields(user_id = %user_id))]
    pub fn add_speaking_task(
        &self,
        user_id: &UserId,
        input: SpeakingTaskInput,
    ) -> Result<UserProfile, ProfileServiceError> {
        let task = input.validate()?;
        let task = SpeakingTask {
            title: task.title,
            date: task.date.unwrap_or_else(Utc::now),
            duration: task.duration,
            confidence: task.confidence,
        };
        self.write(
            user_id,
            ProfileUpdate::PushSpeakingTask(task),
            WriteMode::Upsert,
        )
    }

    pub fn list_speaking_tasks(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SpeakingTask>, ProfileServiceError> {
        let profile = self.existing(user_id)?;
        Ok(profile.document.social.public_speaking_tasks)
    }

    #[instrument(name = "profiles.join_study_group", skip(self, input), fields(user_id = %user_id))]
    pub fn join_study_group(
        &self,
        user_id: &UserId,
        input: GroupInput,
    ) -> Result<UserProfile, ProfileServiceError> {
        let group_id = required_id(&input.group_id, "group ID")?;
        self.add_to_set(user_id, SetField::StudyGroups, &group_id)
    }

    #[instrument(name = "profiles.leave_study_group", skip(self, input), fields(user_id = %user_id))]
    pub fn leave_study_group(
        &self,
        user_id: &UserId,
        input: GroupInput,
    ) -> Result<UserProfile, ProfileServiceError> {
        let group_id = required_id(&input.group_id, "group ID")?;
        let update = ProfileUpdate::PullFromSet {
            field: SetField::StudyGroups,
            value: group_id,
        };
        self.write(user_id, update, WriteMode::ExistingOnly)
    }

    #[instrument(name = "profiles.add_mentor", skip(self, input), fields(user_id = %user_id))]
    pub fn add_mentor(
        &self,
        user_id: &UserId,
        input: MentorInput,
    ) -> Result<UserProfile, ProfileServiceError> {
        let mentor_id = required_id(&input.mentor_id, "mentor ID")?;
        self.add_to_set(user_id, SetField::Mentors, &mentor_id)
    }

    pub fn update_notification_settings(
        &self,
        user_id: &UserId,
        settings: NotificationSettings,
    ) -> Result<UserProfile, ProfileServiceError> {
        self.write(
            user_id,
            ProfileUpdate::SetNotifications(settings),
            WriteMode::Upsert,
        )
    }

    pub fn update_privacy_settings(
        &self,
        user_id: &UserId,
        settings: PrivacySettings,
    ) -> Result<UserProfile, ProfileServiceError> {
        self.write(user_id, ProfileUpdate::SetPrivacy(settings), WriteMode::Upsert)
    }

    pub fn update_theme(
        &self,
        user_id: &UserId,
        input: ThemeInput,
    ) -> Result<UserProfile, ProfileServiceError> {
        let theme = input.validate()?;
        self.write(user_id, ProfileUpdate::SetTheme(theme), WriteMode::Upsert)
    }

    fn existing(&self, user_id: &UserId) -> Result<UserProfile, ProfileServiceError> {
        self.repository
            .fetch(user_id)?
            .ok_or(ProfileServiceError::NotFound)
    }

    fn write(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
        mode: WriteMode,
    ) -> Result<UserProfile, ProfileServiceError> {
        let label = update.label();
        let profile = self
            .repository
            .update(user_id, update, mode)?
            .ok_or(ProfileServiceError::NotFound)?;
        debug!(update = label, "profile updated");
        Ok(profile)
    }

    fn add_to_set(
        &self,
        user_id: &UserId,
        field: SetField,
        value: &str,
    ) -> Result<UserProfile, ProfileServiceError> {
        match self.repository.insert_into_set(user_id, field, value)? {
            SetInsertion::Inserted(profile) => {
                debug!(field = field.label(), value, "set member added");
                Ok(profile)
            }
            SetInsertion::AlreadyPresent | SetInsertion::Missing => {
                Err(ProfileServiceError::AlreadyPresent { field })
            }
        }
    }
}

/// Error raised by the profile service.
#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("profile not found")]
    NotFound,
    #[error("profile already exists")]
    Conflict,
    /// Covers both "already a member" and "no profile yet"; callers get one coarse signal.
    #[error("already present in {} or profile not found", .field.label())]
    AlreadyPresent { field: SetField },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ProfileServiceError {
    pub(crate) fn invalid(message: &str) -> Self {
        Self::InvalidArgument(message.to_string())
    }
}

impl From<ProfileViolation> for ProfileServiceError {
    fn from(value: ProfileViolation) -> Self {
        Self::InvalidArgument(value.to_string())
    }
}
