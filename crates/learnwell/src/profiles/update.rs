use super::domain::{
    Badge, CompletedChallenge, MindfulnessSession, MoodEntry, MoodEntryId, NotificationSettings,
    PrivacySettings, ProfileDocument, ProfileSection, SpeakingTask, Theme,
};

/// Set-like string lists that reject duplicates at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Mentors,
    StudyGroups,
}

impl SetField {
    pub const fn label(self) -> &'static str {
        match self {
            SetField::Mentors => "social.mentors",
            SetField::StudyGroups => "social.studyGroups",
        }
    }

    pub fn values(self, document: &ProfileDocument) -> &Vec<String> {
        match self {
            SetField::Mentors => &document.social.mentors,
            SetField::StudyGroups => &document.social.study_groups,
        }
    }

    pub fn values_mut(self, document: &mut ProfileDocument) -> &mut Vec<String> {
        match self {
            SetField::Mentors => &mut document.social.mentors,
            SetField::StudyGroups => &mut document.social.study_groups,
        }
    }
}

/// A single-document field-path update. Repositories apply one of these atomically.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    Replace(ProfileDocument),
    SetSection(ProfileSection),
    PushMood(MoodEntry),
    PullMood(MoodEntryId),
    /// Adds the session duration to the running total and records the session.
    RecordMindfulness(MindfulnessSession),
    PushBadge(Badge),
    /// Adds to experience points and re-derives the level in the same write.
    AddExperience(i64),
    IncrementStreak(i64),
    SetStreak(i64),
    PushChallenge(CompletedChallenge),
    PushSpeakingTask(SpeakingTask),
    PullFromSet { field: SetField, value: String },
    SetNotifications(NotificationSettings),
    SetPrivacy(PrivacySettings),
    SetTheme(Theme),
}

impl ProfileUpdate {
    pub fn label(&self) -> &'static str {
        match self {
            ProfileUpdate::Replace(_) => "replace",
            ProfileUpdate::SetSection(section) => section.name().label(),
            ProfileUpdate::PushMood(_) => "wellbeing.moodTracker.push",
            ProfileUpdate::PullMood(_) => "wellbeing.moodTracker.pull",
            ProfileUpdate::RecordMindfulness(_) => "wellbeing.mindfulness",
            ProfileUpdate::PushBadge(_) => "progress.badgesEarned.push",
            ProfileUpdate::AddExperience(_) => "progress.experiencePoints",
            ProfileUpdate::IncrementStreak(_) | ProfileUpdate::SetStreak(_) => "progress.streak",
            ProfileUpdate::PushChallenge(_) => "progress.completedChallenges.push",
            ProfileUpdate::PushSpeakingTask(_) => "social.publicSpeakingTasks.push",
            ProfileUpdate::PullFromSet { field, .. } => field.label(),
            ProfileUpdate::SetNotifications(_) => "settings.notifications",
            ProfileUpdate::SetPrivacy(_) => "settings.privacy",
            ProfileUpdate::SetTheme(_) => "settings.theme",
        }
    }

    pub fn apply(self, document: &mut ProfileDocument) {
        match self {
            ProfileUpdate::Replace(replacement) => {
                *document = replacement;
                document.progress.sync_level();
            }
            ProfileUpdate::SetSection(section) => match section {
                ProfileSection::PersonalInfo(value) => document.personal_info = value,
                ProfileSection::LearningPreferences(value) => {
                    document.learning_preferences = value
                }
                ProfileSection::Progress(value) => {
                    document.progress = value;
                    document.progress.sync_level();
                }
                ProfileSection::Wellbeing(value) => document.wellbeing = value,
                ProfileSection::Social(value) => document.social = value,
                ProfileSection::Settings(value) => document.settings = value,
            },
            ProfileUpdate::PushMood(entry) => document.wellbeing.mood_tracker.push(entry),
            ProfileUpdate::PullMood(id) => document
                .wellbeing
                .mood_tracker
                .retain(|entry| entry.id != id),
            ProfileUpdate::RecordMindfulness(session) => {
                document.wellbeing.mindfulness_minutes = document
                    .wellbeing
                    .mindfulness_minutes
                    .saturating_add(u64::from(session.duration));
                document.wellbeing.mindfulness_sessions.push(session);
            }
            ProfileUpdate::PushBadge(badge) => document.progress.badges_earned.push(badge),
            ProfileUpdate::AddExperience(delta) => {
                document.progress.experience_points =
                    document.progress.experience_points.saturating_add(delta);
                document.progress.sync_level();
            }
            ProfileUpdate::IncrementStreak(delta) => {
                document.progress.streak = document.progress.streak.saturating_add(delta)
            }
            ProfileUpdate::SetStreak(value) => document.progress.streak = value,
            ProfileUpdate::PushChallenge(challenge) => {
                document.progress.completed_challenges.push(challenge)
            }
            ProfileUpdate::PushSpeakingTask(task) => {
                document.social.public_speaking_tasks.push(task)
            }
            ProfileUpdate::PullFromSet { field, value } => {
                field.values_mut(document).retain(|existing| existing != &value)
            }
            ProfileUpdate::SetNotifications(settings) => document.settings.notifications = settings,
            ProfileUpdate::SetPrivacy(settings) => document.settings.privacy = settings,
            ProfileUpdate::SetTheme(theme) => document.settings.theme = theme,
        }
    }
}
