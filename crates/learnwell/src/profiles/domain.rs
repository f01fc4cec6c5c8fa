use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resolved, already-authenticated identity that owns a profile document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier assigned to a mood entry when it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodEntryId(pub String);

impl MoodEntryId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Stored profile: the owner, the six sections, and store-maintained timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: UserId,
    #[serde(flatten)]
    pub document: ProfileDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(user_id: UserId, document: ProfileDocument, now: DateTime<Utc>) -> Self {
        let mut document = document;
        document.progress.sync_level();
        Self {
            user_id,
            document,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_defaults(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self::new(user_id, ProfileDocument::default(), now)
    }
}

/// The user-editable body of a profile. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDocument {
    pub personal_info: PersonalInfo,
    pub learning_preferences: LearningPreferences,
    pub progress: Progress,
    pub wellbeing: Wellbeing,
    pub social: Social,
    pub settings: Settings,
}

pub const DEFAULT_AVATAR: &str = "https://via.placeholder.com/150";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub bio: String,
    pub avatar: String,
    pub interests: Vec<String>,
    pub occupation: String,
    pub location: String,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            bio: String::new(),
            avatar: DEFAULT_AVATAR.to_string(),
            interests: Vec::new(),
            occupation: String::new(),
            location: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningPreferences {
    pub preferred_subjects: Vec<String>,
    pub learning_style: LearningStyle,
    pub difficulty_preference: DifficultyPreference,
    /// Minutes per day.
    pub daily_learning_goal: u32,
}

impl Default for LearningPreferences {
    fn default() -> Self {
        Self {
            preferred_subjects: Vec::new(),
            learning_style: LearningStyle::default(),
            difficulty_preference: DifficultyPreference::default(),
            daily_learning_goal: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Visual,
    Auditory,
    #[serde(rename = "reading/writing", alias = "reading-writing")]
    ReadingWriting,
    Kinesthetic,
    #[default]
    Mixed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyPreference {
    Beginner,
    Intermediate,
    Advanced,
    #[default]
    Adaptive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    pub experience_points: i64,
    pub level: i64,
    pub streak: i64,
    pub badges_earned: Vec<Badge>,
    pub completed_challenges: Vec<CompletedChallenge>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            experience_points: 0,
            level: 1,
            streak: 0,
            badges_earned: Vec::new(),
            completed_challenges: Vec::new(),
        }
    }
}

impl Progress {
    /// Re-derives `level` from `experience_points`.
    pub fn sync_level(&mut self) {
        self.level = level_for_experience(self.experience_points);
    }
}

/// `max(1, floor(sqrt(xp / 100)) + 1)`; non-positive totals sit at level 1.
pub fn level_for_experience(experience_points: i64) -> i64 {
    if experience_points <= 0 {
        return 1;
    }

    let level = (experience_points as f64 / 100.0).sqrt().floor() as i64 + 1;
    level.max(1)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub date_earned: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedChallenge {
    pub challenge_id: String,
    pub completed_date: DateTime<Utc>,
    /// 1 through 5.
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Wellbeing {
    /// 1 through 10.
    pub stress_level: u8,
    pub mood_tracker: Vec<MoodEntry>,
    pub mindfulness_minutes: u64,
    pub mindfulness_sessions: Vec<MindfulnessSession>,
    pub sleep_hours: f64,
}

impl Default for Wellbeing {
    fn default() -> Self {
        Self {
            stress_level: 5,
            mood_tracker: Vec::new(),
            mindfulness_minutes: 0,
            mindfulness_sessions: Vec::new(),
            sleep_hours: 7.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: MoodEntryId,
    pub date: DateTime<Utc>,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Excellent,
    Good,
    Neutral,
    Stressed,
    Overwhelmed,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Excellent,
        Mood::Good,
        Mood::Neutral,
        Mood::Stressed,
        Mood::Overwhelmed,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Mood::Excellent => "excellent",
            Mood::Good => "good",
            Mood::Neutral => "neutral",
            Mood::Stressed => "stressed",
            Mood::Overwhelmed => "overwhelmed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mood| mood.label() == normalized)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindfulnessSession {
    pub date: DateTime<Utc>,
    /// Minutes.
    pub duration: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Social {
    pub mentors: Vec<String>,
    pub mentees: Vec<String>,
    pub study_groups: Vec<String>,
    pub attended_meetups: Vec<DateTime<Utc>>,
    pub public_speaking_tasks: Vec<SpeakingTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakingTask {
    pub title: String,
    pub date: DateTime<Utc>,
    /// Minutes.
    #[serde(default)]
    pub duration: u32,
    /// 1 through 10.
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub notifications: NotificationSettings,
    pub privacy: PrivacySettings,
    pub theme: Theme,
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: NotificationSettings::default(),
            privacy: PrivacySettings::default(),
            theme: Theme::default(),
            language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub email: bool,
    pub push: bool,
    pub challenges: bool,
    pub social_updates: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            challenges: true,
            social_updates: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivacySettings {
    pub profile_visibility: ProfileVisibility,
    pub show_progress: bool,
    pub show_activity: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            profile_visibility: ProfileVisibility::default(),
            show_progress: true,
            show_activity: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileVisibility {
    #[default]
    Public,
    Friends,
    Private,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// The six independently patchable top-level groups of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionName {
    PersonalInfo,
    LearningPreferences,
    Progress,
    Wellbeing,
    Social,
    Settings,
}

impl SectionName {
    pub const ALL: [SectionName; 6] = [
        SectionName::PersonalInfo,
        SectionName::LearningPreferences,
        SectionName::Progress,
        SectionName::Wellbeing,
        SectionName::Social,
        SectionName::Settings,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            SectionName::PersonalInfo => "personalInfo",
            SectionName::LearningPreferences => "learningPreferences",
            SectionName::Progress => "progress",
            SectionName::Wellbeing => "wellbeing",
            SectionName::Social => "social",
            SectionName::Settings => "settings",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.label() == raw)
    }
}

/// A decoded replacement body for one section.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileSection {
    PersonalInfo(PersonalInfo),
    LearningPreferences(LearningPreferences),
    Progress(Progress),
    Wellbeing(Wellbeing),
    Social(Social),
    Settings(Settings),
}

impl ProfileSection {
    pub fn decode(name: SectionName, body: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match name {
            SectionName::PersonalInfo => Self::PersonalInfo(serde_json::from_value(body)?),
            SectionName::LearningPreferences => {
                Self::LearningPreferences(serde_json::from_value(body)?)
            }
            SectionName::Progress => Self::Progress(serde_json::from_value(body)?),
            SectionName::Wellbeing => Self::Wellbeing(serde_json::from_value(body)?),
            SectionName::Social => Self::Social(serde_json::from_value(body)?),
            SectionName::Settings => Self::Settings(serde_json::from_value(body)?),
        })
    }

    pub fn name(&self) -> SectionName {
        match self {
            Self::PersonalInfo(_) => SectionName::PersonalInfo,
            Self::LearningPreferences(_) => SectionName::LearningPreferences,
            Self::Progress(_) => SectionName::Progress,
            Self::Wellbeing(_) => SectionName::Wellbeing,
            Self::Social(_) => SectionName::Social,
            Self::Settings(_) => SectionName::Settings,
        }
    }
}
