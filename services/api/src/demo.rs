use crate::infra::load_catalog;
use chrono::{Duration, Utc};
use clap::Args;
use learnwell::courses::{CourseCatalog, CourseFilter, CourseMatch, CourseMatcher, QuizAnswers};
use learnwell::error::AppError;
use learnwell::profiles::{
    BadgeInput, ChallengeInput, GroupInput, MemoryProfileStore, MentorInput, MindfulnessInput,
    MoodInput, MoodRange, ProfileRepository, ProfileService, ProfileServiceError, StreakInput,
    ThemeInput, UserId, UserProfile, XpInput,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct RecommendArgs {
    /// Interest keyword; repeat for several
    #[arg(long)]
    pub(crate) interest: Vec<String>,
    /// Experience level (Beginner, Intermediate, Advanced)
    #[arg(long)]
    pub(crate) level: Option<String>,
    /// Difficulty (easy, medium, hard)
    #[arg(long)]
    pub(crate) difficulty: Option<String>,
    /// Learning style; repeat for several
    #[arg(long)]
    pub(crate) learning_style: Vec<String>,
    /// Weekly hours, e.g. "5-10"
    #[arg(long)]
    pub(crate) time_commitment: Option<String>,
    /// Price range, e.g. "0-500" or "700+"
    #[arg(long)]
    pub(crate) price_range: Option<String>,
    /// Course catalog file (.json or .csv). Defaults to the sample catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the score of every catalog course after the recommendations
    #[arg(long)]
    pub(crate) show_scores: bool,
}

impl RecommendArgs {
    fn answers(&self) -> QuizAnswers {
        QuizAnswers {
            interests: self.interest.clone(),
            level: self.level.clone().unwrap_or_default(),
            difficulty: self.difficulty.clone().unwrap_or_default(),
            learning_style: self.learning_style.clone(),
            time_commitment: self.time_commitment.clone().unwrap_or_default(),
            price_range: self.price_range.clone().unwrap_or_default(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Case-insensitive text matched against title, description, instructor and tags
    #[arg(long)]
    pub(crate) search: Option<String>,
    #[arg(long)]
    pub(crate) level: Option<String>,
    #[arg(long)]
    pub(crate) difficulty: Option<String>,
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Price range, e.g. "0-500" or "700+"
    #[arg(long)]
    pub(crate) price_range: Option<String>,
    /// Course catalog file (.json or .csv). Defaults to the sample catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

impl ListArgs {
    fn filter(&self) -> CourseFilter {
        CourseFilter {
            search: self.search.clone().unwrap_or_default(),
            level: self.level.clone().unwrap_or_default(),
            difficulty: self.difficulty.clone().unwrap_or_default(),
            department: self.department.clone().unwrap_or_default(),
            price_range: self.price_range.clone().unwrap_or_default(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Identity the scripted journey runs as
    #[arg(long, default_value = "demo-learner")]
    pub(crate) user_id: String,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            user_id: "demo-learner".to_string(),
        }
    }
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let answers = args.answers();
    let matcher = CourseMatcher::default();

    let recommended = matcher.recommend(&answers, catalog.courses());
    render_recommendations(&recommended);

    if args.show_scores {
        println!("\nAll course scores");
        for candidate in matcher.rank(&answers, catalog.courses()) {
            println!(
                "  - [{}] {}: {}",
                candidate.course.course_id, candidate.course.title, candidate.score
            );
        }
    }
    Ok(())
}

pub(crate) fn run_course_list(args: ListArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let courses = catalog.search(&args.filter());

    println!("{} of {} courses", courses.len(), catalog.len());
    for course in courses {
        println!(
            "- [{}] {} | {} | {} / {} | {:.2} {} | {} h/week",
            course.course_id,
            course.title,
            course.department,
            course.level,
            course.difficulty,
            course.price.amount,
            course.price.currency,
            course.hours_per_week
        );
    }
    Ok(())
}

fn render_recommendations(recommended: &[CourseMatch<'_>]) {
    if recommended.is_empty() {
        println!("No courses reached the minimum match score.");
        return;
    }

    println!("Top course matches");
    for (rank, candidate) in recommended.iter().enumerate() {
        println!(
            "{}. [{}] {} (score {})",
            rank + 1,
            candidate.course.course_id,
            candidate.course.title,
            candidate.score
        );
        for detail in candidate.match_details() {
            println!("     - {detail}");
        }
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(MemoryProfileStore::in_memory());
    let service = ProfileService::new(store.clone());
    let user_id = UserId::from(args.user_id.as_str());

    println!("Learner profile journey for {user_id}");
    let profile = match run_journey(&service, &user_id) {
        Ok(profile) => profile,
        Err(err) => {
            println!("  Journey stopped: {err}");
            return Ok(());
        }
    };

    let catalog = CourseCatalog::sample();
    let answers = QuizAnswers {
        interests: profile.document.personal_info.interests.clone(),
        level: "Beginner".to_string(),
        ..QuizAnswers::default()
    };
    println!();
    render_recommendations(&CourseMatcher::default().recommend(&answers, catalog.courses()));

    store.disconnect()?;
    Ok(())
}

/// The scripted journey: onboarding, progress, wellbeing and social steps, printing a
/// summary after each write.
pub(crate) fn run_journey<R: ProfileRepository + 'static>(
    service: &ProfileService<R>,
    user_id: &UserId,
) -> Result<UserProfile, ProfileServiceError> {
    let profile = service.get_or_create_profile(user_id)?;
    summarize("created default profile", &profile);

    let profile = service.patch_section(
        user_id,
        "personalInfo",
        json!({
            "name": "Demo Learner",
            "bio": "Exploring AI one week at a time",
            "interests": ["AI", "Psychology"]
        }),
    )?;
    summarize("filled in personal info", &profile);

    let profile = service.add_xp(user_id, XpInput::new(500))?;
    summarize("earned 500 XP", &profile);

    service.adjust_streak(user_id, StreakInput::default())?;
    let profile = service.adjust_streak(user_id, StreakInput::default())?;
    summarize("kept a two day streak", &profile);

    let profile = service.complete_challenge(
        user_id,
        ChallengeInput {
            challenge_id: "daily-reflection".to_string(),
            rating: Some(4),
        },
    )?;
    summarize("completed a challenge", &profile);

    let profile = service.add_badge(
        user_id,
        BadgeInput {
            name: "First Steps".to_string(),
            description: "Finished the first week".to_string(),
            icon: "star".to_string(),
        },
    )?;
    summarize("earned a badge", &profile);

    service.append_mood(
        user_id,
        MoodInput {
            mood: "good".to_string(),
            notes: Some("Productive study session".to_string()),
        },
    )?;
    let profile = service.add_mindfulness_minutes(
        user_id,
        MindfulnessInput {
            minutes: Some(json!(15)),
            date: None,
        },
    )?;
    summarize("logged mood and mindfulness", &profile);

    let recent = service.list_moods(
        user_id,
        MoodRange {
            from: Some(Utc::now() - Duration::days(7)),
            to: None,
        },
    )?;
    println!("  - {} mood entries in the last 7 days", recent.len());

    service.join_study_group(
        user_id,
        GroupInput {
            group_id: "ml-reading-circle".to_string(),
        },
    )?;
    let profile = service.add_mentor(
        user_id,
        MentorInput {
            mentor_id: "mentor-ada".to_string(),
        },
    )?;
    summarize("joined a study group and found a mentor", &profile);

    let profile = service.update_theme(
        user_id,
        ThemeInput {
            theme: "dark".to_string(),
        },
    )?;
    summarize("switched to the dark theme", &profile);

    Ok(profile)
}

fn summarize(step: &str, profile: &UserProfile) {
    let document = &profile.document;
    println!(
        "- {step}: level {} ({} XP) | streak {} | {} badges | {} moods | {} mindful min | {} groups | {} mentors",
        document.progress.level,
        document.progress.experience_points,
        document.progress.streak,
        document.progress.badges_earned.len(),
        document.wellbeing.mood_tracker.len(),
        document.wellbeing.mindfulness_minutes,
        document.social.study_groups.len(),
        document.social.mentors.len()
    );
}
