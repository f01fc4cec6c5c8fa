use super::common::*;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;

use crate::profiles::domain::{Mood, NotificationSettings, Theme, UserId};
use crate::profiles::repository::{ProfileRepository, RepositoryError};
use crate::profiles::requests::{
    BadgeInput, ChallengeInput, GroupInput, MentorInput, MindfulnessInput, MoodInput, MoodRange,
    SpeakingTaskInput, StreakInput, ThemeInput, XpInput,
};
use crate::profiles::{ProfileService, ProfileServiceError};

fn mood(value: &str) -> MoodInput {
    MoodInput {
        mood: value.to_string(),
        notes: None,
    }
}

fn group(id: &str) -> GroupInput {
    GroupInput {
        group_id: id.to_string(),
    }
}

#[test]
fn get_or_create_is_side_effect_free_after_first_call() {
    let (service, store) = build_service();

    let first = service.get_or_create_profile(&learner()).expect("created");
    let second = service.get_or_create_profile(&learner()).expect("fetched");

    assert_eq!(first, second);
    assert_eq!(store.len(), 1);
    assert_eq!(first.document.progress.level, 1);
    assert_eq!(first.document.settings.language, "en");
}

#[test]
fn get_or_create_recovers_from_racing_creator() {
    let repository = Arc::new(RacingRepository::with_existing(&learner()));
    let service = ProfileService::new(repository);

    let profile = service
        .get_or_create_profile(&learner())
        .expect("existing profile returned");
    assert_eq!(profile.user_id, learner());
}

#[test]
fn create_profile_rejects_second_creation() {
    let (service, _) = build_service();

    let created = service
        .create_profile(&learner(), sample_document())
        .expect("first create succeeds");
    assert_eq!(created.document.personal_info.name, "Mina Okafor");
    assert_eq!(created.document.progress.level, 4);

    match service.create_profile(&learner(), sample_document()) {
        Err(ProfileServiceError::Conflict) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn create_profile_maps_store_conflict_from_race() {
    let repository = Arc::new(RacingRepository::with_existing(&learner()));
    let service = ProfileService::new(repository);

    assert!(matches!(
        service.create_profile(&learner(), sample_document()),
        Err(ProfileServiceError::Conflict)
    ));
}

#[test]
fn create_profile_rejects_out_of_range_stress() {
    let (service, store) = build_service();
    let mut document = sample_document();
    document.wellbeing.stress_level = 11;

    assert!(matches!(
        service.create_profile(&learner(), document),
        Err(ProfileServiceError::InvalidArgument(_))
    ));
    assert!(store.is_empty());
}

#[test]
fn replace_then_fetch_returns_equal_document() {
    let (service, _) = build_service();

    let replaced = service
        .replace_profile(&learner(), sample_document())
        .expect("replace upserts");
    let fetched = service.get_or_create_profile(&learner()).expect("fetch");

    assert_eq!(replaced, fetched);
    assert_eq!(fetched.document.personal_info.interests, vec!["AI", "Design"]);
}

#[test]
fn patch_section_with_unknown_name_leaves_document_unchanged() {
    let (service, store) = seeded_service();
    let before = store.fetch(&learner()).expect("fetch").expect("present");

    match service.patch_section(&learner(), "bogus", json!({ "name": "x" })) {
        Err(ProfileServiceError::InvalidArgument(message)) => {
            assert_eq!(message, "invalid section")
        }
        other => panic!("expected invalid argument, got {other:?}"),
    }

    let after = store.fetch(&learner()).expect("fetch").expect("present");
    assert_eq!(before, after);
}

#[test]
fn patch_section_replaces_only_that_section() {
    let (service, _) = build_service();
    service
        .replace_profile(&learner(), sample_document())
        .expect("seed");

    let patched = service
        .patch_section(
            &learner(),
            "personalInfo",
            json!({ "name": "Mina O.", "location": "Lagos" }),
        )
        .expect("patch succeeds");

    assert_eq!(patched.document.personal_info.name, "Mina O.");
    assert_eq!(patched.document.personal_info.location, "Lagos");
    assert!(patched.document.personal_info.interests.is_empty());
    assert_eq!(patched.document.progress.experience_points, 900);
    assert_eq!(patched.document.social.study_groups, vec!["ml-reading-circle"]);
}

#[test]
fn patch_progress_recomputes_level() {
    let (service, _) = build_service();

    let patched = service
        .patch_section(
            &learner(),
            "progress",
            json!({ "experiencePoints": 1600, "level": 1, "streak": 2 }),
        )
        .expect("patch upserts");

    assert_eq!(patched.document.progress.level, 5);
    assert_eq!(patched.document.progress.streak, 2);
}

#[test]
fn patch_section_rejects_undecodable_body() {
    let (service, _) = seeded_service();

    assert!(matches!(
        service.patch_section(&learner(), "wellbeing", json!({ "stressLevel": "calm" })),
        Err(ProfileServiceError::InvalidArgument(_))
    ));
    assert!(matches!(
        service.patch_section(&learner(), "wellbeing", json!({ "stressLevel": 0 })),
        Err(ProfileServiceError::InvalidArgument(_))
    ));
}

#[test]
fn add_xp_sets_total_and_level_together() {
    let (service, _) = seeded_service();

    let profile = service
        .add_xp(&learner(), XpInput::new(500))
        .expect("xp applied");
    assert_eq!(profile.document.progress.experience_points, 500);
    assert_eq!(profile.document.progress.level, 3);

    let profile = service
        .add_xp(&learner(), XpInput::new(-800))
        .expect("negative delta applied");
    assert_eq!(profile.document.progress.experience_points, -300);
    assert_eq!(profile.document.progress.level, 1);
}

#[test]
fn add_xp_property_holds_over_many_deltas() {
    let (service, _) = seeded_service();
    let mut expected = 0_i64;

    for delta in [0, 99, 1, 250, -50, 1200, 7, -2000, 10_000] {
        expected += delta;
        let profile = service
            .add_xp(&learner(), XpInput::new(delta))
            .expect("xp applied");
        let progress = &profile.document.progress;
        assert_eq!(progress.experience_points, expected);

        let curve = if expected <= 0 {
            1
        } else {
            ((expected as f64 / 100.0).sqrt().floor() as i64 + 1).max(1)
        };
        assert_eq!(progress.level, curve, "level for {expected} xp");
    }
}

#[test]
fn concurrent_xp_deltas_are_both_applied() {
    let repository = Arc::new(LockstepFetchRepository::seeded(&learner(), 2));
    let service = ProfileService::new(repository.clone());

    std::thread::scope(|scope| {
        for _ in 0..2 {
            scope.spawn(|| {
                service
                    .add_xp(&learner(), XpInput::new(100))
                    .expect("xp added")
            });
        }
    });

    let profile = repository
        .inner
        .fetch(&learner())
        .expect("fetch")
        .expect("profile exists");
    assert_eq!(profile.document.progress.experience_points, 200);
    assert_eq!(profile.document.progress.level, 2);
}

#[test]
fn xp_deltas_from_many_threads_sum_exactly() {
    let (service, _) = seeded_service();

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..25 {
                    service
                        .add_xp(&learner(), XpInput::new(10))
                        .expect("xp added");
                }
            });
        }
    });

    let profile = service.get_or_create_profile(&learner()).expect("fetch");
    assert_eq!(profile.document.progress.experience_points, 2000);
    assert_eq!(profile.document.progress.level, 5);
}

#[test]
fn add_xp_requires_profile_and_numeric_input() {
    let (service, _) = build_service();

    assert!(matches!(
        service.add_xp(&learner(), XpInput::new(10)),
        Err(ProfileServiceError::NotFound)
    ));
    assert!(matches!(
        service.add_xp(
            &learner(),
            XpInput {
                xp: Some(json!("many"))
            }
        ),
        Err(ProfileServiceError::InvalidArgument(_))
    ));
}

#[test]
fn adjust_streak_never_goes_negative() {
    let (service, _) = seeded_service();

    let profile = service
        .adjust_streak(&learner(), StreakInput { increase: false })
        .expect("decrement applied");
    assert_eq!(profile.document.progress.streak, 0);

    service
        .adjust_streak(&learner(), StreakInput::default())
        .expect("increment");
    let profile = service
        .adjust_streak(&learner(), StreakInput::default())
        .expect("increment");
    assert_eq!(profile.document.progress.streak, 2);

    let profile = service
        .adjust_streak(&learner(), StreakInput { increase: false })
        .expect("decrement");
    assert_eq!(profile.document.progress.streak, 1);
}

#[test]
fn adjust_streak_upserts_missing_profile() {
    let (service, store) = build_service();

    let profile = service
        .adjust_streak(&learner(), StreakInput::default())
        .expect("upserted");
    assert_eq!(profile.document.progress.streak, 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn reset_streak_requires_existing_profile() {
    let (service, store) = build_service();
    assert!(matches!(
        service.reset_streak(&learner()),
        Err(ProfileServiceError::NotFound)
    ));
    assert!(store.is_empty());

    service
        .adjust_streak(&learner(), StreakInput::default())
        .expect("increment");
    let profile = service.reset_streak(&learner()).expect("reset");
    assert_eq!(profile.document.progress.streak, 0);
}

#[test]
fn mood_entries_are_appended_and_removed_by_id() {
    let (service, _) = build_service();

    let profile = service
        .append_mood(&learner(), mood("good"))
        .expect("mood appended");
    let profile_after_second = service
        .append_mood(
            &learner(),
            MoodInput {
                mood: "Stressed".to_string(),
                notes: Some("deadline".to_string()),
            },
        )
        .expect("mood appended");

    let entries = &profile_after_second.document.wellbeing.mood_tracker;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].mood, Mood::Stressed);
    assert_ne!(entries[0].id, entries[1].id);

    let first_id = profile.document.wellbeing.mood_tracker[0].id.clone();
    let remaining = service
        .delete_mood(&learner(), &first_id.0)
        .expect("delete succeeds");
    assert_eq!(remaining.document.wellbeing.mood_tracker.len(), 1);
    assert_eq!(remaining.document.wellbeing.mood_tracker[0].mood, Mood::Stressed);
}

#[test]
fn delete_mood_with_unknown_id_returns_unmodified_profile() {
    let (service, _) = build_service();
    let before = service
        .append_mood(&learner(), mood("neutral"))
        .expect("mood appended");

    let after = service
        .delete_mood(&learner(), "no-such-entry")
        .expect("silent no-op");
    assert_eq!(before.document, after.document);
}

#[test]
fn delete_mood_requires_profile() {
    let (service, _) = build_service();
    assert!(matches!(
        service.delete_mood(&learner(), "anything"),
        Err(ProfileServiceError::NotFound)
    ));
}

#[test]
fn append_mood_rejects_unknown_values() {
    let (service, store) = build_service();
    assert!(matches!(
        service.append_mood(&learner(), mood("ecstatic")),
        Err(ProfileServiceError::InvalidArgument(_))
    ));
    assert!(matches!(
        service.append_mood(&learner(), mood("")),
        Err(ProfileServiceError::InvalidArgument(_))
    ));
    assert!(store.is_empty());
}

#[test]
fn list_moods_filters_by_inclusive_range() {
    let (service, _) = build_service();
    for value in ["good", "neutral", "excellent"] {
        service
            .append_mood(&learner(), mood(value))
            .expect("mood appended");
    }

    let all = service
        .list_moods(&learner(), MoodRange::default())
        .expect("listed");
    assert_eq!(all.len(), 3);

    let window = MoodRange {
        from: Some(all[0].date),
        to: Some(all[1].date),
    };
    let windowed = service.list_moods(&learner(), window).expect("listed");
    assert!(windowed.len() >= 2);
    assert!(windowed.iter().all(|entry| entry.date <= all[1].date));

    let future = MoodRange {
        from: Some(Utc::now() + Duration::days(1)),
        to: None,
    };
    assert!(service
        .list_moods(&learner(), future)
        .expect("listed")
        .is_empty());
}

#[test]
fn list_moods_requires_profile() {
    let (service, _) = build_service();
    assert!(matches!(
        service.list_moods(&learner(), MoodRange::default()),
        Err(ProfileServiceError::NotFound)
    ));
}

#[test]
fn mindfulness_minutes_accumulate() {
    let (service, _) = build_service();

    service
        .add_mindfulness_minutes(
            &learner(),
            MindfulnessInput {
                minutes: Some(json!(10)),
                date: None,
            },
        )
        .expect("first session");
    let profile = service
        .add_mindfulness_minutes(
            &learner(),
            MindfulnessInput {
                minutes: Some(json!(25)),
                date: None,
            },
        )
        .expect("second session");

    assert_eq!(profile.document.wellbeing.mindfulness_minutes, 35);
    assert_eq!(profile.document.wellbeing.mindfulness_sessions.len(), 2);
    assert_eq!(profile.document.wellbeing.mindfulness_sessions[1].duration, 25);

    assert!(matches!(
        service.add_mindfulness_minutes(&learner(), MindfulnessInput::default()),
        Err(ProfileServiceError::InvalidArgument(_))
    ));
}

#[test]
fn badges_and_challenges_are_appended() {
    let (service, _) = build_service();

    let profile = service
        .add_badge(
            &learner(),
            BadgeInput {
                name: "First Steps".to_string(),
                description: "Completed onboarding".to_string(),
                icon: "🚀".to_string(),
            },
        )
        .expect("badge added");
    assert_eq!(profile.document.progress.badges_earned[0].name, "First Steps");

    let profile = service
        .complete_challenge(
            &learner(),
            ChallengeInput {
                challenge_id: "daily-reflection".to_string(),
                rating: None,
            },
        )
        .expect("challenge completed");
    let challenge = &profile.document.progress.completed_challenges[0];
    assert_eq!(challenge.challenge_id, "daily-reflection");
    assert_eq!(challenge.rating, 5);

    assert!(matches!(
        service.add_badge(&learner(), BadgeInput::default()),
        Err(ProfileServiceError::InvalidArgument(_))
    ));
    assert!(matches!(
        service.complete_challenge(
            &learner(),
            ChallengeInput {
                challenge_id: "daily-reflection".to_string(),
                rating: Some(0),
            }
        ),
        Err(ProfileServiceError::InvalidArgument(_))
    ));
}

#[test]
fn speaking_tasks_default_and_list() {
    let (service, _) = build_service();

    assert!(matches!(
        service.list_speaking_tasks(&learner()),
        Err(ProfileServiceError::NotFound)
    ));

    service
        .add_speaking_task(
            &learner(),
            SpeakingTaskInput {
                title: "Lightning talk".to_string(),
                ..SpeakingTaskInput::default()
            },
        )
        .expect("task added");

    let tasks = service.list_speaking_tasks(&learner()).expect("listed");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].duration, 0);
    assert_eq!(tasks[0].confidence, 1);

    assert!(matches!(
        service.add_speaking_task(
            &learner(),
            SpeakingTaskInput {
                title: "Keynote".to_string(),
                confidence: Some(11),
                ..SpeakingTaskInput::default()
            }
        ),
        Err(ProfileServiceError::InvalidArgument(_))
    ));
}

#[test]
fn joining_a_group_twice_keeps_one_entry() {
    let (service, _) = seeded_service();

    let profile = service
        .join_study_group(&learner(), group("rust-learners"))
        .expect("first join");
    assert_eq!(profile.document.social.study_groups, vec!["rust-learners"]);

    assert!(matches!(
        service.join_study_group(&learner(), group("rust-learners")),
        Err(ProfileServiceError::AlreadyPresent { .. })
    ));

    let profile = service.get_or_create_profile(&learner()).expect("fetch");
    assert_eq!(profile.document.social.study_groups, vec!["rust-learners"]);
}

#[test]
fn joining_without_profile_reports_coarse_signal() {
    let (service, store) = build_service();
    assert!(matches!(
        service.join_study_group(&learner(), group("rust-learners")),
        Err(ProfileServiceError::AlreadyPresent { .. })
    ));
    assert!(matches!(
        service.add_mentor(
            &learner(),
            MentorInput {
                mentor_id: "mentor-9".to_string()
            }
        ),
        Err(ProfileServiceError::AlreadyPresent { .. })
    ));
    assert!(store.is_empty());
}

#[test]
fn empty_group_and_mentor_ids_are_rejected() {
    let (service, _) = seeded_service();
    assert!(matches!(
        service.join_study_group(&learner(), group("  ")),
        Err(ProfileServiceError::InvalidArgument(_))
    ));
    assert!(matches!(
        service.add_mentor(&learner(), MentorInput::default()),
        Err(ProfileServiceError::InvalidArgument(_))
    ));
    assert!(matches!(
        service.leave_study_group(&learner(), group("")),
        Err(ProfileServiceError::InvalidArgument(_))
    ));
}

#[test]
fn leaving_a_group_is_unconditional() {
    let (service, _) = seeded_service();
    service
        .join_study_group(&learner(), group("g1"))
        .expect("joined");

    let profile = service
        .leave_study_group(&learner(), group("never-joined"))
        .expect("absent group is fine");
    assert_eq!(profile.document.social.study_groups, vec!["g1"]);

    let profile = service
        .leave_study_group(&learner(), group("g1"))
        .expect("left");
    assert!(profile.document.social.study_groups.is_empty());

    let stranger = UserId::from("auth0|stranger");
    assert!(matches!(
        service.leave_study_group(&stranger, group("g1")),
        Err(ProfileServiceError::NotFound)
    ));
}

#[test]
fn mentors_are_a_set() {
    let (service, _) = seeded_service();
    let mentor = || MentorInput {
        mentor_id: "mentor-9".to_string(),
    };

    let profile = service.add_mentor(&learner(), mentor()).expect("added");
    assert_eq!(profile.document.social.mentors, vec!["mentor-9"]);
    assert!(service.add_mentor(&learner(), mentor()).is_err());
}

#[test]
fn settings_updates_replace_sub_objects() {
    let (service, _) = build_service();

    let profile = service
        .update_notification_settings(
            &learner(),
            NotificationSettings {
                email: false,
                push: true,
                challenges: false,
                social_updates: true,
            },
        )
        .expect("notifications updated");
    assert!(!profile.document.settings.notifications.email);
    assert!(!profile.document.settings.notifications.challenges);

    let profile = service
        .update_theme(
            &learner(),
            ThemeInput {
                theme: "dark".to_string(),
            },
        )
        .expect("theme updated");
    assert_eq!(profile.document.settings.theme, Theme::Dark);
    assert!(!profile.document.settings.notifications.email);

    assert!(matches!(
        service.update_theme(
            &learner(),
            ThemeInput {
                theme: "sepia".to_string()
            }
        ),
        Err(ProfileServiceError::InvalidArgument(_))
    ));
}

#[test]
fn delete_profile_is_idempotent() {
    let (service, store) = seeded_service();

    service.delete_profile(&learner()).expect("deleted");
    service.delete_profile(&learner()).expect("second delete ok");
    assert!(store.is_empty());
}

#[test]
fn operations_are_scoped_to_the_caller() {
    let (service, _) = build_service();
    let other = UserId::from("auth0|someone-else");

    service
        .add_xp(&learner(), XpInput::new(1))
        .expect_err("no profile yet");
    service.get_or_create_profile(&other).expect("other created");
    service
        .adjust_streak(&other, StreakInput::default())
        .expect("other streak");

    let mine = service.get_or_create_profile(&learner()).expect("mine");
    assert_eq!(mine.document.progress.streak, 0);
}

#[test]
fn repository_failures_surface_as_repository_errors() {
    let service = ProfileService::new(Arc::new(UnavailableRepository));

    match service.get_or_create_profile(&learner()) {
        Err(ProfileServiceError::Repository(RepositoryError::Unavailable(message))) => {
            assert_eq!(message, "database offline")
        }
        other => panic!("expected unavailable, got {other:?}"),
    }
    assert!(matches!(
        service.join_study_group(&learner(), group("g1")),
        Err(ProfileServiceError::Repository(_))
    ));
}
