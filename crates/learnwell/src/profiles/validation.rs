use super::domain::{Progress, ProfileDocument, ProfileSection, Social, Wellbeing};

/// Range violations detected before a section or document reaches the store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileViolation {
    #[error("stressLevel must be between 1 and 10 (found {0})")]
    StressLevel(u8),
    #[error("sleepHours must be a non-negative number (found {0})")]
    SleepHours(f64),
    #[error("challenge rating must be between 1 and 5 (found {0})")]
    ChallengeRating(i64),
    #[error("speaking confidence must be between 1 and 10 (found {0})")]
    SpeakingConfidence(i64),
}

pub const CHALLENGE_RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;
pub const CONFIDENCE_RANGE: std::ops::RangeInclusive<i64> = 1..=10;
const STRESS_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

pub fn check_document(document: &ProfileDocument) -> Result<(), ProfileViolation> {
    check_progress(&document.progress)?;
    check_wellbeing(&document.wellbeing)?;
    check_social(&document.social)
}

pub fn check_section(section: &ProfileSection) -> Result<(), ProfileViolation> {
    match section {
        ProfileSection::Progress(progress) => check_progress(progress),
        ProfileSection::Wellbeing(wellbeing) => check_wellbeing(wellbeing),
        ProfileSection::Social(social) => check_social(social),
        ProfileSection::PersonalInfo(_)
        | ProfileSection::LearningPreferences(_)
        | ProfileSection::Settings(_) => Ok(()),
    }
}

pub fn check_rating(rating: i64) -> Result<u8, ProfileViolation> {
    if CHALLENGE_RATING_RANGE.contains(&rating) {
        Ok(rating as u8)
    } else {
        Err(ProfileViolation::ChallengeRating(rating))
    }
}

pub fn check_confidence(confidence: i64) -> Result<u8, ProfileViolation> {
    if CONFIDENCE_RANGE.contains(&confidence) {
        Ok(confidence as u8)
    } else {
        Err(ProfileViolation::SpeakingConfidence(confidence))
    }
}

fn check_progress(progress: &Progress) -> Result<(), ProfileViolation> {
    for challenge in &progress.completed_challenges {
        check_rating(i64::from(challenge.rating))?;
    }
    Ok(())
}

fn check_wellbeing(wellbeing: &Wellbeing) -> Result<(), ProfileViolation> {
    if !STRESS_RANGE.contains(&wellbeing.stress_level) {
        return Err(ProfileViolation::StressLevel(wellbeing.stress_level));
    }
    if !wellbeing.sleep_hours.is_finite() || wellbeing.sleep_hours < 0.0 {
        return Err(ProfileViolation::SleepHours(wellbeing.sleep_hours));
    }
    Ok(())
}

fn check_social(social: &Social) -> Result<(), ProfileViolation> {
    for task in &social.public_speaking_tasks {
        check_confidence(i64::from(task.confidence))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_is_valid() {
        assert_eq!(check_document(&ProfileDocument::default()), Ok(()));
    }

    #[test]
    fn stress_level_outside_range_is_rejected() {
        let mut document = ProfileDocument::default();
        document.wellbeing.stress_level = 0;
        assert_eq!(
            check_document(&document),
            Err(ProfileViolation::StressLevel(0))
        );

        let section = ProfileSection::Wellbeing(Wellbeing {
            stress_level: 11,
            ..Wellbeing::default()
        });
        assert_eq!(
            check_section(&section),
            Err(ProfileViolation::StressLevel(11))
        );
    }

    #[test]
    fn negative_sleep_is_rejected() {
        let mut document = ProfileDocument::default();
        document.wellbeing.sleep_hours = -1.5;
        assert!(matches!(
            check_document(&document),
            Err(ProfileViolation::SleepHours(_))
        ));
    }

    #[test]
    fn rating_and_confidence_bounds() {
        assert_eq!(check_rating(1), Ok(1));
        assert_eq!(check_rating(5), Ok(5));
        assert_eq!(check_rating(6), Err(ProfileViolation::ChallengeRating(6)));
        assert_eq!(check_confidence(10), Ok(10));
        assert_eq!(
            check_confidence(0),
            Err(ProfileViolation::SpeakingConfidence(0))
        );
    }
}
