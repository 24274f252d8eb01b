//! Demo data set for a fresh install.

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::badges::BadgeCatalog;
use crate::gate::GateRules;
use crate::model::{Award, CompanyValue, ExpertAreaTag, NewRecognition, RecognitionType, User};
use crate::store::{create_recognition, AppState};

fn demo_users() -> Vec<User> {
    vec![
        User::new("u_sarah", "Sarah Chen", "Engineering Manager", "Engineering"),
        User::new("u_marcus", "Marcus Johnson", "Senior Engineer", "Engineering"),
        User::new("u_priya", "Priya Patel", "Product Designer", "Design"),
        User::new("u_diego", "Diego Alvarez", "Account Executive", "Sales"),
        User::new("u_emma", "Emma Wilson", "Support Lead", "Customer Success"),
        User::new("u_kenji", "Kenji Tanaka", "Data Scientist", "Analytics"),
    ]
}

/// Six users and a short history of recognitions, all run through the
/// same transaction as live traffic so every counter is consistent.
///
/// Entries the configured rules reject are skipped with a warning.
pub fn demo_state(rules: &GateRules, badges: &BadgeCatalog, now: DateTime<Utc>) -> AppState {
    let mut state = AppState::with_users(demo_users());

    let history: Vec<(i64, NewRecognition)> = vec![
        (
            96,
            NewRecognition::new(
                "u_sarah",
                RecognitionType::StandingOvation,
                vec!["u_marcus".into()],
                CompanyValue::Ownership,
                "Marcus carried the database migration over the weekend with zero downtime.",
            )
            .with_expert_areas(vec![ExpertAreaTag::new("databases", "Databases")])
            .with_impact("Checkout stayed up through the busiest sale of the quarter"),
        ),
        (
            72,
            NewRecognition::new(
                "u_diego",
                RecognitionType::QuickToast,
                vec!["u_emma".into()],
                CompanyValue::CustomerFocus,
                "Thanks for jumping on the escalation call with me.",
            ),
        ),
        (
            50,
            NewRecognition::new(
                "u_marcus",
                RecognitionType::TeamToast,
                vec!["u_priya".into(), "u_kenji".into()],
                CompanyValue::Collaboration,
                "The onboarding redesign shipped because you two paired on every detail.",
            ),
        ),
        (
            30,
            NewRecognition::new(
                "u_emma",
                RecognitionType::MilestoneMoment,
                vec!["u_diego".into()],
                CompanyValue::Excellence,
                "Five years at the company! Thank you for every customer you've won.",
            )
            .with_award(Award {
                id: "five-years".into(),
                name: "Five Year Anniversary".into(),
            }),
        ),
        (
            6,
            NewRecognition::new(
                "u_kenji",
                RecognitionType::QuickToast,
                vec!["u_sarah".into()],
                CompanyValue::Innovation,
                "The forecasting idea you sketched out is now our best model.",
            )
            .with_expert_areas(vec![ExpertAreaTag::new("forecasting", "Forecasting")]),
        ),
    ];

    for (hours_ago, input) in history {
        match create_recognition(&state, &input, rules, badges, now - Duration::hours(hours_ago)) {
            Ok((next, _)) => state = next,
            Err(e) => warn!(
                giver = %input.giver_id,
                kind = ?input.kind,
                reason = %e,
                "Skipping demo recognition"
            ),
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_state_builds() {
        let state = demo_state(&GateRules::default(), &BadgeCatalog::default(), Utc::now());
        assert_eq!(state.users.len(), 6);
        assert_eq!(state.recognitions.len(), 5);
        assert!(state.users.values().any(|u| u.credits > 0));
        assert_eq!(state.user("u_diego").unwrap().earned_awards.len(), 1);
    }

    #[test]
    fn test_restrictive_rules_skip_rejected_entries() {
        let mut rules = GateRules::default();
        rules.limits.daily_standing_ovations = 0;
        rules.limits.daily_quick_toasts = 0;

        let state = demo_state(&rules, &BadgeCatalog::default(), Utc::now());
        assert_eq!(state.users.len(), 6);
        // only the team toast and the milestone get through
        assert_eq!(state.recognitions.len(), 2);
        assert!(state.recognitions.iter().all(|r| matches!(
            r.kind,
            RecognitionType::TeamToast | RecognitionType::MilestoneMoment
        )));
    }
}
