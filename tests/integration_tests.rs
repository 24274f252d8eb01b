//! Integration tests for the recognition core
//!
//! These tests drive the public API end to end: the anti-gaming gate,
//! credit pricing, the recognition transaction, store actions and
//! snapshot persistence through the async manager.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::sync::Arc;
use toastx_core::credits::MonthlyCapPolicy;
use toastx_core::store::{actions, selectors, LeaderboardPeriod, SnapshotStore};
use toastx_core::{
    calculate_credits, can_recognize, check_daily_limit, create_recognition, AntiGamingLimits,
    AppState, Award, BadgeCatalog, CompanyValue, ExpertAreaTag, GateRule, GateRules,
    ManualClock, NewRecognition, RecognitionError, RecognitionManager, RecognitionType,
    ToastConfig, User,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Monday morning, mid-month
fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
}

fn create_test_state() -> AppState {
    AppState::with_users([
        User::new("giver", "Grace Hopper", "Staff Engineer", "Platform"),
        User::new("alice", "Alice Kim", "Engineer", "Platform"),
        User::new("bob", "Bob Stone", "Designer", "Design"),
        User::new("carol", "Carol Diaz", "Analyst", "Finance"),
        User::new("dave", "Dave Okafor", "Engineer", "Platform"),
    ])
}

fn recognition(giver: &str, kind: RecognitionType, to: &[&str]) -> NewRecognition {
    NewRecognition::new(
        giver,
        kind,
        to.iter().map(|s| s.to_string()).collect(),
        CompanyValue::Collaboration,
        "Thank you for the help this week",
    )
}

/// Run one transaction with default rules and return the next state.
fn give(
    state: &AppState,
    input: &NewRecognition,
    at: DateTime<Utc>,
) -> Result<(AppState, toastx_core::RecognitionReceipt), RecognitionError> {
    create_recognition(state, input, &GateRules::default(), &BadgeCatalog::default(), at)
}

// ============================================================================
// Anti-Gaming Gate Tests
// ============================================================================

mod gate_tests {
    use super::*;

    #[test]
    fn test_stale_day_counters_report_full_allowance() {
        let mut user = User::new("u", "Stale User", "Engineer", "Platform");
        user.daily_quick_toasts = 3;
        user.last_recognition_reset = NaiveDate::from_ymd_opt(2024, 6, 9);

        let check = check_daily_limit(
            &user,
            RecognitionType::QuickToast,
            &AntiGamingLimits::default(),
            t0(),
        );
        assert!(check.allowed);
        assert_eq!(check.remaining, Some(3));
    }

    #[test]
    fn test_fourth_quick_toast_rejected() {
        let mut state = create_test_state();
        for (i, to) in ["alice", "bob", "carol"].iter().enumerate() {
            let input = recognition("giver", RecognitionType::QuickToast, &[to]);
            state = give(&state, &input, t0() + Duration::minutes(i as i64)).unwrap().0;
        }

        let input = recognition("giver", RecognitionType::QuickToast, &["dave"]);
        let err = give(&state, &input, t0() + Duration::hours(1)).unwrap_err();
        let check = err.check().unwrap();
        assert!(!check.allowed);
        assert_eq!(check.rule, Some(GateRule::DailyLimit));
        assert_eq!(check.remaining, Some(0));
        assert_eq!(
            err.to_string(),
            "You've reached your daily limit of 3 Quick Toasts"
        );

        // next calendar day the allowance is back
        let tomorrow = Utc.with_ymd_and_hms(2024, 6, 11, 0, 30, 0).unwrap();
        assert!(give(&state, &input, tomorrow).is_ok());
    }

    #[test]
    fn test_second_standing_ovation_rejected() {
        let state = create_test_state();
        let first = recognition("giver", RecognitionType::StandingOvation, &["alice"]);
        let (state, _) = give(&state, &first, t0()).unwrap();

        let second = recognition("giver", RecognitionType::StandingOvation, &["bob"]);
        let err = give(&state, &second, t0() + Duration::hours(2)).unwrap_err();
        assert_eq!(err.check().unwrap().rule, Some(GateRule::DailyLimit));
        assert_eq!(err.check().unwrap().remaining, Some(0));
    }

    #[test]
    fn test_team_toasts_are_not_daily_limited() {
        let mut state = create_test_state();
        let pairs = [["alice", "bob"], ["carol", "dave"]];
        for (i, pair) in pairs.iter().enumerate() {
            let input = recognition("giver", RecognitionType::TeamToast, pair);
            state = give(&state, &input, t0() + Duration::minutes(i as i64)).unwrap().0;
        }
        assert_eq!(state.user("giver").unwrap().recognitions_given, 2);
    }

    #[test]
    fn test_cooldown_boundary() {
        let state = create_test_state();
        let input = recognition("giver", RecognitionType::QuickToast, &["alice"]);
        let (state, _) = give(&state, &input, t0()).unwrap();
        let giver = state.user("giver").unwrap();
        let limits = AntiGamingLimits::default();

        let early = can_recognize(
            giver,
            "alice",
            RecognitionType::QuickToast,
            &limits,
            t0() + Duration::hours(23),
        );
        assert!(!early.allowed);
        assert_eq!(early.rule, Some(GateRule::Cooldown));
        assert_eq!(early.cooldown_ends_at, Some(t0() + Duration::hours(24)));
        assert!(early.reason.unwrap().contains("1 hour"));

        let on_time = can_recognize(
            giver,
            "alice",
            RecognitionType::QuickToast,
            &limits,
            t0() + Duration::hours(24),
        );
        assert!(on_time.allowed);
    }

    #[test]
    fn test_recipient_shape_errors() {
        let state = create_test_state();
        let cases: Vec<(NewRecognition, &str)> = vec![
            (
                recognition("giver", RecognitionType::QuickToast, &[]),
                "Please select at least one recipient",
            ),
            (
                recognition("giver", RecognitionType::QuickToast, &["giver"]),
                "You cannot recognize yourself",
            ),
            (
                recognition("giver", RecognitionType::TeamToast, &["alice", "alice"]),
                "Each recipient can only be selected once",
            ),
            (
                recognition("giver", RecognitionType::TeamToast, &["alice"]),
                "A Team Toast needs at least 2 recipients",
            ),
        ];

        for (input, reason) in cases {
            let err = give(&state, &input, t0()).unwrap_err();
            assert!(matches!(err, RecognitionError::InvalidInput(_)));
            assert_eq!(err.to_string(), reason);
        }
    }
}

// ============================================================================
// Credit Calculation Tests
// ============================================================================

mod credit_tests {
    use super::*;

    #[test]
    fn test_quick_toast_with_two_expert_areas() {
        let breakdown = calculate_credits(RecognitionType::QuickToast, 2, false, false);
        assert_eq!(breakdown.recipient_total, 25);
        assert_eq!(breakdown.giver_total, 2);
    }

    #[test]
    fn test_standing_ovation_with_award() {
        let breakdown = calculate_credits(RecognitionType::StandingOvation, 0, true, false);
        assert_eq!(breakdown.recipient_total, 75);
        assert_eq!(breakdown.giver_total, 5);
    }

    #[test]
    fn test_reciprocal_discount_floors() {
        // 5 * 50 / 100 = 2.5 -> 2
        let breakdown = calculate_credits(RecognitionType::QuickToast, 0, false, true);
        assert_eq!(breakdown.recipient_total, 2);
        // 15 + 10 = 25 -> 12
        let breakdown = calculate_credits(RecognitionType::TeamToast, 1, false, true);
        assert_eq!(breakdown.recipient_total, 12);
    }

    #[test]
    fn test_return_recognition_is_discounted_inside_window() {
        let state = create_test_state();
        let forward = recognition("alice", RecognitionType::QuickToast, &["bob"]);
        let (state, _) = give(&state, &forward, t0()).unwrap();

        let back = recognition("bob", RecognitionType::QuickToast, &["alice"]);
        let (_, receipt) = give(&state, &back, t0() + Duration::hours(25)).unwrap();
        assert!(receipt.recipients[0].reciprocal);
        assert_eq!(receipt.recipients[0].granted, 2);

        let (_, receipt) = give(&state, &back, t0() + Duration::hours(49)).unwrap();
        assert!(!receipt.recipients[0].reciprocal);
        assert_eq!(receipt.recipients[0].granted, 5);
    }

    #[test]
    fn test_team_toast_pays_giver_per_member() {
        let state = create_test_state();
        let input = recognition("giver", RecognitionType::TeamToast, &["alice", "bob", "carol"]);
        let (state, receipt) = give(&state, &input, t0()).unwrap();

        assert_eq!(receipt.giver_credits, 9);
        assert_eq!(receipt.total_recipient_credits(), 45);
        assert_eq!(state.user("giver").unwrap().credits, 9);
        assert_eq!(state.user("bob").unwrap().credits, 15);
    }

    #[test]
    fn test_monthly_cap_clamps_then_rejects() {
        let rules = GateRules {
            monthly_cap: MonthlyCapPolicy {
                max_credits_per_giver: 30,
            },
            ..GateRules::default()
        };
        let catalog = BadgeCatalog::default();
        let input = recognition("giver", RecognitionType::StandingOvation, &["alice"]);

        let (state, first) =
            create_recognition(&create_test_state(), &input, &rules, &catalog, t0()).unwrap();
        assert_eq!(first.recipients[0].granted, 25);

        let day2 = t0() + Duration::days(1);
        let (state, second) = create_recognition(&state, &input, &rules, &catalog, day2).unwrap();
        assert_eq!(second.recipients[0].granted, 5);
        assert!(second.recipients[0].capped);
        assert_eq!(state.user("alice").unwrap().credits, 30);

        let day3 = t0() + Duration::days(2);
        let err = create_recognition(&state, &input, &rules, &catalog, day3).unwrap_err();
        assert_eq!(err.check().unwrap().rule, Some(GateRule::MonthlyCap));

        // a new month resets the ledger
        let next_month = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
        assert!(create_recognition(&state, &input, &rules, &catalog, next_month).is_ok());
    }
}

// ============================================================================
// Recognition Transaction Tests
// ============================================================================

mod transaction_tests {
    use super::*;

    #[test]
    fn test_all_steps_applied() {
        let state = create_test_state();
        let input = recognition("giver", RecognitionType::QuickToast, &["alice"])
            .with_expert_areas(vec![
                ExpertAreaTag::new("rust", "Rust"),
                ExpertAreaTag::new("infra", "Infrastructure"),
            ]);
        let (next, receipt) = give(&state, &input, t0()).unwrap();

        let giver = next.user("giver").unwrap();
        assert_eq!(giver.recognitions_given, 1);
        assert_eq!(giver.daily_quick_toasts, 1);
        assert_eq!(giver.credits, 2);
        assert_eq!(giver.recent_recipient("alice").unwrap().last_recognized_at, t0());

        let alice = next.user("alice").unwrap();
        assert_eq!(alice.recognitions_received, 1);
        assert_eq!(alice.credits, 25);
        assert_eq!(alice.credits_this_month, 25);
        assert_eq!(alice.value_count(CompanyValue::Collaboration), 1);
        assert_eq!(alice.expert_areas.len(), 2);
        assert!(alice.expert_areas.iter().all(|a| a.score == 10));

        let rec = next.recognition(&receipt.recognition_id).unwrap();
        assert_eq!(rec.reactions.len(), 0);
        assert_eq!(rec.reposts, 0);
        assert_eq!(rec.recipients[0].name, "Alice Kim");

        assert!(receipt
            .badges_earned
            .iter()
            .any(|(user, badge)| user == "giver" && badge == "first-toast"));
        assert_eq!(selectors::unread_count(&next, "alice"), 1);
    }

    #[test]
    fn test_rejection_is_all_or_nothing() {
        let state = create_test_state();
        let first = recognition("giver", RecognitionType::QuickToast, &["bob"]);
        let (state, _) = give(&state, &first, t0()).unwrap();

        // bob is still in cooldown, so nobody in the team gets anything
        let team = recognition("giver", RecognitionType::TeamToast, &["alice", "bob"]);
        let err = give(&state, &team, t0() + Duration::hours(2)).unwrap_err();
        assert!(matches!(err, RecognitionError::Rejected(_)));
        assert_eq!(err.check().unwrap().rule, Some(GateRule::Cooldown));

        assert_eq!(state.user("alice").unwrap().credits, 0);
        assert_eq!(state.recognitions.len(), 1);
    }

    #[test]
    fn test_unknown_users() {
        let state = create_test_state();
        let input = recognition("ghost", RecognitionType::QuickToast, &["alice"]);
        assert!(matches!(
            give(&state, &input, t0()),
            Err(RecognitionError::UserNotFound(_))
        ));

        let input = recognition("giver", RecognitionType::QuickToast, &["ghost"]);
        let err = give(&state, &input, t0()).unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn test_milestone_award_reaches_recipient() {
        let state = create_test_state();
        let input = recognition("giver", RecognitionType::MilestoneMoment, &["carol"])
            .with_award(Award {
                id: "launch".into(),
                name: "Launch Hero".into(),
            });
        let (next, receipt) = give(&state, &input, t0()).unwrap();
        assert_eq!(receipt.total_recipient_credits(), 50);
        assert_eq!(receipt.giver_credits, 0);
        assert_eq!(next.user("carol").unwrap().earned_awards[0].award_id, "launch");
    }

    #[test]
    fn test_chain_tracks_depth() {
        let state = create_test_state();
        let root = recognition("giver", RecognitionType::QuickToast, &["alice"]);
        let (state, first) = give(&state, &root, t0()).unwrap();

        let passed = recognition("alice", RecognitionType::QuickToast, &["bob"])
            .chained_to(&first.recognition_id);
        let (state, second) = give(&state, &passed, t0() + Duration::hours(1)).unwrap();

        assert_eq!(state.recognition(&second.recognition_id).unwrap().chain_depth, 1);
        assert_eq!(selectors::chain_of(&state, &second.recognition_id).len(), 2);

        let orphan = recognition("bob", RecognitionType::QuickToast, &["carol"])
            .chained_to("rec_missing");
        let err = give(&state, &orphan, t0() + Duration::hours(2)).unwrap_err();
        assert_eq!(err.check().unwrap().rule, Some(GateRule::ChainParent));
    }
}

// ============================================================================
// Store Action Tests
// ============================================================================

mod action_tests {
    use super::*;

    #[test]
    fn test_social_actions_on_created_recognition() {
        let state = create_test_state();
        let input = recognition("giver", RecognitionType::QuickToast, &["alice"]);
        let (mut state, receipt) = give(&state, &input, t0()).unwrap();
        let id = receipt.recognition_id;

        assert!(actions::toggle_reaction(&mut state, &id, "bob", "🎉", t0()).unwrap());
        actions::add_comment(&mut state, &id, "carol", "Well deserved!", t0()).unwrap();
        actions::record_repost(&mut state, &id, "dave", t0()).unwrap();
        assert!(actions::toggle_bookmark(&mut state, &id, "dave").unwrap());

        let rec = state.recognition(&id).unwrap();
        assert_eq!(rec.reactions.len(), 1);
        assert_eq!(rec.comments.len(), 1);
        assert_eq!(rec.reposts, 1);
        assert_eq!(rec.bookmarks(), 1);

        // reaction + comment
        let giver_notes = selectors::notifications_for(&state, "giver")
            .into_iter()
            .filter(|n| n.recognition_id.as_deref() == Some(id.as_str()))
            .count();
        assert_eq!(giver_notes, 2);
    }

    #[test]
    fn test_leaderboard_after_transactions() {
        let state = create_test_state();
        let ovation = recognition("giver", RecognitionType::StandingOvation, &["bob"]);
        let (state, _) = give(&state, &ovation, t0()).unwrap();
        let quick = recognition("giver", RecognitionType::QuickToast, &["alice"]);
        let (state, _) = give(&state, &quick, t0() + Duration::minutes(5)).unwrap();

        let board = selectors::leaderboard(&state, LeaderboardPeriod::AllTime, t0(), 3);
        assert_eq!(board[0].user_id, "bob");
        assert_eq!(board[0].credits, 25);
        assert_eq!(board[1].user_id, "giver");
        assert_eq!(board[1].credits, 7);
    }
}

// ============================================================================
// Manager & Persistence Tests
// ============================================================================

mod manager_tests {
    use super::*;

    #[tokio::test]
    async fn test_snapshot_round_trip_through_manager() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(SnapshotStore::new(dir.path().join("state.json")));
        let clock = Arc::new(ManualClock::new(t0()));

        let manager = RecognitionManager::default()
            .with_clock(clock.clone())
            .with_snapshot_store(store.clone());
        manager.load().await.unwrap();
        for user in create_test_state().users.into_values() {
            manager.upsert_user(user).await;
        }
        let receipt = manager
            .create_recognition(recognition("giver", RecognitionType::QuickToast, &["alice"]))
            .await
            .unwrap();
        manager
            .toggle_reaction(&receipt.recognition_id, "bob", "👏")
            .await
            .unwrap();

        let restored = RecognitionManager::default()
            .with_clock(clock)
            .with_snapshot_store(store);
        assert_eq!(restored.load().await.unwrap(), 5);
        assert_eq!(restored.snapshot().await, manager.snapshot().await);
    }

    #[tokio::test]
    async fn test_manager_rejection_keeps_state() {
        let clock = Arc::new(ManualClock::new(t0()));
        let manager = RecognitionManager::default()
            .with_clock(clock.clone())
            .with_state(create_test_state());

        manager
            .create_recognition(recognition("giver", RecognitionType::QuickToast, &["alice"]))
            .await
            .unwrap();
        let before = manager.snapshot().await;

        clock.advance(Duration::hours(23));
        let err = manager
            .create_recognition(recognition("giver", RecognitionType::QuickToast, &["alice"]))
            .await
            .unwrap_err();
        assert_eq!(
            err.check().unwrap().cooldown_ends_at,
            Some(t0() + Duration::hours(24))
        );
        assert_eq!(manager.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let manager = RecognitionManager::default().with_clock(Arc::new(ManualClock::new(t0())));
        assert!(manager.seed_if_empty().await);
        assert!(!manager.seed_if_empty().await);
        assert_eq!(manager.feed(10).await.len(), 5);
    }

    #[tokio::test]
    async fn test_seed_under_restrictive_config() {
        let mut config = ToastConfig::default();
        config.limits.daily_standing_ovations = 0;
        assert!(config.validate().is_ok());

        let manager = RecognitionManager::new(config.to_rules())
            .with_clock(Arc::new(ManualClock::new(t0())));
        assert!(manager.seed_if_empty().await);
        // the one standing ovation in the demo set is skipped
        assert_eq!(manager.feed(10).await.len(), 4);
    }
}
