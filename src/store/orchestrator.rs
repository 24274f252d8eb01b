//! The recognition-creation transaction.
//!
//! [`create_recognition`] takes the current state by reference and returns
//! the next state. Every rule is evaluated against the input state before
//! anything is copied, so a rejection leaves the caller's state untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::badges::BadgeCatalog;
use crate::credits::{is_reciprocal, CreditBreakdown};
use crate::error::RecognitionError;
use crate::gate::{
    can_recognize_multiple, check_monthly_cap, validate_message, validate_recipient_ids,
    GateCheck, GateRule, GateRules,
};
use crate::model::{
    EarnedAward, EarnedBadge, GiverInfo, NewRecognition, Notification, NotificationKind,
    Priority, Recognition, RecipientInfo, RecognitionType, User,
};
use crate::store::AppState;
use crate::util::new_id;

/// Credits granted to one recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientCredit {
    pub user_id: String,
    pub breakdown: CreditBreakdown,
    /// Amount actually credited after the monthly cap
    pub granted: u32,
    pub capped: bool,
    pub reciprocal: bool,
}

/// What a successful transaction did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionReceipt {
    pub recognition_id: String,
    pub giver_credits: u32,
    pub recipients: Vec<RecipientCredit>,
    /// (user id, badge id) pairs earned by this transaction
    pub badges_earned: Vec<(String, String)>,
}

impl RecognitionReceipt {
    pub fn total_recipient_credits(&self) -> u32 {
        self.recipients.iter().map(|r| r.granted).sum()
    }
}

fn require(
    check: GateCheck,
    as_error: fn(GateCheck) -> RecognitionError,
) -> Result<(), RecognitionError> {
    if check.allowed {
        Ok(())
    } else {
        Err(as_error(check))
    }
}

pub fn create_recognition(
    state: &AppState,
    input: &NewRecognition,
    rules: &GateRules,
    badges: &BadgeCatalog,
    now: DateTime<Utc>,
) -> Result<(AppState, RecognitionReceipt), RecognitionError> {
    // Resolve and validate against the untouched input state.
    let giver = state
        .user(&input.giver_id)
        .ok_or_else(|| RecognitionError::UserNotFound(input.giver_id.clone()))?;

    require(
        validate_recipient_ids(&giver.id, &input.recipient_ids, input.kind),
        RecognitionError::InvalidInput,
    )?;
    require(validate_message(&input.message), RecognitionError::InvalidInput)?;

    let recipients: Vec<&User> = input
        .recipient_ids
        .iter()
        .map(|id| {
            state
                .user(id)
                .ok_or_else(|| RecognitionError::UserNotFound(id.clone()))
        })
        .collect::<Result<_, _>>()?;

    let chain_depth = match &input.chain_parent_id {
        Some(parent_id) => match state.recognition(parent_id) {
            Some(parent) => parent.chain_depth + 1,
            None => {
                return Err(RecognitionError::InvalidInput(
                    GateCheck::deny(
                        GateRule::ChainParent,
                        "The recognition you are passing on no longer exists",
                    )
                    .suggest("Start a new recognition instead"),
                ))
            }
        },
        None => 0,
    };

    require(
        can_recognize_multiple(giver, &input.recipient_ids, input.kind, &rules.limits, now),
        RecognitionError::Rejected,
    )?;
    for recipient in &recipients {
        require(
            check_monthly_cap(recipient, &giver.id, &rules.monthly_cap, now),
            RecognitionError::Rejected,
        )?;
    }

    // Price every recipient before touching anything.
    let priced: Vec<RecipientCredit> = recipients
        .iter()
        .map(|recipient| {
            let reciprocal = is_reciprocal(giver, &recipient.id, &rules.credits, now);
            let breakdown = rules.credits.calculate(
                input.kind,
                input.expert_areas.len(),
                input.award.is_some(),
                reciprocal,
            );
            let outcome = rules.monthly_cap.evaluate(
                recipient.credits_received_from(&giver.id, now),
                breakdown.recipient_total,
            );
            RecipientCredit {
                user_id: recipient.id.clone(),
                granted: outcome.granted,
                capped: outcome.capped,
                reciprocal,
                breakdown,
            }
        })
        .collect();

    let giver_credits = match (input.kind, priced.first()) {
        (_, None) => 0,
        (RecognitionType::TeamToast, Some(first)) => {
            first.breakdown.giver_total * priced.len() as u32
        }
        (_, Some(first)) => first.breakdown.giver_total,
    };

    let recognition = Recognition {
        id: new_id("rec"),
        kind: input.kind,
        giver: GiverInfo::from(giver),
        recipient_ids: input.recipient_ids.clone(),
        recipients: recipients.iter().map(|u| RecipientInfo::from(*u)).collect(),
        value: input.value,
        expert_areas: input.expert_areas.clone(),
        message: input.message.trim().to_string(),
        impact: input.impact.clone(),
        award: input.award.clone(),
        created_at: now,
        updated_at: now,
        reactions: Vec::new(),
        comments: Vec::new(),
        reposts: 0,
        bookmarked_by: Vec::new(),
        visibility: input.visibility,
        notify_managers: input.notify_managers,
        nominated: input.nominated,
        chain_parent_id: input.chain_parent_id.clone(),
        chain_depth,
    };
    let recognition_id = recognition.id.clone();
    let giver_name = giver.name.clone();

    // Gate passed: apply every step to the next state.
    let mut next = state.clone();

    if let Some(giver) = next.user_mut(&input.giver_id) {
        giver.recognitions_given += 1;
        giver.record_daily_use(input.kind, now);
        for credit in &priced {
            giver.note_recipient(&credit.user_id, credit.granted, now);
        }
        giver.add_credits(giver_credits, now);
    }

    for credit in &priced {
        if let Some(recipient) = next.user_mut(&credit.user_id) {
            recipient.recognitions_received += 1;
            *recipient.values_counts.entry(input.value).or_insert(0) += 1;
            recipient.add_credits(credit.granted, now);
            recipient.note_giver(&input.giver_id, credit.granted, now);
            for area in &input.expert_areas {
                recipient.boost_expert_area(area, rules.credits.expert_area_boost);
            }
            if let Some(award) = &input.award {
                recipient.earned_awards.push(EarnedAward {
                    award_id: award.id.clone(),
                    name: award.name.clone(),
                    recognition_id: Some(recognition_id.clone()),
                    granted_at: now,
                });
            }
        }
    }

    next.recognitions.push(recognition);

    let mut badges_earned = Vec::new();
    let mut touched = vec![input.giver_id.clone()];
    touched.extend(input.recipient_ids.iter().cloned());
    for user_id in &touched {
        badges_earned.extend(award_badges(&mut next, user_id, badges, now));
    }

    let priority = match input.kind {
        RecognitionType::StandingOvation => Priority::High,
        _ => Priority::Normal,
    };
    for credit in &priced {
        next.notifications.push(
            Notification::new(
                NotificationKind::Recognized,
                &credit.user_id,
                format!("{} recognized you", giver_name),
                format!(
                    "{} gave you a {} for {} (+{} credits)",
                    giver_name,
                    input.kind.label(),
                    input.value.label(),
                    credit.granted
                ),
                now,
            )
            .for_recognition(&recognition_id)
            .with_priority(priority),
        );
    }

    info!(
        recognition_id = %recognition_id,
        giver = %input.giver_id,
        recipients = priced.len(),
        kind = ?input.kind,
        giver_credits = giver_credits,
        "Recognition created"
    );

    Ok((
        next,
        RecognitionReceipt {
            recognition_id,
            giver_credits,
            recipients: priced,
            badges_earned,
        },
    ))
}

/// Grant every catalog badge `user_id` newly qualifies for and notify them.
pub(crate) fn award_badges(
    state: &mut AppState,
    user_id: &str,
    catalog: &BadgeCatalog,
    now: DateTime<Utc>,
) -> Vec<(String, String)> {
    let Some(user) = state.user_mut(user_id) else {
        return Vec::new();
    };

    let earned: Vec<(String, String)> = catalog
        .newly_earned(user)
        .into_iter()
        .map(|b| (b.id.clone(), b.name.clone()))
        .collect();

    for (badge_id, name) in &earned {
        user.earned_badges.push(EarnedBadge {
            badge_id: badge_id.clone(),
            name: name.clone(),
            earned_at: now,
        });
        info!(user_id = %user_id, badge = %badge_id, "Badge earned");
    }

    for (_, name) in &earned {
        state.notifications.push(Notification::new(
            NotificationKind::BadgeEarned,
            user_id,
            "New badge earned",
            format!("You earned the {} badge", name),
            now,
        ));
    }

    earned
        .into_iter()
        .map(|(badge_id, _)| (user_id.to_string(), badge_id))
        .collect()
}
