//! Reducer-style actions on the aggregate.
//!
//! Each action mutates the working copy it is handed and reports a
//! [`RecognitionError`] when its target does not exist. The manager runs
//! them on a clone, so a failed action never reaches the shared state.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::RecognitionError;
use crate::gate::validate_message;
use crate::model::{
    Award, Comment, EarnedAward, Notification, NotificationKind, Priority, Reaction, Recognition,
    User,
};
use crate::store::AppState;
use crate::util::new_id;

fn recognition_mut<'a>(
    state: &'a mut AppState,
    recognition_id: &str,
) -> Result<&'a mut Recognition, RecognitionError> {
    state
        .recognition_mut(recognition_id)
        .ok_or_else(|| RecognitionError::RecognitionNotFound(recognition_id.to_string()))
}

fn user_name(state: &AppState, user_id: &str) -> Result<String, RecognitionError> {
    state
        .user(user_id)
        .map(|u| u.name.clone())
        .ok_or_else(|| RecognitionError::UserNotFound(user_id.to_string()))
}

/// Add `emoji` from `user_id`, or remove it if already present.
/// Returns true when the reaction was added.
pub fn toggle_reaction(
    state: &mut AppState,
    recognition_id: &str,
    user_id: &str,
    emoji: &str,
    now: DateTime<Utc>,
) -> Result<bool, RecognitionError> {
    let reactor = user_name(state, user_id)?;
    let recognition = recognition_mut(state, recognition_id)?;

    let existing = recognition
        .reactions
        .iter()
        .position(|r| r.user_id == user_id && r.emoji == emoji);
    if let Some(index) = existing {
        recognition.reactions.remove(index);
        recognition.updated_at = now;
        return Ok(false);
    }

    recognition.reactions.push(Reaction {
        user_id: user_id.to_string(),
        emoji: emoji.to_string(),
        created_at: now,
    });
    recognition.updated_at = now;
    let giver_id = recognition.giver.id.clone();

    if giver_id != user_id {
        state.notifications.push(
            Notification::new(
                NotificationKind::Reaction,
                giver_id,
                "New reaction",
                format!("{} reacted {} to your recognition", reactor, emoji),
                now,
            )
            .for_recognition(recognition_id)
            .with_priority(Priority::Low),
        );
    }

    Ok(true)
}

pub fn add_comment(
    state: &mut AppState,
    recognition_id: &str,
    user_id: &str,
    text: &str,
    now: DateTime<Utc>,
) -> Result<String, RecognitionError> {
    let check = validate_message(text);
    if !check.allowed {
        return Err(RecognitionError::InvalidInput(check));
    }

    let author = user_name(state, user_id)?;
    let recognition = recognition_mut(state, recognition_id)?;

    let comment = Comment {
        id: new_id("cmt"),
        user_id: user_id.to_string(),
        user_name: author.clone(),
        text: text.trim().to_string(),
        created_at: now,
    };
    let comment_id = comment.id.clone();
    recognition.comments.push(comment);
    recognition.updated_at = now;
    let giver_id = recognition.giver.id.clone();

    if giver_id != user_id {
        state.notifications.push(
            Notification::new(
                NotificationKind::Comment,
                giver_id,
                "New comment",
                format!("{} commented on your recognition", author),
                now,
            )
            .for_recognition(recognition_id),
        );
    }

    Ok(comment_id)
}

pub fn record_repost(
    state: &mut AppState,
    recognition_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<u32, RecognitionError> {
    user_name(state, user_id)?;
    let recognition = recognition_mut(state, recognition_id)?;
    recognition.reposts += 1;
    recognition.updated_at = now;
    Ok(recognition.reposts)
}

/// Returns true when the recognition is bookmarked after the call.
pub fn toggle_bookmark(
    state: &mut AppState,
    recognition_id: &str,
    user_id: &str,
) -> Result<bool, RecognitionError> {
    user_name(state, user_id)?;
    let recognition = recognition_mut(state, recognition_id)?;
    match recognition.bookmarked_by.iter().position(|id| id == user_id) {
        Some(index) => {
            recognition.bookmarked_by.remove(index);
            Ok(false)
        }
        None => {
            recognition.bookmarked_by.push(user_id.to_string());
            Ok(true)
        }
    }
}

pub fn mark_notification_read(
    state: &mut AppState,
    notification_id: &str,
    now: DateTime<Utc>,
) -> Result<(), RecognitionError> {
    state
        .notification_mut(notification_id)
        .map(|n| n.mark_read(now))
        .ok_or_else(|| RecognitionError::NotificationNotFound(notification_id.to_string()))
}

/// Returns how many notifications changed.
pub fn mark_all_read(state: &mut AppState, user_id: &str, now: DateTime<Utc>) -> usize {
    let mut changed = 0;
    for notification in state
        .notifications
        .iter_mut()
        .filter(|n| n.user_id == user_id && !n.read)
    {
        notification.mark_read(now);
        changed += 1;
    }
    changed
}

pub fn delete_notification(
    state: &mut AppState,
    notification_id: &str,
) -> Result<(), RecognitionError> {
    let before = state.notifications.len();
    state.notifications.retain(|n| n.id != notification_id);
    if state.notifications.len() == before {
        return Err(RecognitionError::NotificationNotFound(
            notification_id.to_string(),
        ));
    }
    Ok(())
}

/// Remove a recognition and the notifications that point at it.
/// User aggregates are not rolled back.
pub fn delete_recognition(
    state: &mut AppState,
    recognition_id: &str,
) -> Result<Recognition, RecognitionError> {
    let index = state
        .recognitions
        .iter()
        .position(|r| r.id == recognition_id)
        .ok_or_else(|| RecognitionError::RecognitionNotFound(recognition_id.to_string()))?;
    let removed = state.recognitions.remove(index);
    state
        .notifications
        .retain(|n| n.recognition_id.as_deref() != Some(recognition_id));
    debug!(recognition_id = %recognition_id, "Recognition deleted");
    Ok(removed)
}

/// Insert or replace a user. Returns the previous record, if any.
pub fn upsert_user(state: &mut AppState, user: User) -> Option<User> {
    state.users.insert(user.id.clone(), user)
}

/// Manually grant an award outside of a recognition.
pub fn grant_award(
    state: &mut AppState,
    user_id: &str,
    award: &Award,
    recognition_id: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(), RecognitionError> {
    if let Some(id) = recognition_id {
        if state.recognition(id).is_none() {
            return Err(RecognitionError::RecognitionNotFound(id.to_string()));
        }
    }

    let user = state
        .user_mut(user_id)
        .ok_or_else(|| RecognitionError::UserNotFound(user_id.to_string()))?;
    user.earned_awards.push(EarnedAward {
        award_id: award.id.clone(),
        name: award.name.clone(),
        recognition_id: recognition_id.map(str::to_string),
        granted_at: now,
    });

    let mut notification = Notification::new(
        NotificationKind::AwardGranted,
        user_id,
        "Award granted",
        format!("You received the {} award", award.name),
        now,
    )
    .with_priority(Priority::High);
    notification.recognition_id = recognition_id.map(str::to_string);
    state.notifications.push(notification);
    Ok(())
}
