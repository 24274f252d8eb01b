//! Derived read views. Computed on demand from [`AppState`], never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::model::{CompanyValue, Notification, Recognition, RecognitionType};
use crate::store::AppState;

/// Public recognitions, newest first.
pub fn feed(state: &AppState, limit: usize) -> Vec<&Recognition> {
    let mut items: Vec<&Recognition> = state
        .recognitions
        .iter()
        .filter(|r| r.is_public())
        .collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items.truncate(limit);
    items
}

pub fn recognitions_given_by<'a>(state: &'a AppState, user_id: &str) -> Vec<&'a Recognition> {
    state
        .recognitions
        .iter()
        .filter(|r| r.giver.id == user_id)
        .collect()
}

pub fn recognitions_received_by<'a>(state: &'a AppState, user_id: &str) -> Vec<&'a Recognition> {
    state
        .recognitions
        .iter()
        .filter(|r| r.recipient_ids.iter().any(|id| id == user_id))
        .collect()
}

/// The chain a recognition belongs to, from its root down to itself.
pub fn chain_of<'a>(state: &'a AppState, recognition_id: &str) -> Vec<&'a Recognition> {
    let mut chain = Vec::new();
    let mut cursor = state.recognition(recognition_id);
    while let Some(rec) = cursor {
        // a corrupted snapshot could contain a parent cycle
        if chain.len() >= state.recognitions.len() {
            break;
        }
        chain.push(rec);
        cursor = rec
            .chain_parent_id
            .as_deref()
            .and_then(|parent| state.recognition(parent));
    }
    chain.reverse();
    chain
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardPeriod {
    AllTime,
    ThisMonth,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: String,
    pub name: String,
    pub department: String,
    pub credits: u32,
    pub recognitions_received: u32,
}

/// Users ranked by credits for the period; ties break by name.
pub fn leaderboard(
    state: &AppState,
    period: LeaderboardPeriod,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut rows: Vec<(u32, &crate::model::User)> = state
        .users
        .values()
        .map(|u| {
            let credits = match period {
                LeaderboardPeriod::AllTime => u.credits,
                LeaderboardPeriod::ThisMonth => u.effective_credits_this_month(now),
            };
            (credits, u)
        })
        .collect();
    rows.sort_by(|(ca, a), (cb, b)| cb.cmp(ca).then_with(|| a.name.cmp(&b.name)));

    rows.into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (credits, u))| LeaderboardEntry {
            rank: i + 1,
            user_id: u.id.clone(),
            name: u.name.clone(),
            department: u.department.clone(),
            credits,
            recognitions_received: u.recognitions_received,
        })
        .collect()
}

/// A user's notifications, newest first.
pub fn notifications_for<'a>(state: &'a AppState, user_id: &str) -> Vec<&'a Notification> {
    let mut items: Vec<&Notification> = state
        .notifications
        .iter()
        .filter(|n| n.user_id == user_id)
        .collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items
}

pub fn unread_count(state: &AppState, user_id: &str) -> usize {
    state
        .notifications
        .iter()
        .filter(|n| n.user_id == user_id && !n.read)
        .count()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub total_recognitions: usize,
    pub total_credits: u64,
    pub by_type: HashMap<RecognitionType, usize>,
    pub by_value: BTreeMap<CompanyValue, usize>,
    /// (user id, count), highest first
    pub top_givers: Vec<(String, usize)>,
    pub top_receivers: Vec<(String, usize)>,
    /// Share of users who gave at least one recognition in the window
    pub participation_rate: f64,
}

fn ranked(counts: HashMap<String, usize>, limit: usize) -> Vec<(String, usize)> {
    let mut rows: Vec<(String, usize)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows.truncate(limit);
    rows
}

/// Dashboard numbers over recognitions created at or after `since`
/// (all of them when `None`).
pub fn analytics(state: &AppState, since: Option<DateTime<Utc>>, top: usize) -> Analytics {
    let window: Vec<&Recognition> = state
        .recognitions
        .iter()
        .filter(|r| since.map(|s| r.created_at >= s).unwrap_or(true))
        .collect();

    let mut by_type = HashMap::new();
    let mut by_value = BTreeMap::new();
    let mut givers: HashMap<String, usize> = HashMap::new();
    let mut receivers: HashMap<String, usize> = HashMap::new();

    for rec in &window {
        *by_type.entry(rec.kind).or_insert(0) += 1;
        *by_value.entry(rec.value).or_insert(0) += 1;
        *givers.entry(rec.giver.id.clone()).or_insert(0) += 1;
        for id in &rec.recipient_ids {
            *receivers.entry(id.clone()).or_insert(0) += 1;
        }
    }

    let participation_rate = if state.users.is_empty() {
        0.0
    } else {
        givers.len() as f64 / state.users.len() as f64
    };

    Analytics {
        total_recognitions: window.len(),
        total_credits: state.users.values().map(|u| u.credits as u64).sum(),
        by_type,
        by_value,
        top_givers: ranked(givers, top),
        top_receivers: ranked(receivers, top),
        participation_rate,
    }
}
