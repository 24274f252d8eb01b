//! Badge catalog.
//!
//! Badges are declared as data: a metric over the user and a threshold.
//! Evaluation is uniform, a badge is earned the first time its metric
//! reaches the requirement and is never revoked.

use serde::{Deserialize, Serialize};

use crate::model::{CompanyValue, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Giving,
    Receiving,
    Credits,
    Values,
    Expertise,
}

/// Quantity a badge threshold is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeMetric {
    RecognitionsGiven,
    RecognitionsReceived,
    LifetimeCredits,
    ValueCount(CompanyValue),
    TopExpertAreaScore,
}

impl BadgeMetric {
    pub fn measure(&self, user: &User) -> u32 {
        match self {
            BadgeMetric::RecognitionsGiven => user.recognitions_given,
            BadgeMetric::RecognitionsReceived => user.recognitions_received,
            BadgeMetric::LifetimeCredits => user.credits,
            BadgeMetric::ValueCount(value) => user.value_count(*value),
            BadgeMetric::TopExpertAreaScore => {
                user.expert_areas.iter().map(|a| a.score).max().unwrap_or(0)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: BadgeCategory,
    pub requirement: u32,
    pub metric: BadgeMetric,
}

impl BadgeDefinition {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        category: BadgeCategory,
        metric: BadgeMetric,
        requirement: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category,
            requirement,
            metric,
        }
    }

    pub fn is_met_by(&self, user: &User) -> bool {
        self.metric.measure(user) >= self.requirement
    }

    /// Progress toward the requirement as a fraction in `[0, 1]`.
    pub fn progress(&self, user: &User) -> f64 {
        if self.requirement == 0 {
            return 1.0;
        }
        (self.metric.measure(user) as f64 / self.requirement as f64).min(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeCatalog {
    pub badges: Vec<BadgeDefinition>,
}

impl Default for BadgeCatalog {
    fn default() -> Self {
        use BadgeCategory::*;
        use BadgeMetric::*;

        let mut badges = vec![
            BadgeDefinition::new(
                "first-toast",
                "First Toast",
                "Gave your first recognition",
                Giving,
                RecognitionsGiven,
                1,
            ),
            BadgeDefinition::new(
                "generous-giver",
                "Generous Giver",
                "Gave 10 recognitions",
                Giving,
                RecognitionsGiven,
                10,
            ),
            BadgeDefinition::new(
                "culture-builder",
                "Culture Builder",
                "Gave 50 recognitions",
                Giving,
                RecognitionsGiven,
                50,
            ),
            BadgeDefinition::new(
                "rising-star",
                "Rising Star",
                "Received 5 recognitions",
                Receiving,
                RecognitionsReceived,
                5,
            ),
            BadgeDefinition::new(
                "team-favorite",
                "Team Favorite",
                "Received 25 recognitions",
                Receiving,
                RecognitionsReceived,
                25,
            ),
            BadgeDefinition::new(
                "century-club",
                "Century Club",
                "Earned 100 credits",
                Credits,
                LifetimeCredits,
                100,
            ),
            BadgeDefinition::new(
                "credit-magnate",
                "Credit Magnate",
                "Earned 1,000 credits",
                Credits,
                LifetimeCredits,
                1000,
            ),
            BadgeDefinition::new(
                "subject-expert",
                "Subject Matter Expert",
                "Reached 100 points in an expert area",
                Expertise,
                TopExpertAreaScore,
                100,
            ),
        ];

        for value in CompanyValue::ALL {
            badges.push(BadgeDefinition {
                id: format!("{}-champion", value_slug(value)),
                name: format!("{} Champion", value.label()),
                description: format!("Recognized 5 times for {}", value.label()),
                category: Values,
                requirement: 5,
                metric: ValueCount(value),
            });
        }

        Self { badges }
    }
}

fn value_slug(value: CompanyValue) -> String {
    value.label().to_lowercase().replace(' ', "-")
}

impl BadgeCatalog {
    pub fn get(&self, badge_id: &str) -> Option<&BadgeDefinition> {
        self.badges.iter().find(|b| b.id == badge_id)
    }

    /// Badges whose threshold `user` meets but does not hold yet.
    pub fn newly_earned<'a>(&'a self, user: &User) -> Vec<&'a BadgeDefinition> {
        self.badges
            .iter()
            .filter(|b| !user.has_badge(&b.id) && b.is_met_by(user))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EarnedBadge;
    use chrono::Utc;

    #[test]
    fn test_catalog_ids_unique() {
        let catalog = BadgeCatalog::default();
        let mut ids: Vec<_> = catalog.badges.iter().map(|b| b.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.badges.len());
        assert!(catalog.get("customer-focus-champion").is_some());
    }

    #[test]
    fn test_newly_earned_skips_held_badges() {
        let catalog = BadgeCatalog::default();
        let mut user = User::new("u", "Ada Lovelace", "Engineer", "R&D");
        assert!(catalog.newly_earned(&user).is_empty());

        user.recognitions_given = 1;
        let earned: Vec<_> = catalog.newly_earned(&user).iter().map(|b| b.id.clone()).collect();
        assert_eq!(earned, vec!["first-toast".to_string()]);

        user.earned_badges.push(EarnedBadge {
            badge_id: "first-toast".to_string(),
            name: "First Toast".to_string(),
            earned_at: Utc::now(),
        });
        assert!(catalog.newly_earned(&user).is_empty());
    }

    #[test]
    fn test_value_badge_and_progress() {
        let catalog = BadgeCatalog::default();
        let badge = catalog.get("innovation-champion").unwrap();
        let mut user = User::new("u", "Ada Lovelace", "Engineer", "R&D");
        user.values_counts.insert(CompanyValue::Innovation, 2);
        assert!((badge.progress(&user) - 0.4).abs() < 1e-9);
        user.values_counts.insert(CompanyValue::Innovation, 5);
        assert!(badge.is_met_by(&user));
    }
}
