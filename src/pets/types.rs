use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound for both pet stats.
pub const STAT_MAX: i64 = 100;

/// Fixed increment applied by a single care action, saturating at [`STAT_MAX`].
pub const CARE_INCREMENT: i64 = 20;

/// The single JSON-shaped persisted state blob.
///
/// Every top-level key defaults to an empty map so documents written by older
/// drafts of the app (or an empty file from a fresh install) deserialize
/// cleanly instead of failing on an absent key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Registered users keyed by the string form of the chat-platform id.
    #[serde(default)]
    pub users: BTreeMap<String, UserRecord>,
    /// Purchasable pet types keyed by catalog key. Loaded from seed data,
    /// never written by application logic.
    #[serde(default)]
    pub pets_catalog: BTreeMap<String, CatalogEntry>,
    /// The one pet each user currently holds, keyed by owner user id.
    #[serde(default)]
    pub user_pets: BTreeMap<String, OwnedPet>,
}

impl Document {
    /// True when nothing has ever been stored.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.pets_catalog.is_empty() && self.user_pets.is_empty()
    }
}

/// A registered user. Created lazily on first identified interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Display name from the chat platform. May be empty; not refreshed on
    /// repeat visits.
    #[serde(default)]
    pub username: String,
    /// Point balance. Never negative.
    #[serde(default)]
    pub balance: i64,
}

impl UserRecord {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            balance: 0,
        }
    }
}

/// A purchasable pet type. Immutable at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name shown in shop listings.
    pub name: String,
    /// Purchase price in points. Always positive.
    pub price: i64,
    /// Asset path of the pet's animation, relative to the assets directory.
    pub animation: String,
}

/// The pet a user currently holds. A purchase overwrites any prior pet;
/// there is no sell or release operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedPet {
    /// User id of the owner.
    pub owner: String,
    /// Catalog key of the pet type. Must resolve in `pets_catalog`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Satiety level in [0, 100].
    pub hunger: i64,
    /// Mood level in [0, 100].
    pub happiness: i64,
    /// When the pet was last bought, fed, or played with.
    pub last_care: DateTime<Utc>,
}

impl OwnedPet {
    /// A freshly purchased pet starts fully fed and fully happy.
    pub fn new(owner: &str, kind: &str, now: DateTime<Utc>) -> Self {
        Self {
            owner: owner.to_string(),
            kind: kind.to_string(),
            hunger: STAT_MAX,
            happiness: STAT_MAX,
            last_care: now,
        }
    }

    /// Feed the pet. Saturates at [`STAT_MAX`]; never decreases.
    pub fn feed(&mut self, now: DateTime<Utc>) {
        self.hunger = bump(self.hunger);
        self.last_care = now;
    }

    /// Play with the pet. Saturates at [`STAT_MAX`]; never decreases.
    pub fn play(&mut self, now: DateTime<Utc>) {
        self.happiness = bump(self.happiness);
        self.last_care = now;
    }
}

fn bump(stat: i64) -> i64 {
    (stat + CARE_INCREMENT).min(STAT_MAX)
}

/// A Feed or Play interaction incrementing one bounded stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareAction {
    Feed,
    Play,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_pet_starts_at_full_stats() {
        let pet = OwnedPet::new("42", "cat", Utc::now());
        assert_eq!(pet.hunger, STAT_MAX);
        assert_eq!(pet.happiness, STAT_MAX);
        assert_eq!(pet.owner, "42");
        assert_eq!(pet.kind, "cat");
    }

    #[test]
    fn feed_saturates_at_stat_max() {
        let mut pet = OwnedPet::new("42", "cat", Utc::now());
        pet.hunger = 90;
        pet.feed(Utc::now());
        assert_eq!(pet.hunger, STAT_MAX);
        pet.feed(Utc::now());
        assert_eq!(pet.hunger, STAT_MAX);
    }

    #[test]
    fn play_only_touches_happiness() {
        let mut pet = OwnedPet::new("42", "cat", Utc::now());
        pet.hunger = 40;
        pet.happiness = 40;
        pet.play(Utc::now());
        assert_eq!(pet.happiness, 60);
        assert_eq!(pet.hunger, 40);
    }

    #[test]
    fn care_updates_last_care() {
        let bought = Utc::now() - chrono::Duration::hours(5);
        let mut pet = OwnedPet::new("42", "cat", bought);
        let later = Utc::now();
        pet.feed(later);
        assert_eq!(pet.last_care, later);
    }

    #[test]
    fn absent_top_level_keys_default_to_empty_maps() {
        let doc: Document = serde_json::from_str("{}").expect("parse");
        assert!(doc.is_empty());

        let doc: Document =
            serde_json::from_str(r#"{"users": {"7": {"username": "kira", "balance": 3}}}"#)
                .expect("parse");
        assert_eq!(doc.users.len(), 1);
        assert!(doc.pets_catalog.is_empty());
        assert!(doc.user_pets.is_empty());
    }

    #[test]
    fn owned_pet_serializes_kind_as_type() {
        let pet = OwnedPet::new("42", "cat", Utc::now());
        let json = serde_json::to_value(&pet).expect("serialize");
        assert_eq!(json["type"], "cat");
        assert!(json.get("kind").is_none());
    }
}
