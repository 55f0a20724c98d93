//! Catalog lookups, seed loading, and shop/status display formatting.
//!
//! The catalog is static data: loaded from `data/seeds/catalog.json` (or the
//! built-in starter set) into the document, then only ever read.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::pets::errors::PetError;
use crate::pets::types::{CatalogEntry, Document, OwnedPet, STAT_MAX};

/// Pure read of a catalog entry by key.
pub fn catalog_entry<'a>(doc: &'a Document, key: &str) -> Result<&'a CatalogEntry, PetError> {
    doc.pets_catalog
        .get(key)
        .ok_or_else(|| PetError::UnknownPet(key.to_string()))
}

/// Resolve a user's pet together with its catalog entry.
///
/// A pet whose `type` no longer resolves is a data-integrity failure and is
/// reported as such rather than treated as "no pet".
pub fn owned_pet_with_entry<'a>(
    doc: &'a Document,
    user_id: &str,
) -> Result<(&'a OwnedPet, &'a CatalogEntry), PetError> {
    let pet = doc.user_pets.get(user_id).ok_or(PetError::NoPetOwned)?;
    let entry = doc
        .pets_catalog
        .get(&pet.kind)
        .ok_or_else(|| PetError::DanglingCatalogKey(pet.kind.clone()))?;
    Ok((pet, entry))
}

/// Built-in starter catalog used when no seed file is present.
pub fn starter_catalog() -> BTreeMap<String, CatalogEntry> {
    let entries = [
        ("cat", "Cat", 60, "cat.gif"),
        ("dog", "Dog", 80, "dog.gif"),
        ("hamster", "Hamster", 30, "hamster.gif"),
        ("parrot", "Parrot", 120, "parrot.gif"),
    ];
    entries
        .iter()
        .map(|(key, name, price, animation)| {
            (
                key.to_string(),
                CatalogEntry {
                    name: name.to_string(),
                    price: *price,
                    animation: animation.to_string(),
                },
            )
        })
        .collect()
}

/// Load catalog entries from a JSON seed file.
///
/// Entries with a non-positive price are dropped with a warning rather than
/// poisoning the whole catalog.
pub fn load_catalog_from_json<P: AsRef<Path>>(
    path: P,
) -> Result<BTreeMap<String, CatalogEntry>, PetError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let seeds: Vec<CatalogSeed> = serde_json::from_str(&contents)?;

    let mut catalog = BTreeMap::new();
    for seed in seeds {
        if seed.price <= 0 {
            log::warn!(
                "catalog seed {} skipped: price {} is not positive",
                seed.key,
                seed.price
            );
            continue;
        }
        catalog.insert(
            seed.key,
            CatalogEntry {
                name: seed.name,
                price: seed.price,
                animation: seed.animation,
            },
        );
    }
    Ok(catalog)
}

/// Populate an empty catalog. A document that already carries catalog data
/// is left untouched; returns how many entries were inserted.
pub fn seed_catalog_if_needed(
    doc: &mut Document,
    entries: BTreeMap<String, CatalogEntry>,
) -> usize {
    if !doc.pets_catalog.is_empty() {
        return 0;
    }
    let inserted = entries.len();
    doc.pets_catalog = entries;
    inserted
}

/// Resolve an entry's animation against the configured assets directory.
/// Whether the file actually exists is the caller's concern.
pub fn animation_path(assets_dir: &Path, entry: &CatalogEntry) -> std::path::PathBuf {
    assets_dir.join(&entry.animation)
}

/// Format the shop listing, one line per catalog entry.
pub fn format_catalog_listing(doc: &Document) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("=== PET SHOP ===".to_string());

    if doc.pets_catalog.is_empty() {
        lines.push("The shop is empty today.".to_string());
        return lines;
    }

    for (idx, (key, entry)) in doc.pets_catalog.iter().enumerate() {
        lines.push(format!(
            "{}. {} ({}) - {} pts",
            idx + 1,
            entry.name,
            key,
            entry.price
        ));
    }
    lines.push("Say BUY <name> to take one home.".to_string());
    lines
}

/// Format a pet status card for the chat front-end.
pub fn format_pet_status(pet: &OwnedPet, entry: &CatalogEntry) -> String {
    let hunger_bar = "█".repeat((pet.hunger / 10).max(0) as usize);
    let happiness_bar = "█".repeat((pet.happiness / 10).max(0) as usize);
    format!(
        "=== {} ===\nHunger:    {:>3}/{} {}\nHappiness: {:>3}/{} {}\nLast care: {}",
        entry.name,
        pet.hunger,
        STAT_MAX,
        hunger_bar,
        pet.happiness,
        STAT_MAX,
        happiness_bar,
        pet.last_care.format("%Y-%m-%d %H:%M UTC")
    )
}

/// Seed file entry shape for `data/seeds/catalog.json`.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogSeed {
    key: String,
    name: String,
    price: i64,
    animation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn seeded_document() -> Document {
        let mut doc = Document::default();
        doc.pets_catalog = starter_catalog();
        doc
    }

    #[test]
    fn lookup_known_and_unknown_keys() {
        let doc = seeded_document();
        let cat = catalog_entry(&doc, "cat").expect("cat");
        assert_eq!(cat.price, 60);
        assert!(matches!(
            catalog_entry(&doc, "dragon"),
            Err(PetError::UnknownPet(_))
        ));
    }

    #[test]
    fn dangling_pet_reference_is_an_integrity_error() {
        let mut doc = seeded_document();
        doc.user_pets
            .insert("100".to_string(), OwnedPet::new("100", "unicorn", Utc::now()));
        match owned_pet_with_entry(&doc, "100") {
            Err(PetError::DanglingCatalogKey(key)) => assert_eq!(key, "unicorn"),
            other => panic!("expected DanglingCatalogKey, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn seeding_only_populates_an_empty_catalog() {
        let mut doc = Document::default();
        assert_eq!(seed_catalog_if_needed(&mut doc, starter_catalog()), 4);
        assert_eq!(seed_catalog_if_needed(&mut doc, starter_catalog()), 0);
    }

    #[test]
    fn seed_file_round_trip_drops_bad_prices() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[
                {"key": "cat", "name": "Cat", "price": 60, "animation": "cat.gif"},
                {"key": "ghost", "name": "Ghost", "price": 0, "animation": "ghost.gif"}
            ]"#,
        )
        .expect("write seed");

        let catalog = load_catalog_from_json(&path).expect("load");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains_key("cat"));
    }

    #[test]
    fn animations_resolve_under_the_assets_dir() {
        let doc = seeded_document();
        let entry = catalog_entry(&doc, "dog").unwrap();
        let path = animation_path(std::path::Path::new("static"), entry);
        assert_eq!(path, std::path::Path::new("static/dog.gif"));
    }

    #[test]
    fn listing_names_every_entry_with_price() {
        let doc = seeded_document();
        let lines = format_catalog_listing(&doc);
        assert!(lines.iter().any(|l| l.contains("Cat") && l.contains("60")));
        assert!(lines.iter().any(|l| l.contains("Parrot") && l.contains("120")));
    }

    #[test]
    fn status_card_shows_clamped_bars() {
        let doc = seeded_document();
        let mut pet = OwnedPet::new("100", "cat", Utc::now());
        pet.hunger = 40;
        let card = format_pet_status(&pet, catalog_entry(&doc, "cat").unwrap());
        assert!(card.contains("Hunger:     40/100 ████"));
        assert!(card.contains("Happiness: 100/100"));
    }
}
