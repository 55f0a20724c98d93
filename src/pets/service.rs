//! The single data-access service both front-ends call into.
//!
//! Every operation is one full read-modify-write cycle against the document,
//! executed under a per-service mutex. Without that serialization point a
//! chat-originated and a web-originated write for the same user could
//! interleave and the second save would silently clobber the first.
//! Operations that fail abort before the save, so the persisted document
//! never holds a partial mutation.

use chrono::Utc;
use tokio::sync::Mutex;

use crate::pets::care::care_action;
use crate::pets::catalog::{
    format_catalog_listing, format_pet_status, owned_pet_with_entry, seed_catalog_if_needed,
};
use crate::pets::errors::PetError;
use crate::pets::purchase::purchase;
use crate::pets::registry::{authenticate_cookie, ensure_user, get_user};
use crate::pets::types::{CareAction, CatalogEntry, Document, OwnedPet, UserRecord};
use crate::store::DocumentStore;

/// Aggregate counts for the `status` CLI subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStats {
    pub users: usize,
    pub catalog_entries: usize,
    pub pets_owned: usize,
}

/// Data-access service over an injected [`DocumentStore`].
pub struct PetService<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: DocumentStore> PetService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Register the user if this is their first contact. Returns the record
    /// as stored (existing records are returned unchanged).
    pub async fn ensure_user(
        &self,
        user_id: &str,
        username: Option<&str>,
    ) -> Result<UserRecord, PetError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.store.load().await?;
        let record = ensure_user(&mut doc, user_id, username).clone();
        self.store.save(&doc).await?;
        Ok(record)
    }

    /// Current balance of a registered user.
    pub async fn balance(&self, user_id: &str) -> Result<i64, PetError> {
        let doc = self.store.load().await?;
        Ok(get_user(&doc, user_id)?.balance)
    }

    /// Credit points onto a user's balance (platform rewards, admin grants).
    pub async fn credit(&self, user_id: &str, amount: i64) -> Result<i64, PetError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.store.load().await?;
        let user = doc
            .users
            .get_mut(user_id)
            .ok_or_else(|| PetError::UserNotFound(user_id.to_string()))?;
        user.balance = user.balance.saturating_add(amount.max(0));
        let balance = user.balance;
        self.store.save(&doc).await?;
        Ok(balance)
    }

    /// Shop listing lines for display.
    pub async fn catalog_listing(&self) -> Result<Vec<String>, PetError> {
        let doc = self.store.load().await?;
        Ok(format_catalog_listing(&doc))
    }

    /// Buy a pet. All-or-nothing; see [`crate::pets::purchase::purchase`].
    pub async fn purchase(&self, user_id: &str, pet_key: &str) -> Result<OwnedPet, PetError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.store.load().await?;
        let pet = purchase(&mut doc, user_id, pet_key, Utc::now())?;
        self.store.save(&doc).await?;
        Ok(pet)
    }

    /// Apply a feed/play action to the user's pet.
    pub async fn care(&self, user_id: &str, action: CareAction) -> Result<OwnedPet, PetError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.store.load().await?;
        let pet = care_action(&mut doc, user_id, action, Utc::now())?;
        self.store.save(&doc).await?;
        Ok(pet)
    }

    /// The user's pet with its catalog entry, for status displays.
    pub async fn pet_with_entry(
        &self,
        user_id: &str,
    ) -> Result<(OwnedPet, CatalogEntry), PetError> {
        let doc = self.store.load().await?;
        let (pet, entry) = owned_pet_with_entry(&doc, user_id)?;
        Ok((pet.clone(), entry.clone()))
    }

    /// Formatted status card for the user's pet.
    pub async fn pet_status(&self, user_id: &str) -> Result<String, PetError> {
        let (pet, entry) = self.pet_with_entry(user_id).await?;
        Ok(format_pet_status(&pet, &entry))
    }

    /// Resolve a web session cookie to a registered user id.
    pub async fn authenticate_cookie(&self, cookie: Option<&str>) -> Result<String, PetError> {
        let doc = self.store.load().await?;
        authenticate_cookie(&doc, cookie)
    }

    /// Populate the catalog if it is empty. Returns inserted entry count.
    pub async fn seed_catalog(
        &self,
        entries: std::collections::BTreeMap<String, CatalogEntry>,
    ) -> Result<usize, PetError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.store.load().await?;
        let inserted = seed_catalog_if_needed(&mut doc, entries);
        if inserted > 0 {
            self.store.save(&doc).await?;
        }
        Ok(inserted)
    }

    /// Aggregate document counts.
    pub async fn stats(&self) -> Result<DocumentStats, PetError> {
        let doc = self.store.load().await?;
        Ok(DocumentStats {
            users: doc.users.len(),
            catalog_entries: doc.pets_catalog.len(),
            pets_owned: doc.user_pets.len(),
        })
    }

    /// Read-only snapshot of the whole document.
    pub async fn snapshot(&self) -> Result<Document, PetError> {
        self.store.load().await
    }
}
