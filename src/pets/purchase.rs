//! The purchase flow: deduct balance, hand over the pet.

use chrono::{DateTime, Utc};
use log::info;

use crate::pets::catalog::catalog_entry;
use crate::pets::errors::PetError;
use crate::pets::registry::get_user;
use crate::pets::types::{Document, OwnedPet};

/// Buy the catalog pet `pet_key` for `user_id`.
///
/// All checks run before the document is touched, so a failed purchase leaves
/// balance and ownership exactly as they were. On success the price is
/// deducted and the new pet replaces any prior one in the same mutation;
/// there is no intermediate state with one but not the other. The caller
/// persists the document afterwards.
pub fn purchase(
    doc: &mut Document,
    user_id: &str,
    pet_key: &str,
    now: DateTime<Utc>,
) -> Result<OwnedPet, PetError> {
    get_user(doc, user_id)?;
    let entry = catalog_entry(doc, pet_key)?;
    let price = entry.price;

    let user = doc
        .users
        .get_mut(user_id)
        .ok_or_else(|| PetError::UserNotFound(user_id.to_string()))?;
    if user.balance < price {
        return Err(PetError::InsufficientBalance);
    }

    user.balance -= price;
    let pet = OwnedPet::new(user_id, pet_key, now);
    let replaced = doc.user_pets.insert(user_id.to_string(), pet.clone());

    info!(
        "user {} bought {} for {} pts{}",
        user_id,
        pet_key,
        price,
        if replaced.is_some() {
            " (replacing prior pet)"
        } else {
            ""
        }
    );
    Ok(pet)
}
