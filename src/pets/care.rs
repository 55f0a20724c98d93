//! Care actions: the periodic feed/play interactions that keep a pet topped up.

use chrono::{DateTime, Utc};
use log::debug;

use crate::pets::errors::PetError;
use crate::pets::types::{CareAction, Document, OwnedPet};

/// Apply a care action to the user's pet.
///
/// `Feed` raises hunger, `Play` raises happiness; both saturate at the stat
/// cap and `last_care` moves to `now` either way. There is no decay anywhere
/// in the system, so stats only ever move up through here. The caller
/// persists the document afterwards.
pub fn care_action(
    doc: &mut Document,
    user_id: &str,
    action: CareAction,
    now: DateTime<Utc>,
) -> Result<OwnedPet, PetError> {
    let pet = doc.user_pets.get_mut(user_id).ok_or(PetError::NoPetOwned)?;
    match action {
        CareAction::Feed => pet.feed(now),
        CareAction::Play => pet.play(now),
    }
    debug!(
        "user {} {:?} -> hunger {} happiness {}",
        user_id, action, pet.hunger, pet.happiness
    );
    Ok(pet.clone())
}
