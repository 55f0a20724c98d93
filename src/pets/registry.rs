//! Lazy user registration and web-session checks.
//!
//! Users never sign up. The first identified interaction from either
//! front-end inserts a registry entry with an empty balance, and every later
//! interaction finds it already there.

use crate::pets::errors::PetError;
use crate::pets::types::{Document, UserRecord};
use crate::validation::validate_user_id;

/// Idempotent upsert of a user record.
///
/// Inserts `{username, balance: 0}` when `user_id` is absent. An existing
/// record is returned untouched: the stored username is NOT refreshed when
/// the platform reports a new one.
pub fn ensure_user<'a>(
    doc: &'a mut Document,
    user_id: &str,
    username: Option<&str>,
) -> &'a mut UserRecord {
    doc.users
        .entry(user_id.to_string())
        .or_insert_with(|| UserRecord::new(username.unwrap_or("")))
}

/// Look up a user, failing with [`PetError::UserNotFound`] when absent.
/// Callers that want lazy creation go through [`ensure_user`] first.
pub fn get_user<'a>(doc: &'a Document, user_id: &str) -> Result<&'a UserRecord, PetError> {
    doc.users
        .get(user_id)
        .ok_or_else(|| PetError::UserNotFound(user_id.to_string()))
}

/// Resolve a web session cookie to a registered user id.
///
/// The cookie carries the bare user id; a session is valid exactly when that
/// value is a key in `users`. There is no password, expiry, or signature.
pub fn authenticate_cookie(doc: &Document, cookie: Option<&str>) -> Result<String, PetError> {
    let user_id = cookie.ok_or(PetError::Forbidden)?;
    let user_id = validate_user_id(user_id).map_err(|_| PetError::Forbidden)?;
    if doc.users.contains_key(user_id) {
        Ok(user_id.to_string())
    } else {
        Err(PetError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_contact_registers_with_zero_balance() {
        let mut doc = Document::default();
        let user = ensure_user(&mut doc, "100", Some("alice"));
        assert_eq!(user.username, "alice");
        assert_eq!(user.balance, 0);
        assert!(doc.users.contains_key("100"));
    }

    #[test]
    fn missing_username_registers_as_empty_string() {
        let mut doc = Document::default();
        let user = ensure_user(&mut doc, "100", None);
        assert_eq!(user.username, "");
    }

    #[test]
    fn ensure_user_is_idempotent() {
        let mut doc = Document::default();
        ensure_user(&mut doc, "100", Some("alice"));
        doc.users.get_mut("100").unwrap().balance = 75;

        let again = ensure_user(&mut doc, "100", Some("alice"));
        assert_eq!(again.balance, 75);
        assert_eq!(doc.users.len(), 1);
    }

    #[test]
    fn repeat_visit_does_not_refresh_username() {
        let mut doc = Document::default();
        ensure_user(&mut doc, "100", Some("alice"));
        let record = ensure_user(&mut doc, "100", Some("alice_renamed"));
        assert_eq!(record.username, "alice");
    }

    #[test]
    fn get_user_reports_unknown_ids() {
        let doc = Document::default();
        match get_user(&doc, "404") {
            Err(PetError::UserNotFound(id)) => assert_eq!(id, "404"),
            other => panic!("expected UserNotFound, got {:?}", other),
        }
    }

    #[test]
    fn cookie_for_registered_user_is_accepted() {
        let mut doc = Document::default();
        ensure_user(&mut doc, "100", Some("alice"));
        let id = authenticate_cookie(&doc, Some("100")).expect("session");
        assert_eq!(id, "100");
    }

    #[test]
    fn absent_or_unknown_cookie_is_forbidden() {
        let mut doc = Document::default();
        ensure_user(&mut doc, "100", Some("alice"));
        assert!(matches!(
            authenticate_cookie(&doc, None),
            Err(PetError::Forbidden)
        ));
        assert!(matches!(
            authenticate_cookie(&doc, Some("999")),
            Err(PetError::Forbidden)
        ));
    }
}
