//! Test utilities & fixtures.
//! Each test gets a throwaway data file in a temp dir; helpers seed the
//! starter catalog and register a user so scenarios start from a known state.

use pawpad::pets::{starter_catalog, PetService};
use pawpad::store::JsonFileStore;
use tempfile::TempDir;

/// Service over a fresh data file inside `dir`.
#[allow(dead_code)] // Each test binary compiles this module; not all use both helpers.
pub fn service_in(dir: &TempDir) -> PetService<JsonFileStore> {
    PetService::new(JsonFileStore::new(dir.path().join("data.json")))
}

/// Service with the starter catalog seeded and one registered user holding
/// `balance` points.
#[allow(dead_code)]
pub async fn seeded_service(dir: &TempDir, user_id: &str, balance: i64) -> PetService<JsonFileStore> {
    let service = service_in(dir);
    service
        .seed_catalog(starter_catalog())
        .await
        .expect("seed catalog");
    service
        .ensure_user(user_id, Some("tester"))
        .await
        .expect("register user");
    if balance > 0 {
        service.credit(user_id, balance).await.expect("credit");
    }
    service
}
