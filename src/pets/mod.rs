//! Virtual pet data model and the operations on it.
//!
//! The document schema, lazy user registry, read-only catalog, and the
//! purchase/care state transitions all live here, with the chat command
//! processor on top. Front-end bindings stay outside the crate and call
//! through [`service::PetService`].

pub mod care;
pub mod catalog;
pub mod commands;
pub mod errors;
pub mod purchase;
pub mod registry;
pub mod service;
pub mod types;

pub use care::care_action;
pub use catalog::{
    animation_path, catalog_entry, format_catalog_listing, format_pet_status,
    load_catalog_from_json, owned_pet_with_entry, seed_catalog_if_needed, starter_catalog,
};
pub use commands::{ChatCommand, ChatProcessor, ChatUser};
pub use errors::PetError;
pub use purchase::purchase;
pub use registry::{authenticate_cookie, ensure_user, get_user};
pub use service::{DocumentStats, PetService};
pub use types::{
    CareAction, CatalogEntry, Document, OwnedPet, UserRecord, CARE_INCREMENT, STAT_MAX,
};
