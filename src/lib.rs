//! # Pawpad - A Virtual Pet Companion
//!
//! Pawpad is a toy virtual pet application reachable from a chat bot and a
//! companion web page. Users register implicitly on first contact, hold a
//! point balance, buy a pet from a small catalog, and keep its two bounded
//! stats topped up with feed/play actions. Everything persists in a single
//! flat JSON document.
//!
//! ## Features
//!
//! - **Implicit registration**: the first identified message creates the
//!   user record; there is no signup flow.
//! - **Pet shop**: a static, seed-loaded catalog of purchasable pets with
//!   prices and animation assets.
//! - **Care actions**: FEED and PLAY nudge hunger/happiness up by a fixed
//!   step, saturating at 100.
//! - **One JSON file**: the whole state is one document, written atomically
//!   under an exclusive file lock.
//! - **Framework-free seams**: chat commands and the web session check are
//!   plain functions; bot and web bindings stay outside the crate.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pawpad::pets::{ChatProcessor, ChatUser, PetService};
//! use pawpad::store::JsonFileStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = PetService::new(JsonFileStore::new("data/data.json"));
//!     let processor = ChatProcessor::new(service, "Welcome!");
//!     let alice = ChatUser::new("100", Some("alice"));
//!     let reply = processor.process(&alice, "shop").await;
//!     println!("{}", reply);
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`pets`] - Data model, registry, catalog, purchase and care operations,
//!   chat command processing
//! - [`store`] - The flat-file JSON document store
//! - [`config`] - Configuration management and validation
//! - [`validation`] - Input validation for front-end supplied identifiers
//! - [`logutil`] - Log line sanitization helpers

pub mod config;
pub mod logutil;
pub mod pets;
pub mod store;
pub mod validation;
