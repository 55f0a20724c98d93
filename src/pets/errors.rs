use thiserror::Error;

/// Errors that can arise while interacting with the pet data layer.
#[derive(Debug, Error)]
pub enum PetError {
    /// Wrapper around IO errors (data file reads, directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed persisted content. The caller has no recovery path other
    /// than treating the store as empty or aborting.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Returned when an operation references a user with no registry entry.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Returned when a purchase names a key absent from the catalog.
    #[error("no such pet in the catalog: {0}")]
    UnknownPet(String),

    /// Returned when a care action targets a user who owns no pet.
    #[error("no pet owned")]
    NoPetOwned,

    /// Insufficient balance for a purchase.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Invalid or absent web session cookie.
    #[error("forbidden")]
    Forbidden,

    /// An owned pet references a catalog key that no longer exists.
    /// This is a data-integrity failure, not a normal state.
    #[error("owned pet references missing catalog entry: {0}")]
    DanglingCatalogKey(String),
}

impl PetError {
    /// User-facing reply for a failed chat command. Front-ends translate
    /// errors into messages; nothing in this taxonomy crashes the process.
    pub fn user_message(&self) -> String {
        match self {
            PetError::UserNotFound(_) => "You are not registered yet. Say START first.".to_string(),
            PetError::UnknownPet(key) => format!("There is no \"{}\" in the shop.", key),
            PetError::NoPetOwned => {
                "You don't have a pet yet. Visit the SHOP to pick one.".to_string()
            }
            PetError::InsufficientBalance => "You can't afford that pet yet.".to_string(),
            PetError::Forbidden => "Please log in first.".to_string(),
            PetError::Io(_) | PetError::Parse(_) | PetError::DanglingCatalogKey(_) => {
                "Something went wrong on our side. Try again in a moment.".to_string()
            }
        }
    }
}
