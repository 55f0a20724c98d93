//! Chat command parsing and reply formatting.
//!
//! This is the framework-free seam the bot binding calls into: inbound text
//! plus the sender's platform identity go in, user-facing reply strings come
//! out. Registration gating runs as an explicit pipeline stage ahead of every
//! handler, mirroring what used to be a decorator around each bot callback.

use log::{debug, warn};

use crate::logutil::escape_log;
use crate::pets::errors::PetError;
use crate::pets::service::PetService;
use crate::pets::types::CareAction;
use crate::store::DocumentStore;
use crate::validation::{sanitize_username, validate_catalog_key};

/// Commands understood on the chat side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Start,
    Shop,
    Buy(String),
    Feed,
    Play,
    Status,
    Balance,
    Help,
    Unknown(String),
}

impl ChatCommand {
    /// Parse one inbound message. Case-insensitive; a leading command prefix
    /// (`/`, `!`, etc.) is tolerated so both DM and public-channel styles work.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim().trim_start_matches(['/', '!', '^', '$']);
        let mut parts = trimmed.split_whitespace();
        let verb = match parts.next() {
            Some(v) => v.to_ascii_uppercase(),
            None => return ChatCommand::Unknown(String::new()),
        };
        let rest = parts.collect::<Vec<_>>().join(" ");

        match verb.as_str() {
            "START" => ChatCommand::Start,
            "SHOP" | "CATALOG" => ChatCommand::Shop,
            "BUY" => {
                if rest.is_empty() {
                    ChatCommand::Unknown(trimmed.to_string())
                } else {
                    ChatCommand::Buy(rest.to_lowercase())
                }
            }
            "FEED" => ChatCommand::Feed,
            "PLAY" => ChatCommand::Play,
            "STATUS" | "PET" => ChatCommand::Status,
            "BALANCE" | "POINTS" => ChatCommand::Balance,
            "HELP" => ChatCommand::Help,
            _ => ChatCommand::Unknown(trimmed.to_string()),
        }
    }
}

/// The identified sender of a chat message.
#[derive(Debug, Clone)]
pub struct ChatUser {
    /// String form of the chat-platform numeric id.
    pub id: String,
    /// Platform display name, when the platform reports one.
    pub username: Option<String>,
}

impl ChatUser {
    pub fn new(id: impl Into<String>, username: Option<&str>) -> Self {
        Self {
            id: id.into(),
            username: username.map(|s| s.to_string()),
        }
    }
}

const HELP_TEXT: &str = "Commands: SHOP, BUY <name>, FEED, PLAY, STATUS, BALANCE, HELP";

/// Processes chat commands against the data-access service.
pub struct ChatProcessor<S> {
    service: PetService<S>,
    greeting: String,
}

impl<S: DocumentStore> ChatProcessor<S> {
    pub fn new(service: PetService<S>, greeting: &str) -> Self {
        Self {
            service,
            greeting: greeting.to_string(),
        }
    }

    pub fn service(&self) -> &PetService<S> {
        &self.service
    }

    /// Handle one inbound message and produce the reply text.
    ///
    /// Stage 1 registers the sender if unseen (the login gate every handler
    /// used to be wrapped in); stage 2 dispatches the parsed command. Errors
    /// never escape to the transport: they are folded into reply text.
    pub async fn process(&self, user: &ChatUser, input: &str) -> String {
        debug!(
            "chat input user={} text={}",
            escape_log(&user.id),
            escape_log(input)
        );

        let username = user.username.as_deref().map(sanitize_username);
        if let Err(e) = self
            .service
            .ensure_user(&user.id, username.as_deref())
            .await
        {
            warn!("registration failed for {}: {}", escape_log(&user.id), e);
            return e.user_message();
        }

        match self.dispatch(user, ChatCommand::parse(input)).await {
            Ok(reply) => reply,
            Err(e) => {
                if matches!(e, PetError::Io(_) | PetError::Parse(_)) {
                    warn!("command failed for {}: {}", escape_log(&user.id), e);
                }
                e.user_message()
            }
        }
    }

    async fn dispatch(&self, user: &ChatUser, command: ChatCommand) -> Result<String, PetError> {
        match command {
            ChatCommand::Start => Ok(format!("{}\n{}", self.greeting, HELP_TEXT)),
            ChatCommand::Shop => Ok(self.service.catalog_listing().await?.join("\n")),
            ChatCommand::Buy(key) => {
                validate_catalog_key(&key).map_err(|_| PetError::UnknownPet(key.clone()))?;
                let pet = self.service.purchase(&user.id, &key).await?;
                let balance = self.service.balance(&user.id).await?;
                Ok(format!(
                    "Congratulations! A {} is now yours. Balance left: {} pts.",
                    pet.kind, balance
                ))
            }
            ChatCommand::Feed => {
                let pet = self.service.care(&user.id, CareAction::Feed).await?;
                Ok(format!("Nom nom! Hunger is now {}/100.", pet.hunger))
            }
            ChatCommand::Play => {
                let pet = self.service.care(&user.id, CareAction::Play).await?;
                Ok(format!("Wheee! Happiness is now {}/100.", pet.happiness))
            }
            ChatCommand::Status => self.service.pet_status(&user.id).await,
            ChatCommand::Balance => {
                let balance = self.service.balance(&user.id).await?;
                Ok(format!("You have {} pts.", balance))
            }
            ChatCommand::Help => Ok(HELP_TEXT.to_string()),
            ChatCommand::Unknown(text) => {
                debug!("unknown command: {}", escape_log(&text));
                Ok(format!("I didn't catch that. {}", HELP_TEXT))
            }
        }
    }
}
