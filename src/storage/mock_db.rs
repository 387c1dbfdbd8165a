use chrono::Utc;
use std::collections::HashMap;
use std::path::Path;

use super::error::StorageError;
use super::models::{Chat, Message, Profile};
use super::preferences::Preferences;
use crate::config;
use crate::contacts;

/// Preference key holding the signed-in user's profile.
const KEY_USER: &str = "user";
/// Preference key holding the contact list.
const KEY_CONTACTS: &str = "contacts";
/// Preference key holding the full chat list.
const KEY_CHATS: &str = "chats";

/// Preference key holding the message list of one chat.
fn messages_key(chat_id: &str) -> String {
    format!("messages_{chat_id}")
}

/// Mock database storing profiles, chats, and messages as JSON blobs in a
/// [`Preferences`] store.
///
/// Every write reads the stored collection, mutates it in memory, and writes
/// the whole collection back. Collection reads never fail: unreadable or
/// corrupt storage is logged and treated as empty.
pub struct MockDatabase {
    prefs: Preferences,
}

impl MockDatabase {
    /// Open the database over an existing preference store.
    pub fn with_preferences(prefs: Preferences) -> Self {
        Self { prefs }
    }

    /// Open (or create) the database file at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Ok(Self::with_preferences(Preferences::new(path)?))
    }

    /// Open the database at the location named by the config file at
    /// [`config::DEFAULT_CONFIG_PATH`], falling back to the default location
    /// when the config file is missing or unreadable.
    pub fn open_default() -> Result<Self, StorageError> {
        let app_config = config::load_config(config::DEFAULT_CONFIG_PATH);
        Self::open(&app_config.database_path)
    }

    /// Open an in-memory database, used by tests.
    pub fn in_memory() -> Result<Self, StorageError> {
        Ok(Self::with_preferences(Preferences::in_memory()?))
    }

    // ========== Chats ==========

    /// Create a chat for the given participants and store it.
    ///
    /// The chat id is derived from the participant ids, so starting a chat
    /// with an already-seen participant set returns the stored chat instead
    /// of inserting a duplicate. A fresh chat starts with a blank last
    /// message from `user`.
    pub fn create_chat(
        &self,
        participants: &[Profile],
        user: &Profile,
    ) -> Result<Chat, StorageError> {
        log::debug!("Creating a new chat with {} participant(s)", participants.len());

        let participant_map: HashMap<String, Profile> = participants
            .iter()
            .map(|profile| (profile.id.clone(), profile.clone()))
            .collect();
        let id = Chat::derive_id(participant_map.keys().map(String::as_str));

        let mut chats = self.all_chats();
        let chat = match chats.iter().find(|chat| chat.id == id) {
            Some(existing) => existing.clone(),
            None => {
                let mut names: Vec<&str> = participant_map
                    .values()
                    .map(|profile| profile.name.as_str())
                    .collect();
                names.sort_unstable();

                let chat = Chat {
                    id,
                    alias: names.join(", "),
                    participants: participant_map,
                    last_message: Some(Message::new(user.id.clone(), "")),
                };
                chats.push(chat.clone());
                chat
            }
        };

        self.persist_chats(&chats)?;
        Ok(chat)
    }

    /// All stored chats. Unreadable or corrupt storage yields an empty list.
    pub fn all_chats(&self) -> Vec<Chat> {
        match self.prefs.get(KEY_CHATS) {
            Ok(Some(chats)) => chats,
            Ok(None) => Vec::new(),
            Err(err) => {
                log::error!("Could not read the chat list from preferences: {err}");
                Vec::new()
            }
        }
    }

    /// The chat with the given id, if one is stored.
    pub fn find_chat_by_id(&self, id: &str) -> Option<Chat> {
        self.all_chats().into_iter().find(|chat| chat.id == id)
    }

    /// Replace the last message of the chat with the given id.
    ///
    /// An unknown chat id leaves the list unchanged. The chat list is stored
    /// as one blob, so the whole list is written back either way.
    pub fn update_last_message(
        &self,
        chat_id: &str,
        message: &Message,
    ) -> Result<(), StorageError> {
        let mut chats = self.all_chats();
        if let Some(chat) = chats.iter_mut().find(|chat| chat.id == chat_id) {
            chat.last_message = Some(message.clone());
        }
        self.persist_chats(&chats)
    }

    fn persist_chats(&self, chats: &[Chat]) -> Result<(), StorageError> {
        self.prefs.put(KEY_CHATS, &chats)
    }

    // ========== Messages ==========

    /// Append a message to a chat's message list and update the chat's last
    /// message. Returns the message with its send time stamped.
    pub fn save_message(
        &self,
        chat_id: &str,
        mut message: Message,
    ) -> Result<Message, StorageError> {
        let mut messages = self.messages_for_chat(chat_id);

        // Stamp the send time, clamped so timestamps never go backwards
        // even if the wall clock does.
        let floor = messages.last().map_or(0, |last| last.sent_at_millis);
        message.sent_at_millis = Utc::now().timestamp_millis().max(floor);

        self.update_last_message(chat_id, &message)?;

        messages.push(message.clone());
        self.prefs.put(&messages_key(chat_id), &messages)?;

        Ok(message)
    }

    /// All messages of a chat, oldest first. Unreadable or corrupt storage
    /// yields an empty list.
    pub fn messages_for_chat(&self, chat_id: &str) -> Vec<Message> {
        match self.prefs.get(&messages_key(chat_id)) {
            Ok(Some(messages)) => messages,
            Ok(None) => Vec::new(),
            Err(err) => {
                log::error!("Could not read the message list for chat {chat_id}: {err}");
                Vec::new()
            }
        }
    }

    /// The message with the given id in a chat, if one is stored.
    pub fn find_message_by_id(&self, chat_id: &str, message_id: &str) -> Option<Message> {
        self.messages_for_chat(chat_id)
            .into_iter()
            .find(|message| message.id == message_id)
    }

    // ========== Profiles ==========

    /// The stored contact list. When nothing usable is stored, the default
    /// contacts are generated, persisted, and returned.
    pub fn user_contacts(&self) -> Vec<Profile> {
        match self.prefs.get::<Vec<Profile>>(KEY_CONTACTS) {
            Ok(Some(stored)) if !stored.is_empty() => return stored,
            Ok(_) => {}
            Err(err) => {
                log::error!("Could not read the contact list from preferences: {err}");
            }
        }

        // Nothing stored, so persist and return the default set.
        let defaults = contacts::default_contacts();
        log::debug!("Saving default contacts");
        if let Err(err) = self.prefs.put(KEY_CONTACTS, &defaults) {
            log::error!("Could not write the default contacts to preferences: {err}");
        }
        defaults
    }

    /// The stored user profile, if its id matches the requested one.
    pub fn user(&self, id: &str) -> Result<Option<Profile>, StorageError> {
        let user: Option<Profile> = self.prefs.get(KEY_USER)?;
        Ok(user.filter(|profile| profile.id == id))
    }

    /// Store the user profile, replacing any previous one.
    pub fn create_user(&self, user: &Profile) -> Result<(), StorageError> {
        self.prefs.put(KEY_USER, user)
    }
}
