use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// User identity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub profile_image_uri: Option<String>,
    pub last_updated_millis: i64,
}

impl Profile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            profile_image_uri: None,
            last_updated_millis: Utc::now().timestamp_millis(),
        }
    }
}

/// Conversation keyed by an id derived from its participant set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    /// Display name, the participant names joined in sorted order.
    pub alias: String,
    /// Participant id mapped to the participant's profile.
    pub participants: HashMap<String, Profile>,
    pub last_message: Option<Message>,
}

impl Chat {
    /// Derive the chat id from participant ids: sorted, de-duplicated,
    /// concatenated. Stable under reordering, so starting a chat with an
    /// already-seen participant set lands on the same id.
    pub fn derive_id<'a, I>(participant_ids: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let sorted: BTreeSet<&str> = participant_ids.into_iter().collect();
        sorted.into_iter().collect()
    }
}

/// Single chat utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub text: String,
    /// Send time in epoch milliseconds, assigned when the message is saved.
    pub sent_at_millis: i64,
}

impl Message {
    /// New unsent message. `sent_at_millis` stays zero until
    /// [`MockDatabase::save_message`](super::MockDatabase::save_message)
    /// stamps it.
    pub fn new(sender_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender_id: sender_id.into(),
            text: text.into(),
            sent_at_millis: 0,
        }
    }
}
