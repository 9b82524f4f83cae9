use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known metadata keys written by the gateway
pub const METADATA_CREATOR_ID: &str = "creatorId";
pub const METADATA_EMAIL: &str = "email";
pub const METADATA_TITLE: &str = "title";

/// A metadata value: the hosted service stores either a string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Single(String),
    Multiple(Vec<String>),
}

impl MetadataValue {
    /// The string form, or `None` for list values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::Single(value) => Some(value),
            MetadataValue::Multiple(_) => None,
        }
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Single(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for MetadataValue {
    fn from(values: Vec<String>) -> Self {
        MetadataValue::Multiple(values)
    }
}

/// Free-form room metadata
pub type RoomMetadata = BTreeMap<String, MetadataValue>;

/// User identifier -> ordered list of capability tokens
pub type RoomAccesses = BTreeMap<String, Vec<String>>;

/// Partial access update: `None` revokes the user's entry
pub type RoomAccessUpdate = BTreeMap<String, Option<Vec<String>>>;

/// A room as stored by the collaboration service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_connection_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: RoomMetadata,
    #[serde(default)]
    pub default_accesses: Vec<String>,
    #[serde(default)]
    pub groups_accesses: RoomAccesses,
    #[serde(default)]
    pub users_accesses: RoomAccesses,
}

impl Room {
    fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(MetadataValue::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata_str(METADATA_TITLE)
    }

    /// Email of the document owner, taken from metadata
    pub fn owner_email(&self) -> Option<&str> {
        self.metadata_str(METADATA_EMAIL)
    }

    pub fn creator_id(&self) -> Option<&str> {
        self.metadata_str(METADATA_CREATOR_ID)
    }

    /// Whether the user has an entry in the access mapping, whatever its tokens
    pub fn has_user(&self, user_id: &str) -> bool {
        self.users_accesses.contains_key(user_id)
    }

    pub fn accesses_for(&self, user_id: &str) -> Option<&[String]> {
        self.users_accesses.get(user_id).map(Vec::as_slice)
    }
}

/// Body of a room creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub id: String,
    pub default_accesses: Vec<String>,
    pub users_accesses: RoomAccesses,
    pub metadata: RoomMetadata,
}

/// Body of a partial room update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RoomMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_accesses: Option<RoomAccessUpdate>,
}

impl UpdateRoomRequest {
    pub fn metadata(metadata: RoomMetadata) -> Self {
        Self {
            metadata: Some(metadata),
            users_accesses: None,
        }
    }

    pub fn users_accesses(users_accesses: RoomAccessUpdate) -> Self {
        Self {
            metadata: None,
            users_accesses: Some(users_accesses),
        }
    }
}

/// One page of rooms returned by a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomList {
    pub data: Vec<Room>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Inbox notification delivered to a single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxNotification {
    pub user_id: String,
    pub kind: String,
    pub subject_id: String,
    pub room_id: Option<String>,
    pub activity_data: serde_json::Value,
}
