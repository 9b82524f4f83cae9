use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::{
    access::{Permission, UserType},
    errors::DocumentError,
    ids::IdGenerator,
    types::{Outcome, UpdatedBy, ViewPath},
};
use crate::backend::{
    models::{
        CreateRoomRequest, InboxNotification, Room, RoomAccessUpdate, RoomAccesses, RoomMetadata,
        UpdateRoomRequest, METADATA_CREATOR_ID, METADATA_EMAIL, METADATA_TITLE,
    },
    BackendError, CollaborationBackend,
};

pub const DEFAULT_TITLE: &str = "Untitled Document";

/// Notification kind used when someone is granted access to a document
pub const DOCUMENT_ACCESS_KIND: &str = "$documentAccess";

/// Logs a backend failure at its origin and lifts it into DocumentError
fn remote_failure(action: &'static str) -> impl FnOnce(BackendError) -> DocumentError {
    move |e| {
        error!(error = %e, "Error {}", action);
        DocumentError::Remote(e)
    }
}

fn require(field: &str, value: &str) -> Result<(), DocumentError> {
    if value.trim().is_empty() {
        warn!(field = %field, "Rejected blank input");
        return Err(DocumentError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Gateway translating document intents into collaboration service calls
pub struct DocumentGateway {
    backend: Arc<dyn CollaborationBackend>,
    ids: Arc<dyn IdGenerator>,
}

impl DocumentGateway {
    pub fn new(backend: Arc<dyn CollaborationBackend>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { backend, ids }
    }

    /// Creates a room owned by `email` with the default title
    #[instrument(skip(self))]
    pub async fn create_document(
        &self,
        user_id: &str,
        email: &str,
    ) -> Result<Outcome<Room>, DocumentError> {
        require("userId", user_id)?;
        require("email", email)?;

        let room_id = self.ids.generate();
        debug!(room_id = %room_id, "Generated room ID");

        let mut metadata = RoomMetadata::new();
        metadata.insert(METADATA_CREATOR_ID.to_string(), user_id.into());
        metadata.insert(METADATA_EMAIL.to_string(), email.into());
        metadata.insert(METADATA_TITLE.to_string(), DEFAULT_TITLE.into());

        let mut users_accesses = RoomAccesses::new();
        users_accesses.insert(email.to_string(), vec![Permission::RoomWrite.to_string()]);

        let request = CreateRoomRequest {
            id: room_id,
            default_accesses: vec![],
            users_accesses,
            metadata,
        };

        let room = self
            .backend
            .create_room(&request)
            .await
            .map_err(remote_failure("creating document"))?;

        info!(room_id = %room.id, "Document created successfully");
        Ok(Outcome::new(room).invalidating(ViewPath::Root))
    }

    /// Fetches a room if `user_id` has an entry in its access mapping
    ///
    /// Only the presence of the entry is checked, not the tokens it holds.
    #[instrument(skip(self))]
    pub async fn get_document(&self, room_id: &str, user_id: &str) -> Result<Room, DocumentError> {
        require("roomId", room_id)?;
        require("userId", user_id)?;

        let room = self
            .backend
            .get_room(room_id)
            .await
            .map_err(remote_failure("fetching document"))?;

        if !room.has_user(user_id) {
            warn!("User has no access entry for document");
            return Err(DocumentError::AccessDenied {
                room_id: room_id.to_string(),
                user_id: user_id.to_string(),
            });
        }

        debug!("Document fetched");
        Ok(room)
    }

    /// Renames a document, leaving the rest of its metadata untouched
    #[instrument(skip(self))]
    pub async fn update_document(
        &self,
        room_id: &str,
        title: &str,
    ) -> Result<Outcome<Room>, DocumentError> {
        require("roomId", room_id)?;
        require("title", title)?;

        let mut metadata = RoomMetadata::new();
        metadata.insert(METADATA_TITLE.to_string(), title.into());

        let room = self
            .backend
            .update_room(room_id, &UpdateRoomRequest::metadata(metadata))
            .await
            .map_err(remote_failure("updating document"))?;

        info!("Document title updated");
        Ok(Outcome::new(room).invalidating(ViewPath::Document(room_id.to_string())))
    }

    /// Lists the documents `email` has access to (a single backend page)
    #[instrument(skip(self))]
    pub async fn get_documents(&self, email: &str) -> Result<Vec<Room>, DocumentError> {
        require("email", email)?;

        let listing = self
            .backend
            .get_rooms(email)
            .await
            .map_err(remote_failure("fetching rooms"))?;

        if listing.next_cursor.is_some() {
            debug!("Backend reported further pages; returning the first only");
        }

        info!(room_count = listing.data.len(), "Documents listed");
        Ok(listing.data)
    }

    /// Grants `email` the tokens for `user_type` and notifies them
    ///
    /// A failed notification fails the operation with `Remote`; the grant
    /// itself has already been applied by then.
    #[instrument(skip(self, updated_by), fields(updated_by = %updated_by.email))]
    pub async fn update_document_access(
        &self,
        room_id: &str,
        email: &str,
        user_type: UserType,
        updated_by: &UpdatedBy,
    ) -> Result<Outcome<Room>, DocumentError> {
        require("roomId", room_id)?;
        require("email", email)?;

        let mut users_accesses = RoomAccessUpdate::new();
        users_accesses.insert(email.to_string(), Some(user_type.access_tokens()));

        let room = self
            .backend
            .update_room(room_id, &UpdateRoomRequest::users_accesses(users_accesses))
            .await
            .map_err(|e| {
                error!(error = %e, "Error updating document access for {}", email);
                DocumentError::Remote(e)
            })?;

        let notification = InboxNotification {
            user_id: email.to_string(),
            kind: DOCUMENT_ACCESS_KIND.to_string(),
            subject_id: self.ids.generate(),
            room_id: Some(room_id.to_string()),
            activity_data: json!({
                "userType": user_type,
                "title": format!(
                    "You have been granted {} access to the document by {}",
                    user_type, updated_by.name
                ),
                "updatedBy": updated_by.email,
                "avatar": updated_by.avatar,
                "email": updated_by.email,
            }),
        };

        self.backend
            .trigger_inbox_notification(&notification)
            .await
            .map_err(remote_failure("notifying collaborator of document access"))?;
        debug!(subject_id = %notification.subject_id, "Access notification sent");

        info!(user_type = %user_type, "Document access updated");
        Ok(Outcome::new(room).invalidating(ViewPath::Document(room_id.to_string())))
    }

    /// Revokes `email`'s access unless they own the document
    #[instrument(skip(self))]
    pub async fn remove_collaborator(
        &self,
        room_id: &str,
        email: &str,
    ) -> Result<Outcome<Room>, DocumentError> {
        require("roomId", room_id)?;
        require("email", email)?;

        let room = self
            .backend
            .get_room(room_id)
            .await
            .map_err(remote_failure("fetching document before removing collaborator"))?;

        if room.owner_email() == Some(email) {
            warn!("Refused to remove the document owner");
            return Err(DocumentError::OwnerProtection {
                room_id: room_id.to_string(),
                email: email.to_string(),
            });
        }

        let mut users_accesses = RoomAccessUpdate::new();
        users_accesses.insert(email.to_string(), None);

        let updated_room = self
            .backend
            .update_room(room_id, &UpdateRoomRequest::users_accesses(users_accesses))
            .await
            .map_err(remote_failure("removing collaborator"))?;

        info!("Collaborator removed");
        Ok(Outcome::new(updated_room).invalidating(ViewPath::Document(room_id.to_string())))
    }

    /// Deletes a document and sends the caller back to the listing
    #[instrument(skip(self))]
    pub async fn delete_document(&self, room_id: &str) -> Result<Outcome<()>, DocumentError> {
        require("roomId", room_id)?;

        self.backend
            .delete_room(room_id)
            .await
            .map_err(remote_failure("deleting document"))?;

        info!("Document deleted");
        Ok(Outcome::new(())
            .invalidating(ViewPath::Root)
            .redirecting(ViewPath::Root))
    }
}
