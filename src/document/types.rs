use serde::{Deserialize, Serialize};
use std::fmt;

use super::access::UserType;

/// Presentation path whose cached view is affected by an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPath {
    /// The document listing at `/`
    Root,
    /// A single document page at `/documents/{room_id}`, id percent-encoded
    Document(String),
}

impl fmt::Display for ViewPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewPath::Root => write!(f, "/"),
            ViewPath::Document(room_id) => {
                write!(f, "/documents/{}", urlencoding::encode(room_id))
            }
        }
    }
}

impl Serialize for ViewPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of a gateway operation plus the presentation signals it raised
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    /// Views that are now stale and should be refreshed
    pub invalidate: Vec<ViewPath>,
    /// Where the caller should navigate next, if anywhere
    pub redirect: Option<ViewPath>,
}

impl<T> Outcome<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            invalidate: Vec::new(),
            redirect: None,
        }
    }

    pub fn invalidating(mut self, path: ViewPath) -> Self {
        self.invalidate.push(path);
        self
    }

    pub fn redirecting(mut self, path: ViewPath) -> Self {
        self.redirect = Some(path);
        self
    }
}

/// Identity of the user who changed someone's access
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedBy {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: String,
}

/// Request payload for creating a new document
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub user_id: String,
    pub email: String,
}

/// Query for fetching a single document on behalf of a user
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDocumentQuery {
    pub user_id: String,
}

/// Query for listing a user's documents
#[derive(Debug, Deserialize)]
pub struct ListDocumentsQuery {
    pub email: String,
}

/// Request payload for renaming a document
#[derive(Debug, Deserialize)]
pub struct UpdateTitleRequest {
    pub title: String,
}

/// Request payload for sharing a document
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareDocumentRequest {
    pub email: String,
    pub user_type: UserType,
    pub updated_by: UpdatedBy,
}

/// Response envelope carrying the value and presentation signals
#[derive(Debug, Serialize)]
pub struct GatewayResponse<T> {
    pub data: T,
    pub invalidate: Vec<ViewPath>,
    pub redirect: Option<ViewPath>,
}

impl<T> From<Outcome<T>> for GatewayResponse<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self {
            data: outcome.value,
            invalidate: outcome.invalidate,
            redirect: outcome.redirect,
        }
    }
}

impl<T> GatewayResponse<T> {
    /// Wraps a read-only result that raises no signals
    pub fn plain(data: T) -> Self {
        Outcome::new(data).into()
    }
}
