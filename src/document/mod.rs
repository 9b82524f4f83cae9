// Public API - what other modules can use
pub use access::{Permission, UserType};
pub use errors::DocumentError;
pub use ids::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use service::DocumentGateway;
pub use types::{Outcome, UpdatedBy, ViewPath};

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::shared::AppState;

// Internal modules
pub mod access;
pub mod errors;
mod handlers;
pub mod ids;
pub mod service;
pub mod types;

/// Routes exposing the gateway operations over HTTP
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/documents",
            post(handlers::create_document).get(handlers::list_documents),
        )
        .route(
            "/documents/:room_id",
            get(handlers::get_document)
                .patch(handlers::update_document)
                .delete(handlers::delete_document),
        )
        .route("/documents/:room_id/access", post(handlers::share_document))
        .route(
            "/documents/:room_id/access/:email",
            delete(handlers::remove_collaborator),
        )
}
