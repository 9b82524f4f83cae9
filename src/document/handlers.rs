use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{info, instrument};

use super::types::{
    CreateDocumentRequest, GatewayResponse, GetDocumentQuery, ListDocumentsQuery,
    ShareDocumentRequest, UpdateTitleRequest,
};
use crate::backend::models::Room;
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a new document
///
/// POST /documents
#[instrument(name = "create_document", skip(state))]
pub async fn create_document(
    State(state): State<AppState>,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<Json<GatewayResponse<Room>>, AppError> {
    let outcome = state
        .gateway
        .create_document(&request.user_id, &request.email)
        .await?;

    info!(room_id = %outcome.value.id, "Document created");
    Ok(Json(outcome.into()))
}

/// HTTP handler for listing the documents a user can access
///
/// GET /documents?email=
#[instrument(name = "list_documents", skip(state))]
pub async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<GatewayResponse<Vec<Room>>>, AppError> {
    let rooms = state.gateway.get_documents(&query.email).await?;
    Ok(Json(GatewayResponse::plain(rooms)))
}

/// GET /documents/:room_id?userId=
#[instrument(name = "get_document", skip(state))]
pub async fn get_document(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Query(query): Query<GetDocumentQuery>,
) -> Result<Json<GatewayResponse<Room>>, AppError> {
    let room = state.gateway.get_document(&room_id, &query.user_id).await?;
    Ok(Json(GatewayResponse::plain(room)))
}

/// PATCH /documents/:room_id
#[instrument(name = "update_document", skip(state))]
pub async fn update_document(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(request): Json<UpdateTitleRequest>,
) -> Result<Json<GatewayResponse<Room>>, AppError> {
    let outcome = state
        .gateway
        .update_document(&room_id, &request.title)
        .await?;
    Ok(Json(outcome.into()))
}

/// HTTP handler for deleting a document
///
/// DELETE /documents/:room_id
/// The response carries `redirect: "/"` for the caller to follow
#[instrument(name = "delete_document", skip(state))]
pub async fn delete_document(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<GatewayResponse<()>>, AppError> {
    let outcome = state.gateway.delete_document(&room_id).await?;
    Ok(Json(outcome.into()))
}

/// POST /documents/:room_id/access
#[instrument(name = "share_document", skip(state, request), fields(email = %request.email))]
pub async fn share_document(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(request): Json<ShareDocumentRequest>,
) -> Result<Json<GatewayResponse<Room>>, AppError> {
    let outcome = state
        .gateway
        .update_document_access(
            &room_id,
            &request.email,
            request.user_type,
            &request.updated_by,
        )
        .await?;
    Ok(Json(outcome.into()))
}

/// DELETE /documents/:room_id/access/:email
#[instrument(name = "remove_collaborator", skip(state))]
pub async fn remove_collaborator(
    State(state): State<AppState>,
    Path((room_id, email)): Path<(String, String)>,
) -> Result<Json<GatewayResponse<Room>>, AppError> {
    let outcome = state.gateway.remove_collaborator(&room_id, &email).await?;
    Ok(Json(outcome.into()))
}
