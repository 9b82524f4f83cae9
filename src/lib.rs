// Library crate for the document access gateway
// This file exposes the public API for the server binary and integration tests

pub mod backend;
pub mod config;
pub mod document;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use backend::{BackendError, CollaborationBackend, InMemoryBackend, LiveblocksBackend};
pub use config::GatewayConfig;
pub use document::{
    DocumentError, DocumentGateway, IdGenerator, Outcome, SequentialIdGenerator, UpdatedBy,
    UserType, UuidIdGenerator, ViewPath,
};
pub use shared::{AppError, AppState};
