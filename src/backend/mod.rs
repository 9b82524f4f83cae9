// Remote collaboration service access
//
// The gateway only ever talks to the service through the CollaborationBackend
// trait, so the hosted client and the in-memory stand-in are interchangeable.

// Public API - what other modules can use
pub use client::{BackendError, CollaborationBackend};
pub use liveblocks::LiveblocksBackend;
pub use memory::InMemoryBackend;

// Internal modules
mod client;
pub mod liveblocks;
mod memory;
pub mod models;
