use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// Source of fresh identifiers for rooms and notifications
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// UUID v4 generator producing hyphen-free, URL-safe ids
pub struct UuidIdGenerator;

impl UuidIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UuidIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Deterministic generator: `{prefix}-1`, `{prefix}-2`, ...
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicUsize,
}

impl SequentialIdGenerator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: AtomicUsize::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> String {
        format!("{}-{}", self.prefix, self.next.fetch_add(1, Ordering::SeqCst))
    }
}
