use std::sync::Arc;

use docgate::{DocumentGateway, InMemoryBackend, SequentialIdGenerator, UpdatedBy};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub backend: Arc<InMemoryBackend>,
    pub gateway: Arc<DocumentGateway>,
}

pub struct TestSetupBuilder {
    id_prefix: String,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            id_prefix: "room".to_string(),
        }
    }

    #[allow(dead_code)]
    pub fn with_id_prefix(mut self, prefix: &str) -> Self {
        self.id_prefix = prefix.to_string();
        self
    }

    pub fn build(self) -> TestSetup {
        let backend = Arc::new(InMemoryBackend::new());
        let gateway = Arc::new(DocumentGateway::new(
            backend.clone(),
            Arc::new(SequentialIdGenerator::new(&self.id_prefix)),
        ));

        TestSetup { backend, gateway }
    }
}

/// The granting user used across scenarios
#[allow(dead_code)]
pub fn owner_identity() -> UpdatedBy {
    UpdatedBy {
        name: "A".to_string(),
        email: "a@x.com".to_string(),
        avatar: String::new(),
    }
}
