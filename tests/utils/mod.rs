pub mod fake_liveblocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use fake_liveblocks::FakeLiveblocks;
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
