//! Common test utilities shared by the integration tests.
//!
//! - Fixtures (sample vaccines, health units, project directories)
//! - A commit recorder for `on_commit`
//! - Signal draining under paused time

pub mod driver;
pub mod fixtures;

#[allow(unused_imports)]
pub use driver::*;
#[allow(unused_imports)]
pub use fixtures::*;
