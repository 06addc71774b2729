//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod product_system;
pub mod tracing;

pub use config::*;
pub use product_system::*;
pub use self::tracing::*;
