// Re-exports so callers can "use crate::config::*".
pub mod backend;
pub mod config;
pub mod logging;
pub mod routes;
pub mod storage;

pub use backend::*;
pub use config::*;
pub use logging::*;
pub use routes::*;
pub use storage::*;
