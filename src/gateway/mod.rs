pub mod cookies;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod navigator;

pub use credentials::basic_auth_token;
pub use error::GatewayError;
pub use gateway::{ApiResponse, AuthGateway};
pub use navigator::{HistoryNavigator, NavigationEntry, NavigationKind, Navigator};
