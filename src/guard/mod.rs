pub mod guard;
pub mod routes;

pub use guard::{GuardDecision, RouteGuard};
pub use routes::{RouteMatch, RoutePattern, RouteTable};
