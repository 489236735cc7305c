pub mod profile;
pub mod session;

pub use profile::{Credentials, RegistrationProfile};
pub use session::{SessionIdentity, SessionRecord, ADMIN_ROLE};
