//! Authentication core: route policy, credential checks, password hashing and
//! session tokens. Nothing in here knows about routing or the database driver.

use uuid::Uuid;

pub mod credentials;
pub mod password;
pub mod policy;
pub mod session;

pub use self::credentials::{verify, Rejection};
pub use self::policy::{decide, Decision, PathClass};
pub use self::session::{SessionConfig, SessionKeys};

/// Public view of an authenticated account, enough to issue a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
}
