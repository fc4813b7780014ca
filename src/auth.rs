//! Auth-domain identifiers, scope lists, secrets, and client credentials.

pub mod credentials;
pub mod id;
pub mod scope;
pub mod secret;

pub use credentials::*;
pub use id::*;
pub use scope::*;
pub use secret::*;
