//! Domain Layer
//!
//! Value objects, identity types, and the trait seams to the external
//! identity provider and the application-owned role directory.

pub mod directory;
pub mod email;
pub mod identity;
pub mod provider;

// Re-exports
pub use directory::{DirectoryRecord, DirectoryRepository};
pub use email::Email;
pub use identity::CurrentUser;
pub use provider::{IdentityProvider, ProviderSession, ProviderUser};
