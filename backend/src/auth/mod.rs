//! Authentication module
//!
//! Token-based auth plus the identity-provider exchange seam.

mod identity;
mod jwt;
mod middleware;

pub use identity::{DevIdentityProvider, HttpIdentityProvider, IdentityProvider};
pub use jwt::{Claims, JwtService};
pub use middleware::AuthUser;
