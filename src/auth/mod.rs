pub mod claims;
pub mod gate;
pub mod identity;
pub mod jwt;
pub mod middleware;

pub use claims::{Claims, Identity};
pub use gate::{authorize, require_admin};
pub use identity::{IdentityDirectory, IdentitySpace};
pub use jwt::JwtService;
pub use middleware::{AdminMiddleware, AuthMiddleware, AuthenticatedUser};
