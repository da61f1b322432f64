//! Service layer - business use cases.

mod auth_service;
mod product_service;
mod user_service;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use product_service::{ProductManager, ProductService};
pub use user_service::{UserManager, UserService};
