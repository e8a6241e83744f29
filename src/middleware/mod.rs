//! Request middleware.

mod auth;
mod logging;

pub use auth::BearerAuth;
pub use logging::RequestLogger;
