//! Client-side request authorization middleware.
//!
//! Every outgoing request passes through a [`RequestAuthorizer`]: it reads the
//! bearer token from a [`SessionStore`], checks the token's expiry, and either
//! attaches an `Authorization: Bearer <token>` header or (on the first sight of
//! an expired token) asks the [`SessionController`] to log the session out and
//! navigate to the login view. Requests to login/public routes bypass the whole
//! thing.
//!
//! The core is the synchronous [`RequestAuthorizer::authorize`] decision; for
//! `tower`-based client pipelines, [`AuthorizeLayer`] registers it as a regular
//! middleware layer. [`ForwardAuthorizationLayer`] covers the service-to-service
//! case where an already-presented `Authorization` header is propagated onto
//! outgoing calls as-is.

pub mod config;
pub mod error;
pub mod middleware;
pub mod services;

pub use config::{AuthorizerConfig, ConfigError};
pub use error::TokenError;
pub use middleware::{
    Authorize, AuthorizeLayer, ForwardAuthorization, ForwardAuthorizationLayer, RequestAuthorizer,
};
pub use services::session::{MemorySession, SessionController, SessionStore};
