pub mod authorize;
pub mod forward;

pub use authorize::{Authorize, AuthorizeLayer, RequestAuthorizer};
pub use forward::{ForwardAuthorization, ForwardAuthorizationLayer};
