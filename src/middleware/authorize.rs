/*
 * Responsibility
 * - Outgoing-request authorization (bypass check → token read → expiry check
 *   → Authorization header attach)
 * - Expired-token cleanup trigger (logout + navigate to login, at most once
 *   per expiry streak)
 * - Tower Layer/Service adapter for pipeline registration
 */
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::task::{Context, Poll};

use http::{HeaderValue, Request, header};
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::config::{AuthorizerConfig, ConfigError};
use crate::services::session::{SessionController, SessionStore};
use crate::services::token;

/// Decides, per outgoing request, whether to attach the stored bearer token.
///
/// The request is forwarded to the continuation exactly once on every path,
/// either untouched or with an `Authorization: Bearer <token>` header; the
/// continuation's return value is passed through. `authorize` itself cannot
/// fail.
///
/// The cleanup flag lives on the authorizer, so the logout trigger fires at
/// most once per continuous streak of expired-token sightings; observing a
/// valid token re-arms it. If a host drives one authorizer from several
/// threads the worst case is a duplicate logout, which collaborators are
/// expected to tolerate (logout is idempotent).
pub struct RequestAuthorizer<S, C> {
    store: S,
    controller: C,
    config: AuthorizerConfig,
    cleanup_done: AtomicBool,
}

impl<S, C> RequestAuthorizer<S, C>
where
    S: SessionStore,
    C: SessionController,
{
    /// Build an authorizer with the default configuration (`/auth/` and
    /// `/settings` bypassed, token read from the `token` key).
    pub fn new(store: S, controller: C) -> Self {
        Self {
            store,
            controller,
            config: AuthorizerConfig::default(),
            cleanup_done: AtomicBool::new(false),
        }
    }

    pub fn with_config(
        store: S,
        controller: C,
        config: AuthorizerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store,
            controller,
            config,
            cleanup_done: AtomicBool::new(false),
        })
    }

    /// Run the authorization decision and hand the request to `next`.
    pub fn authorize<B, R>(&self, mut req: Request<B>, next: impl FnOnce(Request<B>) -> R) -> R {
        let url = req.uri().to_string();

        // Login and other public endpoints skip authorization entirely.
        if self.config.bypass_patterns.iter().any(|p| url.contains(p)) {
            return next(req);
        }

        match self.store.get(&self.config.token_key) {
            Some(stored) => {
                if token::is_valid(&stored) {
                    self.cleanup_done.store(false, Ordering::SeqCst);
                    match HeaderValue::try_from(format!("Bearer {stored}")) {
                        Ok(value) => {
                            debug!(%url, "attaching Authorization header");
                            req.headers_mut().insert(header::AUTHORIZATION, value);
                        }
                        Err(_) => {
                            // Decodable claims but bytes that cannot live in a
                            // header; forward unauthenticated rather than fail.
                            warn!(%url, "stored token is not a valid header value");
                        }
                    }
                    next(req)
                } else {
                    // Expired or undecodable token. Trigger cleanup on the
                    // first sighting only; the request itself still proceeds
                    // without a header.
                    if !self.cleanup_done.swap(true, Ordering::SeqCst) {
                        warn!(%url, "stored token expired, logging out");
                        self.controller.logout();
                        self.controller.navigate_to_login();
                    }
                    next(req)
                }
            }
            None => {
                // No enforcement here: the request proceeds unauthenticated,
                // the server decides what to do with it.
                if url.contains("/api/") && !url.contains("/auth/") {
                    warn!(%url, "no token available for authenticated request");
                }
                next(req)
            }
        }
    }
}

/// Registers a shared [`RequestAuthorizer`] as a `tower` middleware layer.
///
/// Clones of the layer and of the services it produces share one authorizer,
/// so the at-most-once logout trigger holds across the whole pipeline.
pub struct AuthorizeLayer<S, C> {
    authorizer: Arc<RequestAuthorizer<S, C>>,
}

impl<S, C> AuthorizeLayer<S, C> {
    pub fn new(authorizer: RequestAuthorizer<S, C>) -> Self {
        Self {
            authorizer: Arc::new(authorizer),
        }
    }
}

impl<S, C> Clone for AuthorizeLayer<S, C> {
    fn clone(&self) -> Self {
        Self {
            authorizer: Arc::clone(&self.authorizer),
        }
    }
}

impl<Svc, S, C> Layer<Svc> for AuthorizeLayer<S, C> {
    type Service = Authorize<Svc, S, C>;

    fn layer(&self, inner: Svc) -> Self::Service {
        Authorize {
            inner,
            authorizer: Arc::clone(&self.authorizer),
        }
    }
}

/// `tower::Service` produced by [`AuthorizeLayer`]; the inner service is the
/// continuation.
pub struct Authorize<Svc, S, C> {
    inner: Svc,
    authorizer: Arc<RequestAuthorizer<S, C>>,
}

impl<Svc: Clone, S, C> Clone for Authorize<Svc, S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            authorizer: Arc::clone(&self.authorizer),
        }
    }
}

impl<Svc, S, C, B> Service<Request<B>> for Authorize<Svc, S, C>
where
    Svc: Service<Request<B>>,
    S: SessionStore,
    C: SessionController,
{
    type Response = Svc::Response;
    type Error = Svc::Error;
    type Future = Svc::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let inner = &mut self.inner;
        self.authorizer.authorize(req, |req| inner.call(req))
    }
}
