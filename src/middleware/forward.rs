/*
 * Responsibility
 * - Propagate an already-presented Authorization header onto outgoing calls
 *   (service-to-service chains where the caller's token is reused as-is)
 * - Only the Authorization header is forwarded, nothing else
 */
use std::task::{Context, Poll};

use http::{HeaderMap, HeaderValue, Request, header};
use tower::{Layer, Service};

/// Forwards a captured `Authorization` header onto every outgoing request.
///
/// Capture the header from the request currently being handled with
/// [`from_headers`](Self::from_headers); when nothing was captured the layer
/// is a no-op and outgoing requests go out unauthenticated.
#[derive(Debug, Clone)]
pub struct ForwardAuthorizationLayer {
    authorization: Option<HeaderValue>,
}

impl ForwardAuthorizationLayer {
    pub fn new(authorization: Option<HeaderValue>) -> Self {
        Self { authorization }
    }

    /// Capture the `Authorization` header of an inbound request, if present.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            authorization: headers.get(header::AUTHORIZATION).cloned(),
        }
    }
}

impl<Svc> Layer<Svc> for ForwardAuthorizationLayer {
    type Service = ForwardAuthorization<Svc>;

    fn layer(&self, inner: Svc) -> Self::Service {
        ForwardAuthorization {
            inner,
            authorization: self.authorization.clone(),
        }
    }
}

/// `tower::Service` produced by [`ForwardAuthorizationLayer`].
#[derive(Debug, Clone)]
pub struct ForwardAuthorization<Svc> {
    inner: Svc,
    authorization: Option<HeaderValue>,
}

impl<Svc, B> Service<Request<B>> for ForwardAuthorization<Svc>
where
    Svc: Service<Request<B>>,
{
    type Response = Svc::Response;
    type Error = Svc::Error;
    type Future = Svc::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        if let Some(value) = &self.authorization {
            req.headers_mut().insert(header::AUTHORIZATION, value.clone());
        }
        self.inner.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbound_headers(auth: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = auth {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn captured_header_is_set_on_outgoing_requests() {
        let layer = ForwardAuthorizationLayer::from_headers(&inbound_headers(Some("Bearer abc")));
        let mut svc = layer.layer(tower::service_fn(|req: Request<()>| async move {
            Ok::<_, std::convert::Infallible>(req.headers().get(header::AUTHORIZATION).cloned())
        }));

        let fut = svc.call(Request::builder().uri("/api/v1/seats").body(()).unwrap());
        let got = poll_once(fut);
        assert_eq!(got.unwrap().unwrap().to_str().unwrap(), "Bearer abc");
    }

    #[test]
    fn missing_header_leaves_requests_untouched() {
        let layer = ForwardAuthorizationLayer::from_headers(&inbound_headers(None));
        let mut svc = layer.layer(tower::service_fn(|req: Request<()>| async move {
            Ok::<_, std::convert::Infallible>(req.headers().get(header::AUTHORIZATION).cloned())
        }));

        let fut = svc.call(Request::builder().uri("/api/v1/seats").body(()).unwrap());
        assert!(poll_once(fut).unwrap().is_none());
    }

    // The service futures here are immediately ready; poll once by hand to
    // keep these tests synchronous.
    fn poll_once<F: Future>(fut: F) -> F::Output {
        let mut fut = Box::pin(fut);
        let waker = std::task::Waker::noop();
        let mut cx = Context::from_waker(waker);
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(out) => out,
            Poll::Pending => panic!("future was not immediately ready"),
        }
    }
}
