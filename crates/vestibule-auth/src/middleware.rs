//! Tower session guard.
//!
//! `SessionLayer` and `SessionService` wrap any inner service with session
//! resolution. Requests whose session token resolves to a user are forwarded
//! with that [`User`](crate::User) in their extensions; all others are
//! answered here.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::{Request, StatusCode};
use tower::{Layer, Service};

use crate::resolver::SessionResolver;
use crate::token::SessionTokenSource;

/// Tower `Layer` that wraps services with session resolution.
#[derive(Clone)]
pub struct SessionLayer {
    resolver: Arc<SessionResolver>,
}

impl SessionLayer {
    /// Create a new session layer over the given resolver.
    pub fn new(resolver: Arc<SessionResolver>) -> Self {
        Self { resolver }
    }
}

impl<S> Layer<S> for SessionLayer {
    type Service = SessionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionService {
            inner,
            resolver: self.resolver.clone(),
        }
    }
}

/// Tower `Service` that resolves the session before forwarding requests.
#[derive(Clone)]
pub struct SessionService<S> {
    inner: S,
    resolver: Arc<SessionResolver>,
}

impl<S> Service<Request<Body>> for SessionService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let resolver = self.resolver.clone();
        let token = req.session_token();

        Box::pin(async move {
            let Some(token) = token else {
                return Ok(error_response(
                    StatusCode::UNAUTHORIZED,
                    "missing session token",
                ));
            };

            match resolver.get_auth_user(token.as_str()).await {
                Ok(Some(user)) => {
                    req.extensions_mut().insert(user);
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                Ok(None) => Ok(error_response(
                    StatusCode::UNAUTHORIZED,
                    "session expired or invalid",
                )),
                Err(e) => {
                    log::error!("Session resolution failed: {e}");
                    let status = if e.is_client_error() {
                        StatusCode::UNAUTHORIZED
                    } else {
                        StatusCode::INTERNAL_SERVER_ERROR
                    };
                    Ok(error_response(status, "session lookup failed"))
                }
            }
        })
    }
}

/// Build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> axum::response::Response {
    let body = serde_json::json!({
        "error": {
            "category": "authentication",
            "message": message,
        }
    });

    (
        status,
        [(http::header::CONTENT_TYPE, "application/json")],
        serde_json::to_string(&body).unwrap_or_default(),
    )
        .into_response()
}
