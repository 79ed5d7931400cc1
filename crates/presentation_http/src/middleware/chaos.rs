//! Chaos interceptor middleware
//!
//! Classifies each inbound request into a canonical endpoint name, runs it
//! through the chaos engine before any business logic executes, and either
//! short-circuits with a synthetic error response or lets the request
//! proceed. Administrative and health paths are always excluded.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    Json,
    extract::Request,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use infrastructure::{ChaosEngine, Decision, FailureKind, InjectedFailure};
use serde::{Deserialize, Serialize};
use tower::{Layer, Service};
use tracing::warn;

/// Header carrying an optional per-request scenario override
pub const SCENARIO_OVERRIDE_HEADER: &str = "x-chaos-scenario";

/// Paths never subject to chaos
const EXCLUDED_PREFIXES: [&str; 3] = ["/v1/chaos", "/health", "/ready"];

/// Classify a request into a canonical endpoint name.
///
/// The table is fixed and decoupled from transport details: the chaos
/// configuration keys on these names, not on paths. Unmatched requests
/// classify as `unknown` and receive no endpoint-specific chaos.
#[must_use]
pub fn classify(method: &Method, path: &str) -> &'static str {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["v1", "orders"] if method == Method::POST => "place",
        ["v1", "orders", _] if method == Method::GET => "status",
        ["v1", "orders", _, "payment"] if method == Method::POST => "payment",
        ["v1", "orders", _, "ship"] if method == Method::POST => "ship",
        ["v1", "orders", _, "rollback-place"] if method == Method::POST => "rollback-place",
        ["v1", "orders", _, "rollback-payment"] if method == Method::POST => "rollback-payment",
        ["v1", "orders", _, "rollback-ship"] if method == Method::POST => "rollback-ship",
        _ => "unknown",
    }
}

/// Synthetic failure response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ChaosFailureResponse {
    /// Failure kind that fired
    pub error: FailureKind,
    /// Message from the decision
    pub message: String,
    /// When the failure was injected
    pub timestamp: DateTime<Utc>,
}

fn synthetic_response(failure: &InjectedFailure) -> Response {
    let status =
        StatusCode::from_u16(failure.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ChaosFailureResponse {
        error: failure.kind,
        message: failure.message.clone(),
        timestamp: Utc::now(),
    };
    (status, Json(body)).into_response()
}

/// Layer that applies the chaos interceptor
#[derive(Clone, Debug)]
pub struct ChaosInterceptorLayer {
    engine: Arc<ChaosEngine>,
}

impl ChaosInterceptorLayer {
    /// Create a new interceptor layer over an engine
    #[must_use]
    pub fn new(engine: Arc<ChaosEngine>) -> Self {
        Self { engine }
    }
}

impl<S> Layer<S> for ChaosInterceptorLayer {
    type Service = ChaosInterceptor<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ChaosInterceptor {
            inner,
            engine: Arc::clone(&self.engine),
        }
    }
}

/// Middleware service wrapping the order handlers
#[derive(Clone, Debug)]
pub struct ChaosInterceptor<S> {
    inner: S,
    engine: Arc<ChaosEngine>,
}

impl<S> Service<Request> for ChaosInterceptor<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let engine = Arc::clone(&self.engine);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let path = req.uri().path();

            // Control paths are never chaos targets.
            if EXCLUDED_PREFIXES.iter().any(|p| path.starts_with(p)) {
                return inner.call(req).await;
            }

            // A malformed or unknown override must never block traffic:
            // log it and proceed un-overridden.
            if let Some(name) = req
                .headers()
                .get(SCENARIO_OVERRIDE_HEADER)
                .and_then(|v| v.to_str().ok())
            {
                if let Err(e) = engine.activate_scenario(name) {
                    warn!(scenario = name, error = %e, "ignoring scenario override");
                }
            }

            let endpoint = classify(req.method(), req.uri().path());
            let outcome = engine.evaluate(endpoint).await;

            match outcome.decision {
                Decision::Pass => inner.call(req).await,
                Decision::Fail(failure) => Ok(synthetic_response(&failure)),
            }
        })
    }
}
