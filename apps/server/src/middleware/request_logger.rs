//! Request logging middleware.
//!
//! Every request runs inside an `api` span carrying a time-ordered request id, so log lines
//! emitted by handlers and services can be correlated. The id is echoed back in the
//! `x-request-id` response header, and the handling time in milliseconds is reported in
//! `x-processing-time`.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::time::Instant;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::config::AUTHORIZATION_HEADER;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const PROCESSING_TIME_HEADER: &str = "x-processing-time";

/// Request logger middleware factory.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: S,
}

/// Authorization scheme only; credentials are never logged.
fn auth_scheme(req: &ServiceRequest) -> &str {
    req.headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split_whitespace().next())
        .unwrap_or("none")
}

fn log_completion(status: StatusCode, duration_ms: u64) {
    let code = status.as_u16();
    if status.is_server_error() {
        error!(target: "api", status = code, duration_ms, "Request failed");
    } else if status.is_client_error() {
        warn!(target: "api", status = code, duration_ms, "Request rejected");
    } else {
        info!(target: "api", status = code, duration_ms, "Request completed");
    }
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let request_id = Uuid::now_v7();
        let span = info_span!(
            target: "api",
            "request",
            %request_id,
            method = %req.method(),
            path = %req.path()
        );

        let remote_addr = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();
        span.in_scope(|| {
            info!(
                target: "api",
                remote_addr = %remote_addr,
                auth = auth_scheme(&req),
                "Request started"
            )
        });

        let fut = span.in_scope(|| self.service.call(req));

        Box::pin(
            async move {
                let mut res = fut.await?;
                let duration_ms = start.elapsed().as_millis() as u64;

                let headers = res.headers_mut();
                if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                    headers.insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                }
                headers.insert(
                    HeaderName::from_static(PROCESSING_TIME_HEADER),
                    HeaderValue::from(duration_ms),
                );
                log_completion(res.status(), duration_ms);

                Ok(res)
            }
            .instrument(span),
        )
    }
}
