//! Request logging middleware.
//!
//! Logs every incoming request at info level. Successful completions are
//! logged at debug level in development only; failed responses are left to
//! the error boundary, which logs them once.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{CONTENT_TYPE, USER_AGENT};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, info};

use crate::config::RuntimeMode;

/// Middleware factory logging request start and successful completion.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use status_backend::config::RuntimeMode;
/// use status_backend::middleware::RequestObserver;
///
/// let app = App::new().wrap(RequestObserver::new(RuntimeMode::Development));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequestObserver {
    mode: RuntimeMode,
}

impl RequestObserver {
    /// Observer emitting completion events only when `mode` is development.
    pub const fn new(mode: RuntimeMode) -> Self {
        Self { mode }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestObserver
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestObserverMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestObserverMiddleware {
            service,
            verbose: self.mode.is_development(),
        }))
    }
}

/// Service wrapper produced by [`RequestObserver`].
pub struct RequestObserverMiddleware<S> {
    service: S,
    verbose: bool,
}

impl<S, B> Service<ServiceRequest> for RequestObserverMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let path = req.path().to_owned();
        let user_agent = req
            .headers()
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        info!(%method, %path, user_agent, "incoming request");

        let verbose = self.verbose;
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            if verbose && res.response().error().is_none() {
                let response_type = res
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("empty");
                debug!(%method, %path, response_type, "request completed");
            }
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use crate::test_support::capture_logs;

    async fn observe(mode: RuntimeMode, uri: &str) -> (u16, String) {
        let (logs, _guard) = capture_logs();

        let app = test::init_service(
            App::new()
                .wrap(RequestObserver::new(mode))
                .route(
                    "/ok",
                    web::get().to(|| async { HttpResponse::Ok().json("fine") }),
                )
                .route(
                    "/fail",
                    web::get().to(|| async {
                        Err::<HttpResponse, _>(actix_web::error::ErrorBadRequest("bad"))
                    }),
                ),
        )
        .await;
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header((USER_AGENT, "observer-test"))
            .to_request();
        let res = test::call_service(&app, req).await;

        (res.status().as_u16(), logs.contents())
    }

    #[rstest]
    #[actix_web::test]
    async fn logs_incoming_request_with_user_agent() {
        let (status, logs) = observe(RuntimeMode::Production, "/ok").await;

        assert_eq!(status, 200);
        assert!(logs.contains("incoming request"));
        assert!(logs.contains("observer-test"));
        assert!(logs.contains("/ok"));
    }

    #[rstest]
    #[actix_web::test]
    async fn completion_is_logged_in_development() {
        let (_, logs) = observe(RuntimeMode::Development, "/ok").await;

        assert!(logs.contains("request completed"));
        assert!(logs.contains("application/json"));
    }

    #[rstest]
    #[case(RuntimeMode::Test)]
    #[case(RuntimeMode::Staging)]
    #[case(RuntimeMode::Production)]
    #[actix_web::test]
    async fn completion_is_silent_outside_development(#[case] mode: RuntimeMode) {
        let (_, logs) = observe(mode, "/ok").await;

        assert!(!logs.contains("request completed"));
    }

    #[rstest]
    #[actix_web::test]
    async fn failed_responses_skip_the_completion_log() {
        let (status, logs) = observe(RuntimeMode::Development, "/fail").await;

        assert_eq!(status, 400);
        assert!(logs.contains("incoming request"));
        assert!(!logs.contains("request completed"));
    }
}
