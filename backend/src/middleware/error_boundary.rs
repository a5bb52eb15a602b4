//! Terminal error boundary.
//!
//! Outermost middleware. Every response that carries an error, every error
//! returned by the inner service and every panic unwinding out of a handler
//! is reduced to a [`Failure`] and rendered by the [`ErrorClassifier`].
//! Successful responses pass through untouched.
//!
//! Errored responses are rewritten in place. Errors and panics have no
//! response to rewrite, so they are returned as a [`ClassifiedFailure`]
//! whose `error_response` is the classified envelope.

use std::panic::{self, AssertUnwindSafe};
use std::task::{Context, Poll};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::config::RuntimeMode;
use crate::inbound::http::failure::{ClassifiedFailure, ErrorClassifier, Failure};

/// Middleware factory installing the error boundary.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use status_backend::config::RuntimeMode;
/// use status_backend::middleware::ErrorBoundary;
///
/// let app = App::new().wrap(ErrorBoundary::new(RuntimeMode::Production));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ErrorBoundary {
    classifier: ErrorClassifier,
}

impl ErrorBoundary {
    /// Boundary masking defects when `mode` is production.
    pub const fn new(mode: RuntimeMode) -> Self {
        Self {
            classifier: ErrorClassifier::new(mode),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorBoundary
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorBoundaryMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorBoundaryMiddleware {
            service,
            classifier: self.classifier,
        }))
    }
}

/// Service wrapper produced by [`ErrorBoundary`].
pub struct ErrorBoundaryMiddleware<S> {
    service: S,
    classifier: ErrorClassifier,
}

impl<S, B> Service<ServiceRequest> for ErrorBoundaryMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let classifier = self.classifier;

        let fut = match panic::catch_unwind(AssertUnwindSafe(|| self.service.call(req))) {
            Ok(fut) => fut,
            Err(payload) => {
                let err = reject(&classifier, Failure::from_panic(payload.as_ref()));
                return Box::pin(async move { Err::<Self::Response, _>(err) });
            }
        };

        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(res)) => Ok(replace_failed_body(&classifier, res)),
                Ok(Err(err)) => Err(reject(&classifier, Failure::from_actix(&err))),
                Err(payload) => Err(reject(&classifier, Failure::from_panic(payload.as_ref()))),
            }
        })
    }
}

fn replace_failed_body<B>(
    classifier: &ErrorClassifier,
    res: ServiceResponse<B>,
) -> ServiceResponse<EitherBody<B>> {
    let Some(failure) = res.response().error().map(Failure::from_actix) else {
        return res.map_into_left_body();
    };
    let response = classifier.classify(failure).into_response();
    let (request, _) = res.into_parts();
    ServiceResponse::new(request, response).map_into_right_body()
}

// No request is available once it has been handed to the inner service, so
// the rendered envelope travels as an error and the server writes it out.
fn reject(classifier: &ErrorClassifier, failure: Failure) -> Error {
    ClassifiedFailure::from(classifier.classify(failure)).into()
}
