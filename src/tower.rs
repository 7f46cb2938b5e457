//! Tower integration.
//!
//! [`ErrorHandlerLayer`] installs an [`ErrorHandler`] on any `tower::Service`
//! whose error type implements [`AsFault`]. Errors from the inner service are
//! turned into responses by the pipeline; the wrapped service only fails with
//! [`Unhandled`], either the original error (rendering failed) or an escaped
//! handler failure.
//!
//! # Feature Flag
//!
//! Requires the `tower` feature (enabled by default).
//!
//! # Example
//!
//! ```rust,ignore
//! use api_error_rail::prelude::*;
//! use tower::ServiceBuilder;
//!
//! let handler = ErrorHandler::builder().format(Format::JsonApi).register()?;
//!
//! let service = ServiceBuilder::new()
//!     .layer(ErrorHandlerLayer::new(handler, HttpResponder::<String>::new()))
//!     .service(my_service);
//! ```

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::sync::Arc;

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;
use tower::{Layer, Service};

use crate::fault::AsFault;
use crate::handler::{ErrorHandler, Unhandled};
use crate::respond::Respond;

/// A Tower [`Layer`] that renders service errors through an [`ErrorHandler`].
///
/// Each layer owns its own registration, so stacking or mounting several
/// layers with different formats keeps them fully independent.
pub struct ErrorHandlerLayer<P> {
    handler: ErrorHandler,
    responder: Arc<P>,
}

impl<P> ErrorHandlerLayer<P> {
    /// Creates a layer emitting responses through `responder`.
    #[inline]
    pub fn new(handler: ErrorHandler, responder: P) -> Self {
        Self { handler, responder: Arc::new(responder) }
    }

    #[inline]
    pub fn handler(&self) -> &ErrorHandler {
        &self.handler
    }
}

impl<P> Clone for ErrorHandlerLayer<P> {
    fn clone(&self) -> Self {
        Self { handler: self.handler.clone(), responder: Arc::clone(&self.responder) }
    }
}

impl<P> core::fmt::Debug for ErrorHandlerLayer<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ErrorHandlerLayer").field("handler", &self.handler).finish_non_exhaustive()
    }
}

impl<S, P> Layer<S> for ErrorHandlerLayer<P> {
    type Service = ErrorHandlerService<S, P>;

    #[inline]
    fn layer(&self, inner: S) -> Self::Service {
        ErrorHandlerService {
            inner,
            handler: self.handler.clone(),
            responder: Arc::clone(&self.responder),
        }
    }
}

/// A Tower [`Service`] that turns inner errors into error responses.
///
/// This is created by [`ErrorHandlerLayer`] or
/// [`HandleErrorsExt::handle_errors`].
pub struct ErrorHandlerService<S, P> {
    inner: S,
    handler: ErrorHandler,
    responder: Arc<P>,
}

impl<S, P> ErrorHandlerService<S, P> {
    #[inline]
    pub fn new(inner: S, handler: ErrorHandler, responder: P) -> Self {
        Self { inner, handler, responder: Arc::new(responder) }
    }

    #[inline]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    #[inline]
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Consumes the wrapper and returns the inner service.
    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Clone, P> Clone for ErrorHandlerService<S, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            handler: self.handler.clone(),
            responder: Arc::clone(&self.responder),
        }
    }
}

impl<S: core::fmt::Debug, P> core::fmt::Debug for ErrorHandlerService<S, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ErrorHandlerService")
            .field("inner", &self.inner)
            .field("handler", &self.handler)
            .finish_non_exhaustive()
    }
}

impl<S, P, Request> Service<Request> for ErrorHandlerService<S, P>
where
    S: Service<Request>,
    S::Error: AsFault,
    P: Respond<S::Response>,
{
    type Response = S::Response;
    type Error = Unhandled<S::Error>;
    type Future = ErrorHandlerFuture<S::Future, P>;

    /// Readiness errors are not request faults and pass through untouched.
    #[inline]
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Unhandled::Fault)
    }

    #[inline]
    fn call(&mut self, request: Request) -> Self::Future {
        ErrorHandlerFuture::new(
            self.inner.call(request),
            self.handler.clone(),
            Arc::clone(&self.responder),
        )
    }
}

pin_project! {
    /// Future returned by [`ErrorHandlerService`].
    ///
    /// Resolves inner errors through the pipeline once the inner future fails.
    #[must_use = "futures do nothing unless polled"]
    pub struct ErrorHandlerFuture<F, P> {
        #[pin]
        inner: F,
        pipeline: Option<(ErrorHandler, Arc<P>)>,
    }
}

impl<F, P> ErrorHandlerFuture<F, P> {
    #[inline]
    fn new(inner: F, handler: ErrorHandler, responder: Arc<P>) -> Self {
        Self { inner, pipeline: Some((handler, responder)) }
    }
}

impl<F, T, E, P> Future for ErrorHandlerFuture<F, P>
where
    F: Future<Output = Result<T, E>>,
    E: AsFault,
    P: Respond<T>,
{
    type Output = Result<T, Unhandled<E>>;

    #[inline]
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        match this.inner.poll(cx) {
            Poll::Ready(Ok(response)) => {
                this.pipeline.take();
                Poll::Ready(Ok(response))
            },
            Poll::Ready(Err(error)) => {
                // pipeline is always Some until the first Ready result
                let (handler, responder) = this.pipeline.take().expect("polled after completion");
                Poll::Ready(handler.rescue(error, &*responder))
            },
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<F, T, E, P> FusedFuture for ErrorHandlerFuture<F, P>
where
    F: FusedFuture<Output = Result<T, E>>,
    E: AsFault,
    P: Respond<T>,
{
    #[inline]
    fn is_terminated(&self) -> bool {
        self.pipeline.is_none() || self.inner.is_terminated()
    }
}

/// Extension trait for installing an error handler on a service.
pub trait HandleErrorsExt<Request>: Service<Request> + Sized {
    /// Wraps this service so its errors are rendered by `handler`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use api_error_rail::tower::HandleErrorsExt;
    ///
    /// let wrapped = my_service.handle_errors(handler, HttpResponder::<String>::new());
    /// ```
    fn handle_errors<P>(self, handler: ErrorHandler, responder: P) -> ErrorHandlerService<Self, P>
    where
        P: Respond<Self::Response>,
    {
        ErrorHandlerService::new(self, handler, responder)
    }
}

impl<S, Request> HandleErrorsExt<Request> for S where S: Service<Request> {}
