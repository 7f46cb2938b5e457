//! Response emission.
//!
//! The pipeline hands a [`RenderedError`] to a host supplied [`Respond`]
//! implementation. [`HttpResponder`] covers the common case of building an
//! `http::Response`; any closure returning `Result<R, BoxError>` works too.

use std::marker::PhantomData;

use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Response, StatusCode};

use crate::error::{BoxError, Error, Result};
use crate::serializers::RenderFormat;

/// Everything needed to emit one error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedError {
    pub status: StatusCode,
    pub content_type: String,
    pub format: RenderFormat,
    pub body: String,
}

/// Host response-emission primitive.
pub trait Respond<R>: Send + Sync {
    /// # Errors
    ///
    /// Any failure is treated as a rendering failure and contained.
    fn respond(&self, rendered: RenderedError) -> Result<R>;
}

impl<F, R> Respond<R> for F
where
    F: Fn(RenderedError) -> Result<R, BoxError> + Send + Sync,
{
    #[inline]
    fn respond(&self, rendered: RenderedError) -> Result<R> {
        self(rendered).map_err(Error::Emit)
    }
}

/// Emits `http::Response<B>` with the rendered status, content type and body.
pub struct HttpResponder<B> {
    _body: PhantomData<fn() -> B>,
}

impl<B> HttpResponder<B> {
    #[inline]
    pub const fn new() -> Self {
        Self { _body: PhantomData }
    }
}

impl<B> Default for HttpResponder<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Clone for HttpResponder<B> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<B> Copy for HttpResponder<B> {}

impl<B> std::fmt::Debug for HttpResponder<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HttpResponder")
    }
}

impl<B> Respond<Response<B>> for HttpResponder<B>
where
    B: From<String>,
{
    fn respond(&self, rendered: RenderedError) -> Result<Response<B>> {
        let content_type =
            HeaderValue::from_str(&rendered.content_type).map_err(|e| Error::Emit(Box::new(e)))?;

        let mut response = Response::new(B::from(rendered.body));
        *response.status_mut() = rendered.status;
        response.headers_mut().insert(CONTENT_TYPE, content_type);
        Ok(response)
    }
}
