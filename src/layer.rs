//! `tower` middleware that runs [`CookiePlugin::on_request`] before your service.
//!
//! [`CookiePlugin::on_request`]: crate::CookiePlugin::on_request
use std::task::{Context, Poll};

use http::Request;
use tower_layer::Layer;
use tower_service::Service;

use crate::CookiePlugin;

/// A [`Layer`] that parses request cookies before calling the inner service.
///
/// ```rust
/// use galletta::{CookiePlugin, RequestCookiesExt};
/// use http::{Request, Response};
/// use std::convert::Infallible;
/// use tower::{ServiceBuilder, ServiceExt};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let service = ServiceBuilder::new()
///     .layer(CookiePlugin::default().layer())
///     .service_fn(|req: Request<()>| async move {
///         let greeting = format!("hello {}", req.cookie("name").unwrap_or("stranger"));
///         Ok::<_, Infallible>(Response::new(greeting))
///     });
///
/// let request = Request::builder().header("cookie", "name=luna").body(()).unwrap();
/// let response = service.oneshot(request).await.unwrap();
/// assert_eq!(response.body(), "hello luna");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CookieLayer {
    plugin: CookiePlugin,
}

impl CookieLayer {
    /// Creates a layer driven by `plugin`.
    pub fn new(plugin: CookiePlugin) -> Self {
        Self { plugin }
    }
}

impl From<CookiePlugin> for CookieLayer {
    fn from(plugin: CookiePlugin) -> Self {
        Self::new(plugin)
    }
}

impl<S> Layer<S> for CookieLayer {
    type Service = CookieService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CookieService {
            inner,
            plugin: self.plugin.clone(),
        }
    }
}

/// The service produced by [`CookieLayer`].
#[derive(Debug, Clone)]
pub struct CookieService<S> {
    inner: S,
    plugin: CookiePlugin,
}

impl<S, B> Service<Request<B>> for CookieService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        self.plugin.on_request(&mut req);
        self.inner.call(req)
    }
}
