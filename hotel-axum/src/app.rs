use std::sync::Arc;

use axum::body::Body;
use axum::handler::Handler;
use axum::http::Request;
use axum::routing::get;
use axum::Router;
use hotel_core::{HotelApp, HotelService};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::params::FromRestParams;
use crate::rest;

pub struct AxumApp<R, P = ()>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    pub app: HotelApp<R, P>,
    routes: Router<()>,
}

impl<R, P> Clone for AxumApp<R, P>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            app: self.app.clone(),
            routes: self.routes.clone(),
        }
    }
}

fn request_span(req: &Request<Body>) -> Span {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %req.method(),
        uri = %req.uri(),
        request_id = %request_id,
    )
}

impl<R, P> AxumApp<R, P>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    pub fn new(app: HotelApp<R, P>) -> Self {
        Self {
            app,
            routes: Router::new(),
        }
    }

    pub fn use_router(mut self, path: &str, router: Router<()>) -> Self {
        self.routes = self.routes.nest(path, router);
        self
    }

    pub fn use_get<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()> + Clone + Send + Sync + 'static,
        T: 'static,
    {
        let router = Router::new().route("/", get(handler));
        self.use_router(path, router)
    }

    /// Plain GET endpoint, e.g. `/health`.
    pub fn service<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()> + Clone + Send + Sync + 'static,
        T: 'static,
    {
        self.use_get(path, handler)
    }

    /// Register `service` under the last segment of `path` and mount the
    /// REST routes for it at `path`.
    ///
    /// `use_service("/api/room", svc)` registers the service as `room`.
    pub fn use_service(mut self, path: &str, service: Arc<dyn HotelService<R, P>>) -> Self
    where
        R: Serialize + DeserializeOwned,
        P: FromRestParams,
    {
        let name = path.trim_end_matches('/').rsplit('/').next().unwrap_or(path);
        self.app.register_service(name, service);

        let service_name = Arc::new(name.to_string());
        let router = rest::service_router(service_name, self.app.clone());

        self.routes = self.routes.nest(path, router);
        self
    }

    /// The full router with tracing and request-id layers applied.
    pub fn router(&self) -> Router<()> {
        self.routes.clone().layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(%addr, services = ?self.app.service_names(), "listening");
        axum::serve(listener, self.router()).await?;
        Ok(())
    }

    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }
}

pub fn axum<R, P>(app: HotelApp<R, P>) -> AxumApp<R, P>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    AxumApp::new(app)
}
