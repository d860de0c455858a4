//! Axum middleware adapter (Tower Layer/Service).
//!
//! The peer address is read from `ConnectInfo<SocketAddr>`, so serve the
//! router with `into_make_service_with_connect_info::<SocketAddr>()` to
//! populate `uip`.
//!
//! # Example
//!
//! ```rust,no_run
//! use measurement_protocol::{Hit, MeasurementClient, Options};
//! use measurement_protocol::middleware::axum::PageviewLayer;
//! use axum::Router;
//! use std::sync::Arc;
//!
//! let client = Arc::new(MeasurementClient::new(Options::new()).unwrap());
//! let template = Hit { tracking_id: Some("UA-XXXX-Y".into()), ..Hit::default() };
//! let app: Router = Router::new().layer(PageviewLayer::new(client, template));
//! ```

use crate::{Hit, MeasurementClient, RequestContext};

use axum::body::Body;
use axum::extract::ConnectInfo;
use http::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;
use tower_layer::Layer;

/// Tower Layer that sends a pageview for every request.
#[derive(Clone)]
pub struct PageviewLayer {
    client: Arc<MeasurementClient>,
    template: Arc<Hit>,
}

impl PageviewLayer {
    pub fn new(client: Arc<MeasurementClient>, template: Hit) -> Self {
        Self {
            client,
            template: Arc::new(template),
        }
    }
}

impl<S> Layer<S> for PageviewLayer {
    type Service = PageviewService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PageviewService {
            inner,
            client: Arc::clone(&self.client),
            template: Arc::clone(&self.template),
        }
    }
}

#[derive(Clone)]
pub struct PageviewService<S> {
    inner: S,
    client: Arc<MeasurementClient>,
    template: Arc<Hit>,
}

impl<S> Service<Request<Body>> for PageviewService<S>
where
    S: Service<Request<Body>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let remote_addr = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());
        let ctx = RequestContext::from_headers(req.uri().path(), remote_addr, |name| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        });

        if let Err(e) = self.client.send_one_from_request(&ctx, &self.template) {
            tracing::warn!(error = %e, path = %ctx.path, "pageview not sent");
        }

        self.inner.call(req)
    }
}
