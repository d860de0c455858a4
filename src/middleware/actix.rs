//! Actix Web middleware adapter.
//!
//! # Example
//!
//! ```rust,no_run
//! use measurement_protocol::{Hit, MeasurementClient, Options};
//! use measurement_protocol::middleware::actix::Pageviews;
//! use std::sync::Arc;
//!
//! let client = Arc::new(MeasurementClient::new(Options::new()).unwrap());
//! let template = Hit { tracking_id: Some("UA-XXXX-Y".into()), ..Hit::default() };
//! let app = actix_web::App::new().wrap(Pageviews::new(client, template));
//! ```

use crate::{Hit, MeasurementClient, RequestContext};

use actix_service::{Service, Transform};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::Error;
use std::future::{ready, Ready};
use std::sync::Arc;

/// Actix Web middleware that sends a pageview for every request.
pub struct Pageviews {
    client: Arc<MeasurementClient>,
    template: Arc<Hit>,
}

impl Pageviews {
    pub fn new(client: Arc<MeasurementClient>, template: Hit) -> Self {
        Self {
            client,
            template: Arc::new(template),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Pageviews
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = PageviewsService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PageviewsService {
            service,
            client: Arc::clone(&self.client),
            template: Arc::clone(&self.template),
        }))
    }
}

pub struct PageviewsService<S> {
    service: S,
    client: Arc<MeasurementClient>,
    template: Arc<Hit>,
}

impl<S, B> Service<ServiceRequest> for PageviewsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let remote_addr = req.peer_addr().map(|addr| addr.ip().to_string());
        let ctx = RequestContext::from_headers(req.path(), remote_addr, |name| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        });

        if let Err(e) = self.client.send_one_from_request(&ctx, &self.template) {
            tracing::warn!(error = %e, path = %ctx.path, "pageview not sent");
        }

        self.service.call(req)
    }
}
