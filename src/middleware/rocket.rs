//! Rocket fairing adapter.
//!
//! # Example
//!
//! ```rust,no_run
//! use measurement_protocol::{Hit, MeasurementClient, Options};
//! use measurement_protocol::middleware::rocket::PageviewFairing;
//! use std::sync::Arc;
//!
//! let client = Arc::new(MeasurementClient::new(Options::new()).unwrap());
//! let template = Hit { tracking_id: Some("UA-XXXX-Y".into()), ..Hit::default() };
//! let rocket = rocket::build().attach(PageviewFairing::new(client, template));
//! ```

use crate::{Hit, MeasurementClient, RequestContext};

use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Data, Request};
use std::sync::Arc;

/// Rocket fairing that sends a pageview for every request.
pub struct PageviewFairing {
    client: Arc<MeasurementClient>,
    template: Hit,
}

impl PageviewFairing {
    pub fn new(client: Arc<MeasurementClient>, template: Hit) -> Self {
        Self { client, template }
    }
}

#[rocket::async_trait]
impl Fairing for PageviewFairing {
    fn info(&self) -> Info {
        Info {
            name: "Measurement Protocol Pageviews",
            kind: Kind::Request,
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        let remote_addr = req.client_ip().map(|ip| ip.to_string());
        let ctx = RequestContext::from_headers(req.uri().path().to_string(), remote_addr, |name| {
            req.headers().get_one(name).map(|v| v.to_string())
        });

        if let Err(e) = self.client.send_one_from_request(&ctx, &self.template) {
            tracing::warn!(error = %e, path = %ctx.path, "pageview not sent");
        }
    }
}
