use crate::encode::encode_batch;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::request::{build_from_request, ClientIdGenerator, RandomClientId, RequestContext};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Hit, Options};

use std::sync::Arc;

/// Fire-and-forget Measurement Protocol client.
///
/// Every send validates and encodes synchronously, then hands the payload
/// to a detached thread. Validation errors are returned to the caller;
/// transport failures are logged and dropped, never retried.
///
/// Each send starts its own OS thread, which lives until the POST finishes
/// or the transport times out (5s by default). Under the middleware adapters
/// that is one thread per inbound request, with no cap when the collector
/// is slow.
pub struct MeasurementClient {
    endpoint: Endpoint,
    transport: Arc<dyn Transport>,
    ids: Box<dyn ClientIdGenerator>,
    debug: bool,
}

impl MeasurementClient {
    /// Create a client using the default `ureq` transport.
    pub fn new(opts: Options) -> Result<Self> {
        let endpoint = Endpoint::parse(&opts.endpoint)?;
        let transport = UreqTransport::new(opts.timeout, opts.content_type);
        Ok(Self {
            endpoint,
            transport: Arc::new(transport),
            ids: Box::new(RandomClientId),
            debug: opts.debug,
        })
    }

    /// Replace the transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the client ID generator used by [`send_one_from_request`](Self::send_one_from_request).
    pub fn with_client_ids(mut self, ids: impl ClientIdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Validate and send one hit to the collection endpoint.
    pub fn send_one(&self, hit: &Hit) -> Result<()> {
        self.send_batch(std::slice::from_ref(hit))
    }

    /// Validate and send hits as one request. A single hit goes to the
    /// collection endpoint, more than one to the batch endpoint. If any
    /// hit is invalid nothing is sent.
    pub fn send_batch(&self, hits: &[Hit]) -> Result<()> {
        let body = encode_batch(hits)?;
        let url = self.endpoint.for_count(hits.len()).to_string();
        self.dispatch(url, body, hits.len());
        Ok(())
    }

    /// Derive a hit from `ctx`, apply `overrides`, and send it as a single hit.
    pub fn send_one_from_request(&self, ctx: &RequestContext, overrides: &Hit) -> Result<()> {
        let hit = build_from_request(ctx, overrides, self.ids.as_ref());
        self.send_one(&hit)
    }

    fn dispatch(&self, url: String, body: String, hits: usize) {
        tracing::debug!(%url, hits, bytes = body.len(), "dispatching measurement payload");
        if self.debug {
            tracing::debug!(payload = %body, "encoded payload");
        }

        let transport = Arc::clone(&self.transport);
        let spawned = std::thread::Builder::new()
            .name("measurement-dispatch".to_string())
            .spawn(move || match transport.send(&url, &body) {
                Ok(()) => tracing::debug!(%url, hits, "measurement payload delivered"),
                Err(e) => tracing::warn!(%url, hits, error = %e, "measurement payload dropped"),
            });

        // The handle is dropped, detaching the thread.
        if let Err(e) = spawned {
            tracing::warn!(error = %e, hits, "failed to spawn dispatch thread, payload dropped");
        }
    }
}
